use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUsuarioPayload {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,
    #[validate(length(min = 1, max = 100))]
    pub apellido: String,
    #[validate(length(min = 1, max = 100))]
    pub email: String,
    #[validate(length(max = 20))]
    pub telefono: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUsuarioPayload {
    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub apellido: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub telefono: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UsuarioListQuery {
    pub activo: Option<bool>,
    pub nombre: Option<String>,
    pub tramites: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MensajeResponse {
    pub mensaje: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_rejects_empty_nombre() {
        let payload = CreateUsuarioPayload {
            nombre: "".to_string(),
            apellido: "Mendez".to_string(),
            email: "ana@mail.com".to_string(),
            telefono: None,
            activo: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn create_payload_rejects_long_telefono() {
        let payload = CreateUsuarioPayload {
            nombre: "Ana".to_string(),
            apellido: "Mendez".to_string(),
            email: "ana@mail.com".to_string(),
            telefono: Some("1".repeat(21)),
            activo: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn list_query_distinguishes_false_from_true() {
        let query: UsuarioListQuery =
            serde_json::from_value(serde_json::json!({ "activo": false, "nombre": "ana" }))
                .unwrap();
        assert_eq!(query.activo, Some(false));
        assert_eq!(query.nombre.as_deref(), Some("ana"));
        assert_eq!(query.tramites, None);
    }

    #[test]
    fn list_query_all_fields_optional() {
        let query: UsuarioListQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.activo, None);
        assert_eq!(query.nombre, None);
        assert_eq!(query.tramites, None);
    }
}
