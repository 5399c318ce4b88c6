use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::tramite::{EstadoTramite, TramiteConUsuario};
use crate::models::usuario::Usuario;

/// Owner reference as the API receives it: `"usuario": { "id": 7 }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioRef {
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTramitePayload {
    #[validate(length(min = 1, max = 100))]
    pub tipo: String,
    pub descripcion: String,
    pub fecha: NaiveDate,
    pub estado: Option<EstadoTramite>,
    #[serde(default = "default_activo")]
    pub activo: bool,
    pub usuario: UsuarioRef,
}

fn default_activo() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTramitePayload {
    #[validate(length(min = 1, max = 100))]
    pub tipo: Option<String>,
    pub descripcion: Option<String>,
    pub fecha: Option<NaiveDate>,
    pub estado: Option<EstadoTramite>,
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TramiteListQuery {
    pub estado: Option<String>,
    pub usuario_id: Option<i32>,
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TramiteResponse {
    pub id: i32,
    pub tipo: String,
    pub descripcion: String,
    pub fecha: NaiveDate,
    pub estado: EstadoTramite,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
    pub usuario: Usuario,
}

/// Envelope returned by the soft-delete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TramiteDesactivadoResponse {
    pub mensaje: String,
    pub tramite: TramiteResponse,
}

impl From<TramiteConUsuario> for TramiteResponse {
    fn from(value: TramiteConUsuario) -> Self {
        Self {
            id: value.tramite.id,
            tipo: value.tramite.tipo,
            descripcion: value.tramite.descripcion,
            fecha: value.tramite.fecha,
            estado: value.tramite.estado,
            activo: value.tramite.activo,
            fecha_creacion: value.tramite.fecha_creacion,
            fecha_actualizacion: value.tramite.fecha_actualizacion,
            usuario: value.usuario,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_parses_usuario_ref_and_defaults() {
        let payload: CreateTramitePayload = serde_json::from_value(serde_json::json!({
            "tipo": "Multa",
            "descripcion": "Multa de tránsito",
            "fecha": "2025-05-12",
            "usuario": { "id": 7 }
        }))
        .unwrap();
        assert_eq!(payload.usuario.id, 7);
        assert!(payload.activo);
        assert!(payload.estado.is_none());
    }

    #[test]
    fn list_query_uses_camel_case_usuario_id() {
        let query: TramiteListQuery = serde_json::from_value(serde_json::json!({
            "usuarioId": 3,
            "desde": "2025-01-01"
        }))
        .unwrap();
        assert_eq!(query.usuario_id, Some(3));
        assert!(query.hasta.is_none());
    }

    #[test]
    fn response_serializes_camel_case_timestamps() {
        let value = serde_json::to_value(TramiteResponse {
            id: 1,
            tipo: "Multa".to_string(),
            descripcion: "x".to_string(),
            fecha: NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(),
            estado: EstadoTramite::Pendiente,
            activo: true,
            fecha_creacion: Utc::now(),
            fecha_actualizacion: Utc::now(),
            usuario: Usuario {
                id: 7,
                nombre: "Ana".to_string(),
                apellido: "Mendez".to_string(),
                email: "ana@mail.com".to_string(),
                telefono: None,
                activo: true,
                fecha_creacion: Utc::now(),
                fecha_actualizacion: Utc::now(),
            },
        })
        .unwrap();
        assert!(value.get("fechaCreacion").is_some());
        assert_eq!(value["estado"], "PENDIENTE");
        assert_eq!(value["usuario"]["nombre"], "Ana");
    }
}
