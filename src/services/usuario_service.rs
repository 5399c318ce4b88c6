use crate::dto::usuario_dto::{CreateUsuarioPayload, UpdateUsuarioPayload, UsuarioListQuery};
use crate::error::{Error, Result};
use crate::models::usuario::Usuario;
use sqlx::{PgPool, Postgres, QueryBuilder};

const USUARIO_COLUMNS: &str =
    "id, nombre, apellido, email, telefono, activo, fecha_creacion, fecha_actualizacion";

#[derive(Clone)]
pub struct UsuarioService {
    pool: PgPool,
}

impl UsuarioService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Duplicate emails surface as a database error from the unique index;
    /// no pre-check is done here.
    pub async fn create(&self, payload: CreateUsuarioPayload) -> Result<Usuario> {
        let usuario = sqlx::query_as::<_, Usuario>(&format!(
            "INSERT INTO usuarios (nombre, apellido, email, telefono, activo)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USUARIO_COLUMNS}"
        ))
        .bind(&payload.nombre)
        .bind(&payload.apellido)
        .bind(&payload.email)
        .bind(&payload.telefono)
        .bind(payload.activo.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(usuario)
    }

    pub async fn list(&self, query: UsuarioListQuery) -> Result<Vec<Usuario>> {
        let mut builder = Self::list_query(&query);
        let usuarios = builder
            .build_query_as::<Usuario>()
            .fetch_all(&self.pool)
            .await?;
        Ok(usuarios)
    }

    /// Optional filters are ANDed together; with no filters every row
    /// matches. `tramites = N` selects usuarios owning exactly N trámites.
    fn list_query(query: &UsuarioListQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {USUARIO_COLUMNS} FROM usuarios WHERE TRUE"
        ));

        if let Some(activo) = query.activo {
            builder.push(" AND activo = ").push_bind(activo);
        }
        if let Some(nombre) = &query.nombre {
            builder
                .push(" AND nombre ILIKE ")
                .push_bind(format!("%{}%", nombre));
        }
        if let Some(tramites) = query.tramites {
            builder
                .push(" AND (SELECT COUNT(*) FROM tramites t WHERE t.usuario_id = usuarios.id) = ")
                .push_bind(tramites);
        }

        builder.push(" ORDER BY id");
        builder
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Usuario> {
        let usuario = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {USUARIO_COLUMNS} FROM usuarios WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Usuario no encontrado".to_string()))?;

        Ok(usuario)
    }

    pub async fn update(&self, id: i32, payload: UpdateUsuarioPayload) -> Result<Usuario> {
        self.get_by_id(id).await?;

        let usuario = sqlx::query_as::<_, Usuario>(&format!(
            "UPDATE usuarios
             SET
                nombre = COALESCE($2, nombre),
                apellido = COALESCE($3, apellido),
                email = COALESCE($4, email),
                telefono = COALESCE($5, telefono),
                activo = COALESCE($6, activo),
                fecha_actualizacion = NOW()
             WHERE id = $1
             RETURNING {USUARIO_COLUMNS}"
        ))
        .bind(id)
        .bind(&payload.nombre)
        .bind(&payload.apellido)
        .bind(&payload.email)
        .bind(&payload.telefono)
        .bind(payload.activo)
        .fetch_one(&self.pool)
        .await?;

        Ok(usuario)
    }

    /// Hard delete; owned trámites go with the row via the FK cascade.
    pub async fn delete(&self, id: i32) -> Result<()> {
        self.get_by_id(id).await?;

        sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_without_filters_selects_everything() {
        let builder = UsuarioService::list_query(&UsuarioListQuery::default());
        let sql = builder.sql();
        assert!(sql.contains("FROM usuarios WHERE TRUE ORDER BY id"));
        assert!(!sql.contains("ILIKE"));
    }

    #[test]
    fn list_query_nombre_uses_case_insensitive_substring() {
        let query = UsuarioListQuery {
            nombre: Some("ana".to_string()),
            ..Default::default()
        };
        let builder = UsuarioService::list_query(&query);
        assert!(builder.sql().contains("nombre ILIKE $1"));
    }

    #[test]
    fn list_query_combines_filters_with_and() {
        let query = UsuarioListQuery {
            activo: Some(true),
            nombre: Some("ana".to_string()),
            tramites: Some(2),
        };
        let builder = UsuarioService::list_query(&query);
        let sql = builder.sql();
        assert!(sql.contains("activo = $1"));
        assert!(sql.contains("nombre ILIKE $2"));
        assert!(sql.contains("SELECT COUNT(*) FROM tramites"));
        assert!(sql.contains("= $3"));
    }
}
