use crate::dto::tramite_dto::{CreateTramitePayload, TramiteListQuery, UpdateTramitePayload};
use crate::error::{Error, Result};
use crate::models::tramite::{EstadoTramite, Tramite, TramiteConUsuario};
use crate::models::usuario::Usuario;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const TRAMITE_COLUMNS: &str = "id, tipo, descripcion, fecha, estado, activo, \
     fecha_creacion, fecha_actualizacion, usuario_id";

/// JOINed projection of a trámite and its owner, owner columns aliased
/// with a `u_` prefix.
const TRAMITE_CON_USUARIO_SELECT: &str = "SELECT \
     t.id, t.tipo, t.descripcion, t.fecha, t.estado, t.activo, \
     t.fecha_creacion, t.fecha_actualizacion, t.usuario_id, \
     u.nombre AS u_nombre, u.apellido AS u_apellido, u.email AS u_email, \
     u.telefono AS u_telefono, u.activo AS u_activo, \
     u.fecha_creacion AS u_fecha_creacion, u.fecha_actualizacion AS u_fecha_actualizacion \
     FROM tramites t JOIN usuarios u ON u.id = t.usuario_id";

#[derive(Debug, FromRow)]
struct TramiteRow {
    id: i32,
    tipo: String,
    descripcion: String,
    fecha: NaiveDate,
    estado: EstadoTramite,
    activo: bool,
    fecha_creacion: DateTime<Utc>,
    fecha_actualizacion: DateTime<Utc>,
    usuario_id: i32,
    u_nombre: String,
    u_apellido: String,
    u_email: String,
    u_telefono: Option<String>,
    u_activo: bool,
    u_fecha_creacion: DateTime<Utc>,
    u_fecha_actualizacion: DateTime<Utc>,
}

impl From<TramiteRow> for TramiteConUsuario {
    fn from(row: TramiteRow) -> Self {
        Self {
            tramite: Tramite {
                id: row.id,
                tipo: row.tipo,
                descripcion: row.descripcion,
                fecha: row.fecha,
                estado: row.estado,
                activo: row.activo,
                fecha_creacion: row.fecha_creacion,
                fecha_actualizacion: row.fecha_actualizacion,
                usuario_id: row.usuario_id,
            },
            usuario: Usuario {
                id: row.usuario_id,
                nombre: row.u_nombre,
                apellido: row.u_apellido,
                email: row.u_email,
                telefono: row.u_telefono,
                activo: row.u_activo,
                fecha_creacion: row.u_fecha_creacion,
                fecha_actualizacion: row.u_fecha_actualizacion,
            },
        }
    }
}

#[derive(Clone)]
pub struct TramiteService {
    pool: PgPool,
}

impl TramiteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The owner must exist before anything is written.
    pub async fn create(&self, payload: CreateTramitePayload) -> Result<TramiteConUsuario> {
        let usuario = self.find_owner(payload.usuario.id).await?;

        let tramite = sqlx::query_as::<_, Tramite>(&format!(
            "INSERT INTO tramites (tipo, descripcion, fecha, estado, activo, usuario_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {TRAMITE_COLUMNS}"
        ))
        .bind(&payload.tipo)
        .bind(&payload.descripcion)
        .bind(payload.fecha)
        .bind(payload.estado.unwrap_or(EstadoTramite::Pendiente))
        .bind(payload.activo)
        .bind(usuario.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(TramiteConUsuario { tramite, usuario })
    }

    pub async fn list(&self, query: TramiteListQuery) -> Result<Vec<TramiteConUsuario>> {
        let mut builder = Self::list_query(&query);
        let rows = builder
            .build_query_as::<TramiteRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// `estado` matches as a case-insensitive substring of the stored enum
    /// value. The date range only applies when both bounds are present;
    /// a single bound is ignored. Deactivated trámites are not filtered
    /// out here: callers pass `activo` expectations explicitly if needed.
    fn list_query(query: &TramiteListQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(format!("{TRAMITE_CON_USUARIO_SELECT} WHERE TRUE"));

        if let Some(estado) = &query.estado {
            builder
                .push(" AND t.estado::text ILIKE ")
                .push_bind(format!("%{}%", estado));
        }
        if let Some(usuario_id) = query.usuario_id {
            builder.push(" AND t.usuario_id = ").push_bind(usuario_id);
        }
        if let (Some(desde), Some(hasta)) = (query.desde, query.hasta) {
            builder.push(" AND t.fecha BETWEEN ").push_bind(desde);
            builder.push(" AND ").push_bind(hasta);
        }

        builder.push(" ORDER BY t.id");
        builder
    }

    pub async fn get_by_id(&self, id: i32) -> Result<TramiteConUsuario> {
        let row = sqlx::query_as::<_, TramiteRow>(&format!(
            "{TRAMITE_CON_USUARIO_SELECT} WHERE t.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Trámite no encontrado".to_string()))?;

        Ok(row.into())
    }

    /// Merge-update gated on the lifecycle state: finalized or cancelled
    /// trámites are rejected before anything is persisted.
    pub async fn edit(&self, id: i32, payload: UpdateTramitePayload) -> Result<TramiteConUsuario> {
        let actual = self.get_by_id(id).await?;

        if !actual.tramite.estado.permits_edit() {
            return Err(Error::InvalidState(
                "No se puede editar este trámite".to_string(),
            ));
        }

        let tramite = sqlx::query_as::<_, Tramite>(&format!(
            "UPDATE tramites
             SET
                tipo = COALESCE($2, tipo),
                descripcion = COALESCE($3, descripcion),
                fecha = COALESCE($4, fecha),
                estado = COALESCE($5, estado),
                activo = COALESCE($6, activo),
                fecha_actualizacion = NOW()
             WHERE id = $1
             RETURNING {TRAMITE_COLUMNS}"
        ))
        .bind(id)
        .bind(&payload.tipo)
        .bind(&payload.descripcion)
        .bind(payload.fecha)
        .bind(payload.estado)
        .bind(payload.activo)
        .fetch_one(&self.pool)
        .await?;

        Ok(TramiteConUsuario {
            tramite,
            usuario: actual.usuario,
        })
    }

    /// Soft delete: flips `activo` off and keeps the row.
    pub async fn soft_delete(&self, id: i32) -> Result<TramiteConUsuario> {
        let actual = self.get_by_id(id).await?;

        let tramite = sqlx::query_as::<_, Tramite>(&format!(
            "UPDATE tramites
             SET activo = FALSE, fecha_actualizacion = NOW()
             WHERE id = $1
             RETURNING {TRAMITE_COLUMNS}"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(TramiteConUsuario {
            tramite,
            usuario: actual.usuario,
        })
    }

    async fn find_owner(&self, usuario_id: i32) -> Result<Usuario> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "SELECT id, nombre, apellido, email, telefono, activo, \
             fecha_creacion, fecha_actualizacion \
             FROM usuarios WHERE id = $1",
        )
        .bind(usuario_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Usuario no encontrado".to_string()))?;

        Ok(usuario)
    }
}
