use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::usuario::Usuario;

/// Lifecycle state of a trámite, stored as the PostgreSQL enum
/// `estado_tramite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "estado_tramite", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoTramite {
    Pendiente,
    EnProceso,
    Finalizado,
    Cancelado,
}

impl EstadoTramite {
    /// Finalized and cancelled trámites no longer accept edits.
    pub fn permits_edit(&self) -> bool {
        !matches!(self, Self::Finalizado | Self::Cancelado)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tramite {
    pub id: i32,
    pub tipo: String,
    pub descripcion: String,
    pub fecha: NaiveDate,
    pub estado: EstadoTramite,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
    pub usuario_id: i32,
}

/// A trámite together with its owning usuario. Reads always resolve the
/// association.
#[derive(Debug, Clone)]
pub struct TramiteConUsuario {
    pub tramite: Tramite,
    pub usuario: Usuario,
}
