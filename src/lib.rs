pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{tramite_service::TramiteService, usuario_service::UsuarioService};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub usuario_service: UsuarioService,
    pub tramite_service: TramiteService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let usuario_service = UsuarioService::new(pool.clone());
        let tramite_service = TramiteService::new(pool.clone());

        Self {
            pool,
            usuario_service,
            tramite_service,
        }
    }
}
