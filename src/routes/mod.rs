pub mod health;
pub mod tramites;
pub mod usuarios;

use axum::{routing::get, Router};

use crate::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/usuarios",
            get(usuarios::list_usuarios).post(usuarios::create_usuario),
        )
        .route(
            "/usuarios/:id",
            get(usuarios::get_usuario)
                .put(usuarios::update_usuario)
                .delete(usuarios::delete_usuario),
        )
        .route(
            "/tramites",
            get(tramites::list_tramites).post(tramites::create_tramite),
        )
        .route(
            "/tramites/:id",
            get(tramites::get_tramite)
                .put(tramites::edit_tramite)
                .delete(tramites::delete_tramite),
        )
}
