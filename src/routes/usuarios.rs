use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::usuario_dto::{
        CreateUsuarioPayload, MensajeResponse, UpdateUsuarioPayload, UsuarioListQuery,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/usuarios",
    params(
        ("activo" = Option<bool>, Query, description = "Filter by active flag"),
        ("nombre" = Option<String>, Query, description = "Case-insensitive substring match on nombre"),
        ("tramites" = Option<i64>, Query, description = "Filter by owned trámite count")
    ),
    responses(
        (status = 200, description = "List of usuarios")
    )
)]
#[axum::debug_handler]
pub async fn list_usuarios(
    State(state): State<AppState>,
    Query(query): Query<UsuarioListQuery>,
) -> Result<impl IntoResponse> {
    let usuarios = state.usuario_service.list(query).await?;
    Ok(Json(usuarios))
}

#[utoipa::path(
    get,
    path = "/usuarios/{id}",
    params(
        ("id" = i32, Path, description = "Usuario ID")
    ),
    responses(
        (status = 200, description = "Usuario found"),
        (status = 404, description = "Usuario not found")
    )
)]
#[axum::debug_handler]
pub async fn get_usuario(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let usuario = state.usuario_service.get_by_id(id).await?;
    Ok(Json(usuario))
}

#[utoipa::path(
    post,
    path = "/usuarios",
    request_body = CreateUsuarioPayload,
    responses(
        (status = 201, description = "Usuario created"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_usuario(
    State(state): State<AppState>,
    Json(payload): Json<CreateUsuarioPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let usuario = state.usuario_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(usuario)))
}

#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    params(
        ("id" = i32, Path, description = "Usuario ID")
    ),
    request_body = UpdateUsuarioPayload,
    responses(
        (status = 200, description = "Usuario updated"),
        (status = 404, description = "Usuario not found")
    )
)]
#[axum::debug_handler]
pub async fn update_usuario(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUsuarioPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let usuario = state.usuario_service.update(id, payload).await?;
    Ok(Json(usuario))
}

#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    params(
        ("id" = i32, Path, description = "Usuario ID")
    ),
    responses(
        (status = 200, description = "Usuario deleted"),
        (status = 404, description = "Usuario not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_usuario(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    state.usuario_service.delete(id).await?;
    Ok(Json(MensajeResponse {
        mensaje: "Usuario eliminado".to_string(),
    }))
}
