use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::tramite_dto::{
        CreateTramitePayload, TramiteDesactivadoResponse, TramiteListQuery, TramiteResponse,
        UpdateTramitePayload,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/tramites",
    params(
        ("estado" = Option<String>, Query, description = "Case-insensitive substring match on estado"),
        ("usuarioId" = Option<i32>, Query, description = "Filter by owning usuario"),
        ("desde" = Option<String>, Query, description = "Range start (applies only together with hasta)"),
        ("hasta" = Option<String>, Query, description = "Range end (applies only together with desde)")
    ),
    responses(
        (status = 200, description = "List of trámites with their owners")
    )
)]
#[axum::debug_handler]
pub async fn list_tramites(
    State(state): State<AppState>,
    Query(query): Query<TramiteListQuery>,
) -> Result<impl IntoResponse> {
    let tramites = state.tramite_service.list(query).await?;
    let items: Vec<TramiteResponse> = tramites.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/tramites/{id}",
    params(
        ("id" = i32, Path, description = "Trámite ID")
    ),
    responses(
        (status = 200, description = "Trámite found"),
        (status = 404, description = "Trámite not found")
    )
)]
#[axum::debug_handler]
pub async fn get_tramite(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let tramite = state.tramite_service.get_by_id(id).await?;
    Ok(Json(TramiteResponse::from(tramite)))
}

#[utoipa::path(
    post,
    path = "/tramites",
    request_body = CreateTramitePayload,
    responses(
        (status = 201, description = "Trámite created"),
        (status = 404, description = "Owning usuario not found")
    )
)]
#[axum::debug_handler]
pub async fn create_tramite(
    State(state): State<AppState>,
    Json(payload): Json<CreateTramitePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let tramite = state.tramite_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(TramiteResponse::from(tramite))))
}

#[utoipa::path(
    put,
    path = "/tramites/{id}",
    params(
        ("id" = i32, Path, description = "Trámite ID")
    ),
    request_body = UpdateTramitePayload,
    responses(
        (status = 200, description = "Trámite updated"),
        (status = 404, description = "Trámite not found"),
        (status = 409, description = "Trámite is finalized or cancelled")
    )
)]
#[axum::debug_handler]
pub async fn edit_tramite(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTramitePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let tramite = state.tramite_service.edit(id, payload).await?;
    Ok(Json(TramiteResponse::from(tramite)))
}

#[utoipa::path(
    delete,
    path = "/tramites/{id}",
    params(
        ("id" = i32, Path, description = "Trámite ID")
    ),
    responses(
        (status = 200, description = "Trámite deactivated"),
        (status = 404, description = "Trámite not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_tramite(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let tramite = state.tramite_service.soft_delete(id).await?;
    Ok(Json(TramiteDesactivadoResponse {
        mensaje: "Trámite desactivado".to_string(),
        tramite: TramiteResponse::from(tramite),
    }))
}
