#![allow(clippy::unused_async)] // axum handlers are async even when the body never awaits

use crate::error::ControlError;
use crate::registry::ControlRegistry;
use axum::Json;
use axum::extract::{Path, Query, State};
use hugo_domain::constants::CONTROLS_TAG;
use hugo_domain::control::{Control, ControlPatch, ControlQuery, Selection};
use hugo_kernel::server::ApiState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every stored control, keyed by id.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ControlsResponse {
    pub controls: BTreeMap<i64, Control>,
}

/// The control that was just registered.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddedResponse {
    pub added: Control,
}

/// The control after the update was applied.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdatedResponse {
    pub updated: Control,
}

/// The control that was removed.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeletedResponse {
    pub deleted: Control,
}

/// Error body.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub detail: String,
}

fn registry(state: &ApiState) -> Result<&ControlRegistry, ControlError> {
    state
        .try_get_slice::<ControlRegistry>()
        .map_err(|e| ControlError::from(e).context("controls slice is not registered"))
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = OK, description = "All registered controls", body = ControlsResponse)),
    tag = CONTROLS_TAG,
)]
pub(crate) async fn list_controls(
    State(state): State<ApiState>,
) -> Result<Json<ControlsResponse>, ControlError> {
    let controls = registry(&state)?.list_all();
    Ok(Json(ControlsResponse { controls }))
}

#[utoipa::path(
    get,
    path = "/controls/{id}",
    params(("id" = i64, Path, description = "Unique integer that specifies a control.")),
    responses(
        (status = OK, description = "The requested control", body = Control),
        (status = NOT_FOUND, description = "Control not found", body = ErrorResponse),
    ),
    tag = CONTROLS_TAG,
)]
pub(crate) async fn get_control(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<Control>, ControlError> {
    registry(&state)?.get(id).map(Json)
}

#[utoipa::path(
    get,
    path = "/controls/",
    params(ControlQuery),
    responses(
        (status = OK, description = "Criteria used and the matching controls", body = Selection),
    ),
    tag = CONTROLS_TAG,
)]
pub(crate) async fn filter_controls(
    State(state): State<ApiState>,
    Query(query): Query<ControlQuery>,
) -> Result<Json<Selection>, ControlError> {
    Ok(Json(registry(&state)?.filter(query)))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = Control,
    responses(
        (status = OK, description = "Control added", body = AddedResponse),
        (status = BAD_REQUEST, description = "Control id already exists", body = ErrorResponse),
    ),
    tag = CONTROLS_TAG,
)]
pub(crate) async fn create_control(
    State(state): State<ApiState>,
    Json(control): Json<Control>,
) -> Result<Json<AddedResponse>, ControlError> {
    let added = registry(&state)?.create(control)?;
    Ok(Json(AddedResponse { added }))
}

#[utoipa::path(
    put,
    path = "/update/{id}",
    params(
        ("id" = i64, Path, description = "Unique integer that specifies a control."),
        ControlPatch,
    ),
    responses(
        (status = OK, description = "Control updated", body = UpdatedResponse),
        (status = NOT_FOUND, description = "Control not found", body = ErrorResponse),
        (status = BAD_REQUEST, description = "No arguments specified", body = ErrorResponse),
    ),
    tag = CONTROLS_TAG,
)]
pub(crate) async fn update_control(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Query(patch): Query<ControlPatch>,
) -> Result<Json<UpdatedResponse>, ControlError> {
    let updated = registry(&state)?.update(id, patch)?;
    Ok(Json(UpdatedResponse { updated }))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    params(("id" = i64, Path, description = "Unique integer that specifies a control.")),
    responses(
        (status = OK, description = "Control deleted", body = DeletedResponse),
        (status = NOT_FOUND, description = "Control not found", body = ErrorResponse),
    ),
    tag = CONTROLS_TAG,
)]
pub(crate) async fn delete_control(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>, ControlError> {
    let deleted = registry(&state)?.delete(id)?;
    Ok(Json(DeletedResponse { deleted }))
}
