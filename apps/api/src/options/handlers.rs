use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::caller::CallerId;
use crate::errors::AppError;
use crate::models::options::{CustomOption, OptionKind};
use crate::models::quote::Quote;
use crate::options::catalog::DefaultOptions;
use crate::options::store::{normalize_option_value, CustomOptions};
use crate::review::handlers::{json_body, path_param, SuccessResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddCustomOptionRequest {
    pub kind: OptionKind,
    pub value: String,
}

/// GET /api/v1/options
pub async fn handle_get_options(
    State(state): State<AppState>,
    CallerId(_caller): CallerId,
) -> Json<DefaultOptions> {
    Json(state.reference.default_options())
}

/// GET /api/v1/quotes
pub async fn handle_list_quotes(
    State(state): State<AppState>,
    CallerId(_caller): CallerId,
) -> Json<Vec<Quote>> {
    Json(state.reference.quotes.clone())
}

/// GET /api/v1/options/custom
pub async fn handle_list_custom_options(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
) -> Result<Json<CustomOptions>, AppError> {
    match state.custom_options.list_for_owner(caller).await {
        Ok(options) => Ok(Json(options)),
        Err(e) if e.is_store_unavailable() => {
            warn!("Custom options for {caller} degraded to empty: {e}");
            Ok(Json(CustomOptions::default()))
        }
        Err(e) => Err(e),
    }
}

/// POST /api/v1/options/custom
pub async fn handle_add_custom_option(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    payload: Result<Json<AddCustomOptionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CustomOption>), AppError> {
    let request = json_body(payload)?;
    let value = normalize_option_value(request.kind, &request.value)?;

    let option = state
        .custom_options
        .add(caller, request.kind, &value)
        .await?;

    Ok((StatusCode::CREATED, Json(option)))
}

/// DELETE /api/v1/options/custom/:kind/:id
pub async fn handle_delete_custom_option(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    param: Result<Path<(OptionKind, Uuid)>, PathRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let (kind, id) = path_param(param)?;
    if !state.custom_options.delete(caller, kind, id).await? {
        return Err(AppError::NotFound("Option not found".to_string()));
    }
    Ok(Json(SuccessResponse { success: true }))
}
