//! Axum route handlers for the Review API.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::caller::CallerId;
use crate::errors::AppError;
use crate::models::quote::QuoteRef;
use crate::models::review::Review;
use crate::review::generator::{
    generate_review, to_new_review, GenerateReviewRequest, GeneratedReview,
};
use crate::review::validation::{validate_generate_request, validate_review_text};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub review: String,
    pub used_quotes: Vec<QuoteRef>,
    pub saved_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    pub generated_review: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Turns a body that failed to parse into a validation error.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// Turns a path segment that failed to parse into a validation error.
pub fn path_param<T>(param: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    param
        .map(|Path(value)| value)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// A review id that is not a UUID cannot name any record.
fn review_id(param: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AppError> {
    param.map(|Path(id)| id).map_err(|_| review_not_found())
}

fn review_not_found() -> AppError {
    AppError::NotFound("Review not found".to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/reviews/generate
///
/// Validate → generate → persist. If persistence fails the generated text is
/// not returned.
pub async fn handle_generate(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    payload: Result<Json<GenerateReviewRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let request = json_body(payload)?;
    validate_generate_request(&request)?;

    let generated = generate_review(
        state.llm.as_ref(),
        state.quote_matcher.as_ref(),
        &state.reference.quotes,
        &request,
    )
    .await?;

    let saved_id = state
        .reviews
        .create(to_new_review(caller, request, &generated))
        .await?;

    Ok(Json(GenerateResponse {
        review: generated.review,
        used_quotes: generated.used_quotes,
        saved_id,
    }))
}

/// POST /api/v1/reviews/preview
///
/// Same pipeline as generate, nothing is saved.
pub async fn handle_preview(
    State(state): State<AppState>,
    CallerId(_caller): CallerId,
    payload: Result<Json<GenerateReviewRequest>, JsonRejection>,
) -> Result<Json<GeneratedReview>, AppError> {
    let request = json_body(payload)?;
    validate_generate_request(&request)?;

    let generated = generate_review(
        state.llm.as_ref(),
        state.quote_matcher.as_ref(),
        &state.reference.quotes,
        &request,
    )
    .await?;

    Ok(Json(generated))
}

/// GET /api/v1/reviews
///
/// Newest first. An unreachable store yields an empty list.
pub async fn handle_list_reviews(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
) -> Result<Json<Vec<Review>>, AppError> {
    match state.reviews.list_by_owner(caller).await {
        Ok(reviews) => Ok(Json(reviews)),
        Err(e) if e.is_store_unavailable() => {
            warn!("Review list for {caller} degraded to empty: {e}");
            Ok(Json(Vec::new()))
        }
        Err(e) => Err(e),
    }
}

/// GET /api/v1/reviews/:id
///
/// An unreachable store reads as "no such review".
pub async fn handle_get_review(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Review>, AppError> {
    let id = review_id(id)?;
    let review = match state.reviews.get(caller, id).await {
        Ok(review) => review,
        Err(e) if e.is_store_unavailable() => {
            warn!("Review {id} lookup for {caller} degraded to not found: {e}");
            None
        }
        Err(e) => return Err(e),
    };
    review.map(Json).ok_or_else(review_not_found)
}

/// PUT /api/v1/reviews/:id
pub async fn handle_update_review(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateReviewRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let id = review_id(id)?;
    let request = json_body(payload)?;
    validate_review_text(&request.generated_review)?;

    if !state
        .reviews
        .update_text(caller, id, &request.generated_review)
        .await?
    {
        return Err(review_not_found());
    }

    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/v1/reviews/:id
pub async fn handle_delete_review(
    State(state): State<AppState>,
    CallerId(caller): CallerId,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let id = review_id(id)?;
    if !state.reviews.delete(caller, id).await? {
        return Err(review_not_found());
    }

    Ok(Json(SuccessResponse { success: true }))
}
