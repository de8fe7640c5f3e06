//! Review Generation — orchestrates a single generation request.
//!
//! Flow: build_review_prompt → TextGenerator::complete → extract_used_quotes.
//! Persistence is left to the caller so the same pipeline serves preview.
//! Exactly one completion call per request; retry behaviour lives in the
//! client's `RetryPolicy`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::quote::{Quote, QuoteRef};
use crate::models::review::NewReview;
use crate::review::prompt_builder::build_review_prompt;
use crate::review::quote_usage::{extract_used_quotes, QuoteMatcher};

/// Length window requested from the model, in characters. Not enforced.
pub const REVIEW_MIN_CHARS: usize = 180;
pub const REVIEW_MAX_CHARS: usize = 200;

/// Request body for generate and preview.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReviewRequest {
    pub student_name: String,
    pub positive_traits: Vec<String>,
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub impressive_points: Option<String>,
    pub suggestions: Vec<String>,
}

/// Output of the pipeline, before persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReview {
    pub review: String,
    pub used_quotes: Vec<QuoteRef>,
}

/// Runs prompt construction, the completion call and quote extraction.
pub async fn generate_review(
    llm: &dyn TextGenerator,
    matcher: &dyn QuoteMatcher,
    quote_pool: &[Quote],
    request: &GenerateReviewRequest,
) -> Result<GeneratedReview, AppError> {
    let prompt = build_review_prompt(request, quote_pool);
    debug!(
        "Review prompt built: system={} chars, user={} chars, pool={} quotes",
        prompt.system.chars().count(),
        prompt.user.chars().count(),
        quote_pool.len()
    );

    let review = llm.complete(&prompt.messages()).await?;

    let length = review.chars().count();
    if !(REVIEW_MIN_CHARS..=REVIEW_MAX_CHARS).contains(&length) {
        warn!(
            "Generated review is {length} chars, outside {REVIEW_MIN_CHARS}-{REVIEW_MAX_CHARS} (model {})",
            llm.model()
        );
    }

    let used_quotes: Vec<QuoteRef> = extract_used_quotes(&review, quote_pool, matcher)
        .into_iter()
        .map(QuoteRef::from)
        .collect();

    info!(
        "Generated review for '{}': {} chars, {} quotes used",
        request.student_name,
        length,
        used_quotes.len()
    );

    Ok(GeneratedReview {
        review,
        used_quotes,
    })
}

/// Combines the request and its output into the record to persist.
pub fn to_new_review(
    owner_id: Uuid,
    request: GenerateReviewRequest,
    generated: &GeneratedReview,
) -> NewReview {
    NewReview {
        owner_id,
        student_name: request.student_name,
        positive_traits: request.positive_traits,
        weaknesses: request.weaknesses,
        impressive_points: request.impressive_points.unwrap_or_default(),
        suggestions: request.suggestions,
        generated_review: generated.review.clone(),
        used_quotes: generated.used_quotes.clone(),
    }
}
