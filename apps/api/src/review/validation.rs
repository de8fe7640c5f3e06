//! Input checks run before any network or persistence work.

use crate::errors::AppError;
use crate::review::generator::GenerateReviewRequest;

/// Width of the `student_name` column.
pub const MAX_STUDENT_NAME_CHARS: usize = 100;

pub fn validate_generate_request(request: &GenerateReviewRequest) -> Result<(), AppError> {
    if request.student_name.is_empty() {
        return Err(AppError::Validation("studentName cannot be empty".to_string()));
    }

    if request.student_name.chars().count() > MAX_STUDENT_NAME_CHARS {
        return Err(AppError::Validation(format!(
            "studentName must be at most {MAX_STUDENT_NAME_CHARS} characters"
        )));
    }

    if request.positive_traits.is_empty() {
        return Err(AppError::Validation(
            "positiveTraits must contain at least one entry".to_string(),
        ));
    }

    Ok(())
}

/// Replacement text for an existing review must be non-empty.
pub fn validate_review_text(text: &str) -> Result<(), AppError> {
    if text.is_empty() {
        return Err(AppError::Validation(
            "generatedReview cannot be empty".to_string(),
        ));
    }
    Ok(())
}
