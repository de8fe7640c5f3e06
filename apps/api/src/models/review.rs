use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use crate::models::quote::QuoteRef;

/// Row shape of the `reviews` table. List-valued columns hold JSON text.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub student_name: String,
    pub positive_traits: String,
    pub weaknesses: String,
    pub impressive_points: String,
    pub suggestions: String,
    pub generated_review: String,
    pub used_quotes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted student review with its list fields decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub student_name: String,
    pub positive_traits: Vec<String>,
    pub weaknesses: Vec<String>,
    pub impressive_points: String,
    pub suggestions: Vec<String>,
    pub generated_review: String,
    pub used_quotes: Vec<QuoteRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to insert a review. Lists are write-once.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub owner_id: Uuid,
    pub student_name: String,
    pub positive_traits: Vec<String>,
    pub weaknesses: Vec<String>,
    pub impressive_points: String,
    pub suggestions: Vec<String>,
    pub generated_review: String,
    pub used_quotes: Vec<QuoteRef>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            owner_id: row.user_id,
            student_name: row.student_name,
            positive_traits: decode_list(&row.positive_traits, "positive_traits", row.id),
            weaknesses: decode_list(&row.weaknesses, "weaknesses", row.id),
            impressive_points: row.impressive_points,
            suggestions: decode_list(&row.suggestions, "suggestions", row.id),
            generated_review: row.generated_review,
            used_quotes: decode_list(&row.used_quotes, "used_quotes", row.id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Serializes an ordered list into the text stored in a list column.
pub fn encode_list<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Inverse of `encode_list`. A malformed column decodes to an empty list so a
/// single bad row never breaks a listing.
pub fn decode_list<T: DeserializeOwned>(raw: &str, column: &str, review_id: Uuid) -> Vec<T> {
    match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            warn!("Review {review_id}: column {column} is not a valid JSON list: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_list_round_trip_preserves_order() {
        let traits = vec!["認真負責".to_string(), "樂於助人".to_string()];
        let encoded = encode_list(&traits).unwrap();
        let decoded: Vec<String> = decode_list(&encoded, "positive_traits", Uuid::nil());
        assert_eq!(decoded, traits);
    }

    #[test]
    fn test_empty_list_round_trip() {
        let encoded = encode_list::<String>(&[]).unwrap();
        assert_eq!(encoded, "[]");
        let decoded: Vec<String> = decode_list(&encoded, "weaknesses", Uuid::nil());
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_encoded_list_keeps_cjk_unescaped() {
        let encoded = encode_list(&["多發言".to_string()]).unwrap();
        assert_eq!(encoded, r#"["多發言"]"#);
    }

    #[test]
    fn test_quote_list_round_trip() {
        let quotes = vec![QuoteRef {
            text: "失敗是成功之母".to_string(),
            author: "諺語".to_string(),
        }];
        let encoded = encode_list(&quotes).unwrap();
        let decoded: Vec<QuoteRef> = decode_list(&encoded, "used_quotes", Uuid::nil());
        assert_eq!(decoded, quotes);
    }

    #[test]
    fn test_malformed_column_decodes_to_empty() {
        let decoded: Vec<String> = decode_list("not json", "suggestions", Uuid::nil());
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_row_converts_with_decoded_lists() {
        let now = Utc::now();
        let row = ReviewRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            student_name: "小明".to_string(),
            positive_traits: r#"["認真負責","樂於助人"]"#.to_string(),
            weaknesses: r#"["上課易分心"]"#.to_string(),
            impressive_points: String::new(),
            suggestions: r#"["多發言"]"#.to_string(),
            generated_review: "小明是一位認真負責的孩子。".to_string(),
            used_quotes: "[]".to_string(),
            created_at: now,
            updated_at: now,
        };
        let owner = row.user_id;
        let review = Review::from(row);
        assert_eq!(review.owner_id, owner);
        assert_eq!(review.positive_traits, vec!["認真負責", "樂於助人"]);
        assert_eq!(review.weaknesses, vec!["上課易分心"]);
        assert!(review.used_quotes.is_empty());
    }

    #[test]
    fn test_review_serializes_camel_case() {
        let now = Utc::now();
        let review = Review {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            student_name: "小明".to_string(),
            positive_traits: vec![],
            weaknesses: vec![],
            impressive_points: String::new(),
            suggestions: vec![],
            generated_review: String::new(),
            used_quotes: vec![],
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&review).unwrap();
        assert!(value.get("studentName").is_some());
        assert!(value.get("generatedReview").is_some());
        assert!(value.get("usedQuotes").is_some());
    }
}
