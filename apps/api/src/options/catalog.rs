//! Reference data — default option catalogs and the quotation pool.
//!
//! Loaded once at startup and shared read-only through `Arc<ReferenceData>`.

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use crate::models::options::OptionKind;
use crate::models::quote::Quote;

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub positive_traits: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub quotes: Vec<Quote>,
}

/// Response shape of the options endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultOptions {
    pub positive_traits: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ReferenceData {
    pub fn default_options(&self) -> DefaultOptions {
        DefaultOptions {
            positive_traits: self.positive_traits.clone(),
            weaknesses: self.weaknesses.clone(),
            suggestions: self.suggestions.clone(),
        }
    }
}

pub async fn load_reference_data(pool: &PgPool) -> Result<ReferenceData, sqlx::Error> {
    let data = ReferenceData {
        positive_traits: load_defaults(pool, OptionKind::PositiveTrait).await?,
        weaknesses: load_defaults(pool, OptionKind::Weakness).await?,
        suggestions: load_defaults(pool, OptionKind::Suggestion).await?,
        quotes: sqlx::query_as::<_, Quote>(
            "SELECT id, text, author, category FROM quotes ORDER BY created_at, id",
        )
        .fetch_all(pool)
        .await?,
    };

    info!(
        "Reference data loaded: {} traits, {} weaknesses, {} suggestions, {} quotes",
        data.positive_traits.len(),
        data.weaknesses.len(),
        data.suggestions.len(),
        data.quotes.len()
    );
    Ok(data)
}

async fn load_defaults(pool: &PgPool, kind: OptionKind) -> Result<Vec<String>, sqlx::Error> {
    let sql = format!(
        "SELECT {col} FROM {table} WHERE is_default AND user_id IS NULL ORDER BY created_at, id",
        col = kind.column(),
        table = kind.table()
    );
    sqlx::query_scalar::<_, String>(&sql).fetch_all(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReferenceData {
        ReferenceData {
            positive_traits: vec!["認真負責".to_string(), "樂於助人".to_string()],
            weaknesses: vec!["上課易分心".to_string()],
            suggestions: vec!["多發言".to_string()],
            quotes: vec![],
        }
    }

    #[test]
    fn test_default_options_keep_catalog_order() {
        let options = sample().default_options();
        assert_eq!(options.positive_traits, vec!["認真負責", "樂於助人"]);
        assert_eq!(options.weaknesses, vec!["上課易分心"]);
        assert_eq!(options.suggestions, vec!["多發言"]);
    }

    #[test]
    fn test_default_options_serialize_camel_case() {
        let value = serde_json::to_value(sample().default_options()).unwrap();
        assert!(value["positiveTraits"].is_array());
        assert!(value["weaknesses"].is_array());
        assert!(value["suggestions"].is_array());
    }
}
