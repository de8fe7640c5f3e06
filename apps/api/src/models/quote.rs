use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A quotation from the shared pool. Reference data, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Quote {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub category: Option<String>,
}

/// The `{text, author}` pair recorded on a review when a quote is echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRef {
    pub text: String,
    pub author: String,
}

impl From<&Quote> for QuoteRef {
    fn from(quote: &Quote) -> Self {
        QuoteRef {
            text: quote.text.clone(),
            author: quote.author.clone(),
        }
    }
}
