use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The three selectable option catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    PositiveTrait,
    Weakness,
    Suggestion,
}

impl OptionKind {
    pub const ALL: [OptionKind; 3] = [
        OptionKind::PositiveTrait,
        OptionKind::Weakness,
        OptionKind::Suggestion,
    ];

    pub fn table(self) -> &'static str {
        match self {
            OptionKind::PositiveTrait => "positive_trait_options",
            OptionKind::Weakness => "weakness_options",
            OptionKind::Suggestion => "suggestion_options",
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            OptionKind::PositiveTrait => "trait",
            OptionKind::Weakness => "weakness",
            OptionKind::Suggestion => "suggestion",
        }
    }

    /// Column width of the value column.
    pub fn max_len(self) -> usize {
        match self {
            OptionKind::Suggestion => 200,
            _ => 100,
        }
    }
}

/// A row from any of the option tables, with the value column aliased to `value`.
/// `user_id` is `None` for global defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OptionRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub value: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// A private option as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOption {
    pub id: Uuid,
    pub value: String,
}

impl From<OptionRow> for CustomOption {
    fn from(row: OptionRow) -> Self {
        CustomOption {
            id: row.id,
            value: row.value,
        }
    }
}
