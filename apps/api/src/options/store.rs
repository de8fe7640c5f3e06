//! Per-user custom options. Private extensions of the default catalogs; the
//! generation flow does not read them.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::options::{CustomOption, OptionKind, OptionRow};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomOptions {
    pub positive_traits: Vec<CustomOption>,
    pub weaknesses: Vec<CustomOption>,
    pub suggestions: Vec<CustomOption>,
}

impl CustomOptions {
    pub fn of_kind_mut(&mut self, kind: OptionKind) -> &mut Vec<CustomOption> {
        match kind {
            OptionKind::PositiveTrait => &mut self.positive_traits,
            OptionKind::Weakness => &mut self.weaknesses,
            OptionKind::Suggestion => &mut self.suggestions,
        }
    }
}

#[async_trait]
pub trait CustomOptionStore: Send + Sync {
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<CustomOptions, AppError>;

    async fn add(
        &self,
        owner_id: Uuid,
        kind: OptionKind,
        value: &str,
    ) -> Result<CustomOption, AppError>;

    /// `false` when the owner has no option of this kind with this id.
    async fn delete(&self, owner_id: Uuid, kind: OptionKind, id: Uuid) -> Result<bool, AppError>;
}

/// Trims the value and checks it against the column width.
pub fn normalize_option_value(kind: OptionKind, raw: &str) -> Result<String, AppError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::Validation("value cannot be empty".to_string()));
    }
    if value.chars().count() > kind.max_len() {
        return Err(AppError::Validation(format!(
            "value must be at most {} characters",
            kind.max_len()
        )));
    }
    Ok(value.to_string())
}

pub struct PgOptionStore {
    pool: PgPool,
}

impl PgOptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomOptionStore for PgOptionStore {
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<CustomOptions, AppError> {
        let mut options = CustomOptions::default();

        for kind in OptionKind::ALL {
            let sql = format!(
                "SELECT id, user_id, {col} AS value, is_default, created_at \
                 FROM {table} WHERE user_id = $1 ORDER BY created_at, id",
                col = kind.column(),
                table = kind.table()
            );
            let rows = sqlx::query_as::<_, OptionRow>(&sql)
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;
            options
                .of_kind_mut(kind)
                .extend(rows.into_iter().map(CustomOption::from));
        }

        Ok(options)
    }

    async fn add(
        &self,
        owner_id: Uuid,
        kind: OptionKind,
        value: &str,
    ) -> Result<CustomOption, AppError> {
        let sql = format!(
            "INSERT INTO {table} (id, user_id, {col}, is_default) VALUES ($1, $2, $3, FALSE)",
            col = kind.column(),
            table = kind.table()
        );
        let id = Uuid::new_v4();
        sqlx::query(&sql)
            .bind(id)
            .bind(owner_id)
            .bind(value)
            .execute(&self.pool)
            .await?;

        info!("Added custom {kind:?} option {id} for user {owner_id}");
        Ok(CustomOption {
            id,
            value: value.to_string(),
        })
    }

    async fn delete(&self, owner_id: Uuid, kind: OptionKind, id: Uuid) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", kind.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
