//! Review Repository — owner-scoped persistence for generated reviews.
//!
//! Every by-id operation takes the caller's id and filters on it in the query,
//! so a review owned by someone else looks exactly like a missing one.
//! Concurrent updates are last-write-wins.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::review::{encode_list, NewReview, Review, ReviewRow};

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn create(&self, review: NewReview) -> Result<Uuid, AppError>;

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Review>, AppError>;

    /// Newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Review>, AppError>;

    /// Replaces the review text. `false` when no owned review has this id.
    async fn update_text(&self, owner_id: Uuid, id: Uuid, text: &str) -> Result<bool, AppError>;

    /// `false` when no owned review has this id.
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}

pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn create(&self, review: NewReview) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let positive_traits =
            encode_list(&review.positive_traits).context("Failed to encode positive_traits")?;
        let weaknesses = encode_list(&review.weaknesses).context("Failed to encode weaknesses")?;
        let suggestions = encode_list(&review.suggestions).context("Failed to encode suggestions")?;
        let used_quotes = encode_list(&review.used_quotes).context("Failed to encode used_quotes")?;

        sqlx::query(
            r#"
            INSERT INTO reviews
                (id, user_id, student_name, positive_traits, weaknesses,
                 impressive_points, suggestions, generated_review, used_quotes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(id)
        .bind(review.owner_id)
        .bind(&review.student_name)
        .bind(&positive_traits)
        .bind(&weaknesses)
        .bind(&review.impressive_points)
        .bind(&suggestions)
        .bind(&review.generated_review)
        .bind(&used_quotes)
        .execute(&self.pool)
        .await?;

        info!("Saved review {id} for user {}", review.owner_id);
        Ok(id)
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Review>, AppError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            "SELECT * FROM reviews WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Review::from))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Review>, AppError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT * FROM reviews WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn update_text(&self, owner_id: Uuid, id: Uuid, text: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE reviews
            SET generated_review = $1, updated_at = NOW()
            WHERE id = $2 AND user_id = $3
            "#,
        )
        .bind(text)
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted review {id} for user {owner_id}");
        }
        Ok(deleted)
    }
}
