use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::content::ContentType;
use crate::db::{map_constraint_violation, StoreResult};
use crate::reviews::repo_types::{NewReview, Review, ReviewRow};

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn create(&self, new: NewReview) -> StoreResult<Review>;

    /// Reviews of one title, newest first.
    async fn list_for_content(
        &self,
        movie_id: i64,
        content_type: ContentType,
    ) -> StoreResult<Vec<Review>>;
}

#[derive(Clone)]
pub struct PgReviewStore {
    db: PgPool,
}

impl PgReviewStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn create(&self, new: NewReview) -> StoreResult<Review> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            WITH inserted AS (
                INSERT INTO reviews (id, user_id, movie_id, content_type, rating, comment, movie_details)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, user_id, movie_id, content_type, rating, comment, movie_details, created_at
            )
            SELECT i.id, i.user_id, u.username, i.movie_id, i.content_type, i.rating,
                   i.comment, i.movie_details, i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.movie_id)
        .bind(new.content_type.as_str())
        .bind(new.rating)
        .bind(&new.comment)
        .bind(Json(&new.movie_details))
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_constraint_violation(e, &[]))?;
        Ok(Review::try_from(row)?)
    }

    async fn list_for_content(
        &self,
        movie_id: i64,
        content_type: ContentType,
    ) -> StoreResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT r.id, r.user_id, u.username, r.movie_id, r.content_type, r.rating,
                   r.comment, r.movie_details, r.created_at
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.movie_id = $1 AND r.content_type = $2
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(movie_id)
        .bind(content_type.as_str())
        .fetch_all(&self.db)
        .await?;
        let reviews = rows
            .into_iter()
            .map(Review::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reviews)
    }
}
