use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::content::ContentType;
use crate::db::{map_constraint_violation, StoreResult};
use crate::wishlist::repo_types::{NewWishlistEntry, WishlistEntry, WishlistEntryRow};

#[async_trait]
pub trait WishlistStore: Send + Sync {
    /// The user's entries, most recently added first.
    async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<WishlistEntry>>;

    /// Fails with `Duplicate` when the title is already on the user's list.
    async fn add(&self, new: NewWishlistEntry) -> StoreResult<WishlistEntry>;

    /// Returns whether an entry was removed.
    async fn remove(
        &self,
        user_id: Uuid,
        movie_id: i64,
        content_type: ContentType,
    ) -> StoreResult<bool>;
}

#[derive(Clone)]
pub struct PgWishlistStore {
    db: PgPool,
}

impl PgWishlistStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const UNIQUE_FIELDS: &[(&str, &str)] = &[("wishlist_entries_user_content_key", "wishlist entry")];

#[async_trait]
impl WishlistStore for PgWishlistStore {
    async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<WishlistEntry>> {
        let rows = sqlx::query_as::<_, WishlistEntryRow>(
            r#"
            SELECT id, user_id, movie_id, content_type, movie_details, added_at
            FROM wishlist_entries
            WHERE user_id = $1
            ORDER BY added_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        let entries = rows
            .into_iter()
            .map(WishlistEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    async fn add(&self, new: NewWishlistEntry) -> StoreResult<WishlistEntry> {
        let row = sqlx::query_as::<_, WishlistEntryRow>(
            r#"
            INSERT INTO wishlist_entries (id, user_id, movie_id, content_type, movie_details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, movie_id, content_type, movie_details, added_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.movie_id)
        .bind(new.content_type.as_str())
        .bind(Json(&new.movie_details))
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_constraint_violation(e, UNIQUE_FIELDS))?;
        Ok(WishlistEntry::try_from(row)?)
    }

    async fn remove(
        &self,
        user_id: Uuid,
        movie_id: i64,
        content_type: ContentType,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM wishlist_entries
            WHERE user_id = $1 AND movie_id = $2 AND content_type = $3
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(content_type.as_str())
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
