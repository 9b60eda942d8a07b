use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::content::{ContentType, MovieDetails};

#[derive(Debug, Clone)]
pub struct NewWishlistEntry {
    pub user_id: Uuid,
    pub movie_id: i64,
    pub content_type: ContentType,
    pub movie_details: MovieDetails,
}

/// One saved title; unique per (user, movie id, content type).
#[derive(Debug, Clone)]
pub struct WishlistEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub movie_id: i64,
    pub content_type: ContentType,
    pub movie_details: MovieDetails,
    pub added_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
pub(crate) struct WishlistEntryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub movie_id: i64,
    pub content_type: String,
    pub movie_details: Json<MovieDetails>,
    pub added_at: OffsetDateTime,
}

impl TryFrom<WishlistEntryRow> for WishlistEntry {
    type Error = sqlx::Error;

    fn try_from(r: WishlistEntryRow) -> Result<Self, Self::Error> {
        let content_type = r
            .content_type
            .parse::<ContentType>()
            .map_err(|_| sqlx::Error::Decode(format!("unknown content type {}", r.content_type).into()))?;
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            movie_id: r.movie_id,
            content_type,
            movie_details: r.movie_details.0,
            added_at: r.added_at,
        })
    }
}
