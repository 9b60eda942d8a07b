use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::content::{ContentType, MovieDetails};

#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: Uuid,
    pub movie_id: i64,
    pub content_type: ContentType,
    pub rating: i16,
    pub comment: String,
    pub movie_details: MovieDetails,
}

/// A stored review together with its author's username.
#[derive(Debug, Clone)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub movie_id: i64,
    pub content_type: ContentType,
    pub rating: i16,
    pub comment: String,
    pub movie_details: MovieDetails,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
pub(crate) struct ReviewRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub movie_id: i64,
    pub content_type: String,
    pub rating: i16,
    pub comment: String,
    pub movie_details: Json<MovieDetails>,
    pub created_at: OffsetDateTime,
}

impl TryFrom<ReviewRow> for Review {
    type Error = sqlx::Error;

    fn try_from(r: ReviewRow) -> Result<Self, Self::Error> {
        let content_type = r
            .content_type
            .parse::<ContentType>()
            .map_err(|_| sqlx::Error::Decode(format!("unknown content type {}", r.content_type).into()))?;
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            username: r.username,
            movie_id: r.movie_id,
            content_type,
            rating: r.rating,
            comment: r.comment,
            movie_details: r.movie_details.0,
            created_at: r.created_at,
        })
    }
}
