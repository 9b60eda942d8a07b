use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::content::{validate_movie_id, ContentType, MovieDetails};
use crate::error::{AppError, AppResult};
use crate::reviews::repo_types::{NewReview, Review};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub movie_id: i64,
    pub content_type: String,
    pub rating: i64,
    pub comment: String,
    pub movie_details: MovieDetails,
}

impl CreateReviewRequest {
    pub fn validate(self, user_id: Uuid) -> AppResult<NewReview> {
        validate_movie_id(self.movie_id)?;
        let content_type = self.content_type.parse::<ContentType>()?;
        if !(1..=5).contains(&self.rating) {
            return Err(AppError::Validation("Rating must be between 1 and 5".into()));
        }
        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(AppError::Validation("Comment is required".into()));
        }
        self.movie_details.validate()?;

        Ok(NewReview {
            user_id,
            movie_id: self.movie_id,
            content_type,
            rating: self.rating as i16,
            comment: comment.to_string(),
            movie_details: self.movie_details,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewAuthor {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user: ReviewAuthor,
    pub movie_id: i64,
    pub content_type: ContentType,
    pub rating: i16,
    pub comment: String,
    pub movie_details: MovieDetails,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            user: ReviewAuthor {
                id: r.user_id,
                username: r.username,
            },
            movie_id: r.movie_id,
            content_type: r.content_type,
            rating: r.rating,
            comment: r.comment,
            movie_details: r.movie_details,
            created_at: r.created_at,
        }
    }
}
