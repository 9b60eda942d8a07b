use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::content::{validate_movie_id, ContentType, MovieDetails};
use crate::error::AppResult;
use crate::wishlist::repo_types::{NewWishlistEntry, WishlistEntry};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlistRequest {
    pub movie_id: i64,
    pub content_type: String,
    pub movie_details: MovieDetails,
}

impl AddToWishlistRequest {
    pub fn validate(self, user_id: Uuid) -> AppResult<NewWishlistEntry> {
        validate_movie_id(self.movie_id)?;
        let content_type = self.content_type.parse::<ContentType>()?;
        self.movie_details.validate()?;
        Ok(NewWishlistEntry {
            user_id,
            movie_id: self.movie_id,
            content_type,
            movie_details: self.movie_details,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntryResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub movie_id: i64,
    pub content_type: ContentType,
    pub movie_details: MovieDetails,
    #[serde(with = "time::serde::rfc3339")]
    pub added_at: OffsetDateTime,
}

impl From<WishlistEntry> for WishlistEntryResponse {
    fn from(e: WishlistEntry) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            movie_id: e.movie_id,
            content_type: e.content_type,
            movie_details: e.movie_details,
            added_at: e.added_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
