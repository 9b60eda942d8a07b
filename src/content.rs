//! Catalog content identity and the metadata copied alongside reviews and
//! wishlist entries so listings never need a round-trip to TMDB or Jikan.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Tv,
    Anime,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Tv => "tv",
            ContentType::Anime => "anime",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ContentType::Movie),
            "tv" => Ok(ContentType::Tv),
            "anime" => Ok(ContentType::Anime),
            _ => Err(AppError::Validation("Invalid content type".into())),
        }
    }
}

/// Denormalized catalog details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    pub title: String,
    pub overview: String,
    pub poster_path: String,
}

impl MovieDetails {
    pub fn validate(&self) -> Result<(), AppError> {
        let blank = |s: &str| s.trim().is_empty();
        if blank(&self.title) || blank(&self.overview) || blank(&self.poster_path) {
            return Err(AppError::Validation("Missing required movie details".into()));
        }
        Ok(())
    }
}

/// Catalog ids from both TMDB and MyAnimeList are positive integers.
pub fn validate_movie_id(movie_id: i64) -> Result<(), AppError> {
    if movie_id <= 0 {
        return Err(AppError::Validation("Invalid movie id".into()));
    }
    Ok(())
}
