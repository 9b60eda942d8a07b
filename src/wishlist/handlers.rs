use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::CurrentUser,
    content::ContentType,
    db::StoreError,
    error::{AppError, AppResult},
    extract::{ApiJson, ApiPath},
    state::AppState,
    wishlist::dto::{AddToWishlistRequest, MessageResponse, WishlistEntryResponse},
};

pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(list_wishlist).post(add_to_wishlist))
        .route("/wishlist/:movie_id/:content_type", delete(remove_from_wishlist))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_wishlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<WishlistEntryResponse>>> {
    let entries = state.wishlist.list_for_user(user.id).await?;
    Ok(Json(
        entries.into_iter().map(WishlistEntryResponse::from).collect(),
    ))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(payload): ApiJson<AddToWishlistRequest>,
) -> AppResult<(StatusCode, Json<WishlistEntryResponse>)> {
    let new = payload.validate(user.id)?;
    let (movie_id, content_type) = (new.movie_id, new.content_type);

    let entry = state.wishlist.add(new).await.map_err(|e| match e {
        StoreError::Duplicate(_) => {
            warn!(movie_id, %content_type, "already in wishlist");
            AppError::Conflict("Already in wishlist".into())
        }
        other => other.into(),
    })?;

    info!(movie_id, %content_type, "added to wishlist");
    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath((movie_id, content_type)): ApiPath<(i64, String)>,
) -> AppResult<Json<MessageResponse>> {
    let content_type = content_type.parse::<ContentType>()?;
    let removed = state
        .wishlist
        .remove(user.id, movie_id, content_type)
        .await?;
    if !removed {
        return Err(AppError::NotFound("Wishlist item not found".into()));
    }

    info!(movie_id, %content_type, "removed from wishlist");
    Ok(Json(MessageResponse {
        message: "Removed from wishlist successfully".into(),
    }))
}
