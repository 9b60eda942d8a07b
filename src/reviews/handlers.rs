use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::CurrentUser,
    content::{validate_movie_id, ContentType},
    error::AppResult,
    extract::{ApiJson, ApiPath},
    reviews::dto::{CreateReviewRequest, ReviewResponse},
    state::AppState,
};

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(create_review))
        .route("/reviews/:content_type/:movie_id", get(list_reviews))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn create_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(payload): ApiJson<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ReviewResponse>)> {
    let new = payload.validate(user.id)?;
    let review = state.reviews.create(new).await?;
    info!(
        review_id = %review.id,
        movie_id = review.movie_id,
        content_type = %review.content_type,
        "review created"
    );
    Ok((StatusCode::CREATED, Json(review.into())))
}

#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    ApiPath((content_type, movie_id)): ApiPath<(String, i64)>,
) -> AppResult<Json<Vec<ReviewResponse>>> {
    let content_type = content_type.parse::<ContentType>()?;
    validate_movie_id(movie_id)?;
    let reviews = state
        .reviews
        .list_for_content(movie_id, content_type)
        .await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}
