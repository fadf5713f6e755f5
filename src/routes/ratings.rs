use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::ratings::CreateRatingRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Rating,
    services::rating_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_rating))
}

#[utoipa::path(
    post,
    path = "/api/ratings",
    request_body = CreateRatingRequest,
    responses(
        (status = 201, description = "Created rating", body = Rating),
        (status = 400, description = "Rating out of range"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Already rated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Ratings"
)]
pub async fn create_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateRatingRequest>,
) -> AppResult<(StatusCode, Json<Rating>)> {
    let rating = rating_service::create_rating(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}
