use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::orders::{OrderConfirmation, PlaceOrderRequest},
    error::AppResult,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(place_order))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderConfirmation),
        (status = 400, description = "Empty cart or missing customer fields"),
        (status = 409, description = "Order number collision, retry"),
    ),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderConfirmation>)> {
    let resp = order_service::place_order(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
