use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct Health {
    pub status: &'static str,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = Health)),
    tag = "Health"
)]
pub async fn health_check() -> Json<Health> {
    Json(Health { status: "ok" })
}
