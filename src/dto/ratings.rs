use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRatingRequest {
    pub product_id: Uuid,
    pub rating: i16,
}
