use serde::Deserialize;
use validator::Validate;

use crate::models::user_car::UserCarFields;
use crate::utils::validation::deserialize_id;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 1))]
    pub vehicle_model: String,
    #[validate(length(min = 1))]
    pub vehicle_color: String,
    #[validate(length(min = 1))]
    pub license_plate: String,
    #[validate(range(min = 1, max = 99))]
    pub seat_capacity: i32,
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(length(min = 1))]
    pub vehicle_model: String,
    #[validate(length(min = 1))]
    pub vehicle_color: String,
    #[validate(length(min = 1))]
    pub license_plate: String,
    #[validate(range(min = 1, max = 99))]
    pub seat_capacity: i32,
}

impl From<CreateCarRequest> for UserCarFields {
    fn from(request: CreateCarRequest) -> Self {
        Self {
            vehicle_model: request.vehicle_model,
            vehicle_color: request.vehicle_color,
            license_plate: request.license_plate,
            seat_capacity: request.seat_capacity,
        }
    }
}

impl From<UpdateCarRequest> for UserCarFields {
    fn from(request: UpdateCarRequest) -> Self {
        Self {
            vehicle_model: request.vehicle_model,
            vehicle_color: request.vehicle_color,
            license_plate: request.license_plate,
            seat_capacity: request.seat_capacity,
        }
    }
}
