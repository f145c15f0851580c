use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::location_point::PointType;
use crate::utils::validation::{deserialize_id, validate_coordinates};

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_point_coordinates"))]
pub struct CreateLocationPointRequest {
    #[validate(length(min = 1))]
    pub description: String,
    pub points: i32,
    pub lat: f64,
    pub long: f64,
    #[serde(rename = "type")]
    pub point_type: PointType,
    pub route_order: i32,
    #[serde(deserialize_with = "deserialize_id")]
    pub driver_route_id: i64,
}

fn validate_point_coordinates(request: &CreateLocationPointRequest) -> Result<(), ValidationError> {
    validate_coordinates(request.lat, request.long)
}

/// Solo la descripción es editable
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLocationPointRequest {
    #[validate(length(min = 1))]
    pub description: String,
}
