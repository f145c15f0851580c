use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::deserialize_id;

/// `user_id = 0` dirige la notificación al usuario autenticado
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    #[validate(length(min = 1))]
    pub message: String,
    #[validate(length(min = 1))]
    pub link: String,
    pub viewed: bool,
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: i64,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNotificationRequest {
    pub viewed: bool,
}
