use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::User;
use crate::utils::validation::deserialize_optional_id;

/// Request de registro (también usado por el alta de admin en `/users`)
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub first_name: String,

    #[validate(length(min = 1))]
    pub last_name: String,

    #[validate(length(min = 1))]
    pub mobile_number: String,

    #[validate(length(max = 255))]
    pub about: Option<String>,

    pub photo: Option<String>,
    pub license_number: Option<String>,

    #[validate(length(min = 1))]
    pub employee_id: String,

    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub department_id: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub job_title_id: Option<i64>,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    pub vaccinated: bool,
    pub vaccination_details: Option<String>,
}

/// Campos editables del perfil
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(max = 255))]
    pub about: Option<String>,
    pub vaccinated: bool,
    pub vaccination_details: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
    #[serde(flatten)]
    pub user: User,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title_name: Option<String>,
    pub user_photo: String,
}
