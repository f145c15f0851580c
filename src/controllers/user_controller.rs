//! Controlador de usuarios y autenticación

use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::user_dto::{RegisterUserRequest, UpdateUserRequest, UserProfileResponse};
use crate::middleware::CallerIdentity;
use crate::models::reference::ReferenceKind;
use crate::models::user::{NewUser, User, UserProfileUpdate};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};
use crate::utils::jwt::generate_token;

pub struct UserController {
    state: AppState,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    async fn check_reference(&self, kind: ReferenceKind, id: Option<i64>, field: &str) -> AppResult<()> {
        if let Some(id) = id {
            if self.state.repos.references.find_by_id(kind, id).await?.is_none() {
                return Err(validation_error(field, "reference does not exist"));
            }
        }
        Ok(())
    }

    /// Alta de usuario con contraseña hasheada y foto por defecto
    pub async fn register(&self, request: RegisterUserRequest) -> AppResult<User> {
        request.validate()?;

        if self.state.repos.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict(format!("email '{}' already registered", request.email)));
        }

        self.check_reference(ReferenceKind::Department, request.department_id, "department_id")
            .await?;
        self.check_reference(ReferenceKind::JobTitle, request.job_title_id, "job_title_id")
            .await?;

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando contraseña: {}", e)))?;

        let photo = request
            .photo
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| self.state.config.default_photo.clone());

        let user = self
            .state
            .repos
            .users
            .create(NewUser {
                username: request.username,
                email: request.email,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
                mobile_number: request.mobile_number,
                about: request.about,
                photo: Some(photo),
                license_number: request.license_number,
                employee_id: request.employee_id,
                department_id: request.department_id,
                job_title_id: request.job_title_id,
                vaccinated: request.vaccinated,
                vaccination_details: request.vaccination_details,
            })
            .await?;

        info!("👤 Usuario {} registrado ({})", user.id, user.email);
        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let user = self
            .state
            .repos
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(format!("usuario '{}' no encontrado", request.email)))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))?;

        if !valid {
            warn!("🔒 Contraseña incorrecta para {}", request.email);
            return Err(AppError::Unauthorized("credenciales inválidas".to_string()));
        }

        let jwt_config = self.state.jwt_config();
        let token = generate_token(user.id, &jwt_config)?;

        info!("🔑 Login de usuario {}", user.id);
        Ok(LoginResponse::bearer(token, jwt_config.expiration, user))
    }

    pub async fn index(&self) -> AppResult<Vec<User>> {
        self.state.repos.users.list().await
    }

    pub async fn show(&self, id: i64) -> AppResult<Option<User>> {
        self.state.repos.users.find_by_id(id).await
    }

    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> AppResult<User> {
        request.validate()?;

        self.state
            .repos
            .users
            .update_profile(
                id,
                UserProfileUpdate {
                    about: request.about,
                    vaccinated: request.vaccinated,
                    vaccination_details: request.vaccination_details,
                },
            )
            .await?
            .ok_or_else(|| not_found_error("User", id))
    }

    pub async fn destroy(&self, id: i64) -> AppResult<()> {
        if !self.state.repos.users.soft_delete(id).await? {
            return Err(not_found_error("User", id));
        }
        info!("🗑️ Usuario {} eliminado", id);
        Ok(())
    }

    pub async fn current(&self, caller: CallerIdentity) -> AppResult<User> {
        self.state
            .repos
            .users
            .find_by_id(caller.user_id)
            .await?
            .ok_or_else(|| not_found_error("User", caller.user_id))
    }

    /// Perfil con etiquetas de departamento/puesto y URL de la foto
    pub async fn profile(&self, caller: CallerIdentity) -> AppResult<UserProfileResponse> {
        let user = self.current(caller).await?;
        self.state.presenter().user_profile(user).await
    }
}
