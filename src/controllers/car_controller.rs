use tracing::info;
use validator::Validate;

use crate::dto::car_dto::{CreateCarRequest, UpdateCarRequest};
use crate::middleware::CallerIdentity;
use crate::models::user_car::UserCar;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppResult};

pub struct CarController {
    state: AppState,
}

impl CarController {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    pub async fn index(&self) -> AppResult<Vec<UserCar>> {
        self.state.repos.cars.list_all().await
    }

    pub async fn show(&self, id: i64) -> AppResult<Option<UserCar>> {
        self.state.repos.cars.find_by_id(id).await
    }

    pub async fn store(&self, request: CreateCarRequest) -> AppResult<UserCar> {
        request.validate()?;

        let owner = self
            .state
            .repos
            .users
            .find_by_id(request.user_id)
            .await?
            .ok_or_else(|| validation_error("user_id", "user does not exist"))?;

        let car = self.state.repos.cars.create(owner.id, request.into()).await?;
        info!("🚙 Vehículo {} ({}) registrado para el usuario {}", car.id, car.license_plate, owner.id);
        Ok(car)
    }

    pub async fn update(&self, id: i64, request: UpdateCarRequest) -> AppResult<UserCar> {
        request.validate()?;

        self.state
            .repos
            .cars
            .update(id, request.into())
            .await?
            .ok_or_else(|| not_found_error("Car", id))
    }

    pub async fn destroy(&self, id: i64) -> AppResult<()> {
        if !self.state.repos.cars.delete(id).await? {
            return Err(not_found_error("Car", id));
        }
        Ok(())
    }

    pub async fn for_user(&self, caller: CallerIdentity) -> AppResult<Vec<UserCar>> {
        self.state.repos.cars.list_for_user(caller.user_id).await
    }
}
