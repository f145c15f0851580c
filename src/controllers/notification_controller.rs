use serde_json::json;
use validator::Validate;

use crate::dto::notification_dto::CreateNotificationRequest;
use crate::middleware::CallerIdentity;
use crate::models::notification::{NewNotification, Notification};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppResult};

pub struct NotificationController {
    state: AppState,
}

impl NotificationController {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    pub async fn index(&self) -> AppResult<Vec<Notification>> {
        self.state.repos.notifications.list_all().await
    }

    pub async fn show(&self, id: i64) -> AppResult<Option<Notification>> {
        self.state.repos.notifications.find_by_id(id).await
    }

    /// Alta directa; `user_id = 0` la dirige al usuario autenticado
    pub async fn store(
        &self,
        caller: CallerIdentity,
        request: CreateNotificationRequest,
    ) -> AppResult<Notification> {
        request.validate()?;

        let target = if request.user_id == 0 { caller.user_id } else { request.user_id };
        let user = self
            .state
            .repos
            .users
            .find_by_id(target)
            .await?
            .ok_or_else(|| validation_error("user_id", "user does not exist"))?;

        self.state
            .repos
            .notifications
            .create(NewNotification {
                user_id: user.id,
                message: request.message,
                link: request.link,
                data: request.data.unwrap_or_else(|| json!({})),
                viewed: request.viewed,
            })
            .await
    }

    pub async fn update(&self, id: i64, viewed: bool) -> AppResult<Notification> {
        self.state
            .repos
            .notifications
            .mark_viewed(id, viewed)
            .await?
            .ok_or_else(|| not_found_error("Notification", id))
    }

    pub async fn destroy(&self, id: i64) -> AppResult<()> {
        if !self.state.repos.notifications.delete(id).await? {
            return Err(not_found_error("Notification", id));
        }
        Ok(())
    }

    /// Notificaciones del usuario, las más recientes primero
    pub async fn for_user(&self, caller: CallerIdentity, unread_only: bool) -> AppResult<Vec<Notification>> {
        self.state
            .repos
            .notifications
            .list_for_user(caller.user_id, unread_only)
            .await
    }
}
