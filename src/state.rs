//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::environment::EnvironmentConfig;
use crate::observability::metrics::Metrics;
use crate::repositories::Repositories;
use crate::services::notification_service::{NotificationMessage, NotificationSink};
use crate::services::presentation::Presenter;
use crate::services::status_catalog::StatusCatalog;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub catalog: Arc<StatusCatalog>,
    pub config: Arc<EnvironmentConfig>,
    pub notifications: NotificationSink,
    pub metrics: Metrics,
}

impl AppState {
    /// Devuelve también el receptor que consume el dispatcher de notificaciones
    pub fn new(
        repos: Repositories,
        catalog: StatusCatalog,
        config: EnvironmentConfig,
    ) -> (Self, mpsc::Receiver<NotificationMessage>) {
        let metrics = Metrics::new();
        let (notifications, notification_rx) =
            NotificationSink::channel(config.notification_queue_size, metrics.clone());

        (
            Self {
                repos,
                catalog: Arc::new(catalog),
                config: Arc::new(config),
                notifications,
                metrics,
            },
            notification_rx,
        )
    }

    pub fn presenter(&self) -> Presenter<'_> {
        Presenter::new(&self.repos, &self.catalog, &self.config)
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::from(self.config.as_ref())
    }
}
