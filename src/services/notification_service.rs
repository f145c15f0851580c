//! Notificaciones
//!
//! Los eventos del ciclo de vida de las reservas se encolan en un canal
//! acotado y una tarea en segundo plano los persiste con `viewed = false`.
//! La entrega es best-effort: con el canal lleno o cerrado el mensaje se
//! descarta y queda registrado en el log.

use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, info, warn};

use crate::models::driver_route::DriverRoute;
use crate::models::location_point::LocationPoint;
use crate::models::notification::{NewNotification, Notification};
use crate::models::passenger_booking::PassengerBooking;
use crate::observability::metrics::Metrics;
use crate::repositories::NotificationRepository;
use crate::utils::errors::AppResult;

#[derive(Debug, Clone)]
pub struct NotificationMessage {
    pub user_id: i64,
    pub message: String,
    pub link: String,
    pub data: Value,
}

impl NotificationMessage {
    /// Aviso al conductor: un pasajero pidió asiento
    pub fn driver_request(
        route: &DriverRoute,
        booking: &PassengerBooking,
        passenger_name: &str,
        passenger_photo: &str,
        drop_off_point: Option<&LocationPoint>,
    ) -> Self {
        let mut passenger_booking = json!(booking);
        passenger_booking["drop_off_point"] = json!(drop_off_point);

        Self {
            user_id: route.driver_user_id,
            message: format!("{} requested a seat on your ride", passenger_name),
            link: format!("/driver-routes/{}", route.id),
            data: json!({
                "type": "driver-request",
                "driver_route": route,
                "passenger_data": {
                    "name": passenger_name,
                    "photo": passenger_photo,
                    "passenger_booking": passenger_booking,
                },
            }),
        }
    }

    /// Eco al pasajero de su propia solicitud
    pub fn passenger_request(booking: &PassengerBooking) -> Self {
        Self {
            user_id: booking.passenger_user_id,
            message: "Your seat request was sent to the driver".to_string(),
            link: format!("/passenger-bookings/{}", booking.id),
            data: json!({
                "type": "passenger-request",
                "passenger_booking": booking,
            }),
        }
    }

    /// Aviso al pasajero de un cambio de estado de su reserva
    pub fn booking_status_changed(booking: &PassengerBooking, status_label: &str) -> Self {
        Self {
            user_id: booking.passenger_user_id,
            message: format!("Your booking is now {}", status_label),
            link: format!("/passenger-bookings/{}", booking.id),
            data: json!({
                "type": "booking-status",
                "booking_status": status_label,
                "passenger_booking": booking,
            }),
        }
    }
}

/// Extremo emisor del canal de notificaciones
#[derive(Clone)]
pub struct NotificationSink {
    tx: mpsc::Sender<NotificationMessage>,
    metrics: Metrics,
}

impl NotificationSink {
    pub fn channel(capacity: usize, metrics: Metrics) -> (Self, mpsc::Receiver<NotificationMessage>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx, metrics }, rx)
    }

    /// Encola sin esperar; nunca falla hacia el llamador
    pub fn emit(&self, message: NotificationMessage) {
        let user_id = message.user_id;

        match self.tx.try_send(message) {
            Ok(()) => {
                debug!("📨 Notificación encolada para usuario {}", user_id);
                self.metrics.notifications_total.with_label_values(&["queued"]).inc();
            }
            Err(TrySendError::Full(_)) => {
                warn!("⚠️ Cola de notificaciones llena, descartada la del usuario {}", user_id);
                self.metrics.notifications_total.with_label_values(&["dropped"]).inc();
            }
            Err(TrySendError::Closed(_)) => {
                warn!("⚠️ Dispatcher de notificaciones detenido, descartada la del usuario {}", user_id);
                self.metrics.notifications_total.with_label_values(&["dropped"]).inc();
            }
        }
    }
}

pub async fn persist(
    repository: &dyn NotificationRepository,
    message: NotificationMessage,
) -> AppResult<Notification> {
    repository
        .create(NewNotification {
            user_id: message.user_id,
            message: message.message,
            link: message.link,
            data: message.data,
            viewed: false,
        })
        .await
}

/// Tarea de fondo: persiste cada mensaje hasta que se cierra el canal
pub async fn run_notification_dispatcher(
    repository: Arc<dyn NotificationRepository>,
    mut rx: mpsc::Receiver<NotificationMessage>,
    metrics: Metrics,
) {
    info!("📬 Dispatcher de notificaciones iniciado");

    while let Some(message) = rx.recv().await {
        let user_id = message.user_id;
        match persist(repository.as_ref(), message).await {
            Ok(notification) => {
                debug!("✅ Notificación {} guardada para usuario {}", notification.id, user_id);
                metrics.notifications_total.with_label_values(&["persisted"]).inc();
            }
            Err(err) => {
                error!("❌ No se pudo guardar la notificación del usuario {}: {}", user_id, err);
                metrics.notifications_total.with_label_values(&["failed"]).inc();
            }
        }
    }

    warn!("📭 Dispatcher de notificaciones detenido: canal cerrado");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;

    fn message(user_id: i64) -> NotificationMessage {
        NotificationMessage {
            user_id,
            message: "hello".to_string(),
            link: "/x".to_string(),
            data: json!({"type": "test"}),
        }
    }

    #[tokio::test]
    async fn test_dispatcher_persists_unviewed() {
        let store = Arc::new(MemoryStore::new());
        let metrics = Metrics::new();
        let (sink, rx) = NotificationSink::channel(8, metrics.clone());

        sink.emit(message(4));
        sink.emit(message(4));
        drop(sink);

        run_notification_dispatcher(store.clone(), rx, metrics.clone()).await;

        let stored = NotificationRepository::list_for_user(store.as_ref(), 4, true).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|n| !n.viewed));
        assert_eq!(metrics.notifications_total.with_label_values(&["persisted"]).get(), 2);
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_error() {
        let metrics = Metrics::new();
        let (sink, _rx) = NotificationSink::channel(1, metrics.clone());

        sink.emit(message(1));
        sink.emit(message(1));

        assert_eq!(metrics.notifications_total.with_label_values(&["queued"]).get(), 1);
        assert_eq!(metrics.notifications_total.with_label_values(&["dropped"]).get(), 1);
    }
}
