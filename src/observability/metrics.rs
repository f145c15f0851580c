use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Contadores Prometheus expuestos en `/metrics`
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub bookings_total: IntCounterVec,
    pub notifications_total: IntCounterVec,
    pub routes_created_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let bookings_total = IntCounterVec::new(
            Opts::new("bookings_total", "Passenger booking requests by outcome"),
            &["outcome"],
        )
        .expect("valid bookings_total metric");

        let notifications_total = IntCounterVec::new(
            Opts::new("notifications_total", "Notifications by delivery outcome"),
            &["outcome"],
        )
        .expect("valid notifications_total metric");

        let routes_created_total =
            IntCounter::new("routes_created_total", "Driver routes published")
                .expect("valid routes_created_total metric");

        registry
            .register(Box::new(bookings_total.clone()))
            .expect("register bookings_total");
        registry
            .register(Box::new(notifications_total.clone()))
            .expect("register notifications_total");
        registry
            .register(Box::new(routes_created_total.clone()))
            .expect("register routes_created_total");

        Self {
            registry,
            bookings_total,
            notifications_total,
            routes_created_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_includes_counters() {
        let metrics = Metrics::new();
        metrics.bookings_total.with_label_values(&["created"]).inc();
        metrics.routes_created_total.inc();

        let body = metrics.encode().unwrap();
        assert!(body.contains("bookings_total{outcome=\"created\"} 1"));
        assert!(body.contains("routes_created_total 1"));
    }
}
