use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;

use carpool_backend::config::environment::EnvironmentConfig;
use carpool_backend::create_router;
use carpool_backend::models::user::{NewUser, User};
use carpool_backend::repositories::Repositories;
use carpool_backend::services::notification_service::NotificationMessage;
use carpool_backend::services::status_catalog::StatusCatalog;
use carpool_backend::state::AppState;
use carpool_backend::utils::jwt::generate_token;

// Ids sembrados: Open=1 Closed=2 Cancelled=3 Full=4 Completed=5; Requested=1 Approved=2 Rejected=3
const OPEN: i64 = 1;
const CLOSED: i64 = 2;
const CANCELLED: i64 = 3;
const FULL: i64 = 4;
const COMPLETED: i64 = 5;
const REQUESTED: i64 = 1;
const APPROVED: i64 = 2;
const REJECTED: i64 = 3;

struct TestApp {
    router: Router,
    state: AppState,
    notifications: mpsc::Receiver<NotificationMessage>,
}

impl TestApp {
    async fn new() -> Self {
        let repos = Repositories::in_memory();
        let catalog = StatusCatalog::load(repos.references.as_ref()).await.unwrap();
        let config = EnvironmentConfig {
            jwt_secret: "test-secret".to_string(),
            ..EnvironmentConfig::default()
        };
        let (state, notifications) = AppState::new(repos, catalog, config);

        Self {
            router: create_router(state.clone()),
            state,
            notifications,
        }
    }

    async fn user(&self, first_name: &str) -> (User, String) {
        let user = self
            .state
            .repos
            .users
            .create(NewUser {
                username: first_name.to_lowercase(),
                email: format!("{}@example.com", first_name.to_lowercase()),
                password_hash: "not-a-real-hash".to_string(),
                first_name: first_name.to_string(),
                last_name: "Tester".to_string(),
                mobile_number: "555-0100".to_string(),
                about: None,
                photo: None,
                license_number: None,
                employee_id: format!("EMP-{}", first_name),
                department_id: Some(1),
                job_title_id: Some(1),
                vaccinated: true,
                vaccination_details: None,
            })
            .await
            .unwrap();

        let token = generate_token(user.id, &self.state.jwt_config()).unwrap();
        (user, token)
    }

    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create_route(&self, token: &str, date: &str, time: &str, status_id: i64) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/driver-routes",
                Some(token),
                Some(json!({
                    "ride_date": date,
                    "ride_time": time,
                    "seat_capacity": 4,
                    "route_status_id": status_id
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["driver_routes"]["id"].as_i64().unwrap()
    }

    async fn create_point(&self, token: &str, route_id: i64, kind: &str, order: i32, description: &str) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/location-points",
                Some(token),
                Some(json!({
                    "description": description,
                    "points": 0,
                    "lat": 14.5547,
                    "long": 121.0244,
                    "type": kind,
                    "route_order": order,
                    "driver_route_id": route_id
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["location_points"]["id"].as_i64().unwrap()
    }

    async fn book(&self, token: &str, route_id: i64, pick_up_id: i64, drop_off_id: i64) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/passenger-bookings",
            Some(token),
            Some(json!({
                "driver_route_id": route_id,
                "pick_up_id": pick_up_id,
                "drop_off_id": drop_off_id,
                "booking_status_id": REQUESTED
            })),
        )
        .await
    }

    /// Ruta con recogida y destino, reservada por el pasajero
    async fn booked_route(&self, driver_token: &str, passenger_token: &str, date: &str, status_id: i64) -> (i64, i64) {
        let route_id = self.create_route(driver_token, date, "08:00", status_id).await;
        let pick_up = self.create_point(driver_token, route_id, "pickup", 1, "Main St").await;
        let drop_off = self.create_point(driver_token, route_id, "destination", 2, "Mall").await;

        let (status, body) = self.book(passenger_token, route_id, pick_up, drop_off).await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        (route_id, body["passenger_bookings"]["id"].as_i64().unwrap())
    }

    async fn set_booking_status(&self, token: &str, booking_id: i64, status_id: i64) {
        let (status, body) = self
            .send(
                Method::PUT,
                &format!("/passenger-bookings/{}", booking_id),
                Some(token),
                Some(json!({ "booking_status_id": status_id })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
    }

    async fn listed_ids(&self, uri: &str, token: &str, key: &str, field: &str) -> Vec<i64> {
        let (status, body) = self.send(Method::GET, uri, Some(token), None).await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body[key]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry[field].as_i64().unwrap())
            .collect()
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/driver-routes/user", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["response_code"], 401);

    let (status, _) = app
        .send(Method::GET, "/driver-routes/user", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reference_tables_are_public() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/departments", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["departments"][0]["department_name"], "Engineering");
    assert_eq!(body["response_text"], "Departments retrieved successfully.");
}

#[tokio::test]
async fn test_register_and_login() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/register",
            None,
            Some(json!({
                "username": "maria",
                "email": "maria@example.com",
                "first_name": "Maria",
                "last_name": "Santos",
                "mobile_number": "555-0101",
                "employee_id": "EMP-77",
                "department_id": "2",
                "password": "secret123",
                "vaccinated": true
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["users"]["photo"], "/storage/documents/default.jpg");
    assert!(body["users"].get("password_hash").is_none());

    let (status, body) = app
        .send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "email": "maria@example.com", "password": "secret123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"]["access_token"].as_str().unwrap().to_string();

    let (status, body) = app.send(Method::GET, "/user/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"]["full_name"], "Maria Santos");
    assert_eq!(body["users"]["department_name"], "Operations");

    let (status, _) = app
        .send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "email": "maria@example.com", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = TestApp::new().await;
    app.user("Ana").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/register",
            None,
            Some(json!({
                "username": "ana2",
                "email": "ANA@example.com",
                "first_name": "Ana",
                "last_name": "Again",
                "mobile_number": "555-0102",
                "employee_id": "EMP-78",
                "password": "secret123",
                "vaccinated": false
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["response_text"], "New User store error.");
}

#[tokio::test]
async fn test_booking_scenario_counts_approved_seats() {
    let mut app = TestApp::new().await;
    let (_, driver_token) = app.user("Driver").await;
    let (passenger, passenger_token) = app.user("Rider").await;

    let route_id = app.create_route(&driver_token, "2024-01-10", "08:00", OPEN).await;
    app.create_point(&driver_token, route_id, "origin", 1, "Office").await;
    let pick_up = app.create_point(&driver_token, route_id, "pickup", 2, "Main St").await;
    let drop_off = app.create_point(&driver_token, route_id, "destination", 3, "Mall").await;

    let (status, body) = app.book(&passenger_token, route_id, pick_up, drop_off).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["response_text"], "New Passenger Booking stored successfully.");
    let booking_id = body["passenger_bookings"]["id"].as_i64().unwrap();

    // Aviso al conductor y al pasajero
    let first = app.notifications.try_recv().unwrap();
    let second = app.notifications.try_recv().unwrap();
    assert_eq!(first.data["type"], "driver-request");
    assert_eq!(
        first.data["passenger_data"]["passenger_booking"]["drop_off_point"]["description"],
        "Mall"
    );
    assert_eq!(second.user_id, passenger.id);
    assert_eq!(second.data["type"], "passenger-request");

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/passenger-bookings/{}", booking_id),
            Some(&driver_token),
            Some(json!({ "booking_status_id": APPROVED })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(
            Method::GET,
            "/passenger-bookings/user?ride_date=2024-01-10&ride_time=08:00",
            Some(&passenger_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let bookings = body["passenger_bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["booking_status"], "Approved");
    assert_eq!(bookings[0]["ride_date_formatted"], "Jan 10, 2024");
    assert_eq!(bookings[0]["ride_time_formatted"], "8:00 AM");
    assert_eq!(bookings[0]["seat_approved"], 1);
    assert_eq!(bookings[0]["seat_available"], 3);
    assert_eq!(bookings[0]["pick_up_description"], "Main St");

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/passenger-bookings/driver/{}", route_id),
            Some(&driver_token),
            Some(json!({ "booking_status_id": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passenger_bookings"][0]["passenger_user_name"], "Rider Tester");
    assert_eq!(body["passenger_bookings"][0]["booking_status_name"], "Approved");
}

#[tokio::test]
async fn test_booking_with_missing_pickup_is_not_persisted() {
    let mut app = TestApp::new().await;
    let (_, driver_token) = app.user("Driver").await;
    let (_, passenger_token) = app.user("Rider").await;

    let route_id = app.create_route(&driver_token, "2024-01-10", "08:00", OPEN).await;
    let drop_off = app.create_point(&driver_token, route_id, "destination", 1, "Mall").await;

    let (status, body) = app.book(&passenger_token, route_id, 999, drop_off).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["response_text"], "New Passenger Booking store error.");
    assert_eq!(body["response_code"], 422);

    assert!(app.state.repos.bookings.list_all().await.unwrap().is_empty());
    assert!(app.notifications.try_recv().is_err());
}

#[tokio::test]
async fn test_pickup_from_another_route_is_rejected() {
    let app = TestApp::new().await;
    let (_, driver_token) = app.user("Driver").await;
    let (_, passenger_token) = app.user("Rider").await;

    let first = app.create_route(&driver_token, "2024-01-10", "08:00", OPEN).await;
    let second = app.create_route(&driver_token, "2024-01-11", "08:00", OPEN).await;
    let foreign = app.create_point(&driver_token, second, "pickup", 1, "Elsewhere").await;
    let drop_off = app.create_point(&driver_token, first, "destination", 1, "Mall").await;

    let (status, _) = app.book(&passenger_token, first, foreign, drop_off).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_search_excludes_callers_own_routes() {
    let app = TestApp::new().await;
    let (_, own_token) = app.user("Alice").await;
    let (other, other_token) = app.user("Bob").await;

    app.create_route(&own_token, "2024-01-10", "08:00", OPEN).await;
    let other_route = app.create_route(&other_token, "2024-01-10", "09:00", OPEN).await;
    app.create_route(&other_token, "2024-01-10", "10:00", CLOSED).await;

    let (status, body) = app
        .send(Method::GET, "/driver-routes/search", Some(&own_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let routes = body["driver_routes"].as_array().unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0]["id"], other_route);
    assert_eq!(routes[0]["driver_user_id"], other.id);
    assert_eq!(routes[0]["route_status"], "Open");

    let (_, body) = app
        .send(
            Method::GET,
            "/driver-routes/search?ride_date=2024-01-10&ride_time=09:30",
            Some(&own_token),
            None,
        )
        .await;
    assert!(body["driver_routes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_driver_listings_split_upcoming_and_past() {
    let app = TestApp::new().await;
    let (_, token) = app.user("Driver").await;

    let open = app.create_route(&token, "2024-01-10", "08:00", OPEN).await;
    let full = app.create_route(&token, "2024-01-11", "08:00", FULL).await;
    let closed = app.create_route(&token, "2024-01-09", "08:00", CLOSED).await;
    let completed = app.create_route(&token, "2024-01-08", "08:00", COMPLETED).await;
    app.create_route(&token, "2024-01-12", "08:00", CANCELLED).await;

    let (_, body) = app.send(Method::GET, "/driver-routes/user", Some(&token), None).await;
    let upcoming = body["driver_routes"].as_array().unwrap();
    let upcoming_ids: Vec<i64> = upcoming.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(upcoming_ids, vec![open, full]);
    assert_eq!(upcoming[0]["sequence"], 1);
    assert_eq!(upcoming[1]["route_status"], "Full");

    let (_, body) = app
        .send(Method::GET, "/driver-routes/user/past", Some(&token), None)
        .await;
    let past = body["driver_routes"].as_array().unwrap();
    let past_ids: Vec<i64> = past.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(past_ids, vec![completed, closed]);
    assert_eq!(past[0]["route_status"], "Completed");
    assert_eq!(past[1]["route_status"], "Closed");
}

#[tokio::test]
async fn test_passenger_listing_hides_cancelled_routes() {
    let app = TestApp::new().await;
    let (_, driver_token) = app.user("Driver").await;
    let (_, passenger_token) = app.user("Rider").await;

    let route_id = app.create_route(&driver_token, "2024-01-10", "08:00", OPEN).await;
    let pick_up = app.create_point(&driver_token, route_id, "pickup", 1, "Main St").await;
    let drop_off = app.create_point(&driver_token, route_id, "destination", 2, "Mall").await;
    let (status, _) = app.book(&passenger_token, route_id, pick_up, drop_off).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .send(Method::GET, "/passenger-bookings/user", Some(&passenger_token), None)
        .await;
    assert_eq!(body["passenger_bookings"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/driver-routes/{}", route_id),
            Some(&driver_token),
            Some(json!({ "route_status_id": CANCELLED })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .send(Method::GET, "/passenger-bookings/user", Some(&passenger_token), None)
        .await;
    assert!(body["passenger_bookings"].as_array().unwrap().is_empty());

    let (_, body) = app
        .send(Method::GET, "/passenger-bookings/search", Some(&passenger_token), None)
        .await;
    assert!(body["passenger_bookings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_location_points_keep_route_order() {
    let app = TestApp::new().await;
    let (user, token) = app.user("Driver").await;

    let route_id = app.create_route(&token, "2024-01-10", "08:00", OPEN).await;
    app.create_point(&token, route_id, "destination", 3, "Mall").await;
    app.create_point(&token, route_id, "origin", 1, "Office").await;
    app.create_point(&token, route_id, "pickup", 2, "Main St").await;

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/driver-routes/{}/location-points", route_id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let detail = &body["driver_route"];
    assert_eq!(detail["driver_name"], user.full_name());
    assert_eq!(detail["route_status_name"], "Open");

    let points = detail["location_points"].as_array().unwrap();
    let order: Vec<i64> = points.iter().map(|p| p["route_order"].as_i64().unwrap()).collect();
    let descriptions: Vec<&str> = points.iter().map(|p| p["description"].as_str().unwrap()).collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert_eq!(descriptions, vec!["Office", "Main St", "Mall"]);
}

#[tokio::test]
async fn test_unknown_route_detail_is_null() {
    let app = TestApp::new().await;
    let (_, token) = app.user("Driver").await;

    let (status, body) = app
        .send(Method::GET, "/driver-routes/42/location-points", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["driver_route"].is_null());
}

#[tokio::test]
async fn test_delete_returns_message_only() {
    let app = TestApp::new().await;
    let (_, token) = app.user("Driver").await;
    let route_id = app.create_route(&token, "2024-01-10", "08:00", OPEN).await;

    let (status, body) = app
        .send(Method::DELETE, &format!("/driver-routes/{}", route_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({
        "response_text": "Driver Route deleted successfully.",
        "response_code": 200
    }));

    let (_, body) = app.send(Method::GET, "/driver-routes/user", Some(&token), None).await;
    assert!(body["driver_routes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = TestApp::new().await;
    let (_, token) = app.user("Driver").await;
    app.create_route(&token, "2024-01-10", "08:00", OPEN).await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("routes_created_total 1"));
}

#[tokio::test]
async fn test_malformed_booking_body_returns_envelope() {
    let mut app = TestApp::new().await;
    let (_, driver_token) = app.user("Driver").await;
    let (_, passenger_token) = app.user("Rider").await;
    let route_id = app.create_route(&driver_token, "2024-01-10", "08:00", OPEN).await;
    let drop_off = app.create_point(&driver_token, route_id, "destination", 1, "Mall").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/passenger-bookings",
            Some(&passenger_token),
            Some(json!({
                "driver_route_id": route_id,
                "drop_off_id": drop_off,
                "booking_status_id": REQUESTED
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({
        "response_text": "New Passenger Booking store error.",
        "response_code": 422
    }));
    assert!(app.state.repos.bookings.list_all().await.unwrap().is_empty());
    assert!(app.notifications.try_recv().is_err());
}

#[tokio::test]
async fn test_malformed_route_input_returns_envelope() {
    let app = TestApp::new().await;
    let (_, token) = app.user("Driver").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/driver-routes",
            Some(&token),
            Some(json!({
                "ride_date": "10/01/2024",
                "ride_time": "08:00",
                "seat_capacity": 4,
                "route_status_id": OPEN
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["response_text"], "New Driver Route store error.");

    let (status, body) = app
        .send(Method::GET, "/driver-routes/not-a-number", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["response_text"], "Driver Route retrieve error.");
    assert_eq!(body["response_code"], 422);

    let (status, body) = app
        .send(Method::DELETE, "/departments/abc", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["response_text"], "Department delete error.");
}

#[tokio::test]
async fn test_route_status_update_with_unknown_ids_fails() {
    let app = TestApp::new().await;
    let (_, token) = app.user("Driver").await;
    let route_id = app.create_route(&token, "2024-01-10", "08:00", OPEN).await;

    let (status, body) = app
        .send(
            Method::PUT,
            "/driver-routes/999",
            Some(&token),
            Some(json!({ "route_status_id": CLOSED })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["response_text"], "Driver Route update error.");

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/driver-routes/{}", route_id),
            Some(&token),
            Some(json!({ "route_status_id": 99 })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["response_text"], "Driver Route update error.");

    let (_, body) = app
        .send(Method::GET, &format!("/driver-routes/{}", route_id), Some(&token), None)
        .await;
    assert_eq!(body["driver_routes"]["route_status_id"], OPEN);
}

#[tokio::test]
async fn test_approved_seats_follow_status_changes() {
    let app = TestApp::new().await;
    let (_, driver_token) = app.user("Driver").await;
    let (_, passenger_token) = app.user("Rider").await;
    let (_, booking_id) = app
        .booked_route(&driver_token, &passenger_token, "2024-01-10", OPEN)
        .await;

    let mut seen = Vec::new();
    for status_id in [APPROVED, REJECTED, APPROVED] {
        app.set_booking_status(&driver_token, booking_id, status_id).await;

        let (_, body) = app
            .send(Method::GET, "/passenger-bookings/user", Some(&passenger_token), None)
            .await;
        let booking = &body["passenger_bookings"][0];
        seen.push((booking["seat_approved"].as_i64().unwrap(), booking["seat_available"].as_i64().unwrap()));
    }

    assert_eq!(seen, vec![(1, 3), (0, 4), (1, 3)]);
}

#[tokio::test]
async fn test_passenger_listing_shows_only_active_routes() {
    let app = TestApp::new().await;
    let (_, driver_token) = app.user("Driver").await;
    let (_, passenger_token) = app.user("Rider").await;

    let (open_route, _) = app.booked_route(&driver_token, &passenger_token, "2024-01-10", OPEN).await;
    let (full_route, _) = app.booked_route(&driver_token, &passenger_token, "2024-01-11", FULL).await;
    app.booked_route(&driver_token, &passenger_token, "2024-01-12", CLOSED).await;
    app.booked_route(&driver_token, &passenger_token, "2024-01-13", COMPLETED).await;
    app.booked_route(&driver_token, &passenger_token, "2024-01-14", CANCELLED).await;

    let routes = app
        .listed_ids("/passenger-bookings/user", &passenger_token, "passenger_bookings", "driver_route_id")
        .await;
    assert_eq!(routes, vec![open_route, full_route]);
}

#[tokio::test]
async fn test_driver_route_bookings_filter_by_status() {
    let app = TestApp::new().await;
    let (_, driver_token) = app.user("Driver").await;
    let (_, first_token) = app.user("Rider").await;
    let (_, second_token) = app.user("Walker").await;

    let route_id = app.create_route(&driver_token, "2024-01-10", "08:00", OPEN).await;
    let pick_up = app.create_point(&driver_token, route_id, "pickup", 1, "Main St").await;
    let drop_off = app.create_point(&driver_token, route_id, "destination", 2, "Mall").await;

    let (_, body) = app.book(&first_token, route_id, pick_up, drop_off).await;
    let approved = body["passenger_bookings"]["id"].as_i64().unwrap();
    let (_, body) = app.book(&second_token, route_id, pick_up, drop_off).await;
    let requested = body["passenger_bookings"]["id"].as_i64().unwrap();
    app.set_booking_status(&driver_token, approved, APPROVED).await;

    let uri = format!("/passenger-bookings/driver/{}", route_id);
    let mut by_status = Vec::new();
    for status_id in [0, APPROVED, REQUESTED, REJECTED] {
        let (status, body) = app
            .send(Method::POST, &uri, Some(&driver_token), Some(json!({ "booking_status_id": status_id })))
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        let ids: Vec<i64> = body["passenger_bookings"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].as_i64().unwrap())
            .collect();
        by_status.push(ids);
    }

    assert_eq!(by_status[0].len(), 2);
    assert_eq!(by_status[1], vec![approved]);
    assert_eq!(by_status[2], vec![requested]);
    assert!(by_status[3].is_empty());
}

#[tokio::test]
async fn test_booking_history_survives_deleted_users_and_routes() {
    let app = TestApp::new().await;
    let (driver, driver_token) = app.user("Driver").await;
    let (passenger, passenger_token) = app.user("Rider").await;
    let (route_id, booking_id) = app
        .booked_route(&driver_token, &passenger_token, "2024-01-10", OPEN)
        .await;

    let (status, _) = app
        .send(Method::DELETE, &format!("/users/{}", passenger.id), Some(&driver_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/passenger-bookings/driver/{}", route_id),
            Some(&driver_token),
            Some(json!({ "booking_status_id": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["passenger_bookings"][0]["passenger_user_name"], "Rider Tester");

    let (_, other_token) = app.user("Auditor").await;
    let (status, _) = app
        .send(Method::DELETE, &format!("/users/{}", driver.id), Some(&other_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/driver-routes/{}/location-points", route_id),
            Some(&other_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["driver_route"]["driver_name"], "Driver Tester");

    let (status, _) = app
        .send(Method::DELETE, &format!("/driver-routes/{}", route_id), Some(&other_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/passenger-bookings/{}", booking_id),
            Some(&other_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["passenger_booking"]["driver_route"]["id"], route_id);
}
