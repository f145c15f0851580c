//! Sobre JSON de todas las respuestas
//!
//! `{ "<clave>": payload, "response_text": "...", "response_code": 200 }`.
//! La clave del payload depende del recurso (`driver_routes`,
//! `passenger_bookings`, ...) y se omite en las respuestas sin payload.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug)]
pub struct ApiResponse<T> {
    key: Option<&'static str>,
    data: Option<T>,
    response_text: String,
    response_code: StatusCode,
}

impl<T> ApiResponse<T> {
    pub fn ok(key: &'static str, data: T, response_text: impl Into<String>) -> Self {
        Self {
            key: Some(key),
            data: Some(data),
            response_text: response_text.into(),
            response_code: StatusCode::OK,
        }
    }

    /// Payload `null` (lecturas que no encuentran nada)
    pub fn maybe(key: &'static str, data: Option<T>, response_text: impl Into<String>) -> Self {
        Self {
            key: Some(key),
            data,
            response_text: response_text.into(),
            response_code: StatusCode::OK,
        }
    }
}

impl ApiResponse<()> {
    /// Respuesta sin payload (borrados)
    pub fn message(response_text: impl Into<String>) -> Self {
        Self {
            key: None,
            data: None,
            response_text: response_text.into(),
            response_code: StatusCode::OK,
        }
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.key.is_some() { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;

        if let Some(key) = self.key {
            map.serialize_entry(key, &self.data)?;
        }
        map.serialize_entry("response_text", &self.response_text)?;
        map.serialize_entry("response_code", &self.response_code.as_u16())?;
        map.end()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.response_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let response = ApiResponse::ok("driver_routes", vec![1, 2], "Driver Routes retrieved successfully.");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "driver_routes": [1, 2],
                "response_text": "Driver Routes retrieved successfully.",
                "response_code": 200
            })
        );
    }

    #[test]
    fn test_missing_payload_is_null_and_message_has_no_key() {
        let missing: ApiResponse<i64> = ApiResponse::maybe("cars", None, "Car retrieved successfully.");
        assert_eq!(serde_json::to_value(&missing).unwrap()["cars"], serde_json::Value::Null);

        let deleted = serde_json::to_value(ApiResponse::message("Car deleted successfully.")).unwrap();
        assert_eq!(deleted.as_object().unwrap().len(), 2);
    }
}
