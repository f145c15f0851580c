use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use validator::Validate;

use crate::models::reference::{ReferenceEntry, ReferenceKind};

/// Alta/edición de una entrada de referencia. Acepta el nombre de columna
/// propio de cada tabla (`route_status`, `department_name`, ...).
#[derive(Debug, Deserialize, Validate)]
pub struct ReferenceRequest {
    #[serde(
        alias = "route_status",
        alias = "booking_status",
        alias = "department_name",
        alias = "job_title"
    )]
    #[validate(length(min = 1, max = 100))]
    pub label: String,
}

/// Entrada serializada con el nombre de columna de su tabla
#[derive(Debug, Clone)]
pub struct ReferenceView {
    pub kind: ReferenceKind,
    pub entry: ReferenceEntry,
}

impl ReferenceView {
    pub fn new(kind: ReferenceKind, entry: ReferenceEntry) -> Self {
        Self { kind, entry }
    }
}

impl Serialize for ReferenceView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("id", &self.entry.id)?;
        map.serialize_entry(self.kind.label_column(), &self.entry.label)?;
        map.serialize_entry("created_at", &self.entry.created_at)?;
        map.serialize_entry("updated_at", &self.entry.updated_at)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_label_uses_table_column() {
        let view = ReferenceView::new(
            ReferenceKind::Department,
            ReferenceEntry {
                id: 3,
                label: "Finance".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["department_name"], "Finance");
        assert_eq!(value["id"], 3);
    }

    #[test]
    fn test_request_accepts_column_alias() {
        let request: ReferenceRequest = serde_json::from_str(r#"{"route_status": "Paused"}"#).unwrap();
        assert_eq!(request.label, "Paused");
    }
}
