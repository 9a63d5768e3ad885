// Ufanet API response types
//
// The shared-access endpoint returns more fields than we use; anything
// not modelled explicitly lands in `extra`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name used when the API omits `string_view`.
pub const UNKNOWN_DOORPHONE_NAME: &str = "Unknown Doorphone";

/// Numeric doorphone identifier assigned by the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoorphoneId(pub i64);

impl fmt::Display for DoorphoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for DoorphoneId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// One entry of `GET /api/v0/skud/shared`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doorphone {
    pub id: DoorphoneId,
    /// Human-readable label, e.g. "Front Gate".
    #[serde(rename = "string_view", default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Doorphone {
    /// Display name, falling back to [`UNKNOWN_DOORPHONE_NAME`].
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_DOORPHONE_NAME)
    }
}

/// Body of `GET /api/v0/skud/shared/{id}/open/`.
///
/// A missing or null `result` means the door did not open.
#[derive(Debug, Deserialize)]
pub(crate) struct OpenResponse {
    #[serde(default)]
    pub result: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn doorphone_keeps_unknown_fields() {
        let d: Doorphone = serde_json::from_value(json!({
            "id": 7,
            "string_view": "Front Gate",
            "address": "Lenina 1"
        }))
        .unwrap();
        assert_eq!(d.id, DoorphoneId(7));
        assert_eq!(d.display_name(), "Front Gate");
        assert_eq!(d.extra.get("address"), Some(&json!("Lenina 1")));
    }

    #[test]
    fn missing_name_falls_back() {
        let d: Doorphone = serde_json::from_value(json!({ "id": 3 })).unwrap();
        assert_eq!(d.display_name(), UNKNOWN_DOORPHONE_NAME);
    }

    #[test]
    fn missing_id_is_rejected() {
        let parsed = serde_json::from_value::<Doorphone>(json!({ "string_view": "Gate" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn open_result_defaults_to_none() {
        let r: OpenResponse = serde_json::from_value(json!({ "detail": "ok" })).unwrap();
        assert_eq!(r.result, None);
        let r: OpenResponse = serde_json::from_value(json!({ "result": null })).unwrap();
        assert_eq!(r.result, None);
    }
}
