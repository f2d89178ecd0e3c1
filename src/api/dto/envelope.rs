//! The JSON envelope shared by every AJAX response.

use serde::Serialize;

/// `{"success": bool, "data": ...}`; `data` is omitted when there is none.
///
/// ```json
/// { "success": true, "data": { "available": true, "html": "<div ...>" } }
/// { "success": false, "data": { "message": "Domain name is invalid." } }
/// { "success": false }
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }

    pub fn failure_with(data: T) -> Self {
        Self {
            success: false,
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn failure() -> Self {
        Self {
            success: false,
            data: None,
        }
    }
}

/// Payload of a failure that has something to tell the user.
#[derive(Debug, Serialize)]
pub struct MessageData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_omits_data() {
        let value = serde_json::to_value(Envelope::failure()).unwrap();
        assert_eq!(value, json!({ "success": false }));
    }

    #[test]
    fn test_success_wraps_data() {
        let value = serde_json::to_value(Envelope::success(json!({ "html": "<p></p>" }))).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["html"], "<p></p>");
    }
}
