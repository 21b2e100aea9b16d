//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

/// Generic `{success, message}` response used by the contact endpoint and
/// every error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a success response.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Create a failure response.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Health and readiness probe response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Probe status ("healthy" or "ready").
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_response_serialize() {
        let json = serde_json::to_value(MessageResponse::success("Email sent successfully")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Email sent successfully");

        let json = serde_json::to_value(MessageResponse::failure("nope")).unwrap();
        assert_eq!(json["success"], false);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse {
            status: "healthy".to_string(),
            service: "contact-form-api".to_string(),
            version: "1.0.0".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "contact-form-api");
        assert_eq!(json["version"], "1.0.0");
    }
}
