//! Request DTOs for Web API.

use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use crate::contact::ContactInput;

/// Contact form submission.
///
/// Missing and `null` fields deserialize as empty strings and are then
/// reported by the required-field checks.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContactRequest {
    /// Sender name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Sender email address.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    /// Subject line.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,
    /// Message body.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<ContactRequest> for ContactInput {
    fn from(req: ContactRequest) -> Self {
        ContactInput {
            name: req.name,
            email: req.email,
            subject: req.subject,
            message: req.message,
        }
    }
}
