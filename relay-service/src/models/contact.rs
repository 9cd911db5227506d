use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const CONTACT_ACCEPTED: &str = "Thank you for contacting us";
pub const INVALID_EMAIL: &str = "Please provide a valid email address";
pub const SERVER_CONFIGURATION_ERROR: &str = "Server configuration error";
pub const EMAIL_CONFIGURATION_ERROR: &str = "Failed to send email. Email configuration error.";
pub const EMAIL_DELIVERY_ERROR: &str = "Failed to send email. Please try again later.";

/// Permissive `local@domain.tld` shape check.
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape pattern is valid")
});

/// A contact form submission. Lives only for the duration of one request.
///
/// Absent or non-string fields read as empty strings.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "super::lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "super::lenient::text")]
    #[validate(regex(path = *EMAIL_SHAPE, message = "Please provide a valid email address"))]
    pub email: String,
    #[serde(default, deserialize_with = "super::lenient::text")]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReply {
    pub message: String,
}

impl ContactReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
