//! Form submission payloads

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Contact form submission
///
/// Absent and `null` fields deserialize to the empty string so that every
/// missing value is reported by validation rather than by the JSON parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub first_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub last_name: String,

    /// Submitter address; format is not checked
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub message: String,
}

impl ContactSubmission {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Newsletter subscription request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewsletterSubscription {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub email: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
