//! Data Transfer Objects - request/response types for the HTTP surface.

use serde::{Deserialize, Serialize};

/// Fields submitted by the create-post form.
///
/// Missing fields decode as empty strings; nothing is validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub body: String,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `"ok"` or `"unavailable"`.
    pub store: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_default_to_empty() {
        let form: CreatePostForm = serde_json::from_str(r#"{"title":"T"}"#).unwrap();
        assert_eq!(form.title, "T");
        assert!(form.link.is_empty());
        assert!(form.body.is_empty());
    }
}
