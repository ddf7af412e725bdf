//! Error response body (RFC 7807 problem details).

use serde::{Deserialize, Serialize};

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `about:blank`: the status code is the problem type.
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Title used for each status the API returns.
fn title_for(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Validation Failed",
        _ => "Internal Server Error",
    }
}

impl ErrorResponse {
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title_for(status).to_string(),
            status,
            detail,
        }
    }
}
