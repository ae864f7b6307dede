use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenSetsError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, TokenSetsError>;

/// Trim a response body so it fits in a log line or error message
pub(crate) fn snippet(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        body.to_string()
    } else {
        let cut: String = body.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_keeps_short_bodies() {
        assert_eq!(snippet("not found", 20), "not found");
    }

    #[test]
    fn snippet_cuts_on_char_boundaries() {
        assert_eq!(snippet("ééééé", 2), "éé...");
    }

    #[test]
    fn status_error_message() {
        let err = TokenSetsError::Status {
            status: 404,
            body: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "API returned status 404: missing");
    }
}
