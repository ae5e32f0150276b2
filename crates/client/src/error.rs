use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL cannot carry a path.
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
    /// The service answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// The request never got an answer (refused, timed out, ...).
    #[error("network error: {0}")]
    Network(String),
    /// The answer was not the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Build an HTTP error from a response body, preferring the service's
    /// `message` field.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP Error: {status}"));
        Self::Http { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_comes_from_body_when_present() {
        let err = ClientError::from_response(409, br#"{"error":"conflict","message":"store taken"}"#);
        assert_eq!(err.to_string(), "store taken");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn message_falls_back_to_status() {
        let err = ClientError::from_response(502, b"<html>bad gateway</html>");
        assert_eq!(err.to_string(), "HTTP Error: 502");

        let err = ClientError::from_response(404, b"");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP Error: 404");
    }
}
