/// Errors from the storyboard REST API layer.
///
/// Failures are reported as the transport saw them: no variant tells a
/// missing entity apart from a server fault beyond the raw status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Reading a file for upload failed before any request was sent.
    #[error("Failed to read upload file: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::Io(_) => None,
        }
    }
}

/// Convenience alias for client operation results.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = ApiError::Status {
            status: 404,
            body: r#"{"detail":"Shot not found"}"#.into(),
        };
        assert_eq!(err.to_string(), r#"API error (404): {"detail":"Shot not found"}"#);
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn request_error_display() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = ApiError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
        assert_eq!(err.status(), None);
    }
}
