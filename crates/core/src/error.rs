use reqwest::StatusCode;

/// Failures talking to an upstream HTTP collaborator.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Transport-level failure, including timeouts.
    #[error("{0}")]
    Unreachable(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl UpstreamError {
    /// Converts a non-2xx response into an `UpstreamError::Status`, keeping the body.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Self::Status { status, body }
    }
}
