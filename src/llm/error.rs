//! LLM error types with HTTP status classification.

/// Error from a generative-text call.
#[derive(Debug)]
pub struct LlmError {
    /// The kind of error
    pub kind: LlmErrorKind,
    /// HTTP status code, if applicable
    pub status_code: Option<u16>,
    /// Error message
    pub message: String,
}

impl LlmError {
    /// Create an error from a non-success HTTP response.
    pub fn from_status(status_code: u16, message: String) -> Self {
        Self {
            kind: classify_http_status(status_code),
            status_code: Some(status_code),
            message,
        }
    }

    /// Create a network error (connect failure, timeout).
    pub fn network_error(message: String) -> Self {
        Self {
            kind: LlmErrorKind::NetworkError,
            status_code: None,
            message,
        }
    }

    /// Create a parse error for an unreadable provider envelope.
    pub fn parse_error(message: String) -> Self {
        Self {
            kind: LlmErrorKind::ParseError,
            status_code: None,
            message,
        }
    }

    /// No API key was configured.
    pub fn not_configured(message: String) -> Self {
        Self {
            kind: LlmErrorKind::NotConfigured,
            status_code: None,
            message,
        }
    }

    /// Check if this error is transient (a later request may succeed).
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "{} (HTTP {}): {}", self.kind, code, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for LlmError {}

/// Classification of LLM errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Rate limited (429)
    RateLimited,
    /// Server error (5xx)
    ServerError,
    /// Client error (400, 401, 403, 404)
    ClientError,
    /// Network error (connection failed, timeout)
    NetworkError,
    /// Provider response envelope could not be read
    ParseError,
    /// No credentials available
    NotConfigured,
}

impl LlmErrorKind {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmErrorKind::RateLimited | LlmErrorKind::ServerError | LlmErrorKind::NetworkError
        )
    }
}

impl std::fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmErrorKind::RateLimited => write!(f, "Rate limited"),
            LlmErrorKind::ServerError => write!(f, "Server error"),
            LlmErrorKind::ClientError => write!(f, "Client error"),
            LlmErrorKind::NetworkError => write!(f, "Network error"),
            LlmErrorKind::ParseError => write!(f, "Parse error"),
            LlmErrorKind::NotConfigured => write!(f, "Not configured"),
        }
    }
}

/// Parse HTTP status code into error kind.
pub fn classify_http_status(status: u16) -> LlmErrorKind {
    match status {
        429 => LlmErrorKind::RateLimited,
        400..=499 => LlmErrorKind::ClientError,
        _ => LlmErrorKind::ServerError,
    }
}
