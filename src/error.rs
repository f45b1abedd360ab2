use thiserror::Error;

// =========================================================
// Error kinds
// =========================================================

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Network failure, no response at all.
    Transport,
    /// 401: session rejected by the server
    Unauthorized,
    /// Any other non-2xx response.
    Status,
    /// 2xx response whose body does not match the expected shape.
    Decode,
    /// The request could not be built (bad base URL, unserializable payload).
    Encode,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Transport => "NETWORK_ERROR",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Status => "HTTP_ERROR",
            ApiErrorKind::Decode => "RESPONSE_PARSE_ERROR",
            ApiErrorKind::Encode => "REQUEST_BUILD_ERROR",
        }
    }
}

// =========================================================
// Core error type
// =========================================================

/// Failure of a single API call.
///
/// `Display` is the human-readable message that stores keep in their
/// `error` field.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network Error: {0}")]
    Transport(String),

    #[error("Request failed with status code 401")]
    Unauthorized { body: String },

    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Could not build request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Maps a non-2xx response.
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 401 {
            ApiError::Unauthorized { body }
        } else {
            ApiError::Status { status, body }
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Transport(_) => ApiErrorKind::Transport,
            ApiError::Unauthorized { .. } => ApiErrorKind::Unauthorized,
            ApiError::Status { .. } => ApiErrorKind::Status,
            ApiError::Decode(_) => ApiErrorKind::Decode,
            ApiError::Encode(_) => ApiErrorKind::Encode,
        }
    }

    /// HTTP status, when the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ApiErrorKind::Unauthorized
    }

    pub fn error_code(&self) -> &'static str {
        self.kind().error_code()
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::Encode(format!("invalid URL: {}", e))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
