use thiserror::Error;

/// Errors reported by the Generative Language API in its `{"error": {...}}` body.
///
/// Every variant displays as the service's own message, without decoration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{message}")]
    InvalidArgument { message: String },

    #[error("{message}")]
    PermissionDenied { message: String },

    #[error("{message}")]
    Unauthenticated { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    ResourceExhausted { message: String },

    #[error("{message}")]
    Internal { message: String },

    #[error("{message}")]
    Unavailable { message: String },

    /// Catch-all for status tokens we don't know
    #[error("{message}")]
    Unexpected { status: String, message: String },
}

impl ServiceError {
    pub fn from_status(status: &str, message: impl Into<String>) -> Self {
        let message = message.into();

        match status {
            "INVALID_ARGUMENT" | "FAILED_PRECONDITION" => Self::InvalidArgument { message },
            "PERMISSION_DENIED" => Self::PermissionDenied { message },
            "UNAUTHENTICATED" => Self::Unauthenticated { message },
            "NOT_FOUND" => Self::NotFound { message },
            "RESOURCE_EXHAUSTED" => Self::ResourceExhausted { message },
            "INTERNAL" => Self::Internal { message },
            "UNAVAILABLE" | "DEADLINE_EXCEEDED" => Self::Unavailable { message },
            other => Self::Unexpected {
                status: other.to_string(),
                message,
            },
        }
    }
}
