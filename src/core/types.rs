use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    InputNotFound,
    MalformedDocument,
    MissingRequiredField,
    IoError,
    InternalError,
}

impl ErrorCategory {
    /// Stable diagnostic code reported alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCategory::InputNotFound => "WFD-INPUT-001",
            ErrorCategory::MalformedDocument => "WFD-PARSE-001",
            ErrorCategory::MissingRequiredField => "WFD-FIELD-001",
            ErrorCategory::IoError => "WFD-IO-001",
            ErrorCategory::InternalError => "WFD-INTERNAL-001",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
