use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("[E404] The requested Todo is not found. (id={0})")]
    NotFound(String),

    #[error("[{code}] {message}")]
    BusinessRuleViolation { code: &'static str, message: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn business(code: &'static str, message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation {
            code,
            message: message.into(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_business_rule_violation(&self) -> bool {
        matches!(self, Self::BusinessRuleViolation { .. })
    }

    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::StorageError(_))
    }

    /// Message code shown to users ("E001", "E404", ...).
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E404",
            Self::BusinessRuleViolation { code, .. } => code,
            Self::StorageError(_) | Self::Internal(_) => "E500",
        }
    }
}
