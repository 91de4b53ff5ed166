use serde::{Deserialize, Serialize};

/// Результат выполнения UseCase
pub type UseCaseResult<T> = Result<T, UseCaseError>;

pub const CODE_VALIDATION: &str = "VALIDATION_ERROR";
pub const CODE_INTERNAL: &str = "INTERNAL_ERROR";
pub const CODE_EXTERNAL: &str = "EXTERNAL_ERROR";
pub const CODE_NOT_CONFIGURED: &str = "NOT_CONFIGURED";

/// Ошибка выполнения UseCase (также тело ответа при ошибке HTTP)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCaseError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl UseCaseError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(CODE_VALIDATION, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(CODE_INTERNAL, message)
    }

    pub fn external(message: impl Into<String>) -> Self {
        Self::new(CODE_EXTERNAL, message)
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(CODE_NOT_CONFIGURED, message)
    }

    pub fn is_validation(&self) -> bool {
        self.code == CODE_VALIDATION
    }
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UseCaseError {}
