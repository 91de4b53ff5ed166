use async_trait::async_trait;
use thiserror::Error;

/// Ошибки LLM провайдера
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("LLM provider is not configured: {0}")]
    NotConfigured(String),

    #[error("Provider not supported: {0}")]
    UnsupportedProvider(String),
}

/// Ответ от LLM
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub tokens_used: Option<i32>,
    pub model: String,
    pub finish_reason: Option<String>,
}

/// Трейт для LLM провайдеров
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Один промпт одним пользовательским сообщением
    async fn complete(&self, prompt: &str) -> Result<LlmResponse, LlmError>;

    /// Получить название провайдера
    fn provider_name(&self) -> &str;

    /// Модель, на которую уходят запросы
    fn model_name(&self) -> &str;
}
