use super::types::{LlmError, LlmProvider, LlmResponse};
use crate::shared::config::LlmConfig;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

/// OpenAI провайдер (и совместимые API через `api_endpoint`)
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiProvider {
    /// Создать новый OpenAI провайдер
    pub fn new(api_key: String, model: String, temperature: f64, max_tokens: i32) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self::with_client_config(config, model, temperature, max_tokens)
    }

    /// Создать с кастомным endpoint (для совместимых API)
    pub fn new_with_endpoint(
        api_endpoint: String,
        api_key: String,
        model: String,
        temperature: f64,
        max_tokens: i32,
    ) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_endpoint);
        Self::with_client_config(config, model, temperature, max_tokens)
    }

    fn with_client_config(
        config: OpenAIConfig,
        model: String,
        temperature: f64,
        max_tokens: i32,
    ) -> Self {
        Self {
            client: Client::with_config(config),
            model,
            temperature: temperature as f32,
            max_tokens: max_tokens.max(1) as u32,
        }
    }

    /// Собрать провайдер из секции `[llm]` конфигурации
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        if !config.provider.eq_ignore_ascii_case("openai") {
            return Err(LlmError::UnsupportedProvider(config.provider.clone()));
        }
        let api_key = config.resolved_api_key().ok_or_else(|| {
            LlmError::NotConfigured(format!(
                "set {} or llm.api_key in config.toml",
                crate::shared::config::API_KEY_ENV
            ))
        })?;

        let provider = match config.api_endpoint.as_deref().filter(|e| !e.is_empty()) {
            Some(endpoint) => Self::new_with_endpoint(
                endpoint.to_string(),
                api_key,
                config.model.clone(),
                config.temperature,
                config.max_tokens,
            ),
            None => Self::new(
                api_key,
                config.model.clone(),
                config.temperature,
                config.max_tokens,
            ),
        };
        Ok(provider)
    }

    /// Запрос из одного пользовательского сообщения с промптом
    fn build_request(&self, prompt: &str) -> Result<CreateChatCompletionRequest, LlmError> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))?;
        let messages: Vec<ChatCompletionRequestMessage> = vec![message.into()];

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&self.model)
            .messages(messages);

        if Self::supports_advanced_params(&self.model) {
            request_builder
                .temperature(self.temperature)
                .max_completion_tokens(self.max_tokens);
        }

        request_builder
            .build()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))
    }

    /// Проверяет, поддерживает ли модель расширенные параметры (temperature, max_tokens)
    ///
    /// GPT-5 и o1/o3 модели принимают только дефолтный temperature.
    fn supports_advanced_params(model_id: &str) -> bool {
        let is_restricted = model_id.starts_with("gpt-5")
            || model_id.starts_with("o1-")
            || model_id.starts_with("o3-");

        !is_restricted
    }
}

/// Разобрать текст ошибки клиента в типизированную ошибку
fn classify_error(err_str: String) -> LlmError {
    let lower = err_str.to_lowercase();
    if lower.contains("401") || lower.contains("authentication") {
        LlmError::AuthError(err_str)
    } else if lower.contains("429") || lower.contains("rate limit") {
        LlmError::RateLimitExceeded
    } else {
        LlmError::ApiError(err_str)
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let request = self.build_request(prompt)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| classify_error(e.to_string()))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| LlmError::ApiError("No response from API".to_string()))?;

        Ok(LlmResponse {
            content: choice.message.content.clone().unwrap_or_default(),
            tokens_used: response.usage.as_ref().map(|u| u.total_tokens as i32),
            model: response.model.clone(),
            finish_reason: choice.finish_reason.as_ref().map(|r| format!("{:?}", r)),
        })
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config(provider: &str, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            provider: provider.to_string(),
            api_endpoint: None,
            api_key: api_key.map(str::to_string),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 4096,
        }
    }

    #[test]
    fn test_unsupported_provider() {
        let result = OpenAiProvider::from_config(&llm_config("anthropic", Some("key")));
        assert!(matches!(result, Err(LlmError::UnsupportedProvider(p)) if p == "anthropic"));
    }

    #[test]
    fn test_from_config_keeps_model() {
        let provider = OpenAiProvider::from_config(&llm_config("OpenAI", Some("sk-test"))).unwrap();
        assert_eq!(provider.model_name(), "gpt-4o-mini");
        assert_eq!(provider.provider_name(), "OpenAI");
    }

    #[test]
    fn test_request_is_single_user_message() {
        let provider = OpenAiProvider::from_config(&llm_config("openai", Some("sk-test"))).unwrap();
        let request = provider.build_request("document this").unwrap();
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 1);
        assert!(matches!(
            request.messages[0],
            ChatCompletionRequestMessage::User(_)
        ));
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_completion_tokens, Some(4096));
    }

    #[test]
    fn test_restricted_model_request_omits_sampling_params() {
        let mut config = llm_config("openai", Some("sk-test"));
        config.model = "o1-mini".to_string();
        let provider = OpenAiProvider::from_config(&config).unwrap();
        let request = provider.build_request("document this").unwrap();
        assert_eq!(request.temperature, None);
        assert_eq!(request.max_completion_tokens, None);
    }

    #[test]
    fn test_restricted_models() {
        assert!(OpenAiProvider::supports_advanced_params("gpt-4o-mini"));
        assert!(!OpenAiProvider::supports_advanced_params("gpt-5-mini"));
        assert!(!OpenAiProvider::supports_advanced_params("o1-preview"));
    }

    #[test]
    fn test_classify_error() {
        assert!(matches!(
            classify_error("HTTP 401 Unauthorized".to_string()),
            LlmError::AuthError(_)
        ));
        assert!(matches!(
            classify_error("Rate limit reached for requests".to_string()),
            LlmError::RateLimitExceeded
        ));
        assert!(matches!(
            classify_error("connection reset".to_string()),
            LlmError::ApiError(_)
        ));
    }
}
