pub mod openai_provider;
pub mod types;

pub use types::*;

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::shared::config::LlmConfig;
use openai_provider::OpenAiProvider;

/// Единственный клиент провайдера на весь процесс
static PROVIDER: OnceCell<Arc<dyn LlmProvider>> = OnceCell::new();

/// Создать провайдер из конфигурации один раз при старте.
///
/// Ошибка конфигурации не останавливает сервер: запросы к генерации
/// будут отвечать `NotConfigured`, пока сервер не перезапущен с ключом.
pub fn initialize_provider(config: &LlmConfig) -> Result<(), LlmError> {
    let provider = OpenAiProvider::from_config(config)?;
    tracing::info!(
        "LLM provider initialized: {} / {}",
        provider.provider_name(),
        provider.model_name()
    );
    install_provider(Arc::new(provider));
    Ok(())
}

/// Установить готовый провайдер (повторная установка игнорируется)
pub fn install_provider(provider: Arc<dyn LlmProvider>) {
    if PROVIDER.set(provider).is_err() {
        tracing::warn!("LLM provider is already initialized, keeping the first one");
    }
}

/// Текущий провайдер
pub fn provider() -> Result<Arc<dyn LlmProvider>, LlmError> {
    PROVIDER
        .get()
        .cloned()
        .ok_or_else(|| LlmError::NotConfigured("provider was not initialized".to_string()))
}
