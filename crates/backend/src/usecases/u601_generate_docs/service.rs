use contracts::usecases::common::{UseCaseError, UseCaseResult};
use contracts::usecases::u601_generate_docs::{
    prompt, GenerateDocsRequest, GenerateDocsResponse, Language,
};
use std::time::Instant;
use uuid::Uuid;

use crate::shared::llm::{LlmError, LlmProvider};

/// Сгенерировать документацию для кода одним запросом к провайдеру.
///
/// Проверки входа те же, что и на клиенте: заглушка, пустой текст, лимит токенов.
/// При отказе провайдер не вызывается.
pub async fn generate_docs(
    provider: &dyn LlmProvider,
    request: GenerateDocsRequest,
) -> UseCaseResult<GenerateDocsResponse> {
    let check = prompt::check_input(&request.code);
    if let Some(reason) = check.reason() {
        tracing::warn!("u601: rejected input: {}", reason);
        return Err(UseCaseError::validation(reason));
    }

    let request_id = Uuid::new_v4();
    let language = request
        .language
        .as_deref()
        .map(Language::from_label)
        .unwrap_or_default();
    tracing::info!(
        "u601 [{}]: generating docs, language={}, tokens={}, model={}",
        request_id,
        language,
        prompt::count_tokens(&request.code),
        provider.model_name()
    );

    let mut guard = InFlightGuard::new(request_id);
    let started = Instant::now();
    let result = provider.complete(&prompt::build_prompt(&request.code)).await;
    let duration_ms = started.elapsed().as_millis() as u64;
    guard.finish();

    let response = result.map_err(|e| {
        tracing::error!("u601 [{}]: provider failed after {}ms: {}", request_id, duration_ms, e);
        map_llm_error(e)
    })?;

    tracing::info!(
        "u601 [{}]: done in {}ms, tokens_used={:?}",
        request_id,
        duration_ms,
        response.tokens_used
    );

    Ok(GenerateDocsResponse {
        request_id,
        content: response.content,
        model: response.model,
        tokens_used: response.tokens_used,
        finish_reason: response.finish_reason,
        duration_ms,
        generated_at: chrono::Utc::now(),
    })
}

fn map_llm_error(err: LlmError) -> UseCaseError {
    match err {
        LlmError::NotConfigured(_) | LlmError::UnsupportedProvider(_) => {
            UseCaseError::not_configured(err.to_string())
        }
        other => UseCaseError::external("completion service failed").with_details(other.to_string()),
    }
}

/// Пишет в лог, если future запроса был сброшен до получения ответа
/// (клиент отменил fetch и axum закрыл соединение).
struct InFlightGuard {
    request_id: Uuid,
    finished: bool,
}

impl InFlightGuard {
    fn new(request_id: Uuid) -> Self {
        Self {
            request_id,
            finished: false,
        }
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if !self.finished {
            tracing::info!("u601 [{}]: cancelled by client", self.request_id);
        }
    }
}
