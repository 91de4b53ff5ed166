use contracts::usecases::common::UseCaseError;
use contracts::usecases::u601_generate_docs::{GenerateDocsRequest, GenerateDocsResponse};
use gloo_net::http::Request;
use web_sys::AbortSignal;

use crate::shared::api_utils::api_url;

const GENERATE_PATH: &str = "/api/u601/generate-docs";

/// Запросить документацию у backend.
///
/// `signal` прерывает fetch при отмене; в этом случае ошибка не важна,
/// view model отбрасывает результат по списанному токену.
pub async fn generate_docs(
    request: &GenerateDocsRequest,
    signal: &AbortSignal,
) -> Result<GenerateDocsResponse, String> {
    let response = Request::post(&api_url(GENERATE_PATH))
        .abort_signal(Some(signal))
        .json(request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(error_message(status, &body));
    }

    response
        .json::<GenerateDocsResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Текст ошибки из тела ответа: `UseCaseError`, если backend его вернул, иначе статус
fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<UseCaseError>(body) {
        Ok(err) => err.to_string(),
        Err(_) => format!("HTTP error: {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_usecase_error() {
        let body = r#"{"code":"EXTERNAL_ERROR","message":"completion service failed","details":"API error: HTTP 500"}"#;
        assert_eq!(
            error_message(502, body),
            "[EXTERNAL_ERROR] completion service failed: API error: HTTP 500"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(error_message(504, "<html>gateway</html>"), "HTTP error: 504");
    }
}
