use axum::{http::StatusCode, Json};
use contracts::usecases::common::{usecase_result, UseCaseError, UseCaseMetadata};
use contracts::usecases::u601_generate_docs::{
    prompt, GenerateDocs, GenerateDocsInfo, GenerateDocsRequest, GenerateDocsResponse,
};

use crate::shared::llm;
use crate::usecases::u601_generate_docs;

/// GET /api/u601/info
pub async fn u601_info() -> Json<GenerateDocsInfo> {
    Json(GenerateDocsInfo {
        usecase: GenerateDocs::info(),
        max_input_tokens: prompt::MAX_INPUT_TOKENS,
        instruction_prefix: prompt::INSTRUCTION_PREFIX.to_string(),
    })
}

/// POST /api/u601/generate-docs
pub async fn u601_generate_docs(
    Json(request): Json<GenerateDocsRequest>,
) -> Result<Json<GenerateDocsResponse>, (StatusCode, Json<UseCaseError>)> {
    let provider = llm::provider().map_err(|e| {
        tracing::error!("u601: {}", e);
        error_response(UseCaseError::not_configured(e.to_string()))
    })?;

    u601_generate_docs::generate_docs(provider.as_ref(), request)
        .await
        .map(Json)
        .map_err(error_response)
}

fn error_response(err: UseCaseError) -> (StatusCode, Json<UseCaseError>) {
    (status_for(&err), Json(err))
}

/// HTTP статус по коду ошибки UseCase
fn status_for(err: &UseCaseError) -> StatusCode {
    match err.code.as_str() {
        usecase_result::CODE_VALIDATION => StatusCode::UNPROCESSABLE_ENTITY,
        usecase_result::CODE_EXTERNAL => StatusCode::BAD_GATEWAY,
        usecase_result::CODE_NOT_CONFIGURED => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
