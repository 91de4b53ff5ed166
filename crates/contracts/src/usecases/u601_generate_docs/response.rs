use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::usecases::common::UseCaseInfo;

/// Ответ с документированным кодом
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDocsResponse {
    pub request_id: Uuid,

    /// Текст, полученный от модели, без изменений
    pub content: String,

    pub model: String,
    pub tokens_used: Option<i32>,
    pub finish_reason: Option<String>,

    /// Время ожидания ответа провайдера
    pub duration_ms: u64,
    pub generated_at: DateTime<Utc>,
}

/// GET /api/u601/info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDocsInfo {
    #[serde(flatten)]
    pub usecase: UseCaseInfo,
    pub max_input_tokens: usize,
    pub instruction_prefix: String,
}
