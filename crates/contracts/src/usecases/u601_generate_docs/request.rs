use serde::{Deserialize, Serialize};

/// Запрос на генерацию документации
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDocsRequest {
    /// Исходный код как есть (без инструкции)
    pub code: String,

    /// Метка языка, определённая на клиенте (только для логов)
    #[serde(default)]
    pub language: Option<String>,
}

impl GenerateDocsRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}
