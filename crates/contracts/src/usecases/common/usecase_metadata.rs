use serde::{Deserialize, Serialize};

/// Метаданные UseCase для идентификации и документирования
pub trait UseCaseMetadata {
    /// Индекс UseCase (например, "u601")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "generate_docs")
    fn usecase_name() -> &'static str;

    /// Отображаемое имя для UI
    fn display_name() -> &'static str;

    /// Описание UseCase
    fn description() -> &'static str {
        ""
    }

    /// Полное имя вида "u601_generate_docs"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }

    /// Снимок метаданных для отдачи через API
    fn info() -> UseCaseInfo {
        UseCaseInfo {
            index: Self::usecase_index().to_string(),
            name: Self::usecase_name().to_string(),
            full_name: Self::full_name(),
            display_name: Self::display_name().to_string(),
            description: Self::description().to_string(),
        }
    }
}

/// Сериализуемое представление метаданных UseCase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCaseInfo {
    pub index: String,
    pub name: String,
    pub full_name: String,
    pub display_name: String,
    pub description: String,
}
