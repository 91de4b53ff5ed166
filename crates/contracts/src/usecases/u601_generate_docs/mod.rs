pub mod language;
pub mod prompt;
pub mod request;
pub mod response;

pub use language::{detect_language, Language};
pub use prompt::{build_prompt, check_input, count_tokens, InputCheck};
pub use request::GenerateDocsRequest;
pub use response::{GenerateDocsInfo, GenerateDocsResponse};

use crate::usecases::common::UseCaseMetadata;

pub struct GenerateDocs;

impl UseCaseMetadata for GenerateDocs {
    fn usecase_index() -> &'static str {
        "u601"
    }

    fn usecase_name() -> &'static str {
        "generate_docs"
    }

    fn display_name() -> &'static str {
        "Documentation Generator"
    }

    fn description() -> &'static str {
        "Форматирование кода и добавление документации/комментариев через LLM"
    }
}
