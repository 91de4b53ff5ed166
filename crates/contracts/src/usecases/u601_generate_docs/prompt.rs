//! Правила подготовки запроса к модели: заглушки, лимит токенов, промпт

/// Заглушка поля ввода ("ещё ничего не введено")
pub const INPUT_PLACEHOLDER: &str = "Input your raw code here:";

/// Заглушка поля результата
pub const RESPONSE_PLACEHOLDER: &str = "Your altered code will appear here";

/// Фиксированная инструкция, добавляемая перед кодом
pub const INSTRUCTION_PREFIX: &str =
    "Properly format and add documentation/comments to this code (keep code under column 100): ";

/// Максимальное количество токенов во входном тексте
pub const MAX_INPUT_TOKENS: usize = 2048;

/// Результат проверки входного текста перед отправкой
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCheck {
    Ok { tokens: usize },
    Placeholder,
    Blank,
    TooLong { tokens: usize },
}

impl InputCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, InputCheck::Ok { .. })
    }

    /// Человекочитаемая причина отказа (для ответа backend)
    pub fn reason(&self) -> Option<String> {
        match self {
            InputCheck::Ok { .. } => None,
            InputCheck::Placeholder => Some("code is the input placeholder".to_string()),
            InputCheck::Blank => Some("code is empty".to_string()),
            InputCheck::TooLong { tokens } => Some(format!(
                "code has {} tokens, limit is {}",
                tokens, MAX_INPUT_TOKENS
            )),
        }
    }
}

/// Количество токенов: число непрерывных последовательностей без пробельных символов.
/// Это грубая клиентская оценка, а не токенизатор модели.
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Проверка входного текста перед генерацией
pub fn check_input(text: &str) -> InputCheck {
    if text == INPUT_PLACEHOLDER {
        return InputCheck::Placeholder;
    }
    if text.trim().is_empty() {
        return InputCheck::Blank;
    }
    let tokens = count_tokens(text);
    if tokens > MAX_INPUT_TOKENS {
        InputCheck::TooLong { tokens }
    } else {
        InputCheck::Ok { tokens }
    }
}

/// Показывать ли предупреждение "Code input is too long".
/// Порог включительный, в отличие от проверки в `check_input`.
pub fn is_too_long(text: &str) -> bool {
    count_tokens(text) >= MAX_INPUT_TOKENS
}

/// Полный текст промпта для модели
pub fn build_prompt(code: &str) -> String {
    format!("{}\n{}", INSTRUCTION_PREFIX, code)
}
