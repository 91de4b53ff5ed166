//! Состояние панели генерации документации (без зависимостей от DOM)
//!
//! Все переходы панели собраны здесь, чтобы их можно было проверить
//! обычными unit-тестами. View model оборачивает `DocsGenState` в сигнал
//! и связывает токены отмены с `AbortController`.

use contracts::usecases::u601_generate_docs::{
    detect_language,
    prompt::{self, INPUT_PLACEHOLDER, RESPONSE_PLACEHOLDER},
    GenerateDocsRequest, Language,
};

pub const IDLE_LABEL: &str = "Generate Documentation";
pub const ERROR_LABEL: &str = "Error, Click To Try Again";
pub const GENERATING_LABELS: [&str; 4] =
    ["Generating", "Generating.", "Generating..", "Generating..."];

/// Период смены подписи во время генерации
pub const STATUS_INTERVAL_MS: u32 = 300;

/// Базовое имя скачиваемого файла (расширение берётся из языка)
pub const DOWNLOAD_BASENAME: &str = "generated_docs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Running,
    Error,
}

/// Циклическая подпись "Generating..." на кнопке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusIndicator {
    index: usize,
}

impl StatusIndicator {
    /// Вернуться к первой подписи (начало нового запуска)
    pub fn restart(&mut self) {
        self.index = 0;
    }

    /// Следующая подпись по кругу
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % GENERATING_LABELS.len();
    }

    pub fn label(&self) -> &'static str {
        GENERATING_LABELS[self.index]
    }
}

/// Токен отмены одного запроса.
///
/// Не клонируется: владеет им ровно один запрос. После завершения
/// или отмены токен списывается и больше никогда не становится активным.
#[derive(Debug, PartialEq, Eq)]
pub struct CancellationToken {
    id: u64,
}

impl CancellationToken {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Слот единственного активного токена
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenSlot {
    current: u64,
    in_flight: bool,
}

impl TokenSlot {
    /// Привязать текущий токен к новому запросу. Предыдущий запрос, если он был, теряет токен.
    fn bind(&mut self) -> CancellationToken {
        if self.in_flight {
            self.current += 1;
        }
        self.in_flight = true;
        CancellationToken { id: self.current }
    }

    /// Токен принадлежит запросу, который ещё ждёт ответа
    pub fn is_live(&self, token: &CancellationToken) -> bool {
        self.in_flight && token.id == self.current
    }

    /// Списать активный токен и выпустить свежий. Возвращает id списанного токена.
    fn retire(&mut self) -> Option<u64> {
        if !self.in_flight {
            return None;
        }
        let retired = self.current;
        self.current += 1;
        self.in_flight = false;
        Some(retired)
    }

    pub fn has_active(&self) -> bool {
        self.in_flight
    }
}

/// Обработчик отмены (в браузере `AbortController`), привязанный к id токена
#[derive(Debug)]
pub struct AbortBinding<C> {
    bound: Option<(u64, C)>,
}

impl<C> Default for AbortBinding<C> {
    fn default() -> Self {
        Self { bound: None }
    }
}

impl<C> AbortBinding<C> {
    pub fn bind(&mut self, token_id: u64, handle: C) {
        self.bound = Some((token_id, handle));
    }

    /// Забрать обработчик для списанного токена `token_id`.
    /// Обработчик другого токена снимается, но не возвращается.
    pub fn take_for(&mut self, token_id: u64) -> Option<C> {
        match self.bound.take() {
            Some((bound_id, handle)) if bound_id == token_id => Some(handle),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.bound = None;
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }
}

/// Всё, что нужно для одного запроса к сервису
#[derive(Debug)]
pub struct GenerationTicket {
    pub token: CancellationToken,
    pub request: GenerateDocsRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsGenState {
    pub document_text: String,
    pub language: Language,
    pub file_extension: &'static str,
    pub status: GenerationStatus,
    pub indicator: StatusIndicator,
    pub response_text: String,
    /// Неблокирующее сообщение о локальной ошибке (файл, буфер обмена, скачивание)
    pub notice: Option<String>,
    tokens: TokenSlot,
}

impl Default for DocsGenState {
    fn default() -> Self {
        Self {
            document_text: INPUT_PLACEHOLDER.to_string(),
            language: Language::Unknown,
            file_extension: Language::Unknown.extension(),
            status: GenerationStatus::Idle,
            indicator: StatusIndicator::default(),
            response_text: RESPONSE_PLACEHOLDER.to_string(),
            notice: None,
            tokens: TokenSlot::default(),
        }
    }
}

impl DocsGenState {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Input surface
    // ------------------------------------------------------------------

    /// Изменение текста в редакторе
    pub fn on_text_changed(&mut self, new_text: String) {
        if new_text == INPUT_PLACEHOLDER {
            self.document_text.clear();
            self.set_language(Language::Unknown);
            return;
        }
        let language = detect_language(&new_text);
        self.document_text = new_text;
        self.set_language(language);
    }

    /// Содержимое выбранного файла прочитано
    pub fn on_file_loaded(&mut self, content: String) {
        self.on_text_changed(content);
        self.response_text = RESPONSE_PLACEHOLDER.to_string();
        self.notice = None;
    }

    /// Файл прочитать не удалось: показываем сообщение, остальное не трогаем
    pub fn on_file_failed(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    fn set_language(&mut self, language: Language) {
        self.language = language;
        self.file_extension = language.extension();
    }

    // ------------------------------------------------------------------
    // Request controller
    // ------------------------------------------------------------------

    /// Начать генерацию. `None`, если вход не прошёл проверку или запрос уже идёт.
    pub fn begin_generation(&mut self) -> Option<GenerationTicket> {
        if self.is_running() || !prompt::check_input(&self.document_text).is_ok() {
            return None;
        }

        self.status = GenerationStatus::Running;
        self.indicator.restart();
        let token = self.tokens.bind();
        let request = GenerateDocsRequest::new(self.document_text.clone())
            .with_language(self.language.label());

        Some(GenerationTicket { token, request })
    }

    /// Применить результат запроса. Ответ по списанному токену игнорируется (`false`).
    pub fn complete(&mut self, token: &CancellationToken, outcome: Result<String, String>) -> bool {
        if !self.tokens.is_live(token) {
            return false;
        }
        self.tokens.retire();
        self.indicator.restart();
        match outcome {
            Ok(text) => {
                self.response_text = text;
                self.status = GenerationStatus::Idle;
            }
            Err(_) => {
                self.status = GenerationStatus::Error;
            }
        }
        true
    }

    /// Отменить текущий запрос. Возвращает id отменённого токена, если запрос был.
    pub fn cancel(&mut self) -> Option<u64> {
        let retired = self.tokens.retire()?;
        self.status = GenerationStatus::Idle;
        self.indicator.restart();
        Some(retired)
    }

    /// Тик таймера подписи. `false`, если генерация не идёт.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.indicator.advance();
        true
    }

    // ------------------------------------------------------------------
    // Output surface
    // ------------------------------------------------------------------

    /// Сброс к исходному состоянию. Возвращает id отменённого токена, если запрос шёл.
    pub fn reset(&mut self) -> Option<u64> {
        let retired = self.tokens.retire();
        let tokens = self.tokens;
        *self = Self {
            tokens,
            ..Self::default()
        };
        retired
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    // ------------------------------------------------------------------
    // Derived view data
    // ------------------------------------------------------------------

    pub fn is_running(&self) -> bool {
        self.status == GenerationStatus::Running
    }

    pub fn has_active_request(&self) -> bool {
        self.tokens.has_active()
    }

    pub fn button_label(&self) -> &'static str {
        match self.status {
            GenerationStatus::Idle => IDLE_LABEL,
            GenerationStatus::Running => self.indicator.label(),
            GenerationStatus::Error => ERROR_LABEL,
        }
    }

    /// Копирование и скачивание доступны только для настоящего результата
    pub fn can_export(&self) -> bool {
        !self.is_running() && self.response_text != RESPONSE_PLACEHOLDER
    }

    pub fn can_reset(&self) -> bool {
        !self.is_running() && self.document_text != INPUT_PLACEHOLDER
    }

    pub fn is_too_long(&self) -> bool {
        prompt::is_too_long(&self.document_text)
    }

    pub fn download_filename(&self) -> String {
        format!("{}{}", DOWNLOAD_BASENAME, self.file_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Заглушка сервиса: считает вызовы и отвечает заданным результатом
    struct StubService {
        reply: Result<String, String>,
        calls: usize,
    }

    impl StubService {
        fn new(reply: Result<&str, &str>) -> Self {
            Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                calls: 0,
            }
        }

        /// generate() целиком: начать и сразу применить ответ
        fn generate(&mut self, state: &mut DocsGenState) {
            if let Some(ticket) = state.begin_generation() {
                self.calls += 1;
                state.complete(&ticket.token, self.reply.clone());
            }
        }
    }

    fn state_with(text: &str) -> DocsGenState {
        let mut state = DocsGenState::new();
        state.on_text_changed(text.to_string());
        state
    }

    #[test]
    fn test_defaults() {
        let state = DocsGenState::new();
        assert_eq!(state.document_text, INPUT_PLACEHOLDER);
        assert_eq!(state.response_text, RESPONSE_PLACEHOLDER);
        assert_eq!(state.language, Language::Unknown);
        assert_eq!(state.file_extension, ".txt");
        assert_eq!(state.button_label(), IDLE_LABEL);
        assert!(!state.can_export());
        assert!(!state.can_reset());
    }

    #[test]
    fn test_placeholder_text_clears_document() {
        let mut state = state_with("fn main() {}");
        assert_eq!(state.language, Language::Rust);
        state.on_text_changed(INPUT_PLACEHOLDER.to_string());
        assert_eq!(state.document_text, "");
        assert_eq!(state.language, Language::Unknown);
        assert_eq!(state.file_extension, ".txt");
    }

    #[test]
    fn test_extension_follows_fresh_detection() {
        let mut state = state_with("fn main() {\n    let mut x = 1;\n}");
        assert_eq!(state.file_extension, ".rs");
        state.on_text_changed("hello world".to_string());
        assert_eq!(state.language, Language::Unknown);
        assert_eq!(state.file_extension, ".txt");
    }

    #[test]
    fn test_blank_or_placeholder_generate_is_noop() {
        for text in ["", "   ", "\n\t \n"] {
            let mut state = state_with(text);
            let before = state.clone();
            let mut service = StubService::new(Ok("unused"));
            service.generate(&mut state);
            assert_eq!(service.calls, 0);
            assert_eq!(state, before);
        }

        let mut state = DocsGenState::new();
        let before = state.clone();
        let mut service = StubService::new(Ok("unused"));
        service.generate(&mut state);
        assert_eq!(service.calls, 0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_too_long_input_is_noop_and_shows_notice() {
        let text = vec!["tok"; prompt::MAX_INPUT_TOKENS + 1].join(" ");
        let mut state = state_with(&text);
        assert!(state.is_too_long());
        let mut service = StubService::new(Ok("unused"));
        service.generate(&mut state);
        assert_eq!(service.calls, 0);
        assert_eq!(state.status, GenerationStatus::Idle);
        assert_eq!(state.response_text, RESPONSE_PLACEHOLDER);
    }

    #[test]
    fn test_successful_generation() {
        let mut state = state_with("hello world");
        let mut service = StubService::new(Ok("documented hello world"));
        service.generate(&mut state);
        assert_eq!(service.calls, 1);
        assert_eq!(state.response_text, "documented hello world");
        assert_eq!(state.status, GenerationStatus::Idle);
        assert!(!state.has_active_request());
        assert!(state.can_export());
    }

    #[test]
    fn test_ticket_carries_code_and_language() {
        let mut state = state_with("print('hi')");
        let ticket = state.begin_generation().unwrap();
        assert_eq!(ticket.request.code, "print('hi')");
        assert_eq!(ticket.request.language.as_deref(), Some("Python"));
        assert!(state.is_running());
        assert_eq!(state.button_label(), "Generating");
        assert!(!state.can_export());
        assert!(!state.can_reset());
    }

    #[test]
    fn test_second_generate_while_running_is_ignored() {
        let mut state = state_with("hello world");
        let _ticket = state.begin_generation().unwrap();
        assert!(state.begin_generation().is_none());
    }

    #[test]
    fn test_cancel_keeps_response_and_discards_late_result() {
        let mut state = state_with("hello world");
        state.response_text = "previous result".to_string();

        let ticket = state.begin_generation().unwrap();
        assert_eq!(state.cancel(), Some(ticket.token.id()));
        assert_eq!(state.status, GenerationStatus::Idle);
        assert_eq!(state.response_text, "previous result");

        // ответ отменённого запроса приходит позже и не применяется
        assert!(!state.complete(&ticket.token, Ok("late".to_string())));
        assert_eq!(state.response_text, "previous result");
        assert_eq!(state.status, GenerationStatus::Idle);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut state = state_with("hello world");
        assert_eq!(state.cancel(), None);
        let _ticket = state.begin_generation().unwrap();
        assert!(state.cancel().is_some());
        assert_eq!(state.cancel(), None);
    }

    #[test]
    fn test_fresh_token_after_cancel() {
        let mut state = state_with("hello world");
        let first = state.begin_generation().unwrap();
        state.cancel();

        let second = state.begin_generation().unwrap();
        assert_ne!(first.token.id(), second.token.id());
        assert!(!state.complete(&first.token, Ok("stale".to_string())));
        assert!(state.complete(&second.token, Ok("fresh".to_string())));
        assert_eq!(state.response_text, "fresh");
    }

    #[test]
    fn test_failure_then_retry() {
        let mut state = state_with("hello world");
        let mut failing = StubService::new(Err("HTTP 502"));
        failing.generate(&mut state);
        assert_eq!(state.status, GenerationStatus::Error);
        assert_eq!(state.button_label(), ERROR_LABEL);
        assert_eq!(state.response_text, RESPONSE_PLACEHOLDER);

        let ticket = state.begin_generation().unwrap();
        assert_eq!(state.status, GenerationStatus::Running);
        assert!(state.complete(&ticket.token, Ok("ok now".to_string())));
        assert_eq!(state.status, GenerationStatus::Idle);
    }

    #[test]
    fn test_reset_restores_defaults_from_any_state() {
        let mut state = state_with("fn main() {}");
        state.response_text = "something".to_string();
        state.set_notice("clipboard failed");
        let ticket = state.begin_generation().unwrap();

        assert_eq!(state.reset(), Some(ticket.token.id()));
        assert_eq!(state.document_text, INPUT_PLACEHOLDER);
        assert_eq!(state.response_text, RESPONSE_PLACEHOLDER);
        assert_eq!(state.status, GenerationStatus::Idle);
        assert_eq!(state.language, Language::Unknown);
        assert_eq!(state.notice, None);
        assert!(!state.complete(&ticket.token, Ok("late".to_string())));

        let mut errored = state_with("hello world");
        StubService::new(Err("boom")).generate(&mut errored);
        assert_eq!(errored.reset(), None);
        assert_eq!(errored.status, GenerationStatus::Idle);
    }

    #[test]
    fn test_file_load_sets_text_and_resets_response() {
        let mut state = state_with("hello world");
        StubService::new(Ok("documented")).generate(&mut state);
        state.set_notice("old notice");

        let mut service = StubService::new(Ok("unused"));
        state.on_file_loaded("print('hi')".to_string());
        assert_eq!(service.calls, 0);
        assert_eq!(state.document_text, "print('hi')");
        assert_eq!(state.response_text, RESPONSE_PLACEHOLDER);
        assert_eq!(state.notice, None);
        // вызов сервиса только по явному generate()
        service.generate(&mut state);
        assert_eq!(service.calls, 1);
    }

    #[test]
    fn test_file_failure_only_sets_notice() {
        let mut state = state_with("hello world");
        let before = state.clone();
        state.on_file_failed("Не удалось прочитать файл");
        assert_eq!(state.notice.as_deref(), Some("Не удалось прочитать файл"));
        assert_eq!(state.document_text, before.document_text);
        assert_eq!(state.status, before.status);
    }

    #[test]
    fn test_status_indicator_cycles_four_labels() {
        let mut state = state_with("hello world");
        let ticket = state.begin_generation().unwrap();

        let mut seen = vec![state.button_label()];
        for _ in 0..4 {
            assert!(state.tick());
            seen.push(state.button_label());
        }
        assert_eq!(
            seen,
            vec!["Generating", "Generating.", "Generating..", "Generating...", "Generating"]
        );

        state.tick();
        state.complete(&ticket.token, Ok("done".to_string()));
        assert!(!state.tick());

        // новый запуск начинается с первой подписи
        state.begin_generation().unwrap();
        assert_eq!(state.button_label(), "Generating");
    }

    #[test]
    fn test_cancel_releases_handle_bound_to_retired_token() {
        let mut state = state_with("hello world");
        let mut binding = AbortBinding::default();

        let ticket = state.begin_generation().unwrap();
        binding.bind(ticket.token.id(), "controller-1");

        let retired = state.cancel().unwrap();
        assert_eq!(binding.take_for(retired), Some("controller-1"));
        assert!(!binding.is_bound());
        // повторная отмена ничего не находит
        assert_eq!(state.cancel(), None);
        assert_eq!(binding.take_for(retired), None);
    }

    #[test]
    fn test_reset_releases_handle_of_running_request() {
        let mut state = state_with("hello world");
        let mut binding = AbortBinding::default();

        let ticket = state.begin_generation().unwrap();
        binding.bind(ticket.token.id(), "controller-1");

        let retired = state.reset().unwrap();
        assert_eq!(binding.take_for(retired), Some("controller-1"));
    }

    #[test]
    fn test_handle_of_other_token_is_dropped_not_aborted() {
        let mut state = state_with("hello world");
        let mut binding = AbortBinding::default();

        let first = state.begin_generation().unwrap();
        state.cancel();
        binding.bind(first.token.id(), "stale");

        let second = state.begin_generation().unwrap();
        let retired = state.cancel().unwrap();
        assert_eq!(retired, second.token.id());
        assert_eq!(binding.take_for(retired), None);
        assert!(!binding.is_bound());
    }

    #[test]
    fn test_download_filename_uses_extension() {
        let state = state_with("def greet(name):\n    print(name)\n");
        assert_eq!(state.download_filename(), "generated_docs.py");
    }
}
