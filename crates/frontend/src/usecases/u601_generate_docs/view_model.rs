//! u601 Documentation Generator - View Model

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, File};

use super::api;
use super::state::{AbortBinding, CancellationToken, DocsGenState, STATUS_INTERVAL_MS};
use crate::shared::clipboard::copy_to_clipboard;
use crate::shared::export::download_text;

#[derive(Clone, Copy)]
pub struct DocsGenVm {
    pub state: RwSignal<DocsGenState>,
    /// AbortController активного запроса, привязанный к id его токена
    abort: StoredValue<AbortBinding<AbortController>, LocalStorage>,
    /// Таймер подписи "Generating..."; drop останавливает его
    ticker: StoredValue<Option<Interval>, LocalStorage>,
}

impl DocsGenVm {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(DocsGenState::new()),
            abort: StoredValue::new_local(AbortBinding::default()),
            ticker: StoredValue::new_local(None),
        }
    }

    pub fn on_text_changed(&self, text: String) {
        self.state.update(|s| s.on_text_changed(text));
    }

    /// Запустить генерацию для текущего текста
    pub fn generate(&self) {
        let Some(ticket) = self.state.try_update(|s| s.begin_generation()).flatten() else {
            log::debug!("u601: generate ignored (invalid input or already running)");
            return;
        };

        let controller = match AbortController::new() {
            Ok(controller) => controller,
            Err(e) => {
                log::error!("u601: failed to create AbortController: {:?}", e);
                self.finish(ticket.token, Err("AbortController unavailable".to_string()));
                return;
            }
        };

        log::info!(
            "u601: request {} started, language={}",
            ticket.token.id(),
            ticket.request.language.as_deref().unwrap_or("Unknown")
        );
        self.abort
            .try_update_value(|binding| binding.bind(ticket.token.id(), controller.clone()));
        self.start_ticker();

        let vm = *self;
        let signal = controller.signal();
        spawn_local(async move {
            let outcome = api::generate_docs(&ticket.request, &signal)
                .await
                .map(|response| response.content);
            vm.finish(ticket.token, outcome);
        });
    }

    fn finish(&self, token: CancellationToken, outcome: Result<String, String>) {
        if let Err(e) = &outcome {
            log::warn!("u601: request {} failed: {}", token.id(), e);
        }

        let applied = self
            .state
            .try_update(|s| s.complete(&token, outcome))
            .unwrap_or(false);

        if applied {
            self.stop_ticker();
            self.abort.try_update_value(AbortBinding::clear);
        } else {
            log::debug!("u601: discarded result of retired request {}", token.id());
        }
    }

    /// Отменить текущий запрос (если он есть)
    pub fn cancel(&self) {
        if let Some(id) = self.state.try_update(|s| s.cancel()).flatten() {
            log::info!("u601: request {} cancelled", id);
            self.abort_request(id);
        }
        self.stop_ticker();
    }

    /// Вернуть панель в исходное состояние, отменив запрос
    pub fn reset(&self) {
        if let Some(id) = self.state.try_update(|s| s.reset()).flatten() {
            log::info!("u601: request {} cancelled by reset", id);
            self.abort_request(id);
        }
        self.stop_ticker();
    }

    fn abort_request(&self, id: u64) {
        match self.abort.try_update_value(|binding| binding.take_for(id)).flatten() {
            Some(controller) => controller.abort(),
            None => log::warn!("u601: no controller bound to request {}", id),
        }
    }

    fn start_ticker(&self) {
        let vm = *self;
        let interval = Interval::new(STATUS_INTERVAL_MS, move || {
            vm.state.try_update(|s| s.tick());
        });
        // старый таймер (если был) останавливается при замене
        self.ticker.try_update_value(|slot| *slot = Some(interval));
    }

    fn stop_ticker(&self) {
        self.ticker.try_update_value(|slot| *slot = None);
    }

    /// Прочитать выбранный файл в редактор
    pub fn load_file(&self, file: File) {
        if self.state.with_untracked(|s| s.is_running()) {
            return;
        }

        let vm = *self;
        let name = file.name();
        spawn_local(async move {
            let outcome = JsFuture::from(file.text())
                .await
                .map_err(|e| format!("{:?}", e))
                .and_then(|value| value.as_string().ok_or_else(|| "not a text file".to_string()));

            vm.state.try_update(|s| {
                if s.is_running() {
                    return;
                }
                match outcome {
                    Ok(content) => {
                        log::debug!("u601: loaded file {} ({} bytes)", name, content.len());
                        s.on_file_loaded(content);
                    }
                    Err(e) => {
                        log::warn!("u601: failed to read file {}: {}", name, e);
                        s.on_file_failed(format!("Не удалось прочитать файл {}", name));
                    }
                }
            });
        });
    }

    /// Скопировать результат в буфер обмена
    pub fn copy(&self) {
        let Some(text) = self.exportable_text() else {
            return;
        };
        let vm = *self;
        copy_to_clipboard(&text, move |result| {
            if let Err(e) = result {
                log::warn!("u601: {}", e);
                vm.state
                    .try_update(|s| s.set_notice("Не удалось скопировать в буфер обмена"));
            }
        });
    }

    /// Скачать результат файлом generated_docs<ext>
    pub fn download(&self) {
        let Some(text) = self.exportable_text() else {
            return;
        };
        let filename = self.state.with_untracked(|s| s.download_filename());
        if let Err(e) = download_text(&text, &filename) {
            log::warn!("u601: download failed: {}", e);
            self.state
                .update(|s| s.set_notice(format!("Не удалось скачать {}", filename)));
        }
    }

    pub fn dismiss_notice(&self) {
        self.state.update(|s| s.clear_notice());
    }

    fn exportable_text(&self) -> Option<String> {
        self.state
            .with_untracked(|s| s.can_export().then(|| s.response_text.clone()))
    }
}

impl Default for DocsGenVm {
    fn default() -> Self {
        Self::new()
    }
}
