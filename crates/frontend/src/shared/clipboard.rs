//! Копирование текста в системный буфер обмена (Web Clipboard API)

use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Скопировать текст и сообщить результат.
///
/// `on_done` получает `Err` с текстом ошибки, если буфер обмена недоступен
/// или браузер отказал в записи.
pub fn copy_to_clipboard<F>(text: &str, on_done: F)
where
    F: FnOnce(Result<(), String>) + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            on_done(Err("No window object".to_string()));
            return;
        };
        let clipboard = window.navigator().clipboard();
        let result = JsFuture::from(clipboard.write_text(&text))
            .await
            .map(|_| ())
            .map_err(|e| format!("Clipboard write failed: {:?}", e));
        on_done(result);
    });
}
