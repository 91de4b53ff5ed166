//! Адреса backend API
//!
//! Backend слушает порт 3000. Когда страница отдаётся самим backend
//! (`server.static_dir`), запросы идут на тот же origin; при разработке
//! через `trunk serve` адрес собирается из hostname страницы.

pub const BACKEND_PORT: &str = "3000";

/// Базовый URL backend, например "http://localhost:3000".
/// Пустая строка означает относительные пути (тот же origin).
pub fn api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let location = window.location();
    let port = location.port().unwrap_or_default();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_for(&protocol, &hostname, &port)
}

fn base_for(protocol: &str, hostname: &str, page_port: &str) -> String {
    if page_port == BACKEND_PORT {
        String::new()
    } else {
        format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
    }
}

/// Полный URL по пути API ("/api/...")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
