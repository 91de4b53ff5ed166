//! u601 Documentation Generator UI (MVVM)
//!
//! - state.rs: переходы панели без DOM
//! - api.rs: вызов backend с поддержкой отмены
//! - view_model.rs: DocsGenVm, сигналы, таймер и AbortController
//! - view.rs: компонент DocsGenPanel

mod api;
pub mod state;
mod view;
mod view_model;

pub use view::DocsGenPanel;
pub use view_model::DocsGenVm;
