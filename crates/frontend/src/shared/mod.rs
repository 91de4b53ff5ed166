pub mod api_utils;
pub mod clipboard;
pub mod code_highlight;
pub mod export;
