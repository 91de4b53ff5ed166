pub mod service;

pub use service::generate_docs;
