pub mod u601_generate_docs;
