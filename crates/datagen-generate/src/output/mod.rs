mod atomic;
pub mod json;

pub use json::{output_path, write_document_set};
