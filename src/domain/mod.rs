//! Core domain types: errors, the wire envelope, URL and value helpers.

pub mod envelope;
pub mod error;
pub mod url_path;
pub mod value;
pub mod settings;
