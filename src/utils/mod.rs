pub mod base64;
pub mod file;
pub mod http;
pub mod time;
pub mod url;

// Re-export common utilities
pub use file::{file_get, file_write, sanitize_file_name};
pub use url::is_link;
