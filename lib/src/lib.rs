pub mod browser;
pub mod config;
pub mod download;
pub mod error;
pub mod exporter;
pub mod messaging;
pub mod models;
pub mod responder;
pub mod store;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export error types for convenience
pub use error::ExportError;
