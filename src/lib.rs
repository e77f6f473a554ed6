pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod source;

pub use error::{HammockError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
