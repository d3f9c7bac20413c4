//! Shared types, error model, and configuration for CiviCode.
//!
//! This crate is the foundation depended on by all other CiviCode crates.
//! It provides:
//! - [`CiviCodeError`] — the unified error type
//! - The code tree ([`CodeTree`], [`Chapter`], [`Article`], [`Section`])
//! - Configuration ([`AppConfig`], [`CrawlConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CrawlConfig, CrawlSettings, OutputSettings, SelectorSettings, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{CiviCodeError, Result};
pub use types::{Article, Chapter, CodeTree, Section};
