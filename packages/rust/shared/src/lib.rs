//! Shared types, error model, and configuration for iconforge.
//!
//! This crate is the foundation depended on by all other iconforge crates.
//! It provides:
//! - [`IconForgeError`], the unified error type
//! - Domain types ([`CandidateAsset`], [`IconRecord`], [`ProcessingOutcome`], [`Diagnostic`])
//! - Configuration ([`AppConfig`], [`GenerateConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, DefaultsConfig, GenerateConfig, RESERVED_WORDS, TargetConfig,
    config_file_path, init_config, is_identifier, load_config, load_config_from, starter_config,
};
pub use error::{IconForgeError, Result};
pub use types::{
    AssetFailure, AttributeMap, CURRENT_SCHEMA_VERSION, CandidateAsset, ContainerIdentity,
    Diagnostic, DiagnosticCode, IconRecord, ProcessingOutcome, Severity,
};
