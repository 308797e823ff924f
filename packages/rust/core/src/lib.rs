//! Collection and generation pipeline for iconforge.
//!
//! This crate ties together discovery, markup normalization, and code
//! emission into the end-to-end [`generate`](pipeline::generate) workflow.

pub mod collector;
pub mod output;
pub mod pipeline;

pub use collector::{Collected, CollectedIcon, collect, process_asset};
pub use output::{WriteStatus, sha256_hex, write_if_changed};
pub use pipeline::{
    GenerateReport, ProgressReporter, SilentProgress, TargetReport, TargetStatus, generate,
    run_target,
};
