//! Rust code generation for normalized icons.
//!
//! Turns [`IconRecord`](iconforge_shared::IconRecord)s into a module tree of
//! `pub const` declarations, and provides the support `Icon` type and the
//! JSON manifest that accompany generated files.

pub mod emitter;
pub mod identifier;
pub mod manifest;
pub mod support;
mod writer;

pub use emitter::{EmitOptions, Emission, GENERATED_HEADER, emit, rust_identifier};
pub use identifier::derive_identifier;
pub use manifest::{IconManifest, ManifestIcon};
pub use support::support_source;
