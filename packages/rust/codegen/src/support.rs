//! Support type referenced by generated code.

/// Source of the `Icon` type that generated constants instantiate.
///
/// Write it into the consuming crate (at the module `icon_type` points to)
/// once; generated files only `use` it.
pub fn support_source() -> &'static str {
    include_str!("../templates/icon.rs")
}

#[cfg(test)]
#[path = "../templates/icon.rs"]
mod template;
