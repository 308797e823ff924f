//! Asset discovery, glob filtering, and path rebasing.
//!
//! Discovery walks a root directory for asset files and returns them as
//! [`CandidateAsset`]s in a reproducible order. Filtering happens later, in
//! the collector, using [`glob::matches`] on paths rebased with
//! [`paths::relative_path`].

pub mod glob;
pub mod paths;

use std::path::Path;

use iconforge_shared::{CandidateAsset, Diagnostic, DiagnosticCode, IconForgeError, Result};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

pub use glob::matches;
pub use paths::{is_absolute, relative_path};

// ---------------------------------------------------------------------------
// Discovery options / result
// ---------------------------------------------------------------------------

/// Configuration for the discovery walk.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// File extension to collect, without the dot. Compared case-insensitively.
    pub extension: String,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            extension: "svg".into(),
            follow_links: true,
        }
    }
}

/// Outcome of a discovery walk.
#[derive(Debug, Clone, Default)]
pub struct Discovered {
    /// Readable assets in walk order: directory entries sorted by file name, depth first.
    pub candidates: Vec<CandidateAsset>,
    /// Per-file warnings for entries that could not be read.
    pub diagnostics: Vec<Diagnostic>,
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Walk `root` and load every file with the configured extension.
///
/// A missing root is an error; unreadable files are skipped with an
/// `ICON005` warning so one bad file never hides the rest.
#[instrument(skip_all, fields(root = %root.display(), extension = %opts.extension))]
pub fn discover(root: &Path, opts: &DiscoveryOptions) -> Result<Discovered> {
    if !root.is_dir() {
        return Err(IconForgeError::validation(format!(
            "root directory not found: {}",
            root.display()
        )));
    }

    let mut discovered = Discovered::default();

    let walker = WalkDir::new(root)
        .follow_links(opts.follow_links)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                warn!(%path, error = %e, "skipping unreadable directory entry");
                discovered.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::AssetParseError,
                        format!("error reading {path}: {e}"),
                    )
                    .with_path(path),
                );
                continue;
            }
        };

        if !entry.file_type().is_file() || !has_extension(entry.path(), &opts.extension) {
            continue;
        }

        let path = entry.path().to_string_lossy().into_owned();
        match std::fs::read_to_string(entry.path()) {
            Ok(content) => {
                debug!(%path, bytes = content.len(), "discovered asset");
                discovered.candidates.push(CandidateAsset::new(path, content));
            }
            Err(e) => {
                warn!(%path, error = %e, "skipping unreadable asset");
                discovered.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::AssetParseError,
                        format!("error reading SVG file {path}: {e}"),
                    )
                    .with_path(path),
                );
            }
        }
    }

    info!(
        assets = discovered.candidates.len(),
        skipped = discovered.diagnostics.len(),
        "discovery complete"
    );

    Ok(discovered)
}

/// Case-insensitive extension check.
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension.trim_start_matches('.')))
}
