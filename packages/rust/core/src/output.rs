//! Change-aware, atomic writes of generated files.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use iconforge_shared::{IconForgeError, Result};

/// What happened (or would happen) to one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteStatus {
    /// Content differed and the file was replaced.
    Written,
    /// Existing content already matched.
    Unchanged,
    /// Check mode: content differs, nothing was written.
    WouldChange,
}

impl WriteStatus {
    /// Combine the statuses of files belonging to one target.
    pub fn merge(self, other: Self) -> Self {
        use WriteStatus::*;
        match (self, other) {
            (WouldChange, _) | (_, WouldChange) => WouldChange,
            (Written, _) | (_, Written) => Written,
            (Unchanged, Unchanged) => Unchanged,
        }
    }
}

/// Hex-encoded SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Write `content` to `path` unless the file already holds it.
///
/// The new content goes to a temporary sibling first and is renamed into
/// place. In `check` mode nothing is written.
pub fn write_if_changed(path: &Path, content: &str, check: bool) -> Result<WriteStatus> {
    if path.is_file() {
        let existing = std::fs::read(path).map_err(|e| IconForgeError::io(path, e))?;
        if sha256_hex(&existing) == sha256_hex(content.as_bytes()) {
            debug!(path = %path.display(), "output unchanged");
            return Ok(WriteStatus::Unchanged);
        }
    }

    if check {
        debug!(path = %path.display(), "output would change");
        return Ok(WriteStatus::WouldChange);
    }

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            IconForgeError::validation(format!("invalid output path: {}", path.display()))
        })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| IconForgeError::io(dir, e))?;

    let temp = dir.join(format!(".{file_name}.tmp"));
    std::fs::write(&temp, content).map_err(|e| IconForgeError::io(&temp, e))?;
    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(IconForgeError::io(path, e));
    }

    debug!(path = %path.display(), bytes = content.len(), "wrote output");
    Ok(WriteStatus::Written)
}
