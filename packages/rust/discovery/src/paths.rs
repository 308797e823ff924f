//! Lexical path rebasing.
//!
//! Candidate paths come out of discovery rooted at the scanned directory,
//! while glob patterns are written relative to it. [`relative_path`] bridges
//! the two without touching the filesystem.

/// Express `path` relative to `root`, using `/` separators.
///
/// Both inputs are normalized lexically: `\` becomes `/`, empty and `.`
/// segments are dropped and `..` removes the preceding segment. Segment
/// comparison is case-insensitive. Equal paths yield `"."`.
pub fn relative_path(root: &str, path: &str) -> String {
    let from = normalize_segments(root);
    let to = normalize_segments(path);

    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a.to_lowercase() == b.to_lowercase())
        .count();

    if common == from.len() && common == to.len() {
        return ".".to_string();
    }

    let ups = std::iter::repeat_n("..", from.len() - common);
    let downs = to[common..].iter().copied();

    ups.chain(downs).collect::<Vec<_>>().join("/")
}

/// Whether a pattern or path is absolute (`/x`, `\\x`, or a drive like `C:/x`).
pub fn is_absolute(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with('\\') {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn normalize_segments(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments
}
