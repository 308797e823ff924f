//! Segment-wise glob matching over already-enumerated paths.
//!
//! Supported syntax:
//! - `*` matches any run of characters within one path segment
//! - `**` as a whole segment matches zero or more path segments
//! - a pattern without `/` is matched against the file name only
//!
//! Matching is case-insensitive and treats `\` as `/` in both inputs.

/// Match `path` against `pattern`. An empty pattern never matches.
pub fn matches(path: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }

    let path = path.replace('\\', "/");
    let pattern = pattern.replace('\\', "/");

    if !pattern.contains('/') {
        let file_name = path.rsplit('/').next().unwrap_or(&path);
        return matches_wildcard(file_name, &pattern);
    }

    let path_parts: Vec<&str> = path.split('/').collect();
    let pattern_parts: Vec<&str> = pattern.split('/').collect();

    matches_segments(&path_parts, &pattern_parts)
}

/// Align path segments with pattern segments, backtracking over `**`.
fn matches_segments(path: &[&str], pattern: &[&str]) -> bool {
    let Some((&head, rest)) = pattern.split_first() else {
        return path.is_empty();
    };

    if head == "**" {
        if rest.is_empty() {
            return true;
        }
        return (0..=path.len()).any(|skip| matches_segments(&path[skip..], rest));
    }

    match path.split_first() {
        Some((&segment, path_rest)) => {
            matches_wildcard(segment, head) && matches_segments(path_rest, rest)
        }
        None => false,
    }
}

/// Match one segment against a segment pattern containing `*` wildcards.
fn matches_wildcard(text: &str, pattern: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    let text = text.to_lowercase();
    let pattern = pattern.to_lowercase();

    if !pattern.contains('*') {
        return text == pattern;
    }

    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or_default();
    let mut middle: Vec<&str> = parts.collect();
    let last = middle.pop().unwrap_or_default();

    // Leading literal anchors at the start, trailing literal at the end.
    let Some(mut remaining) = text.strip_prefix(first) else {
        return false;
    };
    let Some(tail_start) = remaining.len().checked_sub(last.len()) else {
        return false;
    };
    if !remaining.ends_with(last) {
        return false;
    }
    remaining = &remaining[..tail_start];

    for part in middle.iter().filter(|p| !p.is_empty()) {
        match remaining.find(part) {
            Some(idx) => remaining = &remaining[idx + part.len()..],
            None => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Basic wildcards
    // -----------------------------------------------------------------------

    #[test]
    fn exact_match() {
        assert!(matches("icons/home.svg", "icons/home.svg"));
        assert!(!matches("icons/home.svg", "icons/settings.svg"));
    }

    #[test]
    fn single_asterisk_in_segment() {
        assert!(matches("icons/home.svg", "icons/*.svg"));
        assert!(matches("icons/home.svg", "icons/home.*"));
        assert!(matches("icons/icon-home-large.svg", "icons/icon-*-large.svg"));
        assert!(matches("icons/icon-home.svg", "icons/icon-*.svg"));
        assert!(matches("icons/home-icon.svg", "icons/*-icon.svg"));
    }

    #[test]
    fn asterisk_does_not_cross_segments() {
        assert!(!matches("icons/sub/home.svg", "icons/*.svg"));
        assert!(!matches("icons/sub/home.svg", "icons/*"));
    }

    #[test]
    fn suffix_anchors_to_segment_end() {
        assert!(matches("icons/a.svg.svg", "icons/*.svg"));
        assert!(!matches("icons/home.svg.bak", "icons/*.svg"));
        assert!(!matches("icons/ab", "icons/a*ab"));
    }

    #[test]
    fn multiple_wildcards() {
        assert!(matches("icons/category-home/icon-large.svg", "icons/*-*/*-*.svg"));
        assert!(matches("src/assets/icons/home.svg", "*/*/icons/*.svg"));
        assert!(!matches("icons/home.svg", "icons/*-*.svg"));
    }

    // -----------------------------------------------------------------------
    // Double asterisk
    // -----------------------------------------------------------------------

    #[test]
    fn double_asterisk_matches_nested_paths() {
        assert!(matches("icons/subfolder/deep/home.svg", "icons/**/*.svg"));
        assert!(matches("src/assets/icons/subfolder/home.svg", "src/**/home.svg"));
        assert!(matches("src/components/ui/icons/home.svg", "src/**/icons/*.svg"));
    }

    #[test]
    fn double_asterisk_matches_zero_segments() {
        assert!(matches("icons/home.svg", "icons/**/*.svg"));
        assert!(matches("icons", "icons/**"));
    }

    #[test]
    fn double_asterisk_at_end_matches_everything() {
        assert!(matches("icons/subfolder/deep/nested/home.svg", "icons/**"));
        assert!(!matches("assets/home.svg", "icons/**"));
    }

    #[test]
    fn double_asterisk_backtracks() {
        assert!(matches("a/icons/b/icons/home.svg", "a/**/icons/home.svg"));
        assert!(!matches("a/icons/b/home.svg", "a/**/icons/home.svg"));
        assert!(matches("x/a/b/a/b/c.svg", "x/**/a/b/*.svg"));
    }

    #[test]
    fn only_double_asterisk_matches_any_non_empty_path() {
        for path in ["home.svg", "icons/home.svg", "a/b/c/d.svg", "/abs/path.svg"] {
            assert!(matches(path, "**"), "{path}");
        }
    }

    // -----------------------------------------------------------------------
    // File name patterns
    // -----------------------------------------------------------------------

    #[test]
    fn filename_only_pattern_matches_at_any_depth() {
        assert!(matches("icons/subfolder/home.svg", "home.svg"));
        assert!(matches("icons/subfolder/home.svg", "*.svg"));
        assert!(matches("home.svg", "*.svg"));
        assert!(matches("home.svg", "*"));
        assert!(!matches("icons/subfolder/home.svg", "settings.svg"));
    }

    #[test]
    fn filename_only_pattern_ignores_directories() {
        let pattern = "h*.svg";
        for dir in ["", "a/", "hx/", "x/y/z/", "/abs/"] {
            assert!(matches(&format!("{dir}home.svg"), pattern));
            assert!(!matches(&format!("{dir}zoom.svg"), pattern));
        }
        assert!(!matches("home/zoom.svg", pattern));
    }

    // -----------------------------------------------------------------------
    // Normalization and case
    // -----------------------------------------------------------------------

    #[test]
    fn backslashes_normalized() {
        assert!(matches("icons\\subfolder\\home.svg", "icons/subfolder/*.svg"));
        assert!(matches("icons/subfolder/home.svg", "icons\\subfolder\\*.svg"));
        assert!(matches("icons\\subfolder/home.svg", "icons/subfolder\\*.svg"));
    }

    #[test]
    fn case_insensitive() {
        assert!(matches("Icons/Home.SVG", "icons/home.svg"));
        assert!(matches("Icons/Home.SVG", "icons/*.svg"));
        assert!(matches("ICONS/DEEP/HOME.SVG", "icons/**/h*.svg"));
    }

    // -----------------------------------------------------------------------
    // Edge cases
    // -----------------------------------------------------------------------

    #[test]
    fn empty_pattern_never_matches() {
        for path in ["", "home.svg", "icons/home.svg"] {
            assert!(!matches(path, ""), "{path}");
        }
    }

    #[test]
    fn segment_counts_must_agree() {
        assert!(!matches("icons/home.svg", "icons/home.svg/extra"));
        assert!(!matches("root/icons/home.svg", "icons/home.svg"));
        assert!(!matches("icons/home.svg", "icons/*/home.svg"));
    }

    #[test]
    fn absolute_paths_match_absolute_patterns() {
        assert!(matches("/project/icons/home.svg", "/project/**/*.svg"));
        assert!(!matches("project/icons/home.svg", "/project/**/*.svg"));
    }
}
