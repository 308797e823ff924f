//! Candidate filtering and per-asset processing.
//!
//! The collector applies the target's glob to each candidate, then derives
//! an identifier and normalizes the markup. A malformed asset is recorded as
//! a failure and processing moves on to the next candidate.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use iconforge_codegen::derive_identifier;
use iconforge_discovery::matches;
use iconforge_shared::{AssetFailure, CandidateAsset, IconRecord, ProcessingOutcome};

/// An accepted icon together with the asset it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedIcon {
    pub path: String,
    pub record: IconRecord,
}

/// Result of [`collect`]: accepted icons in input order plus failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    pub icons: Vec<CollectedIcon>,
    pub failures: Vec<AssetFailure>,
    /// Candidates excluded by the pattern.
    pub filtered_out: usize,
    /// Candidates dropped because an earlier one had the same path.
    pub duplicates: usize,
}

impl Collected {
    /// Accepted records in input order, ready for emission.
    pub fn into_records(self) -> Vec<IconRecord> {
        self.icons.into_iter().map(|icon| icon.record).collect()
    }

    /// Number of candidates that reached processing.
    pub fn processed(&self) -> usize {
        self.icons.len() + self.failures.len()
    }
}

/// Derive the identifier and normalize the markup of one candidate.
pub fn process_asset(candidate: &CandidateAsset) -> ProcessingOutcome {
    let name = candidate.base_name();

    match iconforge_markup::normalize(&candidate.content) {
        Ok(markup) => ProcessingOutcome::Accepted(IconRecord {
            identifier: derive_identifier(name),
            name: name.to_string(),
            attributes: markup.attributes,
            inner: markup.inner,
        }),
        Err(e) => ProcessingOutcome::Rejected(AssetFailure {
            path: candidate.path.clone(),
            reason: e.to_string(),
        }),
    }
}

/// Filter `candidates` by `pattern` and process every match.
///
/// When a pattern is given, each path is passed through `rebase` (if any)
/// before matching, so absolute candidate paths can be tested against a
/// root-relative pattern. Without a pattern every candidate is processed.
/// Candidates repeating an earlier path are ignored.
#[instrument(skip_all, fields(candidates = candidates.len(), pattern = pattern.unwrap_or("*")))]
pub fn collect(
    candidates: &[CandidateAsset],
    pattern: Option<&str>,
    rebase: Option<&dyn Fn(&str) -> String>,
) -> Collected {
    let mut collected = Collected::default();
    let mut seen = HashSet::with_capacity(candidates.len());

    for candidate in candidates {
        if !seen.insert(candidate.path.as_str()) {
            collected.duplicates += 1;
            continue;
        }

        if let Some(pattern) = pattern {
            let matched = match rebase {
                Some(rebase) => matches(&rebase(&candidate.path), pattern),
                None => matches(&candidate.path, pattern),
            };
            if !matched {
                collected.filtered_out += 1;
                continue;
            }
        }

        match process_asset(candidate) {
            ProcessingOutcome::Accepted(record) => {
                debug!(path = %candidate.path, identifier = %record.identifier, "accepted asset");
                collected.icons.push(CollectedIcon {
                    path: candidate.path.clone(),
                    record,
                });
            }
            ProcessingOutcome::Rejected(failure) => {
                warn!(path = %failure.path, reason = %failure.reason, "rejected asset");
                collected.failures.push(failure);
            }
        }
    }

    debug!(
        accepted = collected.icons.len(),
        failed = collected.failures.len(),
        filtered_out = collected.filtered_out,
        "collection complete"
    );

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconforge_discovery::relative_path;

    const HOME: &str = include_str!("../../../../fixtures/svg/icons/icon-home.svg");
    const INVALID: &str = include_str!("../../../../fixtures/svg/icons/invalid.svg");

    fn asset(path: &str, content: &str) -> CandidateAsset {
        CandidateAsset::new(path, content)
    }

    fn identifiers(collected: &Collected) -> Vec<&str> {
        collected
            .icons
            .iter()
            .map(|icon| icon.record.identifier.as_str())
            .collect()
    }

    #[test]
    fn process_valid_asset() {
        let outcome = process_asset(&asset("icons/icon-home.svg", HOME));
        let ProcessingOutcome::Accepted(record) = outcome else {
            panic!("expected accepted outcome");
        };
        assert_eq!(record.identifier, "IconHome");
        assert_eq!(record.name, "icon-home");
        let keys: Vec<&str> = record.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["width", "height", "viewBox"]);
        assert!(!record.inner.contains("xmlns"));
    }

    #[test]
    fn process_invalid_asset() {
        let outcome = process_asset(&asset("icons/invalid.svg", INVALID));
        let ProcessingOutcome::Rejected(failure) = outcome else {
            panic!("expected rejected outcome");
        };
        assert_eq!(failure.path, "icons/invalid.svg");
        assert!(!failure.reason.is_empty());
    }

    #[test]
    fn partial_failure_keeps_valid_records() {
        let candidates = vec![
            asset("icons/valid.svg", HOME),
            asset("icons/invalid.svg", INVALID),
        ];
        let collected = collect(&candidates, None, None);

        assert_eq!(identifiers(&collected), vec!["Valid"]);
        assert_eq!(collected.failures.len(), 1);
        assert_eq!(collected.failures[0].path, "icons/invalid.svg");
        assert_eq!(collected.processed(), 2);
    }

    #[test]
    fn pattern_filters_silently() {
        let candidates = vec![
            asset("icons/a.svg", HOME),
            asset("other/b.svg", HOME),
            asset("icons/nested/c.svg", HOME),
        ];

        let collected = collect(&candidates, Some("icons/*.svg"), None);
        assert_eq!(identifiers(&collected), vec!["A"]);
        assert_eq!(collected.filtered_out, 2);
        assert!(collected.failures.is_empty());

        let collected = collect(&candidates, Some("icons/**/*.svg"), None);
        assert_eq!(identifiers(&collected), vec!["A", "C"]);
    }

    #[test]
    fn filtered_out_assets_are_not_parsed() {
        let candidates = vec![asset("broken/invalid.svg", INVALID)];
        let collected = collect(&candidates, Some("icons/*.svg"), None);
        assert!(collected.failures.is_empty());
        assert!(collected.icons.is_empty());
    }

    #[test]
    fn rebaser_makes_absolute_paths_match_relative_pattern() {
        let candidates = vec![
            asset("/project/assets/icons/icon-home.svg", HOME),
            asset("/project/assets/misc/icon-home.svg", HOME),
        ];
        let rebase = |path: &str| relative_path("/project/assets", path);

        let collected = collect(&candidates, Some("icons/*.svg"), None);
        assert!(collected.icons.is_empty());

        let collected = collect(&candidates, Some("icons/*.svg"), Some(&rebase));
        assert_eq!(collected.icons.len(), 1);
        // The original path is kept, not the rebased one.
        assert_eq!(collected.icons[0].path, "/project/assets/icons/icon-home.svg");
    }

    #[test]
    fn empty_pattern_matches_nothing() {
        let candidates = vec![asset("icons/a.svg", HOME)];
        let collected = collect(&candidates, Some(""), None);
        assert!(collected.icons.is_empty());
        assert_eq!(collected.filtered_out, 1);
    }

    #[test]
    fn input_order_and_duplicate_identifiers_preserved() {
        let candidates = vec![
            asset("z/icon-home.svg", HOME),
            asset("a/icon--home.svg", HOME),
            asset("m/alpha.svg", HOME),
        ];
        let collected = collect(&candidates, None, None);
        assert_eq!(identifiers(&collected), vec!["IconHome", "IconHome", "Alpha"]);
    }

    #[test]
    fn duplicate_paths_first_wins() {
        let candidates = vec![
            asset("icons/a.svg", HOME),
            asset("icons/a.svg", INVALID),
        ];
        let collected = collect(&candidates, None, None);
        assert_eq!(collected.icons.len(), 1);
        assert!(collected.failures.is_empty());
        assert_eq!(collected.duplicates, 1);
    }

    #[test]
    fn into_records_keeps_order() {
        let candidates = vec![asset("b.svg", HOME), asset("a.svg", HOME)];
        let records = collect(&candidates, None, None).into_records();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
