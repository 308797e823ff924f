//! Core domain types shared by the iconforge pipeline.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Current schema version for the JSON icon manifest.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Root-element attributes in source order, keyed case-sensitively.
pub type AttributeMap = IndexMap<String, String>;

// ---------------------------------------------------------------------------
// CandidateAsset
// ---------------------------------------------------------------------------

/// A discovered asset file, before any filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAsset {
    /// Path as reported by discovery (absolute or root-prefixed).
    pub path: String,
    /// Raw file contents.
    pub content: String,
}

impl CandidateAsset {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// File name without directory or final extension (`icons/a-b.svg` -> `a-b`).
    pub fn base_name(&self) -> &str {
        let file_name = self
            .path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.path.as_str());

        match file_name.rfind('.') {
            Some(idx) => &file_name[..idx],
            None => file_name,
        }
    }
}

// ---------------------------------------------------------------------------
// IconRecord
// ---------------------------------------------------------------------------

/// A normalized icon, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRecord {
    /// Derived identifier (e.g. `ArrowDown0_1`).
    pub identifier: String,
    /// Asset base name the identifier was derived from (e.g. `arrow-down-0-1`).
    pub name: String,
    /// Root attributes without namespace declarations or `class`.
    pub attributes: AttributeMap,
    /// Serialized children of the root element, namespace-free.
    pub inner: String,
}

/// An asset whose markup could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFailure {
    /// Path of the offending asset.
    pub path: String,
    /// Underlying parser message.
    pub reason: String,
}

/// Result of processing one candidate that passed filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    Accepted(IconRecord),
    Rejected(AssetFailure),
}

// ---------------------------------------------------------------------------
// ContainerIdentity
// ---------------------------------------------------------------------------

/// Where generated declarations live in the consuming crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerIdentity {
    /// Optional `::`-separated module path wrapping the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Name of the module holding the icon constants.
    pub name: String,
}

impl ContainerIdentity {
    pub fn new(namespace: Option<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.trim().is_empty()),
            name: name.into(),
        }
    }

    /// Namespace segments, outermost first. Empty when there is no namespace.
    pub fn namespace_segments(&self) -> Vec<&str> {
        self.namespace
            .as_deref()
            .map(|ns| {
                ns.split("::")
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ContainerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{ns}::{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Stable diagnostic codes surfaced to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// Root directory not found.
    MissingRoot,
    /// Pattern (or discovery) produced no icons.
    NoIconsFound,
    /// Writing generated output failed.
    GenerationFailed,
    /// Asset unreadable or markup failed to parse.
    AssetParseError,
    /// Derived identifier had to be sanitized.
    InvalidIdentifier,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRoot => "ICON001",
            Self::NoIconsFound => "ICON003",
            Self::GenerationFailed => "ICON004",
            Self::AssetParseError => "ICON005",
            Self::InvalidIdentifier => "ICON006",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::GenerationFailed => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-facing warning or error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    /// Offending file, when the diagnostic concerns one.
    pub path: Option<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Diagnostic for an asset whose markup failed to parse.
    pub fn parse_failure(failure: &AssetFailure) -> Self {
        Self::new(
            DiagnosticCode::AssetParseError,
            format!("error parsing SVG file {}: {}", failure.path, failure.reason),
        )
        .with_path(failure.path.clone())
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_directory_and_extension() {
        let asset = CandidateAsset::new("icons/nested/arrow-down-0-1.svg", "");
        assert_eq!(asset.base_name(), "arrow-down-0-1");

        let asset = CandidateAsset::new("C:\\icons\\home.SVG", "");
        assert_eq!(asset.base_name(), "home");

        let asset = CandidateAsset::new("icons/archive.tar.svg", "");
        assert_eq!(asset.base_name(), "archive.tar");

        let asset = CandidateAsset::new("README", "");
        assert_eq!(asset.base_name(), "README");
    }

    #[test]
    fn container_namespace_segments() {
        let id = ContainerIdentity::new(Some("ui::widgets".into()), "icons");
        assert_eq!(id.namespace_segments(), vec!["ui", "widgets"]);
        assert_eq!(id.to_string(), "ui::widgets::icons");

        let id = ContainerIdentity::new(Some("  ".into()), "icons");
        assert!(id.namespace.is_none());
        assert!(id.namespace_segments().is_empty());
        assert_eq!(id.to_string(), "icons");
    }

    #[test]
    fn diagnostic_codes_and_severity() {
        let failure = AssetFailure {
            path: "icons/bad.svg".into(),
            reason: "unexpected end of document".into(),
        };
        let diag = Diagnostic::parse_failure(&failure);
        assert_eq!(diag.code.as_str(), "ICON005");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.path.as_deref(), Some("icons/bad.svg"));
        assert!(diag.to_string().starts_with("ICON005: error parsing SVG file icons/bad.svg"));

        let diag = Diagnostic::new(DiagnosticCode::GenerationFailed, "disk full");
        assert!(diag.is_error());
    }

    #[test]
    fn icon_record_serializes_attributes_in_order() {
        let mut attributes = AttributeMap::new();
        attributes.insert("width".into(), "24".into());
        attributes.insert("height".into(), "24".into());
        attributes.insert("viewBox".into(), "0 0 24 24".into());

        let record = IconRecord {
            identifier: "IconHome".into(),
            name: "icon-home".into(),
            attributes,
            inner: "<circle />".into(),
        };

        let json = serde_json::to_string(&record).expect("serialize");
        let width = json.find("width").expect("width present");
        let view_box = json.find("viewBox").expect("viewBox present");
        assert!(width < view_box);

        let parsed: IconRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, record);
    }
}
