//! Project configuration for iconforge.
//!
//! Config lives in `iconforge.toml` at the project root.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{IconForgeError, Result};
use crate::types::ContainerIdentity;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "iconforge.toml";

/// Words that cannot name a module or `const` even though they match
/// the identifier pattern: strict, reserved and edition-2024 keywords.
pub const RESERVED_WORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Plain (non-raw) Rust identifier shape.
static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Config structs (matching iconforge.toml schema)
// ---------------------------------------------------------------------------

/// Top-level project config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Generation targets, one output file each.
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory scanned for assets.
    #[serde(default = "default_root")]
    pub root: String,

    /// Asset file extension, matched case-insensitively.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Path of the support type referenced by generated code.
    #[serde(default = "default_icon_type")]
    pub icon_type: String,

    /// Where to write the support type source, if anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_output: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
            icon_type: default_icon_type(),
            support_output: None,
        }
    }
}

fn default_root() -> String {
    ".".into()
}
fn default_extension() -> String {
    "svg".into()
}
fn default_icon_type() -> String {
    "crate::icon::Icon".into()
}

/// `[[targets]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Container module name.
    pub name: String,
    /// Optional `::`-separated module path around the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Glob pattern; absent means every discovered asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Generated Rust file.
    pub output: String,
    /// Optional JSON manifest file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
}

impl TargetConfig {
    pub fn container(&self) -> ContainerIdentity {
        ContainerIdentity::new(self.namespace.clone(), self.name.clone())
    }

    /// Check that the container name and namespace segments are identifiers.
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.name) {
            return Err(IconForgeError::config(format!(
                "target name `{}` is not a valid Rust identifier",
                self.name
            )));
        }

        let container = self.container();
        if let Some(bad) = container
            .namespace_segments()
            .into_iter()
            .find(|seg| !is_identifier(seg))
        {
            return Err(IconForgeError::config(format!(
                "namespace segment `{bad}` of target `{}` is not a valid Rust identifier",
                self.name
            )));
        }

        if self.output.trim().is_empty() {
            return Err(IconForgeError::config(format!(
                "target `{}` has no output path",
                self.name
            )));
        }

        Ok(())
    }
}

/// Whether `s` can be used verbatim as a Rust item name (no raw form).
pub fn is_identifier(s: &str) -> bool {
    s != "_" && IDENT_RE.is_match(s) && !RESERVED_WORDS.contains(&s)
}

// ---------------------------------------------------------------------------
// Generate config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime generation configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Directory scanned for assets; relative patterns are matched against
    /// paths relative to it.
    pub root: PathBuf,
    /// Asset file extension.
    pub extension: String,
    /// Support type path used in generated `use` statements.
    pub icon_type: String,
    /// Where to write the support type, if anywhere.
    pub support_output: Option<PathBuf>,
    /// Targets to generate.
    pub targets: Vec<TargetConfig>,
    /// Report drift instead of writing files.
    pub check: bool,
}

impl From<&AppConfig> for GenerateConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            root: PathBuf::from(&config.defaults.root),
            extension: config.defaults.extension.clone(),
            icon_type: config.defaults.icon_type.clone(),
            support_output: config.defaults.support_output.as_ref().map(PathBuf::from),
            targets: config.targets.clone(),
            check: false,
        }
    }
}

impl GenerateConfig {
    /// Validate every target before any asset is touched.
    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(IconForgeError::config(
                "no targets configured; add a [[targets]] entry or pass --name and --out",
            ));
        }
        for target in &self.targets {
            target.validate()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file inside `dir`.
pub fn config_file_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load `iconforge.toml` from `dir`. Returns defaults if the file does not exist.
pub fn load_config(dir: &Path) -> Result<AppConfig> {
    let path = config_file_path(dir);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| IconForgeError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        IconForgeError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// The config written by `config init`: defaults plus one sample target.
pub fn starter_config() -> AppConfig {
    AppConfig {
        defaults: DefaultsConfig::default(),
        targets: vec![TargetConfig {
            name: "icons".into(),
            namespace: None,
            pattern: Some("icons/**/*.svg".into()),
            output: "src/icons.rs".into(),
            manifest: None,
        }],
    }
}

/// Write a starter config file into `dir`. Refuses to overwrite an existing one.
/// Returns the path to the created file.
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    let path = config_file_path(dir);
    if path.exists() {
        return Err(IconForgeError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    std::fs::create_dir_all(dir).map_err(|e| IconForgeError::io(dir, e))?;

    let content = toml::to_string_pretty(&starter_config())
        .map_err(|e| IconForgeError::Serialization(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| IconForgeError::io(&path, e))?;
    tracing::info!(?path, "created starter config file");

    Ok(path)
}
