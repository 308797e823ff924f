//! End-to-end `generate` pipeline: discover → collect → emit → write.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use iconforge_codegen::{EmitOptions, Emission, IconManifest, emit, support_source};
use iconforge_discovery::{DiscoveryOptions, discover, is_absolute, relative_path};
use iconforge_shared::{
    CandidateAsset, ContainerIdentity, Diagnostic, DiagnosticCode, GenerateConfig, Result,
    TargetConfig,
};

use crate::collector::collect;
use crate::output::{WriteStatus, sha256_hex, write_if_changed};

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Final state of one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetStatus {
    /// Output (or manifest) was rewritten.
    Written,
    /// Output already up to date.
    Unchanged,
    /// Check mode: output is stale.
    WouldChange,
    /// No icons matched; nothing was written.
    Skipped,
    /// Writing failed; see the target's ICON004 diagnostic.
    Failed,
}

impl From<WriteStatus> for TargetStatus {
    fn from(status: WriteStatus) -> Self {
        match status {
            WriteStatus::Written => Self::Written,
            WriteStatus::Unchanged => Self::Unchanged,
            WriteStatus::WouldChange => Self::WouldChange,
        }
    }
}

impl std::fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Written => "written",
            Self::Unchanged => "unchanged",
            Self::WouldChange => "would change",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Outcome of one target.
#[derive(Debug, Clone)]
pub struct TargetReport {
    pub container: ContainerIdentity,
    pub output: PathBuf,
    pub status: TargetStatus,
    /// Icons declared in the generated source.
    pub icon_count: usize,
    /// Parse failures, emptiness, sanitized identifiers, write errors.
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of a whole `generate` run.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub targets: Vec<TargetReport>,
    /// Diagnostics not tied to a target (missing root, unreadable files).
    pub diagnostics: Vec<Diagnostic>,
    /// Status of the support type file, when one is configured.
    pub support: Option<TargetStatus>,
    pub elapsed: Duration,
}

impl GenerateReport {
    /// Every diagnostic of the run, global ones first.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .chain(self.targets.iter().flat_map(|t| t.diagnostics.iter()))
    }

    pub fn has_errors(&self) -> bool {
        self.all_diagnostics().any(Diagnostic::is_error)
    }

    /// Whether check mode found stale output.
    pub fn has_drift(&self) -> bool {
        self.support == Some(TargetStatus::WouldChange)
            || self
                .targets
                .iter()
                .any(|t| t.status == TargetStatus::WouldChange)
    }

    pub fn icon_count(&self) -> usize {
        self.targets.iter().map(|t| t.icon_count).sum()
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each target has been processed.
    fn target_done(&self, report: &TargetReport, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &GenerateReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn target_done(&self, _report: &TargetReport, _current: usize, _total: usize) {}
    fn done(&self, _report: &GenerateReport) {}
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run every configured target.
///
/// 1. Validate the config
/// 2. Discover candidate assets under the root
/// 3. Write the support type, if configured
/// 4. Per target: collect, emit, write source and manifest
///
/// Per-asset and per-target problems become diagnostics in the report; only
/// invalid configuration aborts the run.
#[instrument(skip_all, fields(root = %config.root.display(), targets = config.targets.len(), check = config.check))]
pub fn generate(config: &GenerateConfig, progress: &dyn ProgressReporter) -> Result<GenerateReport> {
    let start = Instant::now();
    config.validate()?;

    let mut report = GenerateReport::default();

    if !config.root.is_dir() {
        warn!(root = %config.root.display(), "root directory not found");
        report.diagnostics.push(
            Diagnostic::new(
                DiagnosticCode::MissingRoot,
                format!("root directory not found: {}", config.root.display()),
            )
            .with_path(config.root.display().to_string()),
        );
        for target in &config.targets {
            report.targets.push(TargetReport {
                container: target.container(),
                output: PathBuf::from(&target.output),
                status: TargetStatus::Skipped,
                icon_count: 0,
                diagnostics: Vec::new(),
            });
        }
        report.elapsed = start.elapsed();
        progress.done(&report);
        return Ok(report);
    }

    // --- Phase 1: Discovery ---
    progress.phase("Discovering assets");
    let discovered = discover(
        &config.root,
        &DiscoveryOptions {
            extension: config.extension.clone(),
            ..Default::default()
        },
    )?;
    report.diagnostics.extend(discovered.diagnostics);

    // --- Phase 2: Support type ---
    if let Some(path) = &config.support_output {
        progress.phase("Writing support type");
        report.support = Some(match write_if_changed(path, support_source(), config.check) {
            Ok(status) => status.into(),
            Err(e) => {
                report.diagnostics.push(write_failure(path, &e.to_string()));
                TargetStatus::Failed
            }
        });
    }

    // --- Phase 3: Targets ---
    progress.phase("Generating targets");
    let emit_opts = EmitOptions {
        icon_type: config.icon_type.clone(),
    };
    let total = config.targets.len();

    for (i, target) in config.targets.iter().enumerate() {
        let target_report = run_target(
            target,
            &discovered.candidates,
            &config.root,
            &emit_opts,
            config.check,
        );
        progress.target_done(&target_report, i + 1, total);
        report.targets.push(target_report);
    }

    report.elapsed = start.elapsed();
    info!(
        targets = report.targets.len(),
        icons = report.icon_count(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "generate complete"
    );

    progress.done(&report);
    Ok(report)
}

/// Collect, emit, and write a single target.
#[instrument(skip_all, fields(target = %target.name))]
pub fn run_target(
    target: &TargetConfig,
    candidates: &[CandidateAsset],
    root: &Path,
    opts: &EmitOptions,
    check: bool,
) -> TargetReport {
    let container = target.container();
    let output = PathBuf::from(&target.output);
    let mut diagnostics = Vec::new();

    let pattern = target.pattern.as_deref();
    let root_str = root.to_string_lossy();
    let rebase = |path: &str| relative_path(&root_str, path);
    let rebaser: Option<&dyn Fn(&str) -> String> = match pattern {
        Some(p) if !is_absolute(p) => Some(&rebase),
        _ => None,
    };

    let collected = collect(candidates, pattern, rebaser);
    diagnostics.extend(collected.failures.iter().map(Diagnostic::parse_failure));

    let (text, icons, emitted) = match emit(collected.into_records(), &container, opts) {
        Emission::Empty(diagnostic) => {
            let diagnostic = match pattern {
                Some(p) => Diagnostic::new(
                    diagnostic.code,
                    format!("no SVG icons matched pattern `{p}` for `{container}`"),
                ),
                None => diagnostic,
            };
            warn!(%container, "{}", diagnostic.message);
            diagnostics.push(diagnostic);
            return TargetReport {
                container,
                output,
                status: TargetStatus::Skipped,
                icon_count: 0,
                diagnostics,
            };
        }
        Emission::Source {
            text,
            icons,
            diagnostics: emitted,
        } => (text, icons, emitted),
    };
    diagnostics.extend(emitted);

    let mut status = match write_if_changed(&output, &text, check) {
        Ok(status) => status,
        Err(e) => {
            diagnostics.push(write_failure(&output, &e.to_string()));
            return TargetReport {
                container,
                output,
                status: TargetStatus::Failed,
                icon_count: icons.len(),
                diagnostics,
            };
        }
    };

    if let Some(manifest_path) = &target.manifest {
        let manifest_path = Path::new(manifest_path);
        let written = IconManifest::new(&container, &icons, sha256_hex(text.as_bytes()))
            .to_json()
            .and_then(|json| write_if_changed(manifest_path, &json, check));
        match written {
            Ok(manifest_status) => status = status.merge(manifest_status),
            Err(e) => {
                diagnostics.push(write_failure(manifest_path, &e.to_string()));
                return TargetReport {
                    container,
                    output,
                    status: TargetStatus::Failed,
                    icon_count: icons.len(),
                    diagnostics,
                };
            }
        }
    }

    info!(%container, icons = icons.len(), ?status, "target complete");

    TargetReport {
        container,
        output,
        status: status.into(),
        icon_count: icons.len(),
        diagnostics,
    }
}

fn write_failure(path: &Path, reason: &str) -> Diagnostic {
    warn!(path = %path.display(), %reason, "failed to write output");
    Diagnostic::new(
        DiagnosticCode::GenerationFailed,
        format!("error generating {}: {reason}", path.display()),
    )
    .with_path(path.display().to_string())
}
