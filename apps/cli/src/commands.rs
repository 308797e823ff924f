//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use iconforge_codegen::support_source;
use iconforge_core::{
    GenerateReport, ProgressReporter, TargetReport, TargetStatus, collect, generate,
    write_if_changed,
};
use iconforge_discovery::{DiscoveryOptions, discover, is_absolute, relative_path};
use iconforge_shared::{
    AppConfig, Diagnostic, GenerateConfig, Severity, TargetConfig, init_config, load_config,
    load_config_from,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// iconforge: SVG icons as compile-time Rust constants.
#[derive(Parser)]
#[command(
    name = "iconforge",
    version,
    about = "Compile SVG icon files into Rust constants.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./iconforge.toml).
    #[arg(long, global = true, env = "ICONFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate Rust sources for every configured target.
    Generate(GenerateArgs),

    /// List matched assets and their identifiers without writing anything.
    List {
        /// Directory scanned for assets (overrides config).
        #[arg(long)]
        root: Option<PathBuf>,

        /// Glob pattern, relative to the root unless absolute.
        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// Write the `Icon` support type used by generated code.
    Support {
        /// Destination file (defaults to `defaults.support_output`).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags of `iconforge generate`.
#[derive(Args, Debug, Default)]
pub(crate) struct GenerateArgs {
    /// Directory scanned for assets (overrides config).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Glob pattern applied to the target(s).
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// `::`-separated module path around the container.
    #[arg(long)]
    pub namespace: Option<String>,

    /// Container module name; with `--out`, replaces configured targets.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Generated Rust file.
    #[arg(short, long)]
    pub out: Option<String>,

    /// JSON manifest file.
    #[arg(long)]
    pub manifest: Option<String>,

    /// Fail if any output is out of date instead of writing it.
    #[arg(long)]
    pub check: bool,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "iconforge=info",
        1 => "iconforge=debug",
        _ => "iconforge=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Generate(args) => cmd_generate(config_path, &args),
        Command::List { root, pattern } => cmd_list(config_path, root, pattern.as_deref()),
        Command::Support { out } => cmd_support(config_path, out),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load the config named by `--config`, or `./iconforge.toml` if present.
fn resolve_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config(&std::env::current_dir()?)?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

fn cmd_generate(config_path: Option<&Path>, args: &GenerateArgs) -> Result<()> {
    let app = resolve_config(config_path)?;
    let mut config = GenerateConfig::from(&app);
    apply_overrides(&mut config, args)?;

    info!(
        root = %config.root.display(),
        targets = config.targets.len(),
        check = config.check,
        "generating icons"
    );

    let reporter = CliProgress::new();
    let report = generate(&config, &reporter)?;

    print_report(&report, config.check);

    if report.has_errors() {
        return Err(eyre!("generation failed for one or more targets"));
    }
    if report.has_drift() {
        return Err(eyre!(
            "generated output is out of date; run `iconforge generate` to update it"
        ));
    }
    Ok(())
}

/// Merge `generate` flags into the config-derived settings.
///
/// `--name` with `--out` replaces the configured targets with one ad-hoc
/// target. Otherwise `--pattern` and `--namespace` apply to every target,
/// and `--out`/`--manifest` require exactly one configured target.
fn apply_overrides(config: &mut GenerateConfig, args: &GenerateArgs) -> Result<()> {
    if let Some(root) = &args.root {
        config.root = root.clone();
    }
    config.check |= args.check;

    if let Some(name) = &args.name {
        let output = args
            .out
            .clone()
            .ok_or_else(|| eyre!("--name requires --out"))?;
        config.targets = vec![TargetConfig {
            name: name.clone(),
            namespace: args.namespace.clone(),
            pattern: args.pattern.clone(),
            output,
            manifest: args.manifest.clone(),
        }];
        return Ok(());
    }

    if args.out.is_some() || args.manifest.is_some() {
        let [target] = config.targets.as_mut_slice() else {
            return Err(eyre!(
                "--out and --manifest need --name or exactly one configured target"
            ));
        };
        if let Some(out) = &args.out {
            target.output = out.clone();
        }
        if let Some(manifest) = &args.manifest {
            target.manifest = Some(manifest.clone());
        }
    }

    for target in &mut config.targets {
        if let Some(pattern) = &args.pattern {
            target.pattern = Some(pattern.clone());
        }
        if let Some(namespace) = &args.namespace {
            target.namespace = Some(namespace.clone());
        }
    }

    Ok(())
}

fn print_report(report: &GenerateReport, check: bool) {
    for diagnostic in report.all_diagnostics() {
        print_diagnostic(diagnostic);
    }

    println!();
    for target in &report.targets {
        println!(
            "  {:<24} {:>4} icons  {:<12} {}",
            target.container.to_string(),
            target.icon_count,
            target.status.to_string(),
            target.output.display()
        );
    }
    if let Some(status) = report.support {
        println!("  {:<24} {:>4}        {:<12}", "support type", "", status.to_string());
    }
    println!();
    println!(
        "  {} icons in {} target(s){} ({:.2}s)",
        report.icon_count(),
        report.targets.len(),
        if check { ", check only" } else { "" },
        report.elapsed.as_secs_f64()
    );
    println!();
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    let level = match diagnostic.severity {
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    eprintln!("{level}: {diagnostic}");
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn target_done(&self, report: &TargetReport, current: usize, total: usize) {
        self.spinner.set_message(format!(
            "Generated [{current}/{total}] {} ({})",
            report.container, report.status
        ));
    }

    fn done(&self, _report: &GenerateReport) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// list / support / config
// ---------------------------------------------------------------------------

fn cmd_list(config_path: Option<&Path>, root: Option<PathBuf>, pattern: Option<&str>) -> Result<()> {
    let app = resolve_config(config_path)?;
    let root = root.unwrap_or_else(|| PathBuf::from(&app.defaults.root));

    let discovered = discover(
        &root,
        &DiscoveryOptions {
            extension: app.defaults.extension.clone(),
            ..Default::default()
        },
    )?;
    for diagnostic in &discovered.diagnostics {
        print_diagnostic(diagnostic);
    }

    let root_str = root.to_string_lossy();
    let rebase = |path: &str| relative_path(&root_str, path);
    let rebaser: Option<&dyn Fn(&str) -> String> = match pattern {
        Some(p) if !is_absolute(p) => Some(&rebase),
        _ => None,
    };

    let collected = collect(&discovered.candidates, pattern, rebaser);
    for failure in &collected.failures {
        print_diagnostic(&Diagnostic::parse_failure(failure));
    }

    for icon in &collected.icons {
        println!(
            "{:<32} {}",
            icon.record.identifier,
            relative_path(&root_str, &icon.path)
        );
    }

    info!(
        matched = collected.icons.len(),
        failed = collected.failures.len(),
        filtered_out = collected.filtered_out,
        "list complete"
    );
    Ok(())
}

fn cmd_support(config_path: Option<&Path>, out: Option<PathBuf>) -> Result<()> {
    let out = match out {
        Some(out) => out,
        None => resolve_config(config_path)?
            .defaults
            .support_output
            .map(PathBuf::from)
            .ok_or_else(|| eyre!("no output path: pass --out or set defaults.support_output"))?,
    };

    let status = TargetStatus::from(write_if_changed(&out, support_source(), false)?);
    println!("{}: {status}", out.display());
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config(&std::env::current_dir()?)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
