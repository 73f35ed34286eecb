use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use depscan::{
    config::Config,
    model::ScanOutcome,
    output::{format_result_to_string, status, OutputFormat, ReportScope},
    scanner::TreeScanner,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const WARNINGS: u8 = 1;
    pub const CRITICAL: u8 = 2;
    pub const ERROR: u8 = 2;
}

#[derive(Parser)]
#[command(name = "depscan")]
#[command(
    author,
    version,
    about = "Analyze Python dependencies across a directory of tools",
    after_help = "Examples:\n  depscan scan                       Scan the configured (or current) directory\n  depscan scan --path /custom/path   Scan a custom directory\n  depscan scan --format json         Output as JSON\n  depscan scan --output report.md -f markdown"
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan tools, report conflicts and statistics
    Scan(ScanArgs),

    /// Scan tools and report only version conflicts
    Conflicts(ScanArgs),

    /// Scan tools and report only dependency statistics
    Stats(ScanArgs),

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args)]
struct ScanArgs {
    /// Directory containing the tools (default: config `default_root`, else current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Output format (text, json, markdown)
    #[arg(short, long)]
    format: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {:#}", status::ERROR, e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("depscan={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<u8> {
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("{}; using default configuration", e);
        Config::default()
    });

    let (args, scope) = match cli.command {
        Commands::Scan(args) => (args, ReportScope::Full),
        Commands::Conflicts(args) => (args, ReportScope::Conflicts),
        Commands::Stats(args) => (args, ReportScope::Statistics),
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            return Ok(exit_codes::SUCCESS);
        }
    };

    run_scan(args, &config, scope).context("Scan failed")
}

fn run_scan(args: ScanArgs, config: &Config, scope: ReportScope) -> Result<u8> {
    let format_str = args.format.unwrap_or_else(|| config.default_format.clone());
    let format = OutputFormat::from_str(&format_str).map_err(|e| anyhow::anyhow!(e))?;
    let root = args.path.unwrap_or_else(|| config.root());
    let is_interactive = format == OutputFormat::Text && args.output.is_none();

    eprintln!("{} Scanning {}...", status::INFO, root.display());

    let progress = if is_interactive {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Discovering tools...");
        Some(pb)
    } else {
        None
    };

    let scanner = TreeScanner::from_config(&root, config);
    let tools = scanner.discover_tools();

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let tools = tools?;

    eprintln!("{} Found {} tools", status::OK, tools.len());
    eprintln!("{} Analyzing dependencies...", status::INFO);

    let outcome = ScanOutcome::from_tools(tools);
    let report = format_result_to_string(&outcome, format, scope)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("{} Report saved to {}", status::OK, path.display());
        }
        None => println!("{}", report),
    }

    if scope != ReportScope::Statistics {
        print_summary(&outcome);
    }

    Ok(determine_exit_code(&outcome, scope))
}

/// 0 when clean, 1 for warnings only, 2 when any conflict is critical.
/// The statistics report always succeeds.
fn determine_exit_code(outcome: &ScanOutcome, scope: ReportScope) -> u8 {
    if scope == ReportScope::Statistics {
        exit_codes::SUCCESS
    } else if outcome.has_critical() {
        exit_codes::CRITICAL
    } else if !outcome.conflicts.is_empty() {
        exit_codes::WARNINGS
    } else {
        exit_codes::SUCCESS
    }
}

fn print_summary(outcome: &ScanOutcome) {
    let critical = outcome.critical_conflicts().count();

    eprintln!();
    if critical > 0 {
        eprintln!("{} {} critical conflicts found!", status::ERROR, critical);
    } else if !outcome.conflicts.is_empty() {
        eprintln!("{} {} warnings found", status::WARNING, outcome.conflicts.len());
    } else {
        eprintln!("{} No conflicts found!", status::OK);
    }
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'depscan config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
