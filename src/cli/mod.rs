use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use serde::Serialize;

use crate::aws::AwsDeleter;
use crate::cleanup;
use crate::core::{Report, Thresholds};
use crate::discover::DiscoverOptions;
use crate::ui::UiConfig;

#[derive(Debug, Parser)]
#[command(
    name = "awsweep",
    version,
    about = "Discover and clean up orphaned AWS resources left behind by serverless deployments"
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub json: bool,
    #[arg(long, global = true)]
    pub verbose: bool,
    #[arg(long, global = true)]
    pub quiet: bool,
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Discover(DiscoverArgs),
    Cleanup(CleanupArgs),
    Completion(CompletionArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Resources must be strictly older than this many days.
    #[arg(long)]
    pub age_days: Option<u64>,
    /// Maximum summed invocations for a Lambda to count as idle.
    #[arg(long)]
    pub invoke_threshold: Option<u64>,
    /// Invocation monitoring window in days.
    #[arg(long)]
    pub monitor_days: Option<u64>,
    /// Regions to sweep; overrides the configured list. Repeatable.
    #[arg(long)]
    pub region: Vec<String>,
    /// Marker substring overriding the configured one.
    #[arg(long)]
    pub marker: Option<String>,
    /// Directory the report is written to.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CleanupArgs {
    /// Path to a discovery report.
    pub report_file: PathBuf,
    /// Identifiers of resources to delete.
    #[arg(required = true)]
    pub resource_ids: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CompletionArgs {
    pub shell: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[arg(long)]
    pub show: bool,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let home_dir = crate::config::effective_home_dir()?;
    let env_config_path = std::env::var_os("AWSWEEP_CONFIG").map(PathBuf::from);
    let cfg = crate::config::load(
        cli.config.as_deref().or(env_config_path.as_deref()),
        &home_dir,
    )
    .map_err(crate::exit::invalid_args_err)?;

    let ui_cfg = UiConfig {
        quiet: cli.quiet,
        verbose: cli.verbose,
    };
    let show_progress = io::stderr().is_terminal() && !cli.quiet && !cli.json;

    match cli.command {
        Commands::Discover(args) => {
            let regions = if args.region.is_empty() {
                cfg.discover.regions.clone()
            } else {
                args.region
            };
            if regions.is_empty() {
                return Err(crate::exit::invalid_args(
                    "discover: at least one region is required",
                ));
            }
            let marker = args
                .marker
                .map(|m| m.trim().to_lowercase())
                .unwrap_or_else(|| cfg.discover.marker.clone());
            if marker.is_empty() {
                return Err(crate::exit::invalid_args(
                    "discover: the marker substring must not be empty",
                ));
            }

            let thresholds = Thresholds {
                age_days: args.age_days.unwrap_or(cfg.thresholds.age_days),
                invoke_threshold: args
                    .invoke_threshold
                    .unwrap_or(cfg.thresholds.invoke_threshold),
                monitor_days: args.monitor_days.unwrap_or(cfg.thresholds.monitor_days),
            };
            if thresholds.monitor_days == 0 {
                return Err(crate::exit::invalid_args(
                    "discover: --monitor-days must be greater than 0",
                ));
            }

            let opts = DiscoverOptions {
                regions,
                marker,
                thresholds,
                output_dir: args.output_dir.unwrap_or_else(|| PathBuf::from(".")),
                show_progress,
            };
            let (report, path) = crate::discover::run(&opts).await?;

            if cli.json {
                write_json(&report)?;
            } else {
                crate::ui::print_discovery_summary(&report, &thresholds, &path, &ui_cfg);
            }
        }
        Commands::Cleanup(args) => {
            // An unreadable or malformed report ends the run without any
            // deletions, but it is not a process failure.
            let report = match Report::load(&args.report_file) {
                Ok(report) => report,
                Err(err) => {
                    if !ui_cfg.quiet {
                        println!("Report file not found or unreadable: {err:#}");
                    }
                    return Ok(());
                }
            };

            let targets = cleanup::match_targets(&report, &args.resource_ids);

            if cli.dry_run {
                crate::ui::print_dry_run(&targets, &ui_cfg);
                return Ok(());
            }

            let mut deleter =
                AwsDeleter::new(Duration::from_secs(cfg.cleanup.serverless_timeout_secs));
            let results = cleanup::run_cleanup(&mut deleter, &targets).await;

            if cli.json {
                write_json(&results)?;
            } else {
                crate::ui::print_cleanup_results(&results, &ui_cfg);
            }
        }
        Commands::Completion(args) => {
            let shell = parse_shell(&args.shell)?;
            let mut cmd = Cli::command();
            let mut out = io::stdout().lock();
            clap_complete::generate(shell, &mut cmd, "awsweep", &mut out);
        }
        Commands::Config(args) => {
            if args.show {
                if cli.json {
                    write_json(&cfg)?;
                } else {
                    println!("{}", toml::to_string_pretty(&cfg)?);
                }
            } else if !ui_cfg.quiet {
                eprintln!("config: use `awsweep config --show`");
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "awsweep=debug" } else { "awsweep=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), value)?;
    println!();
    Ok(())
}

fn parse_shell(s: &str) -> Result<clap_complete::Shell> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "bash" => Ok(clap_complete::Shell::Bash),
        "zsh" => Ok(clap_complete::Shell::Zsh),
        "fish" => Ok(clap_complete::Shell::Fish),
        other => Err(crate::exit::invalid_args(format!(
            "unsupported shell: {other} (expected bash|zsh|fish)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_discover_flags() {
        let cli = Cli::try_parse_from([
            "awsweep",
            "discover",
            "--age-days",
            "30",
            "--invoke-threshold",
            "5",
            "--monitor-days",
            "14",
            "--region",
            "us-east-1",
            "--region",
            "eu-west-1",
        ])
        .unwrap();
        let Commands::Discover(args) = cli.command else {
            panic!("expected discover");
        };
        assert_eq!(args.age_days, Some(30));
        assert_eq!(args.invoke_threshold, Some(5));
        assert_eq!(args.monitor_days, Some(14));
        assert_eq!(args.region, vec!["us-east-1", "eu-west-1"]);
    }

    #[test]
    fn cleanup_requires_at_least_one_identifier() {
        assert!(Cli::try_parse_from(["awsweep", "cleanup", "report.json"]).is_err());
        assert!(
            Cli::try_parse_from(["awsweep", "cleanup", "report.json", "my-stack"]).is_ok()
        );
    }

    #[test]
    fn parse_shell_rejects_unknown() {
        assert!(parse_shell("bash").is_ok());
        assert!(parse_shell(" Zsh ").is_ok());
        assert!(parse_shell("powershell").is_err());
    }
}
