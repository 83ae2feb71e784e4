//! pilotctl - Pilot lap analytics CLI
//!
//! Loads a pilot's lap history from a JSON document, runs the analytics
//! pipeline and prints the race-aware lap chart, running-best overlays and
//! new-best markers.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod config;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{AnalyzeArgs, DescribeArgs};
use crate::config::CliConfig;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "pilotctl")]
#[command(about = "Pilot lap analytics CLI - race-aware lap charts and running bests")]
#[command(version)]
#[command(long_about = "
pilotctl turns a pilot's lap timeline into a race-aware lap chart.
It lays laps out race by race with a gap between races, computes running
best lap, best consecutive laps and best race completion, and marks the
laps where each record was set.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (YAML: analytics settings and playback ranges)
    #[arg(long, global = true, env = "PILOTCTL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the analytics pipeline and print the lap chart
    Analyze(AnalyzeArgs),

    /// Describe a single chart slot
    Describe(DescribeArgs),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("pilotctl={log_level},pilot_analytics={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Analyze(args) => {
            let config = CliConfig::load(cli.config.as_deref())?;
            commands::analyze::execute(args, cli.json, &config)
        }
        Commands::Describe(args) => {
            let config = CliConfig::load(cli.config.as_deref())?;
            commands::describe::execute(args, cli.json, &config)
        }
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::OverlayKind;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    // --- Global flag parsing ---

    #[test]
    fn parse_analyze_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["pilotctl", "analyze", "laps.json"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        match &cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.input, PathBuf::from("laps.json"));
                assert!(args.metrics.window.is_none());
                assert!(args.metrics.best_lap.is_none());
                assert!(args.overlays.is_empty());
            }
            _ => return Err("expected Analyze command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_global_json_flag_before_and_after_subcommand() -> TestResult {
        let before = Cli::try_parse_from(["pilotctl", "--json", "analyze", "laps.json"])?;
        assert!(before.json);
        let after = Cli::try_parse_from(["pilotctl", "analyze", "laps.json", "--json"])?;
        assert!(after.json);
        Ok(())
    }

    #[test]
    fn parse_verbose_levels() -> TestResult {
        for (args, expected) in [
            (vec!["pilotctl", "analyze", "x.json"], 0),
            (vec!["pilotctl", "-v", "analyze", "x.json"], 1),
            (vec!["pilotctl", "-vv", "analyze", "x.json"], 2),
            (vec!["pilotctl", "-vvv", "analyze", "x.json"], 3),
        ] {
            let cli = Cli::try_parse_from(args)?;
            assert_eq!(cli.verbose, expected);
        }
        Ok(())
    }

    #[test]
    fn parse_config_flag() -> TestResult {
        let cli = Cli::try_parse_from([
            "pilotctl",
            "--config",
            "pilotctl.yaml",
            "analyze",
            "laps.json",
        ])?;
        assert_eq!(cli.config, Some(PathBuf::from("pilotctl.yaml")));
        Ok(())
    }

    // --- Analyze parsing ---

    #[test]
    fn parse_analyze_overrides_and_overlays() -> TestResult {
        let cli = Cli::try_parse_from([
            "pilotctl",
            "analyze",
            "laps.json",
            "--window",
            "3",
            "--best-lap",
            "18.25",
            "--overlay",
            "best-lap",
            "--overlay",
            "race-total",
        ])?;
        match &cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.metrics.window, Some(3));
                assert!(args.metrics.best_lap.is_some_and(|b| (b - 18.25).abs() < 1e-9));
                assert_eq!(
                    args.overlays,
                    vec![OverlayKind::BestLap, OverlayKind::RaceTotal]
                );
            }
            _ => return Err("expected Analyze command".into()),
        }
        Ok(())
    }

    // --- Describe parsing ---

    #[test]
    fn parse_describe_slot() -> TestResult {
        let cli = Cli::try_parse_from(["pilotctl", "describe", "laps.json", "--slot", "4"])?;
        match &cli.command {
            Commands::Describe(args) => {
                assert_eq!(args.slot, 4);
                assert_eq!(args.input, PathBuf::from("laps.json"));
            }
            _ => return Err("expected Describe command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_completion_bash() -> TestResult {
        let cli = Cli::try_parse_from(["pilotctl", "completion", "bash"])?;
        assert!(matches!(cli.command, Commands::Completion { .. }));
        Ok(())
    }

    // --- Rejection / error cases ---

    #[test]
    fn reject_no_subcommand() {
        assert!(Cli::try_parse_from(["pilotctl"]).is_err());
    }

    #[test]
    fn reject_unknown_subcommand() {
        assert!(Cli::try_parse_from(["pilotctl", "nonexistent"]).is_err());
    }

    #[test]
    fn reject_missing_input() {
        assert!(Cli::try_parse_from(["pilotctl", "analyze"]).is_err());
    }

    #[test]
    fn reject_describe_without_slot() {
        assert!(Cli::try_parse_from(["pilotctl", "describe", "laps.json"]).is_err());
    }

    #[test]
    fn reject_unknown_overlay() {
        let result =
            Cli::try_parse_from(["pilotctl", "analyze", "laps.json", "--overlay", "bars"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_non_numeric_window() {
        let result = Cli::try_parse_from(["pilotctl", "analyze", "laps.json", "--window", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_missing_completion_shell() {
        assert!(Cli::try_parse_from(["pilotctl", "completion"]).is_err());
    }
}
