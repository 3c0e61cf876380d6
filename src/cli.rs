use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(name = "runlog-analyzer")]
#[command(about = "Stop-event reports and consecutive failure sequences from test run logs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a run log (the default when no subcommand is given)
    Analyze(AnalyzeArgs),

    /// Write a default .runlog.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Run log CSV to analyze
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Directory for CSV and HTML reports
    #[arg(long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Status value marking a stopped run
    #[arg(long = "stop-marker")]
    pub stop_marker: Option<String>,

    /// Configuration file (defaults to .runlog.toml in this or a parent directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Analyze flags in effect for this invocation.
    ///
    /// Flags given after `analyze` win; anything left unset falls back to the
    /// same flag given before the subcommand. Verbosity takes the larger count.
    pub fn effective_analyze_args(&self) -> AnalyzeArgs {
        match &self.command {
            Some(Commands::Analyze(args)) => args.clone().or(&self.analyze),
            _ => self.analyze.clone(),
        }
    }
}

impl AnalyzeArgs {
    fn or(self, outer: &AnalyzeArgs) -> AnalyzeArgs {
        AnalyzeArgs {
            input: self.input.or_else(|| outer.input.clone()),
            output_dir: self.output_dir.or_else(|| outer.output_dir.clone()),
            stop_marker: self.stop_marker.or_else(|| outer.stop_marker.clone()),
            config: self.config.or_else(|| outer.config.clone()),
            verbosity: self.verbosity.max(outer.verbosity),
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            output_dir: self.output_dir.clone(),
            stop_marker: self.stop_marker.clone(),
        }
    }
}
