use anyhow::{Context, Result};
use clap::Parser;
use runlog_analyzer::cli::{AnalyzeArgs, Cli, Commands};
use runlog_analyzer::commands;
use runlog_analyzer::config::resolve_config;
use runlog_analyzer::observability::install_panic_hook;
use runlog_analyzer::RunLogError;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    install_panic_hook();

    let args = cli.effective_analyze_args();
    init_logging(args.verbosity);

    // Single error boundary: print one line and exit non-zero.
    match dispatch(cli.command, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error: {:#}", err);
            log_failure(&err);
            ExitCode::from(1)
        }
    }
}

fn dispatch(command: Option<Commands>, args: &AnalyzeArgs) -> Result<()> {
    match command {
        Some(Commands::Init { force }) => commands::init::init_config(force),
        Some(Commands::Analyze(_)) | None => handle_analyze(args),
    }
}

// Input and config problems get a hint on stderr; other failures log their
// cause chain at debug level.
fn log_failure(err: &anyhow::Error) {
    let user_fixable = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<RunLogError>())
        .any(RunLogError::is_user_fixable);

    if user_fixable {
        log::warn!(
            "Check --input, --config and .runlog.toml; `runlog-analyzer init` writes a template"
        );
    } else {
        log::debug!("{:?}", err);
    }
}

fn handle_analyze(args: &AnalyzeArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref(), args.overrides())?;
    log::info!(
        "Analyzing {} into {}",
        config.input.display(),
        config.output_dir.display()
    );

    let report = commands::analyze::run_analysis(&config)
        .with_context(|| format!("analysis of {} failed", config.input.display()))?;

    for line in report.summary_lines() {
        println!("{}", line);
    }
    log::info!(
        "{} stop event(s), {} sequence(s), longest sequence {}",
        report.stop_count,
        report.sequence_count,
        report.longest_sequence
    );
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
