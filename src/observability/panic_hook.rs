//! Custom panic hook for structured crash reports.
//!
//! A crash report names the pipeline phase and the file in flight, which is
//! usually enough to find the offending run log row or output path.

use super::context::{get_current_context, PipelineContext};
use std::panic::PanicHookInfo;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RULE: &str = "════════════════════════════════════════════════════════════════════════════════";

/// Install the custom panic hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();

    eprintln!();
    eprintln!("{}", RULE);
    eprintln!("  RUNLOG-ANALYZER CRASH REPORT");
    eprintln!("  Version: {}", VERSION);
    eprintln!("  Platform: {}", std::env::consts::OS);
    eprintln!("  Time: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    eprintln!("{}", RULE);
    print_panic_details(info);
    print_context_section(&context);
    print_backtrace_section();
}

fn print_panic_details(info: &PanicHookInfo<'_>) {
    eprintln!("  PANIC: {}", truncate(&extract_panic_message(info), 200));

    if let Some(location) = info.location() {
        eprintln!(
            "  Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        );
    }
}

fn print_context_section(context: &PipelineContext) {
    eprintln!("  CONTEXT:");
    match &context.phase {
        Some(phase) => eprintln!("    Phase: {}", phase),
        None => eprintln!("    Phase: (not set - crash occurred before the pipeline started)"),
    }
    if let Some(file) = &context.current_file {
        eprintln!("    File: {}", file.display());
    }
}

fn print_backtrace_section() {
    eprintln!("{}", RULE);
    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        eprintln!("  Run with RUST_BACKTRACE=1 for stack trace");
    }
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_long_strings_with_ellipsis() {
        assert_eq!(truncate("this is a long message", 10), "this is...");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }
}
