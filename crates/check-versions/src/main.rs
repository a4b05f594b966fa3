//! check-versions CLI - are the local Node.js, npm and Git up to date?

use anyhow::Result;
use check_versions_core::{configured_tools, CheckDriver, ConsoleReporter, Settings};
use check_versions_core::{ReqwestFetcher, SystemRunner};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "check-versions")]
#[command(about = "Check whether locally installed developer tools are up to date")]
#[command(version)]
pub struct Args {
    /// Only check these tools (by binary name, repeatable: --tool node --tool git)
    #[arg(long = "tool", value_name = "BINARY")]
    pub tools: Vec<String>,

    /// Seconds to wait for each `--version` call and each registry request
    #[arg(
        long,
        value_name = "SECS",
        env = "CHECK_VERSIONS_TIMEOUT",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Exit with status 1 when any tool is out of date
    #[arg(
        long = "fail-on-outdated",
        env = "CHECK_VERSIONS_FAIL_ON_OUTDATED",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub fail_on_outdated: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Show debug logs on stderr
    #[arg(long)]
    pub debug: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// `--debug` wins over `RUST_LOG`; without either only warnings are shown.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("check_versions=debug,check_versions_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(args: Args) -> Result<u8> {
    let settings = Settings::default()
        .with_timeout(Duration::from_secs(args.timeout))
        .with_fail_on_outdated(args.fail_on_outdated);
    tracing::debug!("Settings: {:?}", settings);

    let tools = configured_tools(&args.tools)?;

    let driver = CheckDriver::new(
        SystemRunner::new(settings.probe_timeout),
        ReqwestFetcher::new(&settings.user_agent, settings.http_timeout)?,
    );
    let mut reporter = ConsoleReporter::new(true);

    let summary = driver.run(&tools, &mut reporter).await;

    Ok(summary.exit_code(settings.fail_on_outdated))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.debug);

    // colored already honours a non-empty NO_COLOR on its own
    if args.no_color {
        colored::control::set_override(false);
    }

    let result = run(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_checks_everything() {
        let args = Args::try_parse_from(["check-versions"]).unwrap();
        assert!(args.tools.is_empty());
        assert!(!args.no_color);
        assert!(!args.debug);
    }

    #[test]
    fn test_repeated_tool_flag() {
        let args =
            Args::try_parse_from(["check-versions", "--tool", "git", "--tool", "npm"]).unwrap();
        assert_eq!(args.tools, vec!["git", "npm"]);
    }

    #[test]
    fn test_explicit_timeout_and_gate() {
        let args =
            Args::try_parse_from(["check-versions", "--timeout", "3", "--fail-on-outdated"])
                .unwrap();
        assert_eq!(args.timeout, 3);
        assert!(args.fail_on_outdated);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(Args::try_parse_from(["check-versions", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_env_fallbacks() {
        // One test owns these variables so parallel tests never see them
        std::env::set_var("CHECK_VERSIONS_TIMEOUT", "4");
        std::env::set_var("CHECK_VERSIONS_FAIL_ON_OUTDATED", "1");
        let args = Args::try_parse_from(["check-versions"]);

        std::env::set_var("CHECK_VERSIONS_FAIL_ON_OUTDATED", "no");
        let off = Args::try_parse_from(["check-versions"]);

        std::env::remove_var("CHECK_VERSIONS_TIMEOUT");
        std::env::remove_var("CHECK_VERSIONS_FAIL_ON_OUTDATED");

        let args = args.unwrap();
        assert_eq!(args.timeout, 4);
        assert!(args.fail_on_outdated);
        assert!(!off.unwrap().fail_on_outdated);
    }
}
