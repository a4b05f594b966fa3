//! Per-tool report lines and the run summary

use crate::driver::CheckResult;
use crate::error::CheckError;
use crate::runtime::tool::ToolDescriptor;
use colored::Colorize;
use tracing::debug;

/// Outcome of one tool's check
pub type CheckOutcome = Result<CheckResult, CheckError>;

/// Receives progress from the driver, one tool at a time
pub trait Reporter {
    /// A tool's check is about to start.
    fn checking(&mut self, _tool: &ToolDescriptor) {}

    /// The tool was found locally and its registry is being queried.
    fn fetching(&mut self, _tool: &ToolDescriptor) {}

    /// A tool's check finished; called exactly once per tool, in input order.
    fn report(&mut self, tool: &ToolDescriptor, outcome: &CheckOutcome);

    /// Every tool has been reported.
    fn finish(&mut self, _summary: &Summary) {}
}

/// Tally of a full run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub checked: usize,
    pub up_to_date: usize,
    pub outdated: usize,
    pub failed: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: &CheckOutcome) {
        self.checked += 1;
        match outcome {
            Ok(result) if result.outdated => self.outdated += 1,
            Ok(_) => self.up_to_date += 1,
            Err(_) => self.failed += 1,
        }
    }

    /// Process exit code for this run.
    ///
    /// Outdated tools only fail the run when asked to; failed checks never do.
    pub fn exit_code(&self, fail_on_outdated: bool) -> u8 {
        if fail_on_outdated && self.outdated > 0 {
            1
        } else {
            0
        }
    }
}

/// Render the single report line for a tool.
pub fn render_line(tool_name: &str, outcome: &CheckOutcome) -> String {
    match outcome {
        Ok(result) if result.outdated => format!(
            "✘ ({}) {} is out of date! Latest version: {}",
            tool_name,
            format!("v{}", result.current_version).underline(),
            format!("v{}", result.latest_version).underline()
        )
        .red()
        .to_string(),
        Ok(result) => format!(
            "✓ ({}) {} is the latest version.",
            tool_name,
            format!("v{}", result.current_version).underline()
        )
        .green()
        .to_string(),
        Err(e) => format!(
            "{} {}",
            format!(
                "Something went wrong trying to check the latest version for {}.",
                tool_name
            )
            .yellow(),
            format!("({})", e).dimmed()
        ),
    }
}

/// Prints report lines to stdout, with an optional spinner on stderr
pub struct ConsoleReporter {
    show_progress: bool,
    #[cfg(feature = "tui")]
    spinner: Option<cliclack::ProgressBar>,
}

impl ConsoleReporter {
    /// `show_progress` enables the spinner when stderr is a terminal and the
    /// `tui` feature is on.
    pub fn new(show_progress: bool) -> Self {
        #[cfg(feature = "tui")]
        let show_progress = show_progress && console::Term::stderr().is_term();

        Self {
            show_progress,
            #[cfg(feature = "tui")]
            spinner: None,
        }
    }

    pub fn shows_progress(&self) -> bool {
        self.show_progress
    }

    /// The report line replaces the spinner, so nothing is left behind.
    #[cfg(feature = "tui")]
    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.clear();
        }
    }
}

impl Reporter for ConsoleReporter {
    fn checking(&mut self, tool: &ToolDescriptor) {
        debug!("Checking {}", tool.name);
    }

    fn fetching(&mut self, tool: &ToolDescriptor) {
        debug!("Querying {} for {}", tool.registry_url, tool.name);

        #[cfg(feature = "tui")]
        {
            if self.show_progress {
                let spinner = cliclack::spinner();
                spinner.start(format!("Checking {} version...", tool.name));
                self.spinner = Some(spinner);
            }
        }
    }

    fn report(&mut self, tool: &ToolDescriptor, outcome: &CheckOutcome) {
        #[cfg(feature = "tui")]
        self.clear_spinner();

        println!("{}", render_line(tool.name, outcome));
    }

    fn finish(&mut self, summary: &Summary) {
        debug!(
            "Checked {} tool(s): {} up to date, {} outdated, {} failed",
            summary.checked, summary.up_to_date, summary.outdated, summary.failed
        );
    }
}
