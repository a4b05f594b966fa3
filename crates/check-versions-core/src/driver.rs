//! Check driver
//!
//! Runs probe → registry → comparison for each tool strictly in order. A
//! failure for one tool is reported and the next tool still runs.

use crate::error::Result;
use crate::registry::{self, HttpFetcher};
use crate::report::{Reporter, Summary};
use crate::runtime::probe::{probe_version, ProcessRunner};
use crate::runtime::tool::ToolDescriptor;
use crate::version::compare_versions;
use tracing::{debug, warn};

/// Result of one successful tool check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub tool_name: String,
    pub current_version: String,
    pub latest_version: String,
    pub outdated: bool,
}

/// Drives checks through injected process and HTTP capabilities
pub struct CheckDriver<R, F> {
    runner: R,
    fetcher: F,
}

impl<R: ProcessRunner, F: HttpFetcher> CheckDriver<R, F> {
    pub fn new(runner: R, fetcher: F) -> Self {
        Self { runner, fetcher }
    }

    /// Check a single tool. The registry is only contacted once the tool
    /// has been found locally.
    pub async fn check_tool(&self, tool: &ToolDescriptor) -> Result<CheckResult> {
        let current = probe_version(&self.runner, tool.binary).await?;
        self.check_against_registry(tool, current).await
    }

    async fn check_against_registry(
        &self,
        tool: &ToolDescriptor,
        current: String,
    ) -> Result<CheckResult> {
        let latest = registry::fetch_latest(&self.fetcher, tool).await?;
        let freshness = compare_versions(&current, &latest)?;

        debug!("{}: {} vs {} ({})", tool.name, current, latest, freshness);

        Ok(CheckResult {
            tool_name: tool.name.to_string(),
            current_version: current,
            latest_version: latest,
            outdated: freshness.is_outdated(),
        })
    }

    /// Check every tool in order, reporting each outcome as it completes,
    /// then signal completion through [`Reporter::finish`].
    pub async fn run(&self, tools: &[ToolDescriptor], reporter: &mut dyn Reporter) -> Summary {
        let mut summary = Summary::default();

        for tool in tools {
            reporter.checking(tool);

            let outcome = match probe_version(&self.runner, tool.binary).await {
                Ok(current) => {
                    reporter.fetching(tool);
                    self.check_against_registry(tool, current).await
                }
                Err(e) => Err(e),
            };
            if let Err(e) = &outcome {
                warn!("Could not check {}: {}", tool.name, e);
            }

            summary.record(&outcome);
            reporter.report(tool, &outcome);
        }

        reporter.finish(&summary);
        summary
    }
}
