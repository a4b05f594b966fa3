//! Run settings shared by the probe, the registry client and the binary

use crate::registry::DEFAULT_HTTP_TIMEOUT;
use crate::runtime::probe::DEFAULT_PROBE_TIMEOUT;
use std::time::Duration;

/// CLI version, reported in the user agent
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolved settings for one run
///
/// Nothing here is persisted; values come from flags and environment
/// variables each time the program starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Bound on each `--version` invocation
    pub probe_timeout: Duration,
    /// Bound on each registry request
    pub http_timeout: Duration,
    /// User agent sent to every registry
    pub user_agent: String,
    /// Exit non-zero when any tool is outdated
    pub fail_on_outdated: bool,
}

impl Settings {
    /// Same bound for probes and requests.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self.http_timeout = timeout;
        self
    }

    pub fn with_fail_on_outdated(mut self, fail_on_outdated: bool) -> Self {
        self.fail_on_outdated = fail_on_outdated;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            user_agent: default_user_agent(),
            fail_on_outdated: false,
        }
    }
}

/// `check-versions/<version> (+<repository>)`
pub fn default_user_agent() -> String {
    format!(
        "check-versions/{} (+{})",
        CLI_VERSION,
        env!("CARGO_PKG_REPOSITORY")
    )
}
