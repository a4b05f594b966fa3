//! check-versions core - checks local developer tools against their latest releases
//!
//! Each configured tool is probed with `--version`, its registry is asked for
//! the latest published release, and the two are compared. Tools are checked
//! one at a time, in order, and each produces exactly one report line.
//!
//! # Architecture
//!
//! - **Extraction and comparison** - [`version`]: pure functions over strings
//! - **Collaborators** - [`runtime::ProcessRunner`] and [`registry::HttpFetcher`],
//!   injected so the driver runs without real binaries or networks
//! - **Orchestration** - [`CheckDriver`] feeding a [`Reporter`]
//!
//! # Feature Flags
//!
//! - `tui` (default): shows a cliclack spinner while a registry is queried
//!
//! # Example Usage
//!
//! ```ignore
//! use check_versions_core::{default_tools, CheckDriver, ConsoleReporter, Settings};
//! use check_versions_core::{ReqwestFetcher, SystemRunner};
//!
//! let settings = Settings::default();
//! let driver = CheckDriver::new(
//!     SystemRunner::new(settings.probe_timeout),
//!     ReqwestFetcher::new(&settings.user_agent, settings.http_timeout)?,
//! );
//! let summary = driver.run(&default_tools(), &mut ConsoleReporter::new(true)).await;
//! ```

pub mod driver;
pub mod error;
pub mod registry;
pub mod report;
pub mod runtime;
pub mod settings;
pub mod version;

// Re-export main types for convenience
pub use driver::{CheckDriver, CheckResult};
pub use error::{CheckError, ErrorKind};
pub use registry::{HttpFetcher, ReqwestFetcher};
pub use report::{render_line, CheckOutcome, ConsoleReporter, Reporter, Summary};
pub use runtime::{
    configured_tools, default_tools, select_tools, ProcessRunner, SystemRunner, ToolDescriptor,
};
pub use settings::Settings;
pub use version::{compare_versions, extract_version, Freshness};
