//! Tool descriptors
//!
//! A descriptor names a tool, the binary to probe, the registry to ask for
//! the latest release and how to read that release out of the response.

use crate::registry::response;
use anyhow::{Context, Result};
use serde_json::Value;
use std::env::VarError;
use url::Url;

/// Maps a parsed registry response to the raw "latest" string.
pub type ResponseParser = fn(Value) -> Option<String>;

/// Static configuration for one checked tool
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    /// Display name for user-facing messages
    pub name: &'static str,
    /// Name of the tool binary (e.g., "node")
    pub binary: &'static str,
    /// Registry endpoint publishing the latest release
    pub registry_url: String,
    /// Reads the latest version out of the registry response
    pub parse_latest: ResponseParser,
}

impl ToolDescriptor {
    pub fn new(
        name: &'static str,
        binary: &'static str,
        registry_url: impl Into<String>,
        parse_latest: ResponseParser,
    ) -> Self {
        Self {
            name,
            binary,
            registry_url: registry_url.into(),
            parse_latest,
        }
    }

    /// Environment variable that overrides this tool's registry URL
    pub fn registry_env_var(&self) -> String {
        format!(
            "CHECK_VERSIONS_{}_REGISTRY",
            self.binary.to_ascii_uppercase().replace('-', "_")
        )
    }

    /// Apply a registry override from the environment, validating the URL.
    pub fn with_registry_override<F>(mut self, env_fn: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let var = self.registry_env_var();
        if let Ok(url) = env_fn(&var) {
            self.registry_url = url;
        }

        Url::parse(&self.registry_url).with_context(|| {
            format!(
                "Invalid registry URL for {}: {} (set via {}?)",
                self.name, self.registry_url, var
            )
        })?;

        Ok(self)
    }
}

/// Node.js release index
pub const NODE_REGISTRY: &str = "https://nodejs.org/dist/index.json";

/// npm package metadata
pub const NPM_REGISTRY: &str = "https://registry.npmjs.com/npm/";

/// Git source tags
pub const GIT_REGISTRY: &str = "https://api.github.com/repos/git/git/tags";

/// Pre-configured descriptor for Node.js
pub fn node_tool() -> ToolDescriptor {
    ToolDescriptor::new("Node", "node", NODE_REGISTRY, response::node_latest)
}

/// Pre-configured descriptor for npm
pub fn npm_tool() -> ToolDescriptor {
    ToolDescriptor::new("npm", "npm", NPM_REGISTRY, response::npm_latest)
}

/// Pre-configured descriptor for Git
pub fn git_tool() -> ToolDescriptor {
    ToolDescriptor::new("Git", "git", GIT_REGISTRY, response::git_latest)
}

/// The default ordered tool list: runtime, package manager, version control.
pub fn default_tools() -> Vec<ToolDescriptor> {
    vec![node_tool(), npm_tool(), git_tool()]
}

/// Keep only the descriptors whose binary is listed, preserving default order.
///
/// An empty selection keeps everything.
pub fn select_tools(
    tools: Vec<ToolDescriptor>,
    binaries: &[String],
) -> Result<Vec<ToolDescriptor>> {
    if binaries.is_empty() {
        return Ok(tools);
    }

    for wanted in binaries {
        if !tools.iter().any(|t| t.binary == wanted.as_str()) {
            let known: Vec<_> = tools.iter().map(|t| t.binary).collect();
            anyhow::bail!("Unknown tool '{}' (known: {})", wanted, known.join(", "));
        }
    }

    Ok(tools
        .into_iter()
        .filter(|t| binaries.iter().any(|b| b.as_str() == t.binary))
        .collect())
}

/// Default tools filtered by `binaries`, with registry overrides read from
/// the process environment.
pub fn configured_tools(binaries: &[String]) -> Result<Vec<ToolDescriptor>> {
    select_tools(default_tools(), binaries)?
        .into_iter()
        .map(|tool| tool.with_registry_override(|var| std::env::var(var)))
        .collect()
}
