//! Registry response shapes and the parsers attached to tool descriptors

use crate::error::{CheckError, Result};
use crate::runtime::tool::ResponseParser;
use crate::version::extract_version;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// One entry of the Node.js release index (newest first)
#[derive(Debug, Deserialize)]
pub struct NodeRelease {
    pub version: String,
}

/// npm package document; only the distribution tags are read
#[derive(Debug, Deserialize)]
pub struct NpmPackage {
    #[serde(rename = "dist-tags")]
    pub dist_tags: HashMap<String, String>,
}

/// One entry of a GitHub tags listing (newest first)
#[derive(Debug, Deserialize)]
pub struct GitTag {
    pub name: String,
}

pub fn node_latest(value: Value) -> Option<String> {
    let releases: Vec<NodeRelease> = serde_json::from_value(value).ok()?;
    releases.into_iter().next().map(|r| r.version)
}

pub fn npm_latest(value: Value) -> Option<String> {
    let package: NpmPackage = serde_json::from_value(value).ok()?;
    package.dist_tags.get("latest").cloned()
}

pub fn git_latest(value: Value) -> Option<String> {
    let tags: Vec<GitTag> = serde_json::from_value(value).ok()?;
    tags.into_iter().next().map(|t| t.name)
}

/// Turn a raw registry body into the latest version string.
///
/// The body must be JSON and the parser must find its field; the field's
/// value then goes through the same extraction as probe output.
pub fn latest_version(url: &str, body: &str, parse: ResponseParser) -> Result<String> {
    let value: Value = serde_json::from_str(body).map_err(|e| CheckError::BadBody {
        url: url.to_string(),
        message: format!("invalid JSON: {}", e),
    })?;

    let raw = parse(value).ok_or_else(|| CheckError::BadBody {
        url: url.to_string(),
        message: "latest version field missing".to_string(),
    })?;

    extract_version(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_takes_first_release() {
        let index = json!([
            {"version": "v21.2.0", "date": "2023-11-14", "lts": false},
            {"version": "v21.1.0", "date": "2023-10-24", "lts": false}
        ]);
        assert_eq!(node_latest(index).as_deref(), Some("v21.2.0"));
    }

    #[test]
    fn test_node_empty_index() {
        assert_eq!(node_latest(json!([])), None);
    }

    #[test]
    fn test_npm_reads_latest_tag() {
        let doc = json!({
            "name": "npm",
            "dist-tags": {"latest": "10.2.4", "next-9": "9.9.2"}
        });
        assert_eq!(npm_latest(doc).as_deref(), Some("10.2.4"));
    }

    #[test]
    fn test_npm_without_dist_tags() {
        assert_eq!(npm_latest(json!({"name": "npm"})), None);
    }

    #[test]
    fn test_git_takes_first_tag() {
        let tags = json!([
            {"name": "v2.43.0", "commit": {"sha": "abc"}},
            {"name": "v2.43.0-rc2", "commit": {"sha": "def"}}
        ]);
        assert_eq!(git_latest(tags).as_deref(), Some("v2.43.0"));
    }

    #[test]
    fn test_latest_version_strips_tag_prefix() {
        let body = r#"[{"name": "v2.43.0"}]"#;
        assert_eq!(latest_version("u", body, git_latest).unwrap(), "2.43.0");
    }

    #[test]
    fn test_latest_version_invalid_json() {
        let err = latest_version("u", "<html>oops</html>", npm_latest).unwrap_err();
        assert!(matches!(err, CheckError::BadBody { .. }));
    }

    #[test]
    fn test_latest_version_wrong_shape() {
        let err = latest_version("u", r#"{"message": "Not Found"}"#, git_latest).unwrap_err();
        assert!(matches!(err, CheckError::BadBody { .. }));
    }

    #[test]
    fn test_latest_version_unversioned_value() {
        let body = r#"{"dist-tags": {"latest": "soon"}}"#;
        let err = latest_version("u", body, npm_latest).unwrap_err();
        assert!(matches!(err, CheckError::Extraction { .. }));
    }
}
