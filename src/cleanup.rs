//! Build-result trees and their cleanup.
//!
//! A [`BuildResult`] is what a library build leaves behind: its own build
//! directory plus the results of dependency libraries built along the way.
//! Cleanup removes every recorded directory, at any depth.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{CleanupPolicy, RemoveOptions};
use crate::errors::CleanupError;
use crate::remove::safe_remove_tree;
use crate::shutdown;

/// One library's build outcome. The child map is a finite tree by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResult {
    #[serde(
        rename = "buildDir",
        alias = "build_dir",
        default,
        deserialize_with = "de_nonempty_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub build_dir: Option<PathBuf>,
    #[serde(
        rename = "subLibs",
        alias = "sub_libs",
        default,
        deserialize_with = "de_null_as_empty",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub sub_libs: BTreeMap<String, BuildResult>,
}

fn de_nonempty_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.is_empty()).map(PathBuf::from))
}

fn de_null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, BuildResult>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

impl BuildResult {
    pub fn new(build_dir: Option<impl Into<PathBuf>>) -> Self {
        Self {
            build_dir: build_dir.map(Into::into),
            sub_libs: BTreeMap::new(),
        }
    }

    pub fn with_sub_lib(mut self, name: impl Into<String>, result: BuildResult) -> Self {
        self.sub_libs.insert(name.into(), result);
        self
    }
}

/// Read a build-result manifest (JSON). A `null` document means "no result".
pub fn load_manifest(path: &Path) -> Result<Option<BuildResult>, CleanupError> {
    let invalid = |context: String| CleanupError::ManifestInvalid {
        path: path.to_path_buf(),
        context,
    };
    let text = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFailure {
    /// Library label; nested libraries read `parent/child`.
    pub library: String,
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default, Clone)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<NodeFailure>,
    /// Traversal stopped early because shutdown was requested.
    pub interrupted: bool,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && !self.interrupted
    }
}

/// Best-effort cleanup of a whole tree: every node is attempted, failures
/// (strict ones included) are recorded in the report rather than raised.
pub fn cleanup_build_files(result: Option<&BuildResult>, opts: &RemoveOptions) -> CleanupReport {
    let mut report = CleanupReport::default();
    if let Some(root) = result {
        let mut remove = |p: &Path| safe_remove_tree(p, opts);
        walk(root, "", CleanupPolicy::ContinueOnError, &mut remove, &mut report);
        log_summary(&report);
    }
    report
}

/// Cleanup with an explicit policy and per-path remover.
///
/// Under [`CleanupPolicy::FailFast`] the first failed node stops traversal
/// and is returned as [`CleanupError::RemoveFailed`].
pub fn cleanup_build_files_with<F>(
    result: Option<&BuildResult>,
    policy: CleanupPolicy,
    mut remove: F,
) -> Result<CleanupReport, CleanupError>
where
    F: FnMut(&Path) -> Result<bool, CleanupError>,
{
    let mut report = CleanupReport::default();
    if let Some(root) = result {
        walk(root, "", policy, &mut remove, &mut report);
        log_summary(&report);
    }
    if policy == CleanupPolicy::FailFast
        && let Some(first) = report.failed.first()
    {
        return Err(CleanupError::RemoveFailed(first.path.clone()));
    }
    Ok(report)
}

fn walk<F>(
    node: &BuildResult,
    label: &str,
    policy: CleanupPolicy,
    remove: &mut F,
    report: &mut CleanupReport,
)
where
    F: FnMut(&Path) -> Result<bool, CleanupError>,
{
    if shutdown::is_requested() {
        report.interrupted = true;
        return;
    }

    if let Some(dir) = node.build_dir.as_deref() {
        let failure = match remove(dir) {
            Ok(true) => {
                debug!(library = label, path = %dir.display(), "build dir cleaned");
                report.removed.push(dir.to_path_buf());
                None
            }
            Ok(false) => Some("removal gave up after all retries".to_string()),
            Err(e) => Some(e.to_string()),
        };
        if let Some(reason) = failure {
            warn!(library = label, path = %dir.display(), %reason, "build dir not cleaned");
            report.failed.push(NodeFailure {
                library: label.to_string(),
                path: dir.to_path_buf(),
                reason,
            });
            if policy == CleanupPolicy::FailFast {
                return;
            }
        }
    }

    for (name, child) in &node.sub_libs {
        let child_label = if label.is_empty() {
            name.clone()
        } else {
            format!("{label}/{name}")
        };
        walk(child, &child_label, policy, remove, report);
        if stopped(report, policy) {
            return;
        }
    }
}

/// Traversal must not visit further nodes.
fn stopped(report: &CleanupReport, policy: CleanupPolicy) -> bool {
    report.interrupted || (policy == CleanupPolicy::FailFast && !report.failed.is_empty())
}

fn log_summary(report: &CleanupReport) {
    info!(
        removed = report.removed.len(),
        failed = report.failed.len(),
        interrupted = report.interrupted,
        "build tree cleanup finished"
    );
}
