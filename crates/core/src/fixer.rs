use crate::branches::BranchSequence;
use crate::manifest::{Manifest, PackageRecord, VENDOR_DIR};
use crate::matcher::RepoFilter;
use crate::report::{FixReport, PackageOutcome};
use crate::tool::VendorTool;
use crate::{Result, VendorFixError};
use std::path::{Component, Path, PathBuf};

/// Result of walking the branch sequence for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Switched { branch: String },
    Exhausted { attempts: Vec<String> },
}

/// Try each branch in order until the external fetch succeeds.
pub fn fix_package(
    record: &PackageRecord,
    branches: &BranchSequence,
    tool: &dyn VendorTool,
) -> FetchResult {
    let mut attempts = Vec::with_capacity(branches.len());
    for branch in branches {
        attempts.push(branch.clone());
        match tool.fetch_at_branch(&record.path, branch) {
            Ok(()) => {
                log::info!("Switched '{}' to branch '{}'", record.path, branch);
                return FetchResult::Switched {
                    branch: branch.clone(),
                };
            }
            Err(err) => {
                log::warn!(
                    "Failed to switch '{}' to branch '{}'. Error: {}",
                    record.path,
                    branch,
                    err
                );
            }
        }
    }
    FetchResult::Exhausted { attempts }
}

/// `<root>/vendor/<import_path>`, refusing anything that would land outside
/// the vendor directory.
pub fn vendored_copy_path(root: &Path, import_path: &str) -> Result<PathBuf> {
    let relative = Path::new(import_path.trim_start_matches('/'));
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if relative.as_os_str().is_empty() || escapes {
        return Err(VendorFixError::Removal {
            path: root.join(VENDOR_DIR).join(relative),
            reason: format!("refusing to remove unsafe import path '{import_path}'"),
        });
    }
    Ok(root.join(VENDOR_DIR).join(relative))
}

pub fn remove_vendored_copy(
    root: &Path,
    record: &PackageRecord,
    tool: &dyn VendorTool,
) -> Result<()> {
    let target = vendored_copy_path(root, &record.path)?;
    tool.remove_tree(&target)
}

/// Fix every record whose path matches `repo_filter`.
///
/// Per-package failures never escape: they are logged and recorded in the
/// returned report. Removal only follows a successful fetch.
pub fn process_manifest(
    manifest: &Manifest,
    repo_filter: &str,
    branches: &BranchSequence,
    root: &Path,
    tool: &dyn VendorTool,
) -> FixReport {
    let filter = RepoFilter::new(repo_filter);
    let mut report = FixReport::new(filter.as_str(), branches.as_slice());
    log::info!("Got packages: {}", manifest.len());
    log::debug!("Branch fallback: {branches}");

    for (i, record) in manifest.packages.iter().enumerate() {
        if !filter.matches(&record.path) {
            log::info!("[{i}] Nothing to do.");
            report.push(i, &record.path, PackageOutcome::Skipped);
            continue;
        }

        log::info!("[{i}] Running fix-package for: {}", record.path);
        let branch = match fix_package(record, branches, tool) {
            FetchResult::Switched { branch } => branch,
            FetchResult::Exhausted { attempts } => {
                log::warn!(
                    "[{i}] Running fix-package failed: no branch of [{}] could be fetched",
                    attempts.join(", ")
                );
                report.push(i, &record.path, PackageOutcome::FetchFailed { attempts });
                continue;
            }
        };
        log::info!("[{i}] Running fix-package done");

        let outcome = match remove_vendored_copy(root, record, tool) {
            Ok(()) => {
                log::info!("[{i}] Removed old");
                PackageOutcome::Fixed { branch }
            }
            Err(err) => {
                log::warn!("[{i}] Failed to remove old sources of '{}': {err}", record.path);
                PackageOutcome::RemovalFailed {
                    branch,
                    error: err.to_string(),
                }
            }
        };
        report.push(i, &record.path, outcome);
    }

    log::info!("Processing done");
    report
}

/// Run the external full sync once. Failure here is fatal for the run.
pub fn sync_all(tool: &dyn VendorTool) -> Result<()> {
    log::info!("Syncing vendored sources");
    tool.sync_all()?;
    log::info!("Sync done");
    Ok(())
}
