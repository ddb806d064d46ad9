//! # Vendorfix Core
//!
//! Re-pins vendored Go packages of one repository prefix to a branch.
//!
//! ## Flow
//!
//! ```text
//! vendor/vendor.json
//!     │
//!     ├──> Manifest reader
//!     │      └─> PackageRecord[] (file order)
//!     │
//!     ├──> Fixer (per record)
//!     │      ├─ repo filter (case-insensitive substring)
//!     │      ├─ fetch at requested -> develop -> stage -> master
//!     │      └─ remove vendor/<path> after a successful fetch
//!     │
//!     └──> Sync (once, fatal on failure)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use vendorfix_core::{
//!     build_fallback_sequence, parse_manifest, process_manifest, sync_all, GovendorCli,
//! };
//!
//! fn main() -> vendorfix_core::Result<()> {
//!     let root = Path::new("/path/to/service");
//!     let tool = GovendorCli::new("govendor", root);
//!     let manifest = parse_manifest(root)?;
//!     let branches = build_fallback_sequence("stage");
//!     let report = process_manifest(&manifest, "github.com/coldze", &branches, root, &tool);
//!     sync_all(&tool)?;
//!
//!     println!("fixed {} of {} matching packages", report.fixed(), report.matched());
//!     Ok(())
//! }
//! ```

mod branches;
mod error;
mod fixer;
mod manifest;
mod matcher;
mod report;
mod tool;

pub use branches::{
    build_fallback_sequence, BranchSequence, BRANCH_DEVELOP, BRANCH_MASTER, BRANCH_STAGE,
};
pub use error::{Result, VendorFixError};
pub use fixer::{
    fix_package, process_manifest, remove_vendored_copy, sync_all, vendored_copy_path,
    FetchResult,
};
pub use manifest::{
    manifest_path, parse_manifest, Manifest, PackageRecord, MANIFEST_FILE, VENDOR_DIR,
};
pub use matcher::{path_matches, RepoFilter};
pub use report::{FixReport, PackageOutcome, PackageReport};
pub use tool::{GovendorCli, VendorTool, DEFAULT_GOVENDOR};
