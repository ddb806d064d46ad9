use crate::{Result, VendorFixError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Default name of the vendoring program looked up on `PATH`.
pub const DEFAULT_GOVENDOR: &str = "govendor";

/// External operations the fixer depends on.
pub trait VendorTool {
    /// Re-fetch `import_path` at `branch` into the vendor tree.
    fn fetch_at_branch(&self, import_path: &str, branch: &str) -> Result<()>;

    /// Recursively delete `path`. A missing directory is not an error.
    fn remove_tree(&self, path: &Path) -> Result<()>;

    /// Reconcile the whole vendor tree with the manifest.
    fn sync_all(&self) -> Result<()>;
}

/// [`VendorTool`] backed by the `govendor` binary, run in the project root.
#[derive(Debug, Clone)]
pub struct GovendorCli {
    program: String,
    root: PathBuf,
}

impl GovendorCli {
    pub fn new(program: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            root: root.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        log::debug!("Running {} {}", self.program, args.join(" "));
        Command::new(&self.program)
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|error| VendorFixError::Spawn {
                program: self.program.clone(),
                error,
            })
    }
}

impl VendorTool for GovendorCli {
    fn fetch_at_branch(&self, import_path: &str, branch: &str) -> Result<()> {
        let spec = format!("{import_path}@{branch}");
        let output = self.run(&["fetch", &spec])?;
        if output.status.success() {
            return Ok(());
        }
        Err(VendorFixError::Fetch {
            import_path: import_path.to_string(),
            branch: branch.to_string(),
            reason: failure_reason(&output),
        })
    }

    fn remove_tree(&self, path: &Path) -> Result<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("Nothing to remove at {}", path.display());
                Ok(())
            }
            Err(err) => Err(VendorFixError::Removal {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }),
        }
    }

    fn sync_all(&self) -> Result<()> {
        let output = self.run(&["sync"])?;
        if output.status.success() {
            return Ok(());
        }
        Err(VendorFixError::Sync(failure_reason(&output)))
    }
}

fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        output.status.to_string()
    } else {
        format!("{}: {}", output.status, last_line(stderr))
    }
}

fn last_line(text: &str) -> &str {
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(text)
}
