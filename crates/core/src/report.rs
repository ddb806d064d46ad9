use serde::Serialize;

/// What happened to a single manifest record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PackageOutcome {
    /// Path did not match the repository filter.
    Skipped,
    /// Fetched at `branch` and the stale vendored copy was removed.
    Fixed { branch: String },
    /// Every branch in the sequence was tried and none could be fetched.
    FetchFailed { attempts: Vec<String> },
    /// Fetched at `branch`, but the stale copy could not be removed.
    RemovalFailed { branch: String, error: String },
}

impl PackageOutcome {
    pub fn is_match(&self) -> bool {
        !matches!(self, PackageOutcome::Skipped)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    pub index: usize,
    pub path: String,
    #[serde(flatten)]
    pub outcome: PackageOutcome,
}

/// Per-record outcomes of one run, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixReport {
    pub repo_filter: String,
    pub branches: Vec<String>,
    pub packages: Vec<PackageReport>,
    pub synced: bool,
}

impl FixReport {
    pub fn new(repo_filter: &str, branches: &[String]) -> Self {
        Self {
            repo_filter: repo_filter.to_string(),
            branches: branches.to_vec(),
            packages: Vec::new(),
            synced: false,
        }
    }

    pub fn push(&mut self, index: usize, path: &str, outcome: PackageOutcome) {
        self.packages.push(PackageReport {
            index,
            path: path.to_string(),
            outcome,
        });
    }

    pub fn mark_synced(&mut self) {
        self.synced = true;
    }

    pub fn matched(&self) -> usize {
        self.count(PackageOutcome::is_match)
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, PackageOutcome::Skipped))
    }

    pub fn fixed(&self) -> usize {
        self.count(|o| matches!(o, PackageOutcome::Fixed { .. }))
    }

    pub fn fetch_failed(&self) -> usize {
        self.count(|o| matches!(o, PackageOutcome::FetchFailed { .. }))
    }

    pub fn removal_failed(&self) -> usize {
        self.count(|o| matches!(o, PackageOutcome::RemovalFailed { .. }))
    }

    fn count(&self, pred: impl Fn(&PackageOutcome) -> bool) -> usize {
        self.packages.iter().filter(|p| pred(&p.outcome)).count()
    }
}
