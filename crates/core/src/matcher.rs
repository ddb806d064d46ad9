/// Case-insensitive substring match of a repository filter against an import path.
pub fn path_matches(import_path: &str, repo_filter: &str) -> bool {
    import_path
        .to_lowercase()
        .contains(&repo_filter.to_lowercase())
}

/// Matcher with the filter lowered once, for use across a whole manifest.
#[derive(Debug, Clone)]
pub struct RepoFilter {
    raw: String,
    lowered: String,
}

impl RepoFilter {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            lowered: raw.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, import_path: &str) -> bool {
        import_path.to_lowercase().contains(&self.lowered)
    }
}
