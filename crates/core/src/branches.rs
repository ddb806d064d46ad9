pub const BRANCH_DEVELOP: &str = "develop";
pub const BRANCH_STAGE: &str = "stage";
pub const BRANCH_MASTER: &str = "master";

/// Ordered, duplicate-free list of branches to try. Always ends with `master`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSequence(Vec<String>);

impl BranchSequence {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a BranchSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for BranchSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(" -> "))
    }
}

/// Build the fallback order for `requested`.
///
/// The well-known tiers are added from the bottom up and the walk stops at the
/// requested tier, so `stage` yields `[stage, master]` (no `develop`) while
/// `develop` yields all three. Any other name is tried first, ahead of the full
/// `develop -> stage -> master` chain.
pub fn build_fallback_sequence(requested: &str) -> BranchSequence {
    let mut branches = vec![BRANCH_MASTER.to_string()];
    if requested == BRANCH_MASTER {
        return BranchSequence(branches);
    }
    branches.insert(0, BRANCH_STAGE.to_string());
    if requested == BRANCH_STAGE {
        return BranchSequence(branches);
    }
    branches.insert(0, BRANCH_DEVELOP.to_string());
    if requested == BRANCH_DEVELOP {
        return BranchSequence(branches);
    }
    branches.insert(0, requested.to_string());
    BranchSequence(branches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(seq: &BranchSequence) -> Vec<&str> {
        seq.iter().map(String::as_str).collect()
    }

    #[test]
    fn master_is_tried_alone() {
        assert_eq!(names(&build_fallback_sequence("master")), vec!["master"]);
    }

    #[test]
    fn stage_skips_develop() {
        assert_eq!(
            names(&build_fallback_sequence("stage")),
            vec!["stage", "master"]
        );
    }

    #[test]
    fn develop_walks_all_tiers() {
        assert_eq!(
            names(&build_fallback_sequence("develop")),
            vec!["develop", "stage", "master"]
        );
    }

    #[test]
    fn custom_branch_goes_first() {
        assert_eq!(
            names(&build_fallback_sequence("feature-x")),
            vec!["feature-x", "develop", "stage", "master"]
        );
    }

    #[test]
    fn tier_names_are_case_sensitive() {
        assert_eq!(
            names(&build_fallback_sequence("Master")),
            vec!["Master", "develop", "stage", "master"]
        );
    }

    #[test]
    fn sequence_always_ends_with_master_without_duplicates() {
        for requested in ["master", "stage", "develop", "release/1.2", "hotfix"] {
            let seq = build_fallback_sequence(requested);
            assert_eq!(seq.as_slice().last().map(String::as_str), Some("master"));
            let mut unique = seq.as_slice().to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), seq.len(), "duplicates in {seq}");
        }
    }

    #[test]
    fn display_joins_with_arrows() {
        assert_eq!(
            build_fallback_sequence("develop").to_string(),
            "develop -> stage -> master"
        );
    }
}
