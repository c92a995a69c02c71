use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Branch, Commit, MergeState, ResolveStrategy, WorkingFile};

pub const DEFAULT_BRANCH: &str = "main";

/// Outcome of a merge attempt.
#[derive(Debug, Clone)]
pub enum MergeOutcome {
    /// A two-parent merge commit was created on the target branch.
    Clean(Commit),
    /// Conflicting files were detected; the merge is parked in `merge_state`
    /// until resolved.
    Conflict(MergeState),
}

/// Simulated repository state for the current level.
///
/// This is a teaching model, not a version-control engine: commits are
/// branch-local copy-on-write logs, and conflict detection is a set
/// intersection over historically touched file names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    /// Simulated repo path or name for the level.
    pub path: String,
    pub initialized: bool,
    /// After init, has at least `main`; exactly one branch is HEAD.
    pub branches: Vec<Branch>,
    /// Commit history per branch.
    pub branch_commits: BTreeMap<String, Vec<Commit>>,
    /// Staged file names.
    pub staged_files: Vec<String>,
    /// Simulated working tree, seeded by levels.
    pub working_directory: Vec<WorkingFile>,
    /// Populated while a conflicted merge waits for resolution.
    pub merge_state: Option<MergeState>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize the repository (`git init`). Idempotent: calling on an
    /// already-initialized repository changes nothing.
    pub fn init(&mut self, path: &str) {
        if self.initialized {
            return;
        }

        if !path.is_empty() {
            self.path = path.to_string();
        }
        self.initialized = true;
        self.branches = vec![Branch::new(DEFAULT_BRANCH, true)];
        self.branch_commits = BTreeMap::from([(DEFAULT_BRANCH.to_string(), Vec::new())]);
        self.staged_files.clear();
        self.merge_state = None;

        info!(path = %self.path, "repository initialized");
    }

    /// Name of the HEAD branch. Falls back to `main` before init.
    pub fn current_branch(&self) -> &str {
        self.branches
            .iter()
            .find(|b| b.is_head)
            .map(|b| b.name.as_str())
            .unwrap_or(DEFAULT_BRANCH)
    }

    /// Commit history of the HEAD branch.
    pub fn commits(&self) -> &[Commit] {
        self.commits_on(self.current_branch())
    }

    pub fn commits_on(&self, branch: &str) -> &[Commit] {
        self.branch_commits
            .get(branch)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.iter().any(|b| b.name == name)
    }

    /// Replace the simulated working tree.
    pub fn set_working_directory(&mut self, files: Vec<WorkingFile>) {
        self.working_directory = files;
    }

    /// Stage a working-directory file by name (`git add`).
    pub fn stage(&mut self, name: &str) -> Result<()> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        if !self.working_directory.iter().any(|f| f.name == name) {
            return Err(Error::FileNotFound(name.to_string()));
        }
        if !self.staged_files.iter().any(|f| f == name) {
            self.staged_files.push(name.to_string());
            debug!(file = name, "staged");
        }
        Ok(())
    }

    /// Remove a name from the staging area. Names that are not staged are
    /// ignored.
    pub fn unstage(&mut self, name: &str) {
        self.staged_files.retain(|f| f != name);
    }

    /// Commit the staged files to the HEAD branch (`git commit -m`).
    pub fn commit(&mut self, message: &str) -> Result<Commit> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::EmptyMessage);
        }
        if self.staged_files.is_empty() {
            return Err(Error::NothingStaged);
        }

        let branch = self.current_branch().to_string();
        let parents = self
            .commits_on(&branch)
            .last()
            .map(|c| vec![c.id.clone()])
            .unwrap_or_default();

        let files = std::mem::take(&mut self.staged_files);
        self.working_directory.retain(|f| !files.contains(&f.name));

        let commit = Commit::new(message.to_string(), files, parents);
        self.branch_commits
            .entry(branch.clone())
            .or_default()
            .push(commit.clone());

        info!(branch = %branch, id = %commit.short_id(), "commit created");
        Ok(commit)
    }

    /// Create a branch forked from the HEAD branch (`git branch`). The new
    /// branch gets its own copy of the commit list; HEAD does not move.
    pub fn create_branch(&mut self, name: &str) -> Result<()> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidBranchName(name.to_string()));
        }
        if self
            .branches
            .iter()
            .any(|b| b.name.eq_ignore_ascii_case(name))
        {
            return Err(Error::BranchExists(name.to_string()));
        }

        let forked = self.commits().to_vec();
        self.branch_commits.insert(name.to_string(), forked);
        self.branches.push(Branch::new(name, false));

        debug!(branch = name, "branch created");
        Ok(())
    }

    /// Move HEAD to another branch (`git switch`).
    pub fn switch_branch(&mut self, name: &str) -> Result<()> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        if !self.has_branch(name) {
            return Err(Error::BranchNotFound(name.to_string()));
        }
        for branch in &mut self.branches {
            branch.is_head = branch.name == name;
        }
        debug!(branch = name, "switched");
        Ok(())
    }

    /// Guarantee every branch has a commit-list entry. Saves written by older
    /// versions kept a single flat commit list; fork the HEAD list for any
    /// branch that is missing one.
    pub fn ensure_branch_commits(&mut self) {
        if !self.initialized {
            return;
        }
        let head_commits = self.commits().to_vec();
        for branch in &self.branches {
            self.branch_commits
                .entry(branch.name.clone())
                .or_insert_with(|| head_commits.clone());
        }
    }

    /// Merge `source` into `target` (`git merge`).
    ///
    /// A conflict is any file name touched in both branch histories; no
    /// content is compared. Conflicted merges park in `merge_state` and wait
    /// for [`resolve_merge`](Self::resolve_merge).
    pub fn merge(&mut self, source: &str, target: &str) -> Result<MergeOutcome> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        if self.merge_state.is_some() {
            return Err(Error::MergeInProgress);
        }
        if source == target {
            return Err(Error::MergeSameBranch(source.to_string()));
        }
        for name in [source, target] {
            if !self.has_branch(name) {
                return Err(Error::BranchNotFound(name.to_string()));
            }
        }

        self.ensure_branch_commits();

        if self.commits_on(source).is_empty() {
            return Err(Error::NothingToMerge(source.to_string()));
        }

        let source_files = self.touched_files(source);
        let target_files = self.touched_files(target);
        let conflicting: Vec<String> = source_files
            .intersection(&target_files)
            .cloned()
            .collect();

        if !conflicting.is_empty() {
            let state = MergeState {
                source: source.to_string(),
                target: target.to_string(),
                conflicting_files: conflicting,
            };
            self.merge_state = Some(state.clone());
            info!(source, target, "merge conflict detected");
            return Ok(MergeOutcome::Conflict(state));
        }

        let commit = self.create_merge_commit(source, target, source_files.into_iter().collect());
        Ok(MergeOutcome::Clean(commit))
    }

    /// Resolve the pending conflicted merge with the given strategy and create
    /// the merge commit. The strategy records which side's files win; there is
    /// no content to rewrite.
    pub fn resolve_merge(&mut self, strategy: ResolveStrategy) -> Result<Commit> {
        let state = self.merge_state.take().ok_or(Error::NoMergeInProgress)?;
        let commit =
            self.create_merge_commit(&state.source, &state.target, state.conflicting_files);
        info!(strategy = strategy.as_str(), "merge resolved");
        Ok(commit)
    }

    /// True once any branch history contains a two-parent commit.
    pub fn has_merge_commit(&self) -> bool {
        self.branch_commits
            .values()
            .flatten()
            .any(|c| c.is_merge())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn touched_files(&self, branch: &str) -> BTreeSet<String> {
        self.commits_on(branch)
            .iter()
            .flat_map(|c| c.files.iter().cloned())
            .collect()
    }

    fn create_merge_commit(&mut self, source: &str, target: &str, files: Vec<String>) -> Commit {
        let parents: Vec<String> = [target, source]
            .iter()
            .filter_map(|b| self.commits_on(b).last().map(|c| c.id.clone()))
            .collect();

        let commit = Commit::new(
            format!("Merge branch '{}' into {}", source, target),
            files,
            parents,
        );
        self.branch_commits
            .entry(target.to_string())
            .or_default()
            .push(commit.clone());

        info!(source, target, id = %commit.short_id(), "merge commit created");
        commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileStatus;

    fn initialized() -> Repository {
        let mut repo = Repository::new();
        repo.init("my-project");
        repo
    }

    fn commit_file(repo: &mut Repository, name: &str, message: &str) -> Commit {
        repo.set_working_directory(vec![WorkingFile::new(name, FileStatus::Modified)]);
        repo.stage(name).unwrap();
        repo.commit(message).unwrap()
    }

    #[test]
    fn test_init_creates_main_head() {
        let repo = initialized();

        assert!(repo.initialized);
        assert_eq!(repo.path, "my-project");
        assert_eq!(repo.branches.len(), 1);
        assert_eq!(repo.current_branch(), "main");
        assert!(repo.commits().is_empty());
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut repo = initialized();
        commit_file(&mut repo, "README.md", "First commit");

        repo.init("other-project");

        assert_eq!(repo.path, "my-project");
        assert_eq!(repo.commits().len(), 1);
    }

    #[test]
    fn test_stage_requires_init() {
        let mut repo = Repository::new();
        assert!(matches!(repo.stage("a.txt"), Err(Error::NotInitialized)));
    }

    #[test]
    fn test_stage_unknown_file_rejected() {
        let mut repo = initialized();
        assert!(matches!(
            repo.stage("ghost.txt"),
            Err(Error::FileNotFound(_))
        ));
    }

    #[test]
    fn test_stage_is_idempotent_per_file() {
        let mut repo = initialized();
        repo.set_working_directory(vec![WorkingFile::new("README.md", FileStatus::Modified)]);

        repo.stage("README.md").unwrap();
        repo.stage("README.md").unwrap();

        assert_eq!(repo.staged_files, vec!["README.md".to_string()]);
    }

    #[test]
    fn test_unstage_removes_only_named_file() {
        let mut repo = initialized();
        repo.set_working_directory(vec![
            WorkingFile::new("a.txt", FileStatus::Modified),
            WorkingFile::new("b.txt", FileStatus::Untracked),
        ]);
        repo.stage("a.txt").unwrap();
        repo.stage("b.txt").unwrap();

        repo.unstage("a.txt");
        repo.unstage("not-staged.txt");

        assert_eq!(repo.staged_files, vec!["b.txt".to_string()]);
    }

    #[test]
    fn test_commit_clears_staging_and_working_copy() {
        let mut repo = initialized();
        repo.set_working_directory(vec![WorkingFile::new("README.md", FileStatus::Modified)]);
        repo.stage("README.md").unwrap();

        let commit = repo.commit("Update readme").unwrap();

        assert_eq!(commit.message, "Update readme");
        assert_eq!(commit.files, vec!["README.md".to_string()]);
        assert!(commit.parents.is_empty());
        assert!(repo.staged_files.is_empty());
        assert!(repo.working_directory.is_empty());
        assert_eq!(repo.commits().len(), 1);
    }

    #[test]
    fn test_commit_links_parent() {
        let mut repo = initialized();
        let first = commit_file(&mut repo, "a.txt", "first");
        let second = commit_file(&mut repo, "b.txt", "second");

        assert_eq!(second.parents, vec![first.id]);
    }

    #[test]
    fn test_commit_guards() {
        let mut repo = initialized();
        assert!(matches!(repo.commit("msg"), Err(Error::NothingStaged)));

        repo.set_working_directory(vec![WorkingFile::new("a.txt", FileStatus::Modified)]);
        repo.stage("a.txt").unwrap();
        assert!(matches!(repo.commit("   "), Err(Error::EmptyMessage)));
    }

    #[test]
    fn test_create_branch_forks_by_value() {
        let mut repo = initialized();
        commit_file(&mut repo, "a.txt", "base");

        repo.create_branch("feature").unwrap();
        commit_file(&mut repo, "b.txt", "only on main");

        assert_eq!(repo.commits_on("main").len(), 2);
        assert_eq!(repo.commits_on("feature").len(), 1);
        assert_eq!(repo.current_branch(), "main");
    }

    #[test]
    fn test_create_branch_rejects_duplicates_case_insensitive() {
        let mut repo = initialized();
        repo.create_branch("Feature").unwrap();

        assert!(matches!(
            repo.create_branch("feature"),
            Err(Error::BranchExists(_))
        ));
        assert!(matches!(
            repo.create_branch("  "),
            Err(Error::InvalidBranchName(_))
        ));
    }

    #[test]
    fn test_switch_branch_moves_head() {
        let mut repo = initialized();
        repo.create_branch("feature").unwrap();

        repo.switch_branch("feature").unwrap();

        assert_eq!(repo.current_branch(), "feature");
        assert_eq!(repo.branches.iter().filter(|b| b.is_head).count(), 1);
        assert!(matches!(
            repo.switch_branch("nope"),
            Err(Error::BranchNotFound(_))
        ));
    }

    #[test]
    fn test_ensure_branch_commits_backfills_missing_entries() {
        let mut repo = initialized();
        commit_file(&mut repo, "a.txt", "base");
        repo.branches.push(Branch::new("legacy", false));

        repo.ensure_branch_commits();

        assert_eq!(repo.commits_on("legacy").len(), 1);
    }

    #[test]
    fn test_clean_merge_creates_two_parent_commit() {
        let mut repo = initialized();
        repo.create_branch("feature").unwrap();
        repo.switch_branch("feature").unwrap();
        commit_file(&mut repo, "feature.txt", "on feature");
        repo.switch_branch("main").unwrap();
        commit_file(&mut repo, "main.txt", "on main");

        let outcome = repo.merge("feature", "main").unwrap();
        let commit = match outcome {
            MergeOutcome::Clean(c) => c,
            MergeOutcome::Conflict(_) => panic!("expected clean merge"),
        };

        assert!(commit.is_merge());
        assert_eq!(commit.message, "Merge branch 'feature' into main");
        assert!(repo.merge_state.is_none());
        assert!(repo.has_merge_commit());
        assert_eq!(repo.commits_on("main").len(), 2);
    }

    #[test]
    fn test_merge_conflict_on_shared_file_names() {
        let mut repo = initialized();
        commit_file(&mut repo, "shared.txt", "on main");
        repo.create_branch("feature").unwrap();
        repo.switch_branch("feature").unwrap();
        commit_file(&mut repo, "extra.txt", "on feature");
        repo.switch_branch("main").unwrap();

        let outcome = repo.merge("feature", "main").unwrap();
        let state = match outcome {
            MergeOutcome::Conflict(s) => s,
            MergeOutcome::Clean(_) => panic!("expected conflict"),
        };

        assert_eq!(state.conflicting_files, vec!["shared.txt".to_string()]);
        assert_eq!(repo.merge_state, Some(state));
        assert!(!repo.has_merge_commit());
        assert!(matches!(
            repo.merge("feature", "main"),
            Err(Error::MergeInProgress)
        ));
    }

    #[test]
    fn test_merge_guards() {
        let mut repo = initialized();
        repo.create_branch("empty").unwrap();

        assert!(matches!(
            repo.merge("main", "main"),
            Err(Error::MergeSameBranch(_))
        ));
        assert!(matches!(
            repo.merge("ghost", "main"),
            Err(Error::BranchNotFound(_))
        ));
        assert!(matches!(
            repo.merge("empty", "main"),
            Err(Error::NothingToMerge(_))
        ));
    }

    #[test]
    fn test_resolve_merge_clears_state_and_commits() {
        let mut repo = initialized();
        commit_file(&mut repo, "shared.txt", "on main");
        repo.create_branch("feature").unwrap();
        repo.merge("feature", "main").unwrap();
        assert!(repo.merge_state.is_some());

        let commit = repo.resolve_merge(ResolveStrategy::UseIncoming).unwrap();

        assert!(commit.is_merge());
        assert!(repo.merge_state.is_none());
        assert!(repo.has_merge_commit());
        assert!(matches!(
            repo.resolve_merge(ResolveStrategy::KeepCurrent),
            Err(Error::NoMergeInProgress)
        ));
    }

    #[test]
    fn test_reset_returns_to_default() {
        let mut repo = initialized();
        commit_file(&mut repo, "a.txt", "base");

        repo.reset();

        assert!(!repo.initialized);
        assert!(repo.branches.is_empty());
        assert!(repo.branch_commits.is_empty());
    }
}
