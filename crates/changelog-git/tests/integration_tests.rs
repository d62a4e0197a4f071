//! Integration tests for changelog-git
//!
//! These tests build small repositories in temporary directories, with fixed
//! signatures and timestamps, and query them through `GitRepo`.

use changelog_git::{Commit, GitError, GitRepo};
use git2::{Oid, Repository, Signature, Time};
use similar_asserts::assert_eq;
use tempfile::TempDir;

/// Repository fixture that commits single files straight into trees
struct Fixture {
    dir: TempDir,
    repo: Repository,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let repo = Repository::init(dir.path()).expect("init repo");
        Self { dir, repo }
    }

    /// Commit `file` with `contents` on top of `parents`, updating `refname`
    fn commit(
        &self,
        refname: &str,
        parents: &[Oid],
        file: &str,
        contents: &str,
        message: &str,
        when: i64,
    ) -> Oid {
        let blob = self.repo.blob(contents.as_bytes()).expect("write blob");
        let parent_commits: Vec<git2::Commit<'_>> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("find parent"))
            .collect();
        let base_tree = parent_commits.first().map(|c| c.tree().expect("parent tree"));

        let mut builder = self
            .repo
            .treebuilder(base_tree.as_ref())
            .expect("treebuilder");
        builder.insert(file, blob, 0o100644).expect("insert blob");
        let tree = self
            .repo
            .find_tree(builder.write().expect("write tree"))
            .expect("find tree");

        let sig = Signature::new("Test Author", "test@example.com", &Time::new(when, 0))
            .expect("signature");
        let parent_refs: Vec<&git2::Commit<'_>> = parent_commits.iter().collect();
        self.repo
            .commit(Some(refname), &sig, &sig, message, &tree, &parent_refs)
            .expect("commit")
    }

    fn branch(&self, name: &str, at: Oid) {
        let commit = self.repo.find_commit(at).expect("find commit");
        self.repo.branch(name, &commit, false).expect("create branch");
    }

    fn open(&self) -> GitRepo {
        GitRepo::open(self.dir.path()).expect("open repo")
    }
}

fn subjects(commits: &[Commit]) -> Vec<&str> {
    commits.iter().map(Commit::subject).collect()
}

#[test]
fn test_touching_is_newest_first() {
    let fx = Fixture::new();
    let c1 = fx.commit("HEAD", &[], "index.rst", "v1", "First", 1_000);
    let c2 = fx.commit("HEAD", &[c1], "index.rst", "v2", "Second", 2_000);
    fx.commit("HEAD", &[c2], "index.rst", "v3", "Third", 3_000);

    let repo = fx.open();
    let commits = repo.commits_touching("index.rst", None).expect("walk");
    assert_eq!(subjects(&commits), vec!["Third", "Second", "First"]);

    for window in commits.windows(2) {
        assert!(window[0].timestamp >= window[1].timestamp);
    }
}

#[test]
fn test_touching_accepts_absolute_path() {
    let fx = Fixture::new();
    let c1 = fx.commit("HEAD", &[], "index.rst", "v1", "Add index", 1_000);
    fx.commit("HEAD", &[c1], "other.rst", "v1", "Add other", 2_000);

    let repo = fx.open();
    let absolute = fx.dir.path().join("index.rst");
    let commits = repo.commits_touching(&absolute, None).expect("walk");
    assert_eq!(subjects(&commits), vec!["Add index"]);
}

#[test]
fn test_touching_unknown_path_is_empty() {
    let fx = Fixture::new();
    fx.commit("HEAD", &[], "index.rst", "v1", "Add index", 1_000);

    let repo = fx.open();
    let commits = repo.commits_touching("missing.rst", None).expect("walk");
    assert!(commits.is_empty());
}

#[test]
fn test_touching_skips_merge_that_keeps_a_parent_version() {
    let fx = Fixture::new();
    let base = fx.commit("HEAD", &[], "index.rst", "v1", "Add index", 1_000);
    fx.branch("feature", base);
    let feature = fx.commit(
        "refs/heads/feature",
        &[base],
        "index.rst",
        "v2",
        "Edit index on feature",
        2_000,
    );
    let main = fx.commit("HEAD", &[base], "other.rst", "v1", "Add other", 3_000);

    // Merge tree: main's tree with the feature version of index.rst
    let merge = fx.commit(
        "HEAD",
        &[main, feature],
        "index.rst",
        "v2",
        "Merge feature",
        4_000,
    );
    assert!(!merge.is_zero());

    let repo = fx.open();
    let commits = repo.commits_touching("index.rst", None).expect("walk");
    assert_eq!(subjects(&commits), vec!["Edit index on feature", "Add index"]);
}

#[test]
fn test_touching_drops_side_branch_edit_discarded_by_merge() {
    let fx = Fixture::new();
    let base = fx.commit("HEAD", &[], "index.rst", "v1", "Add index", 1_000);
    fx.branch("feature", base);
    let main = fx.commit("HEAD", &[base], "index.rst", "main", "Main edit", 2_000);
    let feature = fx.commit(
        "refs/heads/feature",
        &[base],
        "index.rst",
        "feature",
        "Feature edit (discarded)",
        3_000,
    );

    // Conflict resolved in favour of main's version of index.rst
    fx.commit(
        "HEAD",
        &[main, feature],
        "index.rst",
        "main",
        "Merge feature",
        4_000,
    );

    let repo = fx.open();
    let commits = repo.commits_touching("index.rst", None).expect("walk");
    assert_eq!(subjects(&commits), vec!["Main edit", "Add index"]);

    let latest = repo.commits_touching("index.rst", Some(1)).expect("walk");
    assert_eq!(subjects(&latest), vec!["Main edit"]);
}

#[test]
fn test_touching_lists_merge_that_differs_from_every_parent() {
    let fx = Fixture::new();
    let base = fx.commit("HEAD", &[], "index.rst", "v1", "Add index", 1_000);
    fx.branch("feature", base);
    let main = fx.commit("HEAD", &[base], "index.rst", "main", "Main edit", 2_000);
    let feature = fx.commit(
        "refs/heads/feature",
        &[base],
        "index.rst",
        "feature",
        "Feature edit",
        3_000,
    );
    fx.commit(
        "HEAD",
        &[main, feature],
        "index.rst",
        "combined",
        "Merge feature",
        4_000,
    );

    let repo = fx.open();
    let commits = repo.commits_touching("index.rst", None).expect("walk");
    assert_eq!(
        subjects(&commits),
        vec!["Merge feature", "Feature edit", "Main edit", "Add index"]
    );
}

#[test]
fn test_range_two_dot() {
    let fx = Fixture::new();
    let c1 = fx.commit("HEAD", &[], "index.rst", "v1", "First", 1_000);
    let c2 = fx.commit("HEAD", &[c1], "index.rst", "v2", "Second", 2_000);
    fx.commit("HEAD", &[c2], "other.rst", "v1", "Third", 3_000);

    let repo = fx.open();
    let commits = repo
        .commits_in_range(&format!("{c1}..HEAD"))
        .expect("resolve range");
    assert_eq!(subjects(&commits), vec!["Third", "Second"]);
}

#[test]
fn test_range_single_revision_includes_ancestors() {
    let fx = Fixture::new();
    let c1 = fx.commit("HEAD", &[], "index.rst", "v1", "First", 1_000);
    let c2 = fx.commit("HEAD", &[c1], "index.rst", "v2", "Second", 2_000);
    fx.commit("HEAD", &[c2], "index.rst", "v3", "Third", 3_000);

    let repo = fx.open();
    let commits = repo.commits_in_range("HEAD~1").expect("resolve range");
    assert_eq!(subjects(&commits), vec!["Second", "First"]);
}

#[test]
fn test_range_three_dot_is_symmetric_difference() {
    let fx = Fixture::new();
    let base = fx.commit("HEAD", &[], "index.rst", "v1", "Base", 1_000);
    fx.branch("feature", base);
    fx.commit(
        "refs/heads/feature",
        &[base],
        "feature.rst",
        "v1",
        "Feature work",
        2_000,
    );
    fx.commit("HEAD", &[base], "index.rst", "v2", "Main work", 3_000);

    let repo = fx.open();
    let commits = repo
        .commits_in_range("HEAD...feature")
        .expect("resolve range");
    assert_eq!(subjects(&commits), vec!["Main work", "Feature work"]);
}

#[test]
fn test_range_is_unbounded() {
    let fx = Fixture::new();
    let mut parent = fx.commit("HEAD", &[], "index.rst", "v0", "Revision 0", 1_000);
    for i in 1..25 {
        parent = fx.commit(
            "HEAD",
            &[parent],
            "index.rst",
            &format!("v{i}"),
            &format!("Revision {i}"),
            1_000 + i,
        );
    }

    let repo = fx.open();
    let commits = repo.commits_in_range("HEAD").expect("resolve range");
    assert_eq!(commits.len(), 25);
    assert_eq!(commits[0].subject(), "Revision 24");
}

#[test]
fn test_range_garbage_expression() {
    let fx = Fixture::new();
    fx.commit("HEAD", &[], "index.rst", "v1", "First", 1_000);

    let repo = fx.open();
    let result = repo.commits_in_range("not a revision ^^^");
    assert!(matches!(
        result,
        Err(GitError::InvalidRevisionExpression { .. })
    ));
}

#[test]
fn test_discover_from_nested_directory() {
    let fx = Fixture::new();
    fx.commit("HEAD", &[], "index.rst", "v1", "First", 1_000);
    let nested = fx.dir.path().join("docs").join("source");
    std::fs::create_dir_all(&nested).expect("create dirs");

    let repo = GitRepo::discover(&nested).expect("discover");
    let commits = repo.commits_in_range("HEAD").expect("resolve range");
    assert_eq!(subjects(&commits), vec!["First"]);
}
