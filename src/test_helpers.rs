/// Shared test utilities for git repository testing.
///
/// Provides a clean API for creating and manipulating test repositories,
/// reducing boilerplate in test code.
use git2::{Repository, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test repository wrapper with convenient helper methods.
pub struct TestRepo {
    pub repo: Repository,
    _dir: TempDir,
}

impl TestRepo {
    /// Create a new test repository with an initial commit and no remote.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        Self::configure(&repo);

        {
            let sig = Self::sig();
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
                .unwrap();
        }

        TestRepo { repo, _dir: dir }
    }

    /// Create a test repository without any initial commit (unborn HEAD).
    pub fn new_empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        Self::configure(&repo);
        TestRepo { repo, _dir: dir }
    }

    /// Create a test repository cloned from a bare "remote".
    ///
    /// Sets up:
    /// - A bare repository at remote.git with an initial commit on `main`
    /// - A clone at work/ whose `main` tracks `origin/main`
    ///
    /// so that a plain `git push` from the clone succeeds.
    pub fn new_with_remote() -> Self {
        let dir = tempfile::tempdir().unwrap();

        let remote_path = dir.path().join("remote.git");
        let remote_repo = Repository::init_bare(&remote_path).unwrap();
        {
            let sig = Self::sig();
            let tree_id = remote_repo.index().unwrap().write_tree().unwrap();
            let tree = remote_repo.find_tree(tree_id).unwrap();
            remote_repo
                .commit(Some("refs/heads/main"), &sig, &sig, "Initial", &tree, &[])
                .unwrap();
            remote_repo.set_head("refs/heads/main").unwrap();
        }

        let work_path = dir.path().join("work");
        let repo = Repository::clone(remote_path.to_str().unwrap(), &work_path).unwrap();
        Self::configure(&repo);

        TestRepo { repo, _dir: dir }
    }

    /// Give the repository an identity so `git commit` works on bare CI machines.
    fn configure(repo: &Repository) {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test").unwrap();
        config.set_str("user.email", "test@test.com").unwrap();
        config.set_bool("commit.gpgsign", false).unwrap();
    }

    fn sig() -> Signature<'static> {
        Signature::now("Test", "test@test.com").unwrap()
    }

    /// Create a commit containing `filename` with `message` as content.
    pub fn commit(&self, message: &str, filename: &str) -> git2::Oid {
        self.write_file(filename, message);

        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(filename)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Self::sig();
        let parent = self.head_commit();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
            .unwrap()
    }

    /// Get the HEAD commit.
    pub fn head_commit(&self) -> git2::Commit<'_> {
        self.repo.head().unwrap().peel_to_commit().unwrap()
    }

    /// Get the OID HEAD points at.
    pub fn head_oid(&self) -> git2::Oid {
        self.head_commit().id()
    }

    /// Get the trimmed message of the HEAD commit.
    pub fn head_message(&self) -> String {
        self.head_commit().message().unwrap().trim().to_string()
    }

    /// Get the working directory path.
    pub fn workdir(&self) -> PathBuf {
        self.repo.workdir().unwrap().to_path_buf()
    }

    /// Write content to a file in the working directory (without committing).
    pub fn write_file(&self, filename: &str, content: &str) {
        fs::write(self.workdir().join(filename), content).unwrap();
    }

    /// Read content from a file in the working directory.
    pub fn read_file(&self, filename: &str) -> String {
        fs::read_to_string(self.workdir().join(filename)).unwrap()
    }

    /// Content of `filename` in the HEAD tree, if it is tracked.
    pub fn committed_file(&self, filename: &str) -> Option<String> {
        let tree = self.head_commit().tree().unwrap();
        let entry = tree.get_path(Path::new(filename)).ok()?;
        let blob = self.repo.find_blob(entry.id()).unwrap();
        Some(String::from_utf8_lossy(blob.content()).into_owned())
    }

    /// Get the path to the bare remote, if this repo has one.
    pub fn remote_path(&self) -> Option<PathBuf> {
        let remote_path = self._dir.path().join("remote.git");
        remote_path.exists().then_some(remote_path)
    }

    /// The OID of `main` in the bare remote.
    pub fn remote_main_oid(&self) -> git2::Oid {
        let remote = Repository::open_bare(self.remote_path().unwrap()).unwrap();
        remote.refname_to_id("refs/heads/main").unwrap()
    }
}
