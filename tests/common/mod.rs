//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, Signature};

use aicommit::GitCli;

/// A throwaway git repository for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty repository with a local identity configured, so
    /// `git commit` works regardless of the machine's global config.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        config.set_bool("commit.gpgsign", false).unwrap();

        Self { dir, repo }
    }

    /// A [`GitCli`] rooted at this repository.
    pub fn cli(&self) -> GitCli {
        GitCli::at(self.dir.path())
    }

    /// Write a file (creating parent directories) without staging it.
    pub fn write(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full, content).expect("Failed to write file");
    }

    /// Write a file and add it to the index.
    pub fn stage(&self, path: &str, content: &str) {
        self.write(path, content);
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(path)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Move a tracked file and stage both sides of the rename.
    pub fn stage_rename(&self, from: &str, to: &str) {
        let root = self.dir.path();
        if let Some(parent) = root.join(to).parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::rename(root.join(from), root.join(to)).expect("Failed to rename file");

        let mut index = self.repo.index().expect("Failed to get index");
        index.remove_path(Path::new(from)).expect("Failed to remove old path");
        index.add_path(Path::new(to)).expect("Failed to add new path");
        index.write().expect("Failed to write index");
    }

    /// Commit whatever is in the index. Returns the commit OID.
    pub fn commit_index(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the HEAD commit.
    pub fn head_message(&self) -> String {
        let head = self.repo.head().expect("No HEAD").peel_to_commit().unwrap();
        head.message().unwrap_or_default().to_string()
    }

    /// Paths in the HEAD commit's tree.
    pub fn head_paths(&self) -> Vec<String> {
        let tree = self.repo.head().expect("No HEAD").peel_to_tree().unwrap();
        let mut paths = Vec::new();
        tree.walk(git2::TreeWalkMode::PreOrder, |root, entry| {
            if entry.kind() == Some(git2::ObjectType::Blob) {
                paths.push(format!("{}{}", root, entry.name().unwrap_or_default()));
            }
            git2::TreeWalkResult::Ok
        })
        .unwrap();
        paths.sort();
        paths
    }

    /// Number of commits reachable from HEAD (0 for an unborn branch).
    pub fn commit_count(&self) -> usize {
        let Ok(mut walk) = self.repo.revwalk() else {
            return 0;
        };
        if walk.push_head().is_err() {
            return 0;
        }
        walk.count()
    }
}

/// Fixed file content long enough for git's rename detection.
pub fn sample_source(name: &str) -> String {
    (0..20)
        .map(|i| format!("export const {}_{} = {};\n", name, i, i))
        .collect()
}
