//! Grouping of staged files into monorepo scopes.
//!
//! A file under `<root>/<name>/...` belongs to scope `<name>` when `<root>`
//! is one of the configured scope directories (`apps` and `libs` by
//! default). Everything else belongs to [`ROOT_SCOPE`].

use std::collections::BTreeMap;

use crate::git::FileStatus;

/// Scope for files outside every scope directory.
pub const ROOT_SCOPE: &str = "root";

/// Staged files partitioned by scope.
///
/// Iteration yields [`ROOT_SCOPE`] first, then the remaining scopes in
/// lexicographic order. Files keep their input order within a scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeGroups {
    groups: BTreeMap<String, Vec<FileStatus>>,
}

impl ScopeGroups {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, scope: &str) -> Option<&[FileStatus]> {
        self.groups.get(scope).map(Vec::as_slice)
    }

    /// Scope names in processing order.
    pub fn scopes(&self) -> Vec<&str> {
        self.iter().map(|(scope, _)| scope).collect()
    }

    /// Iterate `(scope, files)` pairs in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FileStatus])> {
        let root = self
            .groups
            .get_key_value(ROOT_SCOPE)
            .map(|(k, v)| (k.as_str(), v.as_slice()));
        let rest = self
            .groups
            .iter()
            .filter(|(k, _)| k.as_str() != ROOT_SCOPE)
            .map(|(k, v)| (k.as_str(), v.as_slice()));
        root.into_iter().chain(rest)
    }
}

/// Scope of a single path.
pub fn scope_of<'a>(path: &'a str, scope_dirs: &[String]) -> &'a str {
    let mut segments = path.split('/');
    match (segments.next(), segments.next()) {
        (Some(top), Some(name)) if !name.is_empty() && scope_dirs.iter().any(|d| d == top) => name,
        _ => ROOT_SCOPE,
    }
}

/// Partition `files` by scope. Pure: same input, same groups.
pub fn group_by_scope(files: &[FileStatus], scope_dirs: &[String]) -> ScopeGroups {
    let mut groups: BTreeMap<String, Vec<FileStatus>> = BTreeMap::new();
    for file in files {
        let scope = scope_of(&file.file, scope_dirs);
        groups.entry(scope.to_string()).or_default().push(file.clone());
    }
    ScopeGroups { groups }
}
