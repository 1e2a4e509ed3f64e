//! Git baseline snapshots
//!
//! Reads the document corpus as it existed at a prior git ref so the
//! review command can run the identical pipeline on both versions and
//! diff the results. All git access goes through libgit2; nothing here
//! shells out.

use crate::loader::truncate_to_limit;
use anyhow::{anyhow, Result};
use git2::{ObjectType, Repository, TreeWalkMode, TreeWalkResult};
use std::path::Path;
use tracing::debug;

/// Open the repository containing `path`.
pub fn open_repo(path: &Path) -> Result<Repository> {
    Repository::discover(path).map_err(|_| anyhow!("not in a git repository"))
}

/// Resolve a ref (branch, tag, commit) to its commit SHA.
pub fn resolve_ref(repo: &Repository, refname: &str) -> Result<String> {
    let object = repo
        .revparse_single(refname)
        .map_err(|_| anyhow!("reference not found: {refname}"))?;
    let commit = object
        .peel_to_commit()
        .map_err(|_| anyhow!("reference does not point to a commit: {refname}"))?;
    Ok(commit.id().to_string())
}

/// List files at a ref under `path_or_glob`, filtered to the supported
/// extensions. A path that does not exist at the ref yields an empty
/// list, not an error.
pub fn list_files_at_ref(
    repo: &Repository,
    refname: &str,
    path_or_glob: &str,
    extensions: &[&str],
) -> Result<Vec<String>> {
    let tree = repo
        .revparse_single(refname)
        .map_err(|_| anyhow!("reference not found: {refname}"))?
        .peel_to_commit()
        .map_err(|_| anyhow!("reference does not point to a commit: {refname}"))?
        .tree()?;

    // Single existing file: exact path. Existing directory: prefix.
    // Anything else (glob, deleted path): list the whole tree and let
    // the prefix filter degrade to "everything supported".
    let path = Path::new(path_or_glob);
    let exact_file = path.is_file();
    let prefix = if exact_file {
        path_or_glob.trim_start_matches("./").to_string()
    } else if path.is_dir() {
        let p = path_or_glob.trim_start_matches("./").trim_end_matches('/');
        if p == "." {
            String::new()
        } else {
            format!("{p}/")
        }
    } else {
        String::new()
    };

    let mut files = Vec::new();
    tree.walk(TreeWalkMode::PreOrder, |root, entry| {
        if entry.kind() == Some(ObjectType::Blob) {
            if let Some(name) = entry.name() {
                files.push(format!("{root}{name}"));
            }
        }
        TreeWalkResult::Ok
    })?;

    let mut matched: Vec<String> = files
        .into_iter()
        .filter(|f| {
            if exact_file {
                f == &prefix
            } else {
                f.starts_with(&prefix)
            }
        })
        .filter(|f| {
            Path::new(f)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| extensions.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();

    matched.sort();
    debug!("{} file(s) at {refname} under '{path_or_glob}'", matched.len());
    Ok(matched)
}

/// Load a file's content at a ref. Missing or unreadable files yield an
/// empty string: the baseline analysis simply sees less text.
pub fn load_file_at_ref(
    repo: &Repository,
    refname: &str,
    file_path: &str,
    max_chars: usize,
) -> Result<String> {
    let tree = repo
        .revparse_single(refname)
        .map_err(|_| anyhow!("reference not found: {refname}"))?
        .peel_to_commit()
        .map_err(|_| anyhow!("reference does not point to a commit: {refname}"))?
        .tree()?;

    let entry = match tree.get_path(Path::new(file_path)) {
        Ok(entry) => entry,
        Err(_) => return Ok(String::new()),
    };
    let object = entry.to_object(repo)?;
    let blob = match object.as_blob() {
        Some(blob) => blob,
        None => return Ok(String::new()),
    };

    let content = String::from_utf8_lossy(blob.content()).into_owned();
    Ok(truncate_to_limit(content, max_chars))
}
