//! # Input Resolution
//!
//! The linter takes one positional input: a file path or a glob pattern.
//! A pattern is anything containing an unescaped `*`, `?`, `[` or `{`.
//!
//! Glob expansion uses the `glob` crate. `{a,b}` alternatives are expanded
//! first since `glob` does not support them. Matches that are directories,
//! or that the root's `.gitignore` excludes, are dropped, and the remaining
//! paths are returned sorted and without duplicates.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use thiserror::Error;

/// Errors raised while turning an input into file paths.
#[derive(Error, Debug)]
pub enum InputError {
    /// The glob pattern does not compile.
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// The `.gitignore` file exists but could not be loaded.
    #[error("could not load ignore file {path}: {source}")]
    Ignore {
        path: String,
        #[source]
        source: ignore::Error,
    },
}

/// What the user asked to lint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    Glob(String),
}

impl Input {
    pub fn parse(input: &str) -> Self {
        if is_glob(input) {
            Self::Glob(input.to_string())
        } else {
            Self::File(PathBuf::from(input))
        }
    }

    pub fn is_glob(&self) -> bool {
        matches!(self, Self::Glob(_))
    }
}

/// Whether `input` contains an unescaped glob metacharacter.
pub fn is_glob(input: &str) -> bool {
    let mut escaped = false;
    for c in input.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '*' | '?' | '[' | '{' => return true,
            _ => {}
        }
    }
    false
}

/// Files matching `pattern`, minus directories and paths ignored by
/// `root/.gitignore`, sorted.
pub fn resolve_inputs(pattern: &str, root: &Path) -> Result<Vec<PathBuf>, InputError> {
    let gitignore = load_gitignore(root)?;
    let mut paths = BTreeSet::new();

    for expanded in expand_braces(pattern) {
        let entries = glob::glob(&expanded).map_err(|source| InputError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    tracing::warn!(
                        path = %err.path().display(),
                        error = %err.error(),
                        "skipping unreadable path"
                    );
                    continue;
                }
            };
            if path.is_dir() || is_ignored(&gitignore, root, &path) {
                continue;
            }
            paths.insert(path);
        }
    }

    tracing::debug!(pattern, matched = paths.len(), "resolved glob");
    Ok(paths.into_iter().collect())
}

fn load_gitignore(root: &Path) -> Result<Gitignore, InputError> {
    let file = root.join(".gitignore");
    let mut builder = GitignoreBuilder::new(root);
    if file.is_file() {
        if let Some(source) = builder.add(&file) {
            return Err(InputError::Ignore {
                path: file.display().to_string(),
                source,
            });
        }
    }
    builder.build().map_err(|source| InputError::Ignore {
        path: file.display().to_string(),
        source,
    })
}

fn is_ignored(gitignore: &Gitignore, root: &Path, path: &Path) -> bool {
    // The matcher only accepts paths below its root.
    if path.is_absolute() && !path.starts_with(root) {
        return false;
    }
    gitignore
        .matched_path_or_any_parents(path, false)
        .is_ignore()
}

/// Expands `{a,b}` alternatives, including nested ones, into plain glob
/// patterns. An unbalanced brace is left as is.
fn expand_braces(pattern: &str) -> Vec<String> {
    let Some((open, close)) = first_brace_group(pattern) else {
        return vec![pattern.to_string()];
    };
    let head = &pattern[..open];
    let tail = &pattern[close + 1..];
    split_alternatives(&pattern[open + 1..close])
        .into_iter()
        .flat_map(|alternative| expand_braces(&format!("{head}{alternative}{tail}")))
        .collect()
}

fn first_brace_group(pattern: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut open = None;
    let mut escaped = false;
    for (i, c) in pattern.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => {
                if depth == 0 {
                    open = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return open.map(|o| (o, i));
                }
            }
            _ => {}
        }
    }
    None
}

fn split_alternatives(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}
