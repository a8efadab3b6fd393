use globset::GlobBuilder;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::RunError;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

fn has_meta(segment: &str) -> bool {
    segment.contains(GLOB_META)
}

/// Drop empty and `.` segments so `a//b` and `./b` name the same files as
/// `a/b` and `b`.
fn clean_pattern(pattern: &str) -> String {
    let joined = pattern
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if pattern.starts_with('/') {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Split a pattern into the literal directory to start walking from and the
/// number of path segments left to match below it (`None` when `**` allows
/// any depth).
fn split_pattern(pattern: &str) -> (String, Option<usize>) {
    let segments: Vec<&str> = pattern.split('/').collect();
    let literal = segments.iter().take_while(|s| !has_meta(s)).count();

    let rest = &segments[literal..];
    let depth = if rest.iter().any(|s| s.contains("**")) {
        None
    } else {
        Some(rest.len())
    };

    let root = segments[..literal].join("/");
    if root.is_empty() && pattern.starts_with('/') {
        return ("/".to_string(), depth);
    }
    (root, depth)
}

/// Expand `pattern` into the manifest files it names, in lexical order.
///
/// `*` and `?` never cross a `/`. Relative patterns are matched against the
/// working directory and come back relative to it. Directories are never
/// returned and unreadable ones are skipped. Repeated separators and `.`
/// segments are ignored, so `./*.csv` yields `a.csv`, not `./a.csv`.
pub fn resolve_manifests(pattern: &str) -> Result<Vec<PathBuf>, RunError> {
    let cleaned = clean_pattern(pattern);
    let matcher = GlobBuilder::new(&cleaned)
        .literal_separator(true)
        .build()
        .map_err(|source| RunError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();

    let mut found = Vec::new();

    if has_meta(&cleaned) {
        let (root, depth) = split_pattern(&cleaned);
        let walk_root = if root.is_empty() { "." } else { root.as_str() };

        let mut walker = WalkDir::new(walk_root).min_depth(1);
        if let Some(depth) = depth {
            walker = walker.max_depth(depth);
        }

        for entry in walker.into_iter().filter_map(Result::ok) {
            let candidate = if root.is_empty() {
                entry
                    .path()
                    .strip_prefix(".")
                    .unwrap_or_else(|_| entry.path())
                    .to_path_buf()
            } else {
                entry.path().to_path_buf()
            };

            if candidate.is_dir() {
                continue;
            }
            if matcher.is_match(&candidate) {
                found.push(candidate);
            }
        }
    } else {
        let path = Path::new(&cleaned);
        if path.symlink_metadata().is_ok() && !path.is_dir() {
            found.push(path.to_path_buf());
        }
    }

    if found.is_empty() {
        return Err(RunError::NoManifests {
            pattern: pattern.to_string(),
        });
    }

    found.sort();
    Ok(found)
}
