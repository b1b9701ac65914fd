//! Directory walking for the analysis run: gitignore-aware traversal,
//! test file/directory exclusion, and user exclusion globs.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::lang::{self, Lang};

/// Directory names excluded unless `--include-tests` is passed.
pub const TEST_DIRS: &[&str] = &["tests", "test", "__tests__", "spec"];

/// Check whether a file matches a test naming convention for its language
/// family (suffix `_test`, prefix `test_`, `.test.`/`.spec.` double
/// extensions, or PascalCase `Test`/`Tests`/`Spec` suffixes).
pub fn is_test_file(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let Some((base, ext)) = file_name.rsplit_once('.') else {
        return false;
    };

    match ext {
        "rs" | "go" | "exs" | "dart" => base.ends_with("_test"),
        "py" => base.starts_with("test_") || base.ends_with("_test"),
        "rb" => base.ends_with("_test") || base.ends_with("_spec"),
        "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" | "mts" | "cts" => {
            base.ends_with(".test") || base.ends_with(".spec")
        }
        "java" | "kt" | "kts" | "cs" | "swift" => {
            base.ends_with("Test") || base.ends_with("Tests")
        }
        "scala" => base.ends_with("Test") || base.ends_with("Spec"),
        "c" | "cc" | "cpp" | "cxx" => {
            base.ends_with("_test") || base.starts_with("test_") || base.ends_with("_unittest")
        }
        "php" => base.ends_with("Test") || base.ends_with("_test"),
        _ => false,
    }
}

/// User exclusion patterns, matched against the path relative to the
/// scan root.
#[derive(Default)]
pub struct ExcludeFilter {
    globs: Option<GlobSet>,
}

impl ExcludeFilter {
    /// Build from raw glob strings. Invalid patterns are reported as
    /// warnings and skipped.
    pub fn new(patterns: &[String]) -> Self {
        if patterns.is_empty() {
            return Self::default();
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(err) => eprintln!("warning: ignoring exclusion pattern {pattern}: {err}"),
            }
        }
        Self {
            globs: builder.build().ok(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_none()
    }

    /// Whether `path` (absolute or root-relative) is excluded. `root` is the
    /// scan root the patterns are anchored to.
    pub fn excludes(&self, path: &Path, root: &Path) -> bool {
        let Some(globs) = &self.globs else {
            return false;
        };
        let relative = path.strip_prefix(root).unwrap_or(path);
        globs.is_match(relative)
    }
}

/// Walk `root` and return every recognized source file with its language,
/// in a deterministic order. Respects `.gitignore`, skips `.git`, and
/// applies test and user exclusions.
pub fn source_files(
    root: &Path,
    include_tests: bool,
    filter: &ExcludeFilter,
) -> Vec<(PathBuf, &'static Lang)> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                if entry.file_name() == ".git" {
                    return false;
                }
                if !include_tests
                    && let Some(name) = entry.file_name().to_str()
                    && TEST_DIRS.contains(&name)
                {
                    return false;
                }
            }
            true
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                eprintln!("warning: {err}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if !include_tests && is_test_file(path) {
            continue;
        }
        if filter.excludes(path, root) {
            continue;
        }
        if let Some(lang) = lang::detect(path) {
            files.push((path.to_path_buf(), lang));
        }
    }

    // The walker's order is filesystem-dependent; sort for stable output.
    files.sort_by(|a, b| a.0.cmp(&b.0));
    files
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
