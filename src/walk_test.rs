use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;

// ── is_test_file ────────────────────────────────────────────────────────

#[test]
fn test_file_suffix_families() {
    assert!(is_test_file(Path::new("parser_test.rs")));
    assert!(is_test_file(Path::new("parser_test.go")));
    assert!(!is_test_file(Path::new("parser.rs")));
    assert!(!is_test_file(Path::new("test.rs"))); // no _test suffix
}

#[test]
fn test_file_python_prefix_and_suffix() {
    assert!(is_test_file(Path::new("test_parser.py")));
    assert!(is_test_file(Path::new("parser_test.py")));
    assert!(!is_test_file(Path::new("parser.py")));
}

#[test]
fn test_file_double_extension() {
    assert!(is_test_file(Path::new("parser.test.ts")));
    assert!(is_test_file(Path::new("parser.spec.jsx")));
    assert!(!is_test_file(Path::new("parser.ts")));
}

#[test]
fn test_file_pascal_case() {
    assert!(is_test_file(Path::new("ParserTest.java")));
    assert!(is_test_file(Path::new("ParserTests.cs")));
    assert!(is_test_file(Path::new("ParserSpec.scala")));
    assert!(!is_test_file(Path::new("Parser.java")));
}

#[test]
fn test_file_no_extension() {
    assert!(!is_test_file(Path::new("Makefile")));
    assert!(!is_test_file(Path::new("README")));
}

// ── ExcludeFilter ───────────────────────────────────────────────────────

const ROOT: &str = "";

#[test]
fn exclude_filter_empty() {
    let f = ExcludeFilter::new(&[]);
    assert!(f.is_empty());
    assert!(!f.excludes(Path::new("foo.rs"), Path::new(ROOT)));
}

#[test]
fn exclude_filter_matches_filename_glob() {
    let f = ExcludeFilter::new(&["*.min.js".to_string()]);
    assert!(f.excludes(Path::new("app.min.js"), Path::new(ROOT)));
    assert!(!f.excludes(Path::new("app.js"), Path::new(ROOT)));
}

#[test]
fn exclude_filter_matches_path_glob() {
    let f = ExcludeFilter::new(&["vendor/**".to_string()]);
    assert!(f.excludes(Path::new("vendor/dep.rs"), Path::new(ROOT)));
    assert!(f.excludes(Path::new("vendor/sub/dep.rs"), Path::new(ROOT)));
    assert!(!f.excludes(Path::new("src/main.rs"), Path::new(ROOT)));
}

#[test]
fn exclude_filter_anchored_to_root_for_absolute_paths() {
    let f = ExcludeFilter::new(&["vendor/**".to_string()]);
    let root = Path::new("/home/user/project");
    assert!(f.excludes(Path::new("/home/user/project/vendor/foo.rs"), root));
    assert!(!f.excludes(Path::new("/home/user/project/src/main.rs"), root));
}

#[test]
fn exclude_filter_invalid_glob_skipped() {
    let f = ExcludeFilter::new(&["[invalid".to_string()]);
    assert!(!f.excludes(Path::new("foo.rs"), Path::new(ROOT)));
}

// ── source_files ────────────────────────────────────────────────────────

#[test]
fn source_files_finds_recognized_languages() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
    fs::write(dir.path().join("notes.unknown"), "???").unwrap();

    let files = source_files(dir.path(), false, &ExcludeFilter::default());
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].1.name, "Rust");
}

#[test]
fn source_files_skips_test_dirs_by_default() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("tests")).unwrap();
    fs::write(dir.path().join("tests/it.rs"), "fn a() {}").unwrap();
    fs::write(dir.path().join("lib.rs"), "fn b() {}").unwrap();

    let files = source_files(dir.path(), false, &ExcludeFilter::default());
    assert_eq!(files.len(), 1);

    let with_tests = source_files(dir.path(), true, &ExcludeFilter::default());
    assert_eq!(with_tests.len(), 2);
}

#[test]
fn source_files_skips_test_named_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("parser_test.rs"), "fn a() {}").unwrap();
    fs::write(dir.path().join("parser.rs"), "fn b() {}").unwrap();

    let files = source_files(dir.path(), false, &ExcludeFilter::default());
    assert_eq!(files.len(), 1);
    assert!(files[0].0.ends_with("parser.rs"));
}

#[test]
fn source_files_applies_exclude_globs() {
    let dir = tempdir().unwrap();
    let vendor = dir.path().join("vendor");
    fs::create_dir(&vendor).unwrap();
    fs::write(vendor.join("dep.rs"), "fn v() {}").unwrap();
    fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();

    let filter = ExcludeFilter::new(&["vendor/**".to_string()]);
    let files = source_files(dir.path(), false, &filter);
    assert_eq!(files.len(), 1);
    assert!(files[0].0.ends_with("main.rs"));
}

#[test]
fn source_files_sorted_for_stable_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.rs"), "fn b() {}").unwrap();
    fs::write(dir.path().join("a.rs"), "fn a() {}").unwrap();
    fs::write(dir.path().join("c.rs"), "fn c() {}").unwrap();

    let files = source_files(dir.path(), false, &ExcludeFilter::default());
    let names: Vec<_> = files
        .iter()
        .map(|(p, _)| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["a.rs", "b.rs", "c.rs"]);
}
