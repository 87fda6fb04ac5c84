use dupelink::config::RunConfig;
use dupelink::duplicates::DuplicateFinder;
use dupelink::scanner::ReadLimit;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().write_all(content).unwrap();
}

fn run(config: RunConfig) -> (Vec<String>, dupelink::duplicates::RunStats) {
    let mut out = Vec::new();
    let stats = DuplicateFinder::new(config).run(&mut out).unwrap();
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    (lines, stats)
}

fn config_for(root: &Path) -> RunConfig {
    RunConfig::new(vec![root.to_path_buf()]).with_size_range(0, 1 << 30)
}

#[test]
fn test_hello_world_scenario() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    let c = dir.path().join("c.txt");
    write_file(&a, b"hello");
    write_file(&b, b"hello");
    write_file(&c, b"world");

    let (lines, stats) = run(config_for(dir.path()).with_stats(true));

    assert_eq!(
        lines,
        vec![
            a.display().to_string(),
            format!("{} == {}", b.display(), a.display()),
            c.display().to_string(),
            "found duplicates 1 with total size 5 bytes".to_string(),
        ]
    );
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.duplicate_bytes, 5);
}

#[test]
fn test_canonical_is_first_in_lexical_walk_order() {
    let dir = tempdir().unwrap();
    // "a_dir" sorts before "b.bin", so the nested copy is seen first
    let nested = dir.path().join("a_dir").join("z.bin");
    let top = dir.path().join("b.bin");
    write_file(&top, b"shared payload");
    write_file(&nested, b"shared payload");

    let (lines, _) = run(config_for(dir.path()));

    assert_eq!(
        lines,
        vec![
            nested.display().to_string(),
            format!("{} == {}", top.display(), nested.display()),
        ]
    );
}

#[test]
fn test_three_copies_all_point_at_first() {
    let dir = tempdir().unwrap();
    let paths: Vec<PathBuf> = ["one", "two", "three"]
        .iter()
        .map(|name| dir.path().join(name))
        .collect();
    for path in &paths {
        write_file(path, b"triplicate");
    }

    let (lines, stats) = run(config_for(dir.path()));

    // Lexical order: one, three, two
    let canonical = &paths[0];
    assert_eq!(lines[0], canonical.display().to_string());
    assert!(lines[1..]
        .iter()
        .all(|line| line.ends_with(&format!(" == {}", canonical.display()))));
    assert_eq!(stats.duplicates, 2);
    assert_eq!(stats.duplicate_bytes, 20);
}

#[test]
fn test_same_content_different_size_never_matches() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a"), b"abc");
    write_file(&dir.path().join("b"), b"abcabc");

    let (lines, stats) = run(config_for(dir.path()));
    assert_eq!(lines.len(), 2);
    assert_eq!(stats.duplicates, 0);
}

#[test]
fn test_prefix_limit_matches_files_differing_after_prefix() {
    let dir = tempdir().unwrap();
    let mut first = vec![0u8; 8192];
    let mut second = first.clone();
    first[8000] = 1;
    second[8000] = 2;
    write_file(&dir.path().join("first"), &first);
    write_file(&dir.path().join("second"), &second);

    let (_, whole) = run(config_for(dir.path()));
    assert_eq!(whole.duplicates, 0);

    let (_, prefix) = run(config_for(dir.path()).with_limit(ReadLimit::Prefix(4096)));
    assert_eq!(prefix.duplicates, 1);
    assert_eq!(prefix.duplicate_bytes, 8192);
}

#[test]
fn test_empty_files_are_duplicates_when_allowed() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("empty1"), b"");
    write_file(&dir.path().join("empty2"), b"");

    let (_, stats) = run(config_for(dir.path()));
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.duplicate_bytes, 0);
}

#[test]
fn test_each_run_starts_with_an_empty_index() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a"), b"data");
    write_file(&dir.path().join("b"), b"data");

    let finder = DuplicateFinder::new(config_for(dir.path()));
    let mut out = Vec::new();
    let first = finder.run(&mut out).unwrap();
    let second = finder.run(&mut out).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.duplicates, 1);
}

#[test]
fn test_single_file_root() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("lonely.txt");
    write_file(&file, b"content");

    let (lines, stats) = run(config_for(&file));
    assert_eq!(lines, vec![file.display().to_string()]);
    assert_eq!(stats.files_fingerprinted, 1);
}
