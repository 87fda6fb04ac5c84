use dupelink::actions::LinkMode;
use dupelink::config::RunConfig;
use dupelink::duplicates::DuplicateFinder;
use dupelink::scanner::hardlink::same_file;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn write_file(path: &Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

fn link_config(root: &Path, mode: LinkMode) -> RunConfig {
    RunConfig::new(vec![root.to_path_buf()])
        .with_size_range(0, 1 << 30)
        .with_link_mode(mode)
}

#[test]
#[cfg(unix)]
fn test_link_replaces_duplicate_with_hard_link() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    let c = dir.path().join("c.txt");
    write_file(&a, b"hello");
    write_file(&b, b"hello");
    write_file(&c, b"world");

    let finder = DuplicateFinder::new(link_config(dir.path(), LinkMode::HardLink));
    let stats = finder.run(&mut Vec::new()).unwrap();

    assert_eq!(stats.links_made, 1);
    assert!(same_file(&a, &b));
    assert!(!same_file(&a, &c));
    assert_eq!(fs::read(&b).unwrap(), b"hello");
    assert!(!dir.path().join("b.txt.dedup").exists());
}

#[test]
#[cfg(unix)]
fn test_link_with_backup_renames_first() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    write_file(&a, b"hello");
    write_file(&b, b"hello");

    let finder = DuplicateFinder::new(link_config(dir.path(), LinkMode::HardLinkWithBackup));
    let stats = finder.run(&mut Vec::new()).unwrap();

    let backup = dir.path().join("b.txt.dedup");
    assert_eq!(stats.links_made, 1);
    assert!(same_file(&a, &b));
    assert!(backup.exists());
    assert!(!same_file(&a, &backup));
    assert_eq!(fs::read(&backup).unwrap(), b"hello");
}

#[test]
#[cfg(unix)]
fn test_second_link_run_is_idempotent() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    write_file(&a, b"hello");
    write_file(&b, b"hello");

    let finder = DuplicateFinder::new(link_config(dir.path(), LinkMode::HardLink));
    let first = finder.run(&mut Vec::new()).unwrap();
    let second = finder.run(&mut Vec::new()).unwrap();

    assert_eq!(first.links_made, 1);
    // Still reported as a duplicate, but nothing left to link
    assert_eq!(second.duplicates, 1);
    assert_eq!(second.links_made, 0);
    assert_eq!(second.link_failures, 0);
    assert!(same_file(&a, &b));
}

#[test]
#[cfg(unix)]
fn test_listing_is_unchanged_by_link_mode() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.txt"), b"hello");
    write_file(&dir.path().join("b.txt"), b"hello");

    let mut report = Vec::new();
    DuplicateFinder::new(link_config(dir.path(), LinkMode::ReportOnly))
        .run(&mut report)
        .unwrap();

    let mut linked = Vec::new();
    DuplicateFinder::new(link_config(dir.path(), LinkMode::HardLink))
        .run(&mut linked)
        .unwrap();

    assert_eq!(report, linked);
}

#[test]
fn test_report_only_never_touches_files() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    write_file(&a, b"hello");
    write_file(&b, b"hello");

    let stats = DuplicateFinder::new(link_config(dir.path(), LinkMode::ReportOnly))
        .run(&mut Vec::new())
        .unwrap();

    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.links_made, 0);
    assert!(!same_file(&a, &b));
}
