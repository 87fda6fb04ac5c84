use dupelink::config::RunConfig;
use dupelink::duplicates::DuplicateFinder;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &Path, content: &[u8]) -> PathBuf {
    File::create(path).unwrap().write_all(content).unwrap();
    path.to_path_buf()
}

fn run(roots: Vec<PathBuf>) -> (Vec<String>, dupelink::duplicates::RunStats) {
    let config = RunConfig::new(roots).with_size_range(0, 1 << 30);
    let mut out = Vec::new();
    let stats = DuplicateFinder::new(config).run(&mut out).unwrap();
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    (lines, stats)
}

#[test]
fn test_first_root_owns_canonical_copies() {
    let primary = tempdir().unwrap();
    let backup = tempdir().unwrap();
    let original = write_file(&primary.path().join("photo.jpg"), b"jpeg bytes");
    let copy = write_file(&backup.path().join("photo.jpg"), b"jpeg bytes");

    let (lines, stats) = run(vec![primary.path().to_path_buf(), backup.path().to_path_buf()]);
    assert_eq!(
        lines,
        vec![
            original.display().to_string(),
            format!("{} == {}", copy.display(), original.display()),
        ]
    );
    assert_eq!(stats.duplicates, 1);

    // Swapping the roots swaps the roles
    let (lines, _) = run(vec![backup.path().to_path_buf(), primary.path().to_path_buf()]);
    assert_eq!(lines[1], format!("{} == {}", original.display(), copy.display()));
}

#[test]
fn test_index_is_shared_across_roots() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let third = tempdir().unwrap();
    write_file(&first.path().join("x"), b"shared");
    write_file(&second.path().join("y"), b"shared");
    write_file(&third.path().join("z"), b"shared");

    let (_, stats) = run(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
        third.path().to_path_buf(),
    ]);

    assert_eq!(stats.duplicates, 2);
    assert_eq!(stats.duplicate_bytes, 12);
}

#[test]
fn test_root_given_twice_reports_each_file_as_its_own_duplicate() {
    let dir = tempdir().unwrap();
    let file = write_file(&dir.path().join("only"), b"content");

    let (lines, stats) = run(vec![dir.path().to_path_buf(), dir.path().to_path_buf()]);

    assert_eq!(
        lines,
        vec![
            file.display().to_string(),
            format!("{} == {}", file.display(), file.display()),
        ]
    );
    assert_eq!(stats.duplicates, 1);
}

#[test]
fn test_nested_root_overlap() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).unwrap();
    write_file(&sub.join("f"), b"overlap");

    let (_, stats) = run(vec![dir.path().to_path_buf(), sub.clone()]);

    assert_eq!(stats.files_fingerprinted, 2);
    assert_eq!(stats.duplicates, 1);
}
