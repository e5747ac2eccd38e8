// tests/selector_tests.rs
mod support;

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use support::{storage_name, HS};
use tempfile::tempdir;
use vault_format_upgrade::consts::STORAGE_ID_PATTERN;
use vault_format_upgrade::error::CoreError;
use vault_format_upgrade::upgrade::FileSelector;

fn selector() -> FileSelector {
    FileSelector::from_pattern(STORAGE_ID_PATTERN, HS).unwrap()
}

#[test]
fn storage_id_names_are_candidates() {
    let s = selector();
    let big = HS as u64 + 1;
    assert!(s.is_candidate("ABCDEFGH", big));
    assert!(s.is_candidate("ABCDEFGHIJKLMNOP", big));
    assert!(s.is_candidate("MZXW6YTB========", big));
    assert!(s.is_candidate(&storage_name(42), big));
    // prefix match: shortened names and conflict copies are migrated too
    assert!(s.is_candidate("ABCDEFGHIJKLMNOP.lng", big));
    assert!(s.is_candidate("ABCDEFGHIJKLMNOP (1)", big));
}

#[test]
fn other_names_are_rejected() {
    let s = selector();
    let big = HS as u64 + 1;
    assert!(!s.is_candidate("0ABCDEFGHIJKLMNOP", big)); // directory marker
    assert!(!s.is_candidate("abcdefgh", big));
    assert!(!s.is_candidate("ABCDEFG", big));
    assert!(!s.is_candidate("ABCDEFG1", big));
    assert!(!s.is_candidate("masterkey.cryptomator", big));
    assert!(!s.is_candidate("", big));
}

#[test]
fn files_without_chunks_are_rejected() {
    let s = selector();
    assert!(!s.is_candidate("ABCDEFGH", 0));
    assert!(!s.is_candidate("ABCDEFGH", HS as u64));
    assert!(s.is_candidate("ABCDEFGH", HS as u64 + 1));
}

#[test]
fn missing_directory_yields_nothing() {
    let dir = tempdir().unwrap();
    let s = selector();
    assert_eq!(s.candidates(&dir.path().join("d")).unwrap().count(), 0);
}

#[test]
fn plain_file_instead_of_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let not_a_dir = dir.path().join("d");
    fs::write(&not_a_dir, vec![0u8; 4 * HS]).unwrap();
    assert!(selector().candidates(&not_a_dir).is_err());
}

#[test]
fn unreachable_directory_is_an_error_not_an_empty_vault() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("vault");
    fs::write(&blocker, b"not a directory").unwrap();

    // stat fails with ENOTDIR, which must not look like a missing directory
    let err = selector().candidates(&blocker.join("d")).err().unwrap();
    assert_ne!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn walk_finds_nested_candidates_only() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("d");
    let nested = data.join("AB").join("CDEFGHIJKLMNOPQRSTUVWXYZ234567AB");
    fs::create_dir_all(&nested).unwrap();

    let big = vec![0u8; HS + 10];
    let expected: BTreeSet<PathBuf> = [
        nested.join(storage_name(1)),
        nested.join(storage_name(2)),
        data.join("AB").join(storage_name(3)),
    ]
    .into_iter()
    .collect();
    for path in &expected {
        fs::write(path, &big).unwrap();
    }
    fs::write(nested.join(storage_name(4)), vec![0u8; HS]).unwrap(); // header only
    fs::write(nested.join("0QWERTYUIQWERTYUI"), &big).unwrap(); // dir marker
    fs::write(nested.join("notes.txt"), &big).unwrap();
    fs::create_dir_all(nested.join(storage_name(5))).unwrap(); // directory, not a file

    let found: BTreeSet<PathBuf> = selector()
        .candidates(&data)
        .unwrap()
        .map(|c| c.unwrap())
        .inspect(|c| assert_eq!(c.size, big.len() as u64))
        .map(|c| c.path)
        .collect();

    assert_eq!(found, expected);
}

#[test]
fn invalid_pattern_is_reported() {
    let result = FileSelector::from_pattern("([A-Z", HS);
    assert!(matches!(result, Err(CoreError::Pattern(_))));
}
