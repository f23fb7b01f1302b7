//! # Loader Tests
//!
//! Comment stripping, literal parsing, error reporting and file loading.

use crate::common::programs::{MULT_TEXT, PRINT8};
use ls8_core::common::LoadError;
use ls8_core::sim::loader::{load_file, parse_program};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::Write;

#[test]
fn test_parse_mult_program() {
    let bytes = parse_program(MULT_TEXT).unwrap();
    assert_eq!(
        bytes,
        vec![1, 2, 0, 4, 8, 2, 1, 4, 9, 2, 2, 5, 0, 1, 2, 2, 6, 0]
    );
}

#[test]
fn test_comments_whitespace_and_blank_lines() {
    let text = "\n   # header only\n\t00000001   # INIT\n\n  00000110\r\n00000000#HALT\n   \n";
    assert_eq!(parse_program(text).unwrap(), vec![1, 6, 0]);
}

#[test]
fn test_short_literals_are_accepted() {
    assert_eq!(parse_program("1\n10\n11111111").unwrap(), vec![1, 2, 255]);
}

#[test]
fn test_empty_text_is_empty_program() {
    assert!(parse_program("").unwrap().is_empty());
    assert!(parse_program("# nothing here\n\n").unwrap().is_empty());
}

#[test]
fn test_non_binary_digit_is_rejected_with_line_number() {
    let err = parse_program("00000001\n# comment\n00000201 # bad\n").unwrap_err();
    match err {
        LoadError::InvalidLiteral { line, text } => {
            assert_eq!(line, 3);
            assert_eq!(text, "00000201");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_value_above_255_is_rejected() {
    let err = parse_program("100000000").unwrap_err();
    assert!(matches!(err, LoadError::InvalidLiteral { line: 1, .. }));
}

#[test]
fn test_embedded_space_is_rejected() {
    let err = parse_program("0000 0001").unwrap_err();
    assert!(matches!(err, LoadError::InvalidLiteral { line: 1, .. }));
}

#[test]
fn test_program_filling_memory_is_accepted() {
    let text = "00000001\n".repeat(256);
    assert_eq!(parse_program(&text).unwrap().len(), 256);
}

#[test]
fn test_program_larger_than_memory_is_rejected() {
    let text = "00000001\n".repeat(257);
    let err = parse_program(&text).unwrap_err();
    assert!(matches!(
        err,
        LoadError::ProgramTooLarge {
            len: 257,
            capacity: 256
        }
    ));
}

#[test]
fn test_load_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for byte in PRINT8 {
        writeln!(file, "{byte:08b} # byte").unwrap();
    }
    assert_eq!(load_file(file.path()).unwrap(), PRINT8.to_vec());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.ls8");
    match load_file(&path).unwrap_err() {
        LoadError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

proptest! {
    #[test]
    fn prop_commented_listing_parses_back(bytes in proptest::collection::vec(any::<u8>(), 0..=256)) {
        let text: String = bytes
            .iter()
            .enumerate()
            .map(|(i, b)| format!("  {b:08b}  # byte {i}\n"))
            .collect();
        prop_assert_eq!(parse_program(&text).unwrap(), bytes);
    }
}
