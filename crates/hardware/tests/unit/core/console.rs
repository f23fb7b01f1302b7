//! # Console Tests

use ls8_core::core::console::{Console, SharedBuffer, WriterConsole, format_value};
use rstest::rstest;

#[test]
fn test_writer_console_one_value_per_line() {
    let mut console = WriterConsole::new(Vec::new());
    console.emit(8.0).unwrap();
    console.emit(-72.0).unwrap();
    console.emit(3.5).unwrap();
    let text = String::from_utf8(console.into_inner()).unwrap();
    assert_eq!(text, "8\n-72\n3.5\n");
}

#[test]
fn test_shared_buffer_clones_share_values() {
    let buffer = SharedBuffer::new();
    let mut writer = buffer.clone();
    writer.emit(1.0).unwrap();
    writer.emit(2.5).unwrap();
    assert_eq!(buffer.values(), vec![1.0, 2.5]);
}

#[test]
fn test_shared_buffer_starts_empty() {
    assert!(SharedBuffer::new().values().is_empty());
}

#[rstest]
#[case(72.0, "72")]
#[case(-2.0, "-2")]
#[case(3.5, "3.5")]
#[case(1.0 / 3.0, "0.3333333333333333")]
#[case(0.0, "0")]
#[case(-0.0, "0")]
#[case(65_025.0, "65025")]
#[case(1e21, "1e+21")]
#[case(1.5e300, "1.5e+300")]
#[case(123_456_789_012_345_680_000.0, "123456789012345680000")]
#[case(0.000_001, "0.000001")]
#[case(1e-7, "1e-7")]
#[case(f64::INFINITY, "Infinity")]
#[case(f64::NEG_INFINITY, "-Infinity")]
#[case(f64::NAN, "NaN")]
fn test_format_value(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(format_value(value), expected);
}
