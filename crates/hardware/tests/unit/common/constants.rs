use ls8_core::common::constants::*;

#[test]
fn test_address_space_is_one_byte() {
    assert_eq!(MEMORY_SIZE, u8::MAX as usize + 1);
    assert_eq!(REGISTER_COUNT, u8::MAX as usize + 1);
}

#[test]
fn test_program_starts_at_zero() {
    assert_eq!(PROGRAM_START, 0);
}

#[test]
fn test_default_tick_interval() {
    assert_eq!(DEFAULT_TICK_INTERVAL_MS, 500);
}
