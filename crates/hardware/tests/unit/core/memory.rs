//! # Memory Tests
//!
//! Bounds enforcement, bulk loading and the peek/poke round trip.

use crate::common::harness::TestContext;
use ls8_core::common::{Fault, MEMORY_SIZE};
use ls8_core::core::memory::Memory;
use proptest::prelude::*;

#[test]
fn test_memory_starts_zeroed() {
    let mem = Memory::new();
    assert_eq!(mem.as_slice().len(), MEMORY_SIZE);
    assert!(mem.as_slice().iter().all(|&b| b == 0));
}

#[test]
fn test_read_last_address() {
    let mut mem = Memory::new();
    mem.write(255, 0xAB).unwrap();
    assert_eq!(mem.read(255), Ok(0xAB));
}

#[test]
fn test_read_past_end_faults() {
    let mem = Memory::new();
    assert_eq!(mem.read(256), Err(Fault::OutOfBounds { address: 256 }));
}

#[test]
fn test_write_past_end_faults_and_changes_nothing() {
    let mut mem = Memory::new();
    assert_eq!(mem.write(300, 1), Err(Fault::OutOfBounds { address: 300 }));
    assert_eq!(mem, Memory::new());
}

#[test]
fn test_load_copies_image() {
    let mut mem = Memory::new();
    mem.load(10, &[1, 2, 3]).unwrap();
    assert_eq!(&mem.as_slice()[9..14], &[0, 1, 2, 3, 0]);
}

#[test]
fn test_load_full_memory() {
    let mut mem = Memory::new();
    let image = [0x5A; MEMORY_SIZE];
    mem.load(0, &image).unwrap();
    assert_eq!(mem.as_slice(), &image[..]);
}

#[test]
fn test_load_overflow_is_all_or_nothing() {
    let mut mem = Memory::new();
    let err = mem.load(250, &[1; 10]).unwrap_err();
    assert_eq!(err, Fault::OutOfBounds { address: 256 });
    assert_eq!(mem, Memory::new());
}

#[test]
fn test_load_at_huge_offset_faults_without_overflow() {
    let mut mem = Memory::new();
    let err = mem.load(usize::MAX, &[1, 2]).unwrap_err();
    assert_eq!(err, Fault::OutOfBounds { address: usize::MAX });
    assert_eq!(mem.load(usize::MAX - 1, &[]), Err(Fault::OutOfBounds { address: usize::MAX - 1 }));
    assert_eq!(mem, Memory::new());
}

#[test]
fn test_machine_poke_peek_out_of_bounds() {
    let mut ctx = TestContext::new();
    assert_eq!(
        ctx.machine.poke(256, 1),
        Err(Fault::OutOfBounds { address: 256 })
    );
    assert_eq!(
        ctx.machine.peek(usize::MAX),
        Err(Fault::OutOfBounds { address: usize::MAX })
    );
}

proptest! {
    #[test]
    fn prop_poke_then_peek_returns_value(addr in 0usize..MEMORY_SIZE, value in any::<u8>()) {
        let mut ctx = TestContext::new();
        ctx.machine.poke(addr, value).unwrap();
        prop_assert_eq!(ctx.machine.peek(addr), Ok(value));
    }

    #[test]
    fn prop_poke_leaves_other_cells_alone(addr in 0usize..MEMORY_SIZE, value in any::<u8>()) {
        let mut ctx = TestContext::new();
        ctx.machine.poke(addr, value).unwrap();
        for (other, &byte) in ctx.machine.memory().as_slice().iter().enumerate() {
            if other != addr {
                prop_assert_eq!(byte, 0);
            }
        }
    }

    #[test]
    fn prop_out_of_range_address_faults(addr in MEMORY_SIZE..100_000usize) {
        let ctx = TestContext::new();
        prop_assert_eq!(ctx.machine.peek(addr), Err(Fault::OutOfBounds { address: addr }));
    }
}
