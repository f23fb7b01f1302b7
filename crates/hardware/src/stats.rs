//! Run statistics collection and reporting.
//!
//! This module tracks what a machine did during a run. It provides:
//! 1. **Ticks:** Every dispatched fetch-decode-execute cycle, including one that faulted.
//! 2. **Retirement:** Instructions that completed, in total and per opcode.
//! 3. **Output:** Number of values emitted by `PRN`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::isa::Opcode;

/// Statistics gathered over one run.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Ticks dispatched (a tick that faults is still counted).
    pub ticks: u64,
    /// Instructions that executed to completion.
    pub instructions_retired: u64,
    /// Values written to the console by `PRN`.
    pub outputs: u64,
    retired_by_opcode: HashMap<Opcode, u64>,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            ticks: 0,
            instructions_retired: 0,
            outputs: 0,
            retired_by_opcode: HashMap::new(),
        }
    }
}

impl SimStats {
    /// Creates empty statistics; wall-clock time is measured from now.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a retired instruction.
    pub fn record(&mut self, opcode: Opcode) {
        self.instructions_retired += 1;
        *self.retired_by_opcode.entry(opcode).or_insert(0) += 1;
    }

    /// Number of retired instructions with the given opcode.
    pub fn retired(&self, opcode: Opcode) -> u64 {
        self.retired_by_opcode.get(&opcode).copied().unwrap_or(0)
    }

    /// Wall-clock time since these statistics were created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Prints a summary to stderr.
    ///
    /// Only opcodes that retired at least once are listed in the mix.
    pub fn print(&self) {
        eprintln!("\n----------------------------------------");
        eprintln!("LS-8 RUN STATISTICS");
        eprintln!("----------------------------------------");
        eprintln!("host_seconds       {:.4} s", self.elapsed().as_secs_f64());
        eprintln!("ticks              {}", self.ticks);
        eprintln!("insts_retired      {}", self.instructions_retired);
        eprintln!("outputs            {}", self.outputs);
        eprintln!("INSTRUCTION MIX");
        for opcode in Opcode::ALL {
            let count = self.retired(opcode);
            if count > 0 {
                eprintln!("  {:<16} {count}", opcode.mnemonic());
            }
        }
        eprintln!("----------------------------------------");
    }
}
