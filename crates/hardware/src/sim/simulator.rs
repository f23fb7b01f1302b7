//! Simulator: configuration, program loading and the clock-driven run in one place.
//!
//! This is the entry point used by the command-line front end. Library
//! users who want to single-step can drive a [`Machine`] directly.

use std::path::Path;

use tracing::{Level, debug, enabled, info};

use crate::common::{Fault, LoadError, MEMORY_SIZE};
use crate::config::Config;
use crate::core::console::Console;
use crate::core::{Machine, MachineState};
use crate::isa::disasm::disassemble_program;
use crate::sim::loader;

/// Outcome of a run that did not fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// State the machine was left in (`Halted`, or `Running` if the clock was stopped early).
    pub state: MachineState,
    /// Ticks dispatched.
    pub ticks: u64,
    /// Values printed by `PRN`.
    pub outputs: u64,
}

/// Top-level simulator: one machine plus the configuration it was built from.
#[derive(Debug)]
pub struct Simulator {
    /// The machine being run.
    pub machine: Machine,
    config: Config,
}

impl Simulator {
    /// Creates a simulator whose machine prints to standard output.
    pub fn new(config: &Config) -> Self {
        Self {
            machine: Machine::new(config),
            config: config.clone(),
        }
    }

    /// Creates a simulator whose machine prints to `console`.
    pub fn with_console(config: &Config, console: Box<dyn Console>) -> Self {
        Self {
            machine: Machine::with_console(config, console),
            config: config.clone(),
        }
    }

    /// Loads program text into memory starting at address 0.
    ///
    /// # Returns
    ///
    /// The number of bytes loaded.
    pub fn load_text(&mut self, text: &str) -> Result<usize, LoadError> {
        let bytes = loader::parse_program(text)?;
        self.load_bytes(&bytes)
    }

    /// Loads a program file into memory starting at address 0.
    ///
    /// # Returns
    ///
    /// The number of bytes loaded.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let bytes = loader::load_file(path)?;
        self.load_bytes(&bytes)
    }

    fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize, LoadError> {
        self.machine
            .load_program(bytes)
            .map_err(|_| LoadError::ProgramTooLarge {
                len: bytes.len(),
                capacity: MEMORY_SIZE,
            })?;
        if enabled!(Level::DEBUG) {
            for (addr, text) in disassemble_program(bytes) {
                debug!(addr, "{text}");
            }
        }
        Ok(bytes.len())
    }

    /// Runs the machine on its clock until it halts, faults or is stopped.
    ///
    /// Statistics are printed to stderr afterwards when
    /// `general.print_stats` is set, whether or not the run faulted.
    ///
    /// # Returns
    ///
    /// A summary of the run, or the fault that ended it.
    pub fn run(&mut self) -> Result<RunSummary, Fault> {
        let result = self.machine.run();
        if self.config.general.print_stats {
            self.machine.stats().print();
        }
        let state = result?;
        let stats = self.machine.stats();
        info!(%state, ticks = stats.ticks, "run finished");
        Ok(RunSummary {
            state,
            ticks: stats.ticks,
            outputs: stats.outputs,
        })
    }
}
