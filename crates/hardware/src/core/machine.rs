//! Machine Definition and Execution Loop.
//!
//! This module defines the central `Machine` structure, which owns the entire
//! machine state. It coordinates the following:
//! 1. **State Management:** Memory, registers, program counter and the current-register pointer.
//! 2. **Dispatch:** Fetches one opcode per tick, looks it up in the dispatch table and
//!    executes the decoded instruction.
//! 3. **Lifecycle:** The `Idle → Running → Halted | Faulted` state machine and the clock
//!    that drives it.
//!
//! A tick takes `&mut self`, so ticks on one machine are serialized by construction.

use std::fmt;

use tracing::{debug, info, warn};

use crate::common::Fault;
use crate::common::constants::PROGRAM_START;
use crate::config::Config;
use crate::core::clock::{Clock, ClockHandle};
use crate::core::console::{Console, WriterConsole};
use crate::core::memory::Memory;
use crate::core::registers::RegisterFile;
use crate::isa::{DispatchTable, Instruction};
use crate::stats::SimStats;

/// Lifecycle state of a machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MachineState {
    /// Constructed, program possibly loaded, clock never started.
    Idle,
    /// Clock started; ticks are being dispatched.
    Running,
    /// `HALT` executed. Terminal.
    Halted,
    /// A fault was raised. Terminal.
    Faulted,
}

impl MachineState {
    /// Returns true for `Halted` and `Faulted`, which accept no further ticks.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Halted | Self::Faulted)
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Halted => "halted",
            Self::Faulted => "faulted",
        };
        f.write_str(name)
    }
}

/// The LS-8 virtual machine.
pub struct Machine {
    /// Main memory.
    pub(crate) memory: Memory,
    /// General-purpose registers.
    pub(crate) regs: RegisterFile,
    /// Program counter.
    pub(crate) pc: usize,
    /// Register targeted by `SAVE`, the arithmetic instructions and `PRN`.
    pub(crate) current_register: u8,
    /// Observation channel for `PRN`.
    pub(crate) console: Box<dyn Console>,
    /// Run statistics.
    pub(crate) stats: SimStats,

    dispatch: DispatchTable,
    clock: Clock,
    state: MachineState,
    trace: bool,
    max_ticks: Option<u64>,
    last_fault: Option<Fault>,
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("pc", &self.pc)
            .field("current_register", &self.current_register)
            .field("state", &self.state)
            .field("clock", &self.clock)
            .field("last_fault", &self.last_fault)
            .finish_non_exhaustive()
    }
}

impl Machine {
    /// Creates a machine printing to standard output.
    ///
    /// # Arguments
    ///
    /// * `config` - Clock period, tracing and tick limit.
    pub fn new(config: &Config) -> Self {
        Self::with_console(config, Box::new(WriterConsole::stdout()))
    }

    /// Creates a machine printing to `console`.
    ///
    /// Memory and registers start zeroed, the program counter and current
    /// register at 0, and the dispatch table is built once here.
    pub fn with_console(config: &Config, console: Box<dyn Console>) -> Self {
        Self {
            memory: Memory::new(),
            regs: RegisterFile::new(),
            pc: PROGRAM_START,
            current_register: 0,
            console,
            stats: SimStats::new(),
            dispatch: DispatchTable::new(),
            clock: Clock::new(config.clock.interval()),
            state: MachineState::Idle,
            trace: config.general.trace_instructions,
            max_ticks: config.general.max_ticks,
            last_fault: None,
        }
    }

    /// Writes `value` to memory at `address`.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or `Fault::OutOfBounds` if `address` is not in `0..256`.
    pub fn poke(&mut self, address: usize, value: u8) -> Result<(), Fault> {
        self.memory.write(address, value)
    }

    /// Reads the byte at `address`.
    ///
    /// # Returns
    ///
    /// The byte, or `Fault::OutOfBounds` if `address` is not in `0..256`.
    pub fn peek(&self, address: usize) -> Result<u8, Fault> {
        self.memory.read(address)
    }

    /// Copies a program image into memory starting at address 0.
    pub fn load_program(&mut self, bytes: &[u8]) -> Result<(), Fault> {
        self.memory.load(PROGRAM_START, bytes)?;
        debug!(len = bytes.len(), "program loaded");
        Ok(())
    }

    /// Starts the clock.
    ///
    /// `Idle` moves to `Running`. A running machine whose clock was stopped
    /// from outside is restarted. In `Halted` or `Faulted` the call is ignored;
    /// use [`Machine::reset`] first.
    pub fn start(&mut self) {
        match self.state {
            MachineState::Idle | MachineState::Running => {
                self.state = MachineState::Running;
                self.clock.start();
                info!(interval = ?self.clock.interval(), pc = self.pc, "clock started");
            }
            MachineState::Halted | MachineState::Faulted => {
                warn!(state = %self.state, "start ignored; reset the machine first");
            }
        }
    }

    /// Stops the clock. Idempotent; the machine state is left unchanged.
    pub fn stop(&self) {
        self.clock.stop();
    }

    /// Executes one fetch-dispatch-execute cycle.
    ///
    /// In `Halted` or `Faulted` nothing is dispatched and `Ok(())` is
    /// returned. A tick may also be forced on an `Idle` machine for
    /// single-stepping without the clock; it moves the machine to `Running`
    /// before dispatching, leaving the clock stopped.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the instruction executed (or the tick was refused), or the
    /// fault that moved the machine to `Faulted`.
    pub fn tick(&mut self) -> Result<(), Fault> {
        if self.state.is_terminal() {
            debug!(state = %self.state, "tick refused");
            return Ok(());
        }
        if self.state == MachineState::Idle {
            self.state = MachineState::Running;
        }

        self.stats.ticks += 1;
        let pc = self.pc;

        let byte = match self.memory.read(pc) {
            Ok(byte) => byte,
            Err(fault) => return Err(self.raise(fault)),
        };
        debug!(pc, opcode = byte, "fetch");

        let Some(opcode) = self.dispatch.lookup(byte) else {
            return Err(self.raise(Fault::InvalidInstruction { opcode: byte, pc }));
        };

        let inst = match Instruction::decode(opcode, &self.memory, pc) {
            Ok(inst) => inst,
            Err(fault) => return Err(self.raise(fault)),
        };
        if self.trace {
            info!(pc, "{inst}");
        } else {
            debug!(pc, "{inst}");
        }

        if let Err(fault) = inst.execute(self) {
            return Err(self.raise(fault));
        }
        self.stats.record(opcode);

        let ticks = self.stats.ticks;
        if self.max_ticks.is_some_and(|limit| ticks >= limit) && !self.state.is_terminal() {
            warn!(ticks, "tick limit reached; stopping clock");
            self.clock.stop();
        }
        Ok(())
    }

    /// Starts the clock and dispatches one tick per period until it stops.
    ///
    /// The clock stops on `HALT`, on a fault, on the configured tick limit,
    /// or through a [`ClockHandle`].
    ///
    /// # Returns
    ///
    /// The state the machine is left in, or the fault that ended the run.
    pub fn run(&mut self) -> Result<MachineState, Fault> {
        self.start();
        while self.clock.wait_for_tick() {
            self.tick()?;
        }
        Ok(self.state)
    }

    /// Starts the machine and dispatches up to `max_ticks` ticks back to back,
    /// without waiting on the clock period.
    ///
    /// # Returns
    ///
    /// The state the machine is left in, or the fault that ended the run.
    pub fn run_until(&mut self, max_ticks: u64) -> Result<MachineState, Fault> {
        self.start();
        for _ in 0..max_ticks {
            if !self.clock.is_running() {
                break;
            }
            self.tick()?;
        }
        Ok(self.state)
    }

    /// Returns the machine to `Idle`.
    ///
    /// Registers, program counter, current register and statistics are
    /// cleared and the clock is stopped. Memory is kept, so a loaded program
    /// can be run again.
    pub fn reset(&mut self) {
        self.clock.stop();
        self.regs.reset();
        self.pc = PROGRAM_START;
        self.current_register = 0;
        self.stats = SimStats::new();
        self.state = MachineState::Idle;
        self.last_fault = None;
    }

    /// Halts the machine: stops the clock and enters `Halted`.
    pub(crate) fn halt(&mut self) {
        self.clock.stop();
        self.state = MachineState::Halted;
        info!(pc = self.pc, ticks = self.stats.ticks, "halted");
    }

    /// Records `fault`, stops the clock and enters `Faulted`.
    fn raise(&mut self, fault: Fault) -> Fault {
        debug!(pc = self.pc, %fault, "machine fault");
        self.clock.stop();
        self.state = MachineState::Faulted;
        self.last_fault = Some(fault.clone());
        fault
    }

    /// Current program counter.
    pub const fn pc(&self) -> usize {
        self.pc
    }

    /// Register index selected by the most recent `SET` (or `INIT`).
    pub const fn current_register(&self) -> u8 {
        self.current_register
    }

    /// Reads register `idx`.
    ///
    /// # Returns
    ///
    /// The value, or `Fault::RegisterOutOfBounds` if `idx` is not in `0..256`.
    pub fn register(&self, idx: usize) -> Result<f64, Fault> {
        self.regs.get(idx)
    }

    /// The register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Main memory.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Lifecycle state.
    pub const fn state(&self) -> MachineState {
        self.state
    }

    /// Run statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// The fault that moved the machine to `Faulted`, if any.
    pub const fn last_fault(&self) -> Option<&Fault> {
        self.last_fault.as_ref()
    }

    /// Returns true while the clock is running.
    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Returns a handle that can stop this machine's clock from another thread.
    pub fn clock_handle(&self) -> ClockHandle {
        self.clock.handle()
    }

    /// Dumps the program counter, current register and non-zero registers to stderr.
    pub fn dump_state(&self) {
        eprintln!(
            "PC = {} ({:#04x})  CUR = R{}  STATE = {}",
            self.pc, self.pc, self.current_register, self.state
        );
        self.regs.dump();
    }
}
