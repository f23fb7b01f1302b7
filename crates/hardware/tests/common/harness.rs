use ls8_core::common::Fault;
use ls8_core::config::Config;
use ls8_core::core::console::{Console, SharedBuffer};
use ls8_core::core::{Machine, MachineState};
use ls8_core::sim::loader::parse_program;

/// Observable machine state, for before/after comparisons.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub pc: usize,
    pub current_register: u8,
    pub registers: Vec<f64>,
    pub memory: Vec<u8>,
    pub state: MachineState,
    pub ticks: u64,
}

pub struct TestContext {
    pub machine: Machine,
    pub output: SharedBuffer,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Machine with a zero clock period so `run` does not sleep.
    pub fn new() -> Self {
        let mut config = Config::default();
        config.clock.interval_ms = 0;
        Self::with_config(&config)
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let output = SharedBuffer::new();
        let machine = Machine::with_console(config, Box::new(output.clone()));
        Self { machine, output }
    }

    /// Machine printing to `console` instead of the capture buffer.
    pub fn with_console(console: Box<dyn Console>) -> Self {
        init_tracing();
        let mut config = Config::default();
        config.clock.interval_ms = 0;
        Self {
            machine: Machine::with_console(&config, console),
            output: SharedBuffer::new(),
        }
    }

    /// Load a byte image at address 0.
    pub fn load_program(mut self, bytes: &[u8]) -> Self {
        self.machine
            .load_program(bytes)
            .expect("program fits in memory");
        self
    }

    /// Parse and load program text at address 0.
    pub fn load_text(self, text: &str) -> Self {
        let bytes = parse_program(text).expect("program parses");
        self.load_program(&bytes)
    }

    /// Dispatch up to `ticks` ticks without waiting on the clock.
    pub fn run(&mut self, ticks: u64) -> Result<MachineState, Fault> {
        self.machine.run_until(ticks)
    }

    /// Force `n` ticks, ignoring their results.
    pub fn step(&mut self, n: usize) {
        for _ in 0..n {
            let _ = self.machine.tick();
        }
    }

    /// Values printed so far.
    pub fn output(&self) -> Vec<f64> {
        self.output.values()
    }

    pub fn reg(&self, idx: usize) -> f64 {
        self.machine.register(idx).expect("register index in range")
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pc: self.machine.pc(),
            current_register: self.machine.current_register(),
            registers: self.machine.registers().as_slice().to_vec(),
            memory: self.machine.memory().as_slice().to_vec(),
            state: self.machine.state(),
            ticks: self.machine.stats().ticks,
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
