//! Observation Channel.
//!
//! `PRN` hands the current register to a [`Console`]. The console is the
//! only place program output goes; diagnostics are traced separately.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Magnitudes at or above this print in exponent form.
const EXPONENT_ABOVE: f64 = 1e21;
/// Non-zero magnitudes below this print in exponent form.
const EXPONENT_BELOW: f64 = 1e-6;

/// Sink for values printed by `PRN`.
pub trait Console: Send {
    /// Emits one printed value.
    fn emit(&mut self, value: f64) -> io::Result<()>;
}

/// Formats a register value for output.
///
/// Integral values print without a fraction (`72`), other values in their
/// shortest round-trip form (`3.5`). Very large or very small magnitudes use
/// an exponent (`1e+21`, `1e-7`), and non-finite values print as `Infinity`,
/// `-Infinity` or `NaN`.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }
    let magnitude = value.abs();
    if !(EXPONENT_BELOW..EXPONENT_ABOVE).contains(&magnitude) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    value.to_string()
}

/// Console writing one value per line to a writer.
pub struct WriterConsole<W> {
    writer: W,
}

impl<W: Write> WriterConsole<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterConsole<io::Stdout> {
    /// Console on the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Console for WriterConsole<W> {
    fn emit(&mut self, value: f64) -> io::Result<()> {
        writeln!(self.writer, "{}", format_value(value))?;
        self.writer.flush()
    }
}

impl<W> fmt::Debug for WriterConsole<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterConsole").finish_non_exhaustive()
    }
}

/// Console collecting printed values in memory.
///
/// Clones share the same buffer, so one clone can be handed to a machine
/// while another is kept to inspect what was printed.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    values: Arc<Mutex<Vec<f64>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every value printed so far, oldest first.
    pub fn values(&self) -> Vec<f64> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Console for SharedBuffer {
    fn emit(&mut self, value: f64) -> io::Result<()> {
        self.values
            .lock()
            .map_err(|_| io::Error::other("console buffer poisoned"))?
            .push(value);
        Ok(())
    }
}
