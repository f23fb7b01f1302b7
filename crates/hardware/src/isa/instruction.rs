//! Instruction Definitions and Execution.
//!
//! This module defines how LS-8 instructions are selected, decoded and executed. It provides:
//! 1. **Opcodes:** The `Opcode` enum naming every registered opcode byte.
//! 2. **Dispatch:** The `DispatchTable`, built once per machine, mapping bytes to opcodes.
//! 3. **Decoding:** The `Instruction` sum type carrying the operands read from memory.
//! 4. **Execution:** `Instruction::execute`, which applies one instruction to a machine.

use std::fmt;

use crate::common::Fault;
use crate::core::Machine;
use crate::core::memory::Memory;
use crate::isa::disasm::disassemble;
use crate::isa::opcodes;

/// Number of distinct opcode byte values.
const OPCODE_SPACE: usize = u8::MAX as usize + 1;

/// Registered LS-8 opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Stop the clock.
    Halt = opcodes::HALT,
    /// Reset the current-register pointer.
    Init = opcodes::INIT,
    /// Select the current register.
    Set = opcodes::SET,
    /// Store a literal in the current register.
    Save = opcodes::SAVE,
    /// Multiply two registers.
    Mul = opcodes::MUL,
    /// Print the current register.
    Prn = opcodes::PRN,
    /// Subtract two registers.
    Sub = opcodes::SUB,
    /// Add two registers.
    Add = opcodes::ADD,
    /// Divide two registers.
    Div = opcodes::DIV,
}

impl Opcode {
    /// Every registered opcode, in encoding order.
    pub const ALL: [Self; 9] = [
        Self::Halt,
        Self::Init,
        Self::Set,
        Self::Save,
        Self::Mul,
        Self::Prn,
        Self::Sub,
        Self::Add,
        Self::Div,
    ];

    /// Maps an opcode byte to its opcode, if one is registered.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            opcodes::HALT => Some(Self::Halt),
            opcodes::INIT => Some(Self::Init),
            opcodes::SET => Some(Self::Set),
            opcodes::SAVE => Some(Self::Save),
            opcodes::MUL => Some(Self::Mul),
            opcodes::PRN => Some(Self::Prn),
            opcodes::SUB => Some(Self::Sub),
            opcodes::ADD => Some(Self::Add),
            opcodes::DIV => Some(Self::Div),
            _ => None,
        }
    }

    /// Returns the encoded opcode byte.
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Returns the encoded width in bytes (opcode plus operands).
    ///
    /// `HALT` occupies one byte but never advances the program counter.
    pub const fn width(self) -> usize {
        match self {
            Self::Halt | Self::Init | Self::Prn => 1,
            Self::Set | Self::Save => 2,
            Self::Mul | Self::Sub | Self::Add | Self::Div => 3,
        }
    }

    /// Returns the assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Halt => "HALT",
            Self::Init => "INIT",
            Self::Set => "SET",
            Self::Save => "SAVE",
            Self::Mul => "MUL",
            Self::Prn => "PRN",
            Self::Sub => "SUB",
            Self::Add => "ADD",
            Self::Div => "DIV",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Lookup from opcode byte to registered opcode.
///
/// Built once when a machine is constructed and never modified afterwards.
#[derive(Clone, Debug)]
pub struct DispatchTable {
    entries: [Option<Opcode>; OPCODE_SPACE],
}

impl DispatchTable {
    /// Builds the table from [`Opcode::ALL`].
    pub fn new() -> Self {
        let mut entries = [None; OPCODE_SPACE];
        for opcode in Opcode::ALL {
            entries[opcode.byte() as usize] = Some(opcode);
        }
        Self { entries }
    }

    /// Returns the opcode registered for `byte`, or `None` if the byte is not an instruction.
    #[inline]
    pub fn lookup(&self, byte: u8) -> Option<Opcode> {
        self.entries[byte as usize]
    }

    /// Number of registered opcodes.
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    /// Returns true if no opcode is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

/// A decoded instruction with its operands.
///
/// `SAVE` takes its operand as a literal value, while the arithmetic
/// instructions take theirs as register indices. Both are plain memory
/// bytes following the opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `INIT`: current register ← R0.
    Init,
    /// `SET reg`: current register ← `reg`.
    Set {
        /// Register index to select.
        reg: u8,
    },
    /// `SAVE value`: registers\[current\] ← `value`.
    Save {
        /// Literal value to store.
        value: u8,
    },
    /// `MUL a, b`: registers\[current\] ← Ra × Rb.
    Mul {
        /// Left operand register.
        a: u8,
        /// Right operand register.
        b: u8,
    },
    /// `SUB a, b`: registers\[current\] ← Ra − Rb.
    Sub {
        /// Minuend register.
        a: u8,
        /// Subtrahend register.
        b: u8,
    },
    /// `ADD a, b`: registers\[current\] ← Ra + Rb.
    Add {
        /// Left operand register.
        a: u8,
        /// Right operand register.
        b: u8,
    },
    /// `DIV a, b`: registers\[current\] ← Ra ÷ Rb.
    Div {
        /// Dividend register.
        a: u8,
        /// Divisor register.
        b: u8,
    },
    /// `PRN`: emit registers\[current\] to the console.
    Prn,
    /// `HALT`: stop the clock.
    Halt,
}

impl Instruction {
    /// Decodes the instruction for `opcode` located at `pc`.
    ///
    /// # Arguments
    ///
    /// * `opcode` - Opcode already fetched from `memory[pc]`.
    /// * `memory` - Memory holding the operand bytes.
    /// * `pc` - Address of the opcode byte.
    ///
    /// # Returns
    ///
    /// The decoded instruction, or `Fault::OutOfBounds` if an operand lies past the end of memory.
    pub fn decode(opcode: Opcode, memory: &Memory, pc: usize) -> Result<Self, Fault> {
        let operand = |n: usize| memory.read(pc + n);
        let inst = match opcode {
            Opcode::Halt => Self::Halt,
            Opcode::Init => Self::Init,
            Opcode::Prn => Self::Prn,
            Opcode::Set => Self::Set { reg: operand(1)? },
            Opcode::Save => Self::Save { value: operand(1)? },
            Opcode::Mul => Self::Mul {
                a: operand(1)?,
                b: operand(2)?,
            },
            Opcode::Sub => Self::Sub {
                a: operand(1)?,
                b: operand(2)?,
            },
            Opcode::Add => Self::Add {
                a: operand(1)?,
                b: operand(2)?,
            },
            Opcode::Div => Self::Div {
                a: operand(1)?,
                b: operand(2)?,
            },
        };
        Ok(inst)
    }

    /// Returns the opcode this instruction was decoded from.
    pub const fn opcode(&self) -> Opcode {
        match self {
            Self::Init => Opcode::Init,
            Self::Set { .. } => Opcode::Set,
            Self::Save { .. } => Opcode::Save,
            Self::Mul { .. } => Opcode::Mul,
            Self::Sub { .. } => Opcode::Sub,
            Self::Add { .. } => Opcode::Add,
            Self::Div { .. } => Opcode::Div,
            Self::Prn => Opcode::Prn,
            Self::Halt => Opcode::Halt,
        }
    }

    /// Returns the encoded width in bytes.
    pub const fn width(&self) -> usize {
        self.opcode().width()
    }

    /// Applies this instruction to `machine`.
    ///
    /// Every instruction except `HALT` advances the program counter by its own
    /// width. `HALT` stops the clock and leaves the program counter in place.
    ///
    /// # Arguments
    ///
    /// * `machine` - The machine whose state the instruction mutates.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success, or the fault raised by the instruction.
    pub fn execute(self, machine: &mut Machine) -> Result<(), Fault> {
        let cur = machine.current_register;
        match self {
            Self::Init => machine.current_register = 0,
            Self::Set { reg } => machine.current_register = reg,
            Self::Save { value } => machine.regs.write(cur, f64::from(value)),
            Self::Mul { a, b } => {
                let product = machine.regs.read(a) * machine.regs.read(b);
                machine.regs.write(cur, product);
            }
            Self::Sub { a, b } => {
                let difference = machine.regs.read(a) - machine.regs.read(b);
                machine.regs.write(cur, difference);
            }
            Self::Add { a, b } => {
                let sum = machine.regs.read(a) + machine.regs.read(b);
                machine.regs.write(cur, sum);
            }
            Self::Div { a, b } => {
                let divisor = machine.regs.read(b);
                if divisor == 0.0 {
                    return Err(Fault::DivideByZero { pc: machine.pc });
                }
                let quotient = machine.regs.read(a) / divisor;
                machine.regs.write(cur, quotient);
            }
            Self::Prn => {
                let value = machine.regs.read(cur);
                machine.console.emit(value).map_err(|e| Fault::Output {
                    pc: machine.pc,
                    reason: e.to_string(),
                })?;
                machine.stats.outputs += 1;
            }
            Self::Halt => {
                machine.halt();
                return Ok(());
            }
        }
        machine.pc += self.width();
        Ok(())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&disassemble(self))
    }
}
