//! Instruction Disassembler.
//!
//! Converts decoded instructions and raw program bytes into assembly text
//! for instruction tracing, state dumps and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use ls8_core::isa::disasm::disassemble;
//! use ls8_core::isa::instruction::Instruction;
//!
//! assert_eq!(disassemble(&Instruction::Mul { a: 0, b: 1 }), "MUL R0, R1");
//! ```

use crate::isa::instruction::{Instruction, Opcode};

/// Disassembles a decoded instruction.
///
/// Register operands print as `Rn`, literals as decimal.
pub fn disassemble(inst: &Instruction) -> String {
    let mnemonic = inst.opcode().mnemonic();
    match *inst {
        Instruction::Init | Instruction::Prn | Instruction::Halt => mnemonic.to_string(),
        Instruction::Set { reg } => format!("{mnemonic} R{reg}"),
        Instruction::Save { value } => format!("{mnemonic} {value}"),
        Instruction::Mul { a, b }
        | Instruction::Sub { a, b }
        | Instruction::Add { a, b }
        | Instruction::Div { a, b } => format!("{mnemonic} R{a}, R{b}"),
    }
}

/// Disassembles a byte image starting at address 0.
///
/// Each entry pairs an address with its text. Bytes that are not a
/// registered opcode, and instructions truncated by the end of the image,
/// are listed as `.byte` data and decoding resumes at the next address.
pub fn disassemble_program(bytes: &[u8]) -> Vec<(usize, String)> {
    let mut listing = Vec::new();
    let mut pc = 0;
    while let Some(&byte) = bytes.get(pc) {
        let decoded = Opcode::from_byte(byte).and_then(|opcode| {
            let operands = bytes.get(pc + 1..pc + opcode.width())?;
            let arg = |n: usize| operands.get(n).copied().unwrap_or_default();
            let inst = match opcode {
                Opcode::Halt => Instruction::Halt,
                Opcode::Init => Instruction::Init,
                Opcode::Prn => Instruction::Prn,
                Opcode::Set => Instruction::Set { reg: arg(0) },
                Opcode::Save => Instruction::Save { value: arg(0) },
                Opcode::Mul => Instruction::Mul { a: arg(0), b: arg(1) },
                Opcode::Sub => Instruction::Sub { a: arg(0), b: arg(1) },
                Opcode::Add => Instruction::Add { a: arg(0), b: arg(1) },
                Opcode::Div => Instruction::Div { a: arg(0), b: arg(1) },
            };
            Some(inst)
        });
        match decoded {
            Some(inst) => {
                listing.push((pc, disassemble(&inst)));
                pc += inst.width();
            }
            None => {
                listing.push((pc, format!(".byte {byte:#010b}")));
                pc += 1;
            }
        }
    }
    listing
}
