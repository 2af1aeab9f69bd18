//! Instruction encoding

use crate::error::ErrorKind;
use crate::opcodes::{self, AddressingMode, Mnemonic};
use crate::parser::line::{Instruction, Syntax};
use crate::parser::number::{Labels, Width, resolve};
use crate::symbol::LabelTable;

/// Encode one instruction located at `pc`.
///
/// During the first pass `labels` is [`Labels::Partial`]; names not bound yet
/// resolve to `pc`, which is enough to size the instruction.
pub fn encode(
    instruction: &Instruction<'_>,
    labels: Labels<'_>,
    pc: u16,
) -> Result<Vec<u8>, ErrorKind> {
    let mnemonic = Mnemonic::parse(instruction.mnemonic)?;
    let mode = instruction.syntax.mode();
    let opcode = opcodes::opcode(mnemonic, mode)?;

    match instruction.syntax {
        Syntax::Implied | Syntax::Accumulator => Ok(vec![opcode]),
        Syntax::Absolute(text) if mnemonic.is_branch() => {
            let target = resolve(text, Width::Word, labels, pc)?;
            encode_branch(opcode, target, pc)
        }
        Syntax::Immediate(text) => {
            // immediate operands never refer to labels
            let value = resolve(text, Width::Byte, Labels::Complete(&LabelTable::new()), pc)?;
            Ok(vec![opcode, value as u8])
        }
        Syntax::Absolute(text) | Syntax::AbsoluteIndexed(text, _) => {
            let value = resolve(text, Width::Word, labels, pc)?;
            if let Some(zp) = zero_page_opcode(mnemonic, mode, value) {
                return Ok(vec![zp, value as u8]);
            }
            Ok(word_operand(opcode, value))
        }
        Syntax::Indirect(text) | Syntax::IndirectX(text) | Syntax::IndirectY(text) => {
            let value = resolve(text, Width::Word, labels, pc)?;
            Ok(word_operand(opcode, value))
        }
    }
}

fn zero_page_opcode(mnemonic: Mnemonic, mode: AddressingMode, value: u16) -> Option<u8> {
    if value >= 0x100 {
        return None;
    }
    mode.zero_page_form()
        .and_then(|zp_mode| opcodes::lookup(mnemonic, zp_mode))
}

fn word_operand(opcode: u8, value: u16) -> Vec<u8> {
    let [lo, hi] = value.to_le_bytes();
    vec![opcode, lo, hi]
}

/// Relative branch: displacement counts from the byte after the instruction.
fn encode_branch(opcode: u8, target: u16, pc: u16) -> Result<Vec<u8>, ErrorKind> {
    let displacement = i32::from(target) - (i32::from(pc) + 2);
    if !(-128..=127).contains(&displacement) {
        return Err(ErrorKind::BranchOutOfRange {
            target,
            displacement,
        });
    }
    Ok(vec![opcode, displacement as i8 as u8])
}
