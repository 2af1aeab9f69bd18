//! 6502 opcode table
//!
//! Every valid (mnemonic, addressing mode) pair maps to exactly one opcode
//! byte. Conditional branches are stored under [`AddressingMode::Absolute`]:
//! their operand is written as an absolute target and the encoder turns it
//! into a relative displacement.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::ErrorKind;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, IntoStaticStr,
)]
pub enum Mnemonic {
    ADC, AND, ASL, BIT,
    BPL, BMI, BVC, BVS, BCC, BCS, BNE, BEQ,
    BRK, CMP, CPX, CPY, DEC, EOR,
    CLC, SEC, CLI, SEI, CLV, CLD, SED,
    INC, JMP, JSR, LDA, LDX, LDY, LSR, NOP, ORA,
    TAX, TXA, DEX, INX, TAY, TYA, DEY, INY,
    ROL, ROR, RTI, RTS, SBC, STA,
    TXS, TSX, PHA, PLA, PHP, PLP,
    STX, STY,
}

impl Mnemonic {
    /// Case-insensitive lookup of a mnemonic.
    pub fn parse(s: &str) -> Result<Self, ErrorKind> {
        s.to_ascii_uppercase()
            .parse::<Self>()
            .map_err(|_| ErrorKind::UnknownMnemonic(s.to_string()))
    }

    pub fn is_branch(self) -> bool {
        use Mnemonic::*;
        matches!(self, BPL | BMI | BVC | BVS | BCC | BCS | BNE | BEQ)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum AddressingMode {
    #[strum(serialize = "implied")]
    Implied,
    #[strum(serialize = "immediate")]
    Immediate,
    #[strum(serialize = "zeropage")]
    ZeroPage,
    #[strum(serialize = "zeropage,X")]
    ZeroPageX,
    #[strum(serialize = "absolute")]
    Absolute,
    #[strum(serialize = "absolute,X")]
    AbsoluteX,
    #[strum(serialize = "absolute,Y")]
    AbsoluteY,
    #[strum(serialize = "indirect,X")]
    IndirectX,
    #[strum(serialize = "indirect,Y")]
    IndirectY,
    #[strum(serialize = "accumulator")]
    Accumulator,
    #[strum(serialize = "indirect")]
    Indirect,
    #[strum(serialize = "zeropage,Y")]
    ZeroPageY,
}

impl AddressingMode {
    /// The one-byte-operand form an absolute mode narrows to.
    pub fn zero_page_form(self) -> Option<AddressingMode> {
        match self {
            AddressingMode::Absolute => Some(AddressingMode::ZeroPage),
            AddressingMode::AbsoluteX => Some(AddressingMode::ZeroPageX),
            AddressingMode::AbsoluteY => Some(AddressingMode::ZeroPageY),
            _ => None,
        }
    }
}

type Row = (Mnemonic, &'static [(AddressingMode, u8)]);

static ROWS: &[Row] = {
    use AddressingMode::*;
    use Mnemonic::*;
    &[
        (ADC, &[(Immediate, 0x69), (ZeroPage, 0x65), (ZeroPageX, 0x75), (Absolute, 0x6D),
                (AbsoluteX, 0x7D), (AbsoluteY, 0x79), (IndirectX, 0x61), (IndirectY, 0x71)]),
        (AND, &[(Immediate, 0x29), (ZeroPage, 0x25), (ZeroPageX, 0x35), (Absolute, 0x2D),
                (AbsoluteX, 0x3D), (AbsoluteY, 0x39), (IndirectX, 0x21), (IndirectY, 0x31)]),
        (ASL, &[(ZeroPage, 0x06), (ZeroPageX, 0x16), (Absolute, 0x0E), (AbsoluteX, 0x1E),
                (Accumulator, 0x0A)]),
        (BIT, &[(ZeroPage, 0x24), (Absolute, 0x2C)]),
        (BPL, &[(Absolute, 0x10)]),
        (BMI, &[(Absolute, 0x30)]),
        (BVC, &[(Absolute, 0x50)]),
        (BVS, &[(Absolute, 0x70)]),
        (BCC, &[(Absolute, 0x90)]),
        (BCS, &[(Absolute, 0xB0)]),
        (BNE, &[(Absolute, 0xD0)]),
        (BEQ, &[(Absolute, 0xF0)]),
        (BRK, &[(Implied, 0x00)]),
        (CMP, &[(Immediate, 0xC9), (ZeroPage, 0xC5), (ZeroPageX, 0xD5), (Absolute, 0xCD),
                (AbsoluteX, 0xDD), (AbsoluteY, 0xD9), (IndirectX, 0xC1), (IndirectY, 0xD1)]),
        (CPX, &[(Immediate, 0xE0), (ZeroPage, 0xE4), (Absolute, 0xEC)]),
        (CPY, &[(Immediate, 0xC0), (ZeroPage, 0xC4), (Absolute, 0xCC)]),
        (DEC, &[(ZeroPage, 0xC6), (ZeroPageX, 0xD6), (Absolute, 0xCE), (AbsoluteX, 0xDE)]),
        (EOR, &[(Immediate, 0x49), (ZeroPage, 0x45), (ZeroPageX, 0x55), (Absolute, 0x4D),
                (AbsoluteX, 0x5D), (AbsoluteY, 0x59), (IndirectX, 0x41), (IndirectY, 0x51)]),
        (CLC, &[(Implied, 0x18)]),
        (SEC, &[(Implied, 0x38)]),
        (CLI, &[(Implied, 0x58)]),
        (SEI, &[(Implied, 0x78)]),
        (CLV, &[(Implied, 0xB8)]),
        (CLD, &[(Implied, 0xD8)]),
        (SED, &[(Implied, 0xF8)]),
        (INC, &[(ZeroPage, 0xE6), (ZeroPageX, 0xF6), (Absolute, 0xEE), (AbsoluteX, 0xFE)]),
        (JMP, &[(Absolute, 0x4C), (Indirect, 0x6C)]),
        (JSR, &[(Absolute, 0x20)]),
        (LDA, &[(Immediate, 0xA9), (ZeroPage, 0xA5), (ZeroPageX, 0xB5), (Absolute, 0xAD),
                (AbsoluteX, 0xBD), (AbsoluteY, 0xB9), (IndirectX, 0xA1), (IndirectY, 0xB1)]),
        (LDX, &[(Immediate, 0xA2), (ZeroPage, 0xA6), (Absolute, 0xAE), (AbsoluteY, 0xBE),
                (ZeroPageY, 0xB6)]),
        (LDY, &[(Immediate, 0xA0), (ZeroPage, 0xA4), (ZeroPageX, 0xB4), (Absolute, 0xAC),
                (AbsoluteX, 0xBC)]),
        (LSR, &[(ZeroPage, 0x46), (ZeroPageX, 0x56), (Absolute, 0x4E), (AbsoluteX, 0x5E),
                (Accumulator, 0x4A)]),
        (NOP, &[(Implied, 0xEA)]),
        (ORA, &[(Immediate, 0x09), (ZeroPage, 0x05), (ZeroPageX, 0x15), (Absolute, 0x0D),
                (AbsoluteX, 0x1D), (AbsoluteY, 0x19), (IndirectX, 0x01), (IndirectY, 0x11)]),
        (TAX, &[(Implied, 0xAA)]),
        (TXA, &[(Implied, 0x8A)]),
        (DEX, &[(Implied, 0xCA)]),
        (INX, &[(Implied, 0xE8)]),
        (TAY, &[(Implied, 0xA8)]),
        (TYA, &[(Implied, 0x98)]),
        (DEY, &[(Implied, 0x88)]),
        (INY, &[(Implied, 0xC8)]),
        (ROL, &[(ZeroPage, 0x26), (ZeroPageX, 0x36), (Absolute, 0x2E), (AbsoluteX, 0x3E),
                (Accumulator, 0x2A)]),
        (ROR, &[(ZeroPage, 0x66), (ZeroPageX, 0x76), (Absolute, 0x6E), (AbsoluteX, 0x7E),
                (Accumulator, 0x6A)]),
        (RTI, &[(Implied, 0x40)]),
        (RTS, &[(Implied, 0x60)]),
        (SBC, &[(Immediate, 0xE9), (ZeroPage, 0xE5), (ZeroPageX, 0xF5), (Absolute, 0xED),
                (AbsoluteX, 0xFD), (AbsoluteY, 0xF9), (IndirectX, 0xE1), (IndirectY, 0xF1)]),
        (STA, &[(ZeroPage, 0x85), (ZeroPageX, 0x95), (Absolute, 0x8D), (AbsoluteX, 0x9D),
                (AbsoluteY, 0x99), (IndirectX, 0x81), (IndirectY, 0x91)]),
        (TXS, &[(Implied, 0x9A)]),
        (TSX, &[(Implied, 0xBA)]),
        (PHA, &[(Implied, 0x48)]),
        (PLA, &[(Implied, 0x68)]),
        (PHP, &[(Implied, 0x08)]),
        (PLP, &[(Implied, 0x28)]),
        (STX, &[(ZeroPage, 0x86), (Absolute, 0x8E), (ZeroPageY, 0x96)]),
        (STY, &[(ZeroPage, 0x84), (ZeroPageX, 0x94), (Absolute, 0x8C)]),
    ]
};

static OPCODES: Lazy<HashMap<(Mnemonic, AddressingMode), u8>> = Lazy::new(|| {
    ROWS.iter()
        .flat_map(|(mnemonic, modes)| {
            modes
                .iter()
                .map(move |(mode, opcode)| ((*mnemonic, *mode), *opcode))
        })
        .collect()
});

/// Opcode for `mnemonic` in `mode`, or `None` if the pair is not a valid instruction.
pub fn lookup(mnemonic: Mnemonic, mode: AddressingMode) -> Option<u8> {
    OPCODES.get(&(mnemonic, mode)).copied()
}

/// Like [`lookup`] but reports the missing pair as an error.
pub fn opcode(mnemonic: Mnemonic, mode: AddressingMode) -> Result<u8, ErrorKind> {
    lookup(mnemonic, mode).ok_or(ErrorKind::UnsupportedAddressingMode { mnemonic, mode })
}
