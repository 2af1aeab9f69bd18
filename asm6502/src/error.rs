//! Error types for the assembler

use thiserror::Error;

use crate::opcodes::{AddressingMode, Mnemonic};

/// What went wrong while assembling a single line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("unknown op `{0}`")]
    UnknownMnemonic(String),

    #[error("mode {mode} is not valid for op {mnemonic}")]
    UnsupportedAddressingMode {
        mnemonic: Mnemonic,
        mode: AddressingMode,
    },

    #[error("unable to parse `{0}` as a number or label")]
    UnparseableOperand(String),

    #[error("number {value} must be smaller than {bound}")]
    ValueOutOfRange { value: u64, bound: u64 },

    #[error("label `{0}` was defined more than once")]
    DuplicateLabel(String),

    #[error("could not parse line `{0}`")]
    UnparseableLine(String),

    #[error("branch to ${target:04X} is {displacement} bytes away; can only branch within -128..=127")]
    BranchOutOfRange { target: u16, displacement: i32 },

    #[error("label `{label}` moved from ${first_pass:04X} to ${second_pass:04X} between passes")]
    LabelAddressMismatch {
        label: String,
        first_pass: u16,
        second_pass: u16,
    },
}

#[derive(Error, Debug)]
pub enum AsmError {
    #[error("line {line}: {kind} (in `{text}`)")]
    Asm {
        line: usize,
        text: String,
        #[source]
        kind: ErrorKind,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AsmError {
    pub(crate) fn at(line: usize, text: &str, kind: ErrorKind) -> Self {
        AsmError::Asm {
            line,
            text: text.to_string(),
            kind,
        }
    }

    /// The assembly failure behind this error, if it is one.
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            AsmError::Asm { kind, .. } => Some(kind),
            AsmError::Io(_) => None,
        }
    }

    /// 1-based source line the error was raised on.
    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::Asm { line, .. } => Some(*line),
            AsmError::Io(_) => None,
        }
    }
}
