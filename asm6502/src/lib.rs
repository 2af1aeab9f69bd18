//! Two-pass assembler for a core subset of 6502 mnemonics.
//!
//! Source lines are classified into an addressing-mode syntax, encoded
//! against the 6502 opcode table and laid out as a flat byte image starting
//! at the origin (`$C000` unless configured or set with `* =`).
//!
//! ## Syntax
//! - `* = $C100` sets the program counter (hex with `$`, or decimal).
//! - `label:` binds a label to the current address, alone or before an instruction.
//! - Operands: `#10`, `#$0A`, `$1234`, `label`, `$10, X`, `($20)`, `($20, X)`, `($20), Y`, `a`.
//! - `;` starts a comment.
//!
//! Absolute operands below `$100` are narrowed to zero page when the
//! instruction has a zero-page form. Branch operands are absolute targets,
//! encoded as a signed displacement.
//!
//! ## Optional Features
//! - `listing`: print and save human-readable assembly listings.
//!
//! ## Basic Usage
//! ```rust
//! fn main() -> Result<(), asm6502_lite::AsmError> {
//!     let src = r#"
//!         * = $C000
//!         LDX #10
//!         loop: TXA
//!         STA $0100, X
//!         DEX
//!         BNE loop
//!         RTS
//!     "#;
//!
//!     let bytes = asm6502_lite::assemble(src, false)?;
//!     assert_eq!(bytes, vec![0xA2, 0x0A, 0x8A, 0x9D, 0x00, 0x01, 0xCA, 0xD0, 0xF9, 0x60]);
//!     Ok(())
//! }
//! ```
//!
//! ## License
//! This project is released under [The Unlicense](https://unlicense.org/).
//! You are free to use it for any purpose, without restriction.

mod assembler;
mod encoder;
mod error;
#[cfg(feature = "listing")]
mod listing;
pub mod opcodes;
pub mod parser;
mod symbol;

// Public exports
pub use assembler::{
    Assembler6502, AssemblerConfig, Assembly, DEFAULT_ORIGIN, ListingLine, assemble,
};
pub use encoder::encode;
pub use error::{AsmError, ErrorKind};
pub use opcodes::{AddressingMode, Mnemonic};
pub use symbol::LabelTable;
