//! Parser module for assembly source

pub mod lexer;
pub mod line;
pub mod number;

pub use line::{Index, Instruction, Statement, Syntax, parse_line};
pub use number::{Labels, NumberParser, Width, resolve};
