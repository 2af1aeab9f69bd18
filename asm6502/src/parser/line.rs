//! Classification of source lines into statements

use super::lexer::{Token, strip_comment, tokenize};
use crate::error::ErrorKind;
use crate::opcodes::AddressingMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Index {
    X,
    Y,
}

impl Index {
    fn from_token(token: &Token<'_>) -> Option<Self> {
        match token {
            Token::Word(s) if s.eq_ignore_ascii_case("x") => Some(Index::X),
            Token::Word(s) if s.eq_ignore_ascii_case("y") => Some(Index::Y),
            _ => None,
        }
    }
}

/// Operand syntax of an instruction, one variant per written form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Syntax<'a> {
    /// `NOP`
    Implied,
    /// `ASL a`
    Accumulator,
    /// `LDA #10`, `LDA #$0A`
    Immediate(&'a str),
    /// `LDA $1234`, `JMP loop`
    Absolute(&'a str),
    /// `STA $0100, X`
    AbsoluteIndexed(&'a str, Index),
    /// `JMP ($FFFC)`
    Indirect(&'a str),
    /// `LDA ($20, X)`
    IndirectX(&'a str),
    /// `LDA ($20), Y`
    IndirectY(&'a str),
}

impl Syntax<'_> {
    pub fn mode(&self) -> AddressingMode {
        match self {
            Syntax::Implied => AddressingMode::Implied,
            Syntax::Accumulator => AddressingMode::Accumulator,
            Syntax::Immediate(_) => AddressingMode::Immediate,
            Syntax::Absolute(_) => AddressingMode::Absolute,
            Syntax::AbsoluteIndexed(_, Index::X) => AddressingMode::AbsoluteX,
            Syntax::AbsoluteIndexed(_, Index::Y) => AddressingMode::AbsoluteY,
            Syntax::Indirect(_) => AddressingMode::Indirect,
            Syntax::IndirectX(_) => AddressingMode::IndirectX,
            Syntax::IndirectY(_) => AddressingMode::IndirectY,
        }
    }
}

/// A classified instruction, not yet checked against the opcode table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction<'a> {
    pub mnemonic: &'a str,
    pub syntax: Syntax<'a>,
    /// Instruction text without any label prefix
    pub text: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement<'a> {
    /// `* = $C000`
    Origin(&'a str),
    /// `loop:` on a line of its own
    Label(&'a str),
    Instruction {
        label: Option<&'a str>,
        instruction: Instruction<'a>,
    },
}

/// Parse one raw source line. Blank and comment-only lines give `None`.
pub fn parse_line(raw: &str) -> Result<Option<Statement<'_>>, ErrorKind> {
    let line = strip_comment(raw);
    if line.is_empty() {
        return Ok(None);
    }

    let tokens = tokenize(line);

    if let Some(value) = parse_origin(&tokens) {
        return Ok(Some(Statement::Origin(value)));
    }

    if let [Token::Word(name), Token::Colon, ..] = tokens.as_slice() {
        let rest = line.split_once(':').map_or("", |(_, r)| r).trim_start();
        if rest.is_empty() {
            return Ok(Some(Statement::Label(*name)));
        }
        let instruction = parse_instruction(rest)?;
        return Ok(Some(Statement::Instruction {
            label: Some(*name),
            instruction,
        }));
    }

    let instruction = parse_instruction(line)?;
    Ok(Some(Statement::Instruction {
        label: None,
        instruction,
    }))
}

fn parse_origin<'a>(tokens: &[Token<'a>]) -> Option<&'a str> {
    use Token::*;
    let value = match tokens {
        [Star, Equals, value]
        | [Star, Space, Equals, value]
        | [Star, Equals, Space, value]
        | [Star, Space, Equals, Space, value] => value,
        _ => return None,
    };
    match value {
        Hex(s) => Some(*s),
        Word(s) if s.bytes().all(|b| b.is_ascii_hexdigit()) => Some(*s),
        _ => None,
    }
}

fn parse_instruction(text: &str) -> Result<Instruction<'_>, ErrorKind> {
    let unparseable = || ErrorKind::UnparseableLine(text.to_string());
    let tokens = tokenize(text);

    let (mnemonic, rest) = match tokens.as_slice() {
        [Token::Word(m), rest @ ..] if m.len() == 3 => (*m, rest),
        _ => return Err(unparseable()),
    };
    let syntax = match rest {
        [] => Syntax::Implied,
        [Token::Space, operand @ ..] => parse_operand(operand).ok_or_else(unparseable)?,
        _ => return Err(unparseable()),
    };

    Ok(Instruction {
        mnemonic,
        syntax,
        text,
    })
}

/// Match the operand tokens against each syntax, first match wins.
fn parse_operand<'a>(tokens: &[Token<'a>]) -> Option<Syntax<'a>> {
    use Token::*;
    let syntax = match tokens {
        [Word(a)] if a.eq_ignore_ascii_case("a") => Syntax::Accumulator,
        [Hash, value] => Syntax::Immediate(immediate_literal(value)?),
        [value] => Syntax::Absolute(value.operand()?),
        [value, Comma, index] | [value, Comma, Space, index] => {
            Syntax::AbsoluteIndexed(value.operand()?, Index::from_token(index)?)
        }
        [LParen, value, RParen] => Syntax::Indirect(value.operand()?),
        [LParen, value, Comma, index, RParen] | [LParen, value, Comma, Space, index, RParen] => {
            match Index::from_token(index)? {
                Index::X => Syntax::IndirectX(value.operand()?),
                Index::Y => return None,
            }
        }
        [LParen, value, RParen, Comma, index] | [LParen, value, RParen, Comma, Space, index] => {
            match Index::from_token(index)? {
                Index::Y => Syntax::IndirectY(value.operand()?),
                Index::X => return None,
            }
        }
        _ => return None,
    };
    Some(syntax)
}

/// Immediate operands are numeric only: decimal digits or `$hex`.
fn immediate_literal<'a>(token: &Token<'a>) -> Option<&'a str> {
    match token {
        Token::Hex(s) => Some(*s),
        Token::Word(s) if s.bytes().all(|b| b.is_ascii_digit()) => Some(*s),
        _ => None,
    }
}
