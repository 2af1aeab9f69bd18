//! Numeric literals and operand resolution

use crate::error::ErrorKind;
use crate::symbol::LabelTable;

/// How many bytes an operand value has to fit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte,
    Word,
}

impl Width {
    /// Exclusive upper bound of a value of this width.
    pub fn bound(self) -> u64 {
        match self {
            Width::Byte => 0x100,
            Width::Word => 0x1_0000,
        }
    }
}

pub struct NumberParser;

impl NumberParser {
    /// Parse `$FF` (hex) or `255` (decimal). Returns `None` for anything else.
    /// Literals too wide for a `u64` saturate so they still fail range checks.
    pub fn parse(s: &str) -> Option<u64> {
        if let Some(hex) = s.strip_prefix('$') {
            return Self::parse_hex(hex);
        }
        Self::parse_decimal(s)
    }

    fn parse_hex(s: &str) -> Option<u64> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(u64::from_str_radix(s, 16).unwrap_or(u64::MAX))
    }

    fn parse_decimal(s: &str) -> Option<u64> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(s.parse::<u64>().unwrap_or(u64::MAX))
    }
}

/// Labels visible to the resolver.
#[derive(Debug, Clone, Copy)]
pub enum Labels<'a> {
    /// First pass: only the labels bound so far. Any other name stands in
    /// for the current address.
    Partial(&'a LabelTable),
    /// Second pass: every label in the program.
    Complete(&'a LabelTable),
}

/// Turn operand text into a value of the given width.
///
/// Tried in order: hex literal, decimal literal, a label in `labels`. With
/// [`Labels::Partial`] a name that is not bound yet yields `pc` so
/// instruction sizes can still be computed.
pub fn resolve(text: &str, width: Width, labels: Labels<'_>, pc: u16) -> Result<u16, ErrorKind> {
    let value = match NumberParser::parse(text) {
        Some(n) => n,
        None => match labels {
            Labels::Partial(table) => match table.get(text) {
                Some(addr) => u64::from(addr),
                None => return Ok(pc),
            },
            Labels::Complete(table) => match table.get(text) {
                Some(addr) => u64::from(addr),
                None => return Err(ErrorKind::UnparseableOperand(text.to_string())),
            },
        },
    };

    let bound = width.bound();
    if value >= bound {
        return Err(ErrorKind::ValueOutOfRange { value, bound });
    }
    // bound never exceeds 0x10000
    Ok(value as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none() -> LabelTable {
        LabelTable::new()
    }

    #[test]
    fn test_literals() {
        assert_eq!(NumberParser::parse("$FF"), Some(255));
        assert_eq!(NumberParser::parse("$ff"), Some(255));
        assert_eq!(NumberParser::parse("$C000"), Some(0xC000));
        assert_eq!(NumberParser::parse("10"), Some(10));
        assert_eq!(NumberParser::parse("0"), Some(0));
        assert_eq!(NumberParser::parse("$"), None);
        assert_eq!(NumberParser::parse("$G1"), None);
        assert_eq!(NumberParser::parse("loop"), None);
        assert_eq!(NumberParser::parse("12ab"), None);
        assert_eq!(NumberParser::parse("99999999999999999999999"), Some(u64::MAX));
    }

    #[test]
    fn test_resolve_numbers() {
        assert_eq!(resolve("$0100", Width::Word, Labels::Complete(&none()), 0xC000), Ok(0x0100));
        assert_eq!(resolve("10", Width::Byte, Labels::Complete(&none()), 0xC000), Ok(10));
        assert_eq!(resolve("$FFFF", Width::Word, Labels::Complete(&none()), 0), Ok(0xFFFF));
    }

    #[test]
    fn test_resolve_range() {
        assert_eq!(
            resolve("256", Width::Byte, Labels::Complete(&none()), 0),
            Err(ErrorKind::ValueOutOfRange {
                value: 256,
                bound: 256
            })
        );
        assert_eq!(
            resolve("$10000", Width::Word, Labels::Complete(&none()), 0),
            Err(ErrorKind::ValueOutOfRange {
                value: 0x10000,
                bound: 0x10000
            })
        );
    }

    #[test]
    fn test_resolve_labels() {
        let mut labels = LabelTable::new();
        labels.define("loop", 0xC002).unwrap();
        labels.define("origin", 0).unwrap();

        assert_eq!(resolve("loop", Width::Word, Labels::Complete(&labels), 0), Ok(0xC002));
        assert_eq!(resolve("origin", Width::Word, Labels::Complete(&labels), 0xC000), Ok(0));
        assert_eq!(
            resolve("nowhere", Width::Word, Labels::Complete(&labels), 0),
            Err(ErrorKind::UnparseableOperand("nowhere".to_string()))
        );
        assert_eq!(
            resolve("loop", Width::Byte, Labels::Complete(&labels), 0),
            Err(ErrorKind::ValueOutOfRange {
                value: 0xC002,
                bound: 0x100
            })
        );
    }

    #[test]
    fn test_first_pass_placeholder() {
        let mut seen = LabelTable::new();
        seen.define("start", 0x00F0).unwrap();

        assert_eq!(resolve("later", Width::Word, Labels::Partial(&seen), 0xC123), Ok(0xC123));
        // a label bound earlier in the pass resolves to its address
        assert_eq!(resolve("start", Width::Word, Labels::Partial(&seen), 0xC123), Ok(0x00F0));
    }
}
