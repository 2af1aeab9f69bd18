//! Two-pass assembler driver

use tracing::{debug, info, trace};

use crate::encoder::encode;
use crate::error::{AsmError, ErrorKind};
use crate::parser::line::{Statement, parse_line};
use crate::parser::number::{Labels, Width, resolve};
use crate::symbol::LabelTable;

/// Address the program counter starts at unless the source says otherwise.
pub const DEFAULT_ORIGIN: u16 = 0xC000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Initial program counter of each pass
    pub origin: u16,
    /// Report every emitted instruction under the `asm6502::trace` target
    pub trace: bool,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            trace: false,
        }
    }
}

/// One emitted instruction: where it went, what it was, what it became.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLine {
    /// 1-based source line
    pub line: usize,
    pub address: u16,
    pub label: Option<String>,
    pub text: String,
    pub bytes: Vec<u8>,
}

/// Result of a successful assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    /// Address of the first emitted byte
    pub origin: u16,
    pub bytes: Vec<u8>,
    pub labels: LabelTable,
    pub listing: Vec<ListingLine>,
}

#[derive(Default)]
struct Pass {
    labels: LabelTable,
    bytes: Vec<u8>,
    listing: Vec<ListingLine>,
    start: Option<u16>,
}

pub struct Assembler6502 {
    config: AssemblerConfig,
    symbols: LabelTable,
}

impl Default for Assembler6502 {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler6502 {
    pub fn new() -> Self {
        Self::with_config(AssemblerConfig::default())
    }

    pub fn with_config(config: AssemblerConfig) -> Self {
        Self {
            config,
            symbols: LabelTable::new(),
        }
    }

    // ===== Configuration =====

    pub fn set_origin(&mut self, addr: u16) {
        self.config.origin = addr;
    }

    pub fn origin(&self) -> u16 {
        self.config.origin
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.config.trace = trace;
    }

    pub fn config(&self) -> AssemblerConfig {
        self.config
    }

    // ===== Public API =====

    pub fn assemble_bytes(&mut self, src: &str) -> Result<Vec<u8>, AsmError> {
        Ok(self.assemble_full(src)?.bytes)
    }

    /// Assemble `src`, keeping labels and the per-instruction listing.
    pub fn assemble_full(&mut self, src: &str) -> Result<Assembly, AsmError> {
        self.symbols = LabelTable::new();

        debug!("starting pass 1");
        let first = self.run_pass(src, None)?;
        debug!(labels = first.labels.len(), "pass 1 done");

        debug!("starting pass 2");
        let second = self.run_pass(src, Some(&first.labels))?;
        debug!(bytes = second.bytes.len(), "pass 2 done");

        self.symbols = second.labels.clone();
        Ok(Assembly {
            origin: second.start.unwrap_or(self.config.origin),
            bytes: second.bytes,
            labels: second.labels,
            listing: second.listing,
        })
    }

    /// Labels of the last successful assembly.
    pub fn symbols(&self) -> &LabelTable {
        &self.symbols
    }

    pub fn lookup(&self, name: &str) -> Option<u16> {
        self.symbols.get(name)
    }

    pub fn write_bin<W: std::io::Write>(bytes: &[u8], mut w: W) -> std::io::Result<()> {
        w.write_all(bytes)
    }

    // ===== Assembly core =====

    /// Walk every line once. `known` is `None` on the first pass; on the
    /// second it holds the labels the first pass found.
    fn run_pass(&self, src: &str, known: Option<&LabelTable>) -> Result<Pass, AsmError> {
        let mut pass = Pass::default();
        // reaches $10000 when the last instruction ends at the top of memory
        let mut pc = u32::from(self.config.origin);

        for (idx, raw) in src.lines().enumerate() {
            let line = idx + 1;
            let fail = |kind: ErrorKind| AsmError::at(line, raw.trim(), kind);

            let Some(statement) = parse_line(raw).map_err(fail)? else {
                continue;
            };

            match statement {
                Statement::Origin(text) => {
                    let empty = LabelTable::new();
                    let origin =
                        resolve(text, Width::Word, Labels::Complete(&empty), 0).map_err(fail)?;
                    pc = u32::from(origin);
                    debug!("set program counter to ${:04X}", origin);
                }
                Statement::Label(name) => {
                    let here = address(pc).map_err(fail)?;
                    bind(&mut pass.labels, known, name, here).map_err(fail)?;
                }
                Statement::Instruction { label, instruction } => {
                    let here = address(pc).map_err(fail)?;
                    if let Some(name) = label {
                        bind(&mut pass.labels, known, name, here).map_err(fail)?;
                    }

                    let labels = match known {
                        Some(all) => Labels::Complete(all),
                        None => Labels::Partial(&pass.labels),
                    };
                    let bytes = encode(&instruction, labels, here).map_err(fail)?;
                    trace!("${:04X} {} => {:02X?}", here, instruction.text, bytes);

                    let end = pc + bytes.len() as u32;
                    address(end - 1).map_err(fail)?;

                    if known.is_some() {
                        if self.config.trace {
                            info!(
                                target: "asm6502::trace",
                                "${:04X}  {:<14}   => {:02X?}",
                                here,
                                instruction.text,
                                bytes
                            );
                        }
                        pass.listing.push(ListingLine {
                            line,
                            address: here,
                            label: label.map(str::to_string),
                            text: instruction.text.to_string(),
                            bytes: bytes.clone(),
                        });
                    }

                    pass.start.get_or_insert(here);
                    pc = end;
                    pass.bytes.extend_from_slice(&bytes);
                }
            }
        }

        Ok(pass)
    }
}

/// Narrow the program counter, failing once it has run past `$FFFF`.
fn address(pc: u32) -> Result<u16, ErrorKind> {
    u16::try_from(pc).map_err(|_| ErrorKind::ValueOutOfRange {
        value: u64::from(pc),
        bound: Width::Word.bound(),
    })
}

/// Record `name` at `pc` for this pass and check it against the first pass.
fn bind(
    found: &mut LabelTable,
    known: Option<&LabelTable>,
    name: &str,
    pc: u16,
) -> Result<(), ErrorKind> {
    found.define(name, pc)?;
    if let Some(first_pass) = known.and_then(|labels| labels.get(name))
        && first_pass != pc
    {
        return Err(ErrorKind::LabelAddressMismatch {
            label: name.to_string(),
            first_pass,
            second_pass: pc,
        });
    }
    debug!("label {} = ${:04X}", name, pc);
    Ok(())
}

/// Assemble `source` starting at [`DEFAULT_ORIGIN`] and return the image.
pub fn assemble(source: &str, trace: bool) -> Result<Vec<u8>, AsmError> {
    Assembler6502::with_config(AssemblerConfig {
        trace,
        ..AssemblerConfig::default()
    })
    .assemble_bytes(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTDOWN: &str = "
        * = $c000
        LDX #10
        loop: TXA
        STA $0100, X
        DEX
        BNE loop
        RTS
    ";

    #[test]
    fn test_countdown() {
        let bytes = assemble(COUNTDOWN, false).unwrap();
        assert_eq!(
            bytes,
            vec![0xA2, 0x0A, 0x8A, 0x9D, 0x00, 0x01, 0xCA, 0xD0, 0xF9, 0x60]
        );
    }

    #[test]
    fn test_full_assembly_keeps_labels_and_listing() {
        let mut asm = Assembler6502::new();
        let out = asm.assemble_full(COUNTDOWN).unwrap();
        assert_eq!(out.origin, 0xC000);
        assert_eq!(out.labels.get("loop"), Some(0xC002));
        assert_eq!(asm.lookup("loop"), Some(0xC002));

        let addrs: Vec<u16> = out.listing.iter().map(|l| l.address).collect();
        assert_eq!(addrs, [0xC000, 0xC002, 0xC003, 0xC006, 0xC007, 0xC009]);
        assert_eq!(out.listing[1].label.as_deref(), Some("loop"));
        assert_eq!(out.listing[1].text, "TXA");
        assert_eq!(out.listing[1].line, 4);
        assert_eq!(out.listing[4].bytes, vec![0xD0, 0xF9]);
    }

    #[test]
    fn test_configured_origin() {
        let mut asm = Assembler6502::new();
        asm.set_origin(0x0800);
        let out = asm.assemble_full("start: JMP start").unwrap();
        assert_eq!(out.origin, 0x0800);
        assert_eq!(out.bytes, vec![0x4C, 0x00, 0x08]);
    }

    #[test]
    fn test_origin_applies_only_to_its_pass() {
        let mut asm = Assembler6502::new();
        let first = asm.assemble_full("* = $1000\nhere: JMP here").unwrap();
        assert_eq!(first.origin, 0x1000);
        let second = asm.assemble_full("here: JMP here").unwrap();
        assert_eq!(second.origin, DEFAULT_ORIGIN);
        assert_eq!(asm.lookup("here"), Some(DEFAULT_ORIGIN));
    }

    #[test]
    fn test_errors_carry_line() {
        let err = assemble("NOP\nNOP\nLDA #256\n", false).unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(matches!(
            err.kind(),
            Some(ErrorKind::ValueOutOfRange { value: 256, .. })
        ));
    }

    #[test]
    fn test_failed_assembly_clears_symbols() {
        let mut asm = Assembler6502::new();
        asm.assemble_full("a1: NOP").unwrap();
        assert!(asm.assemble_full("a1: NOP\na1: NOP").is_err());
        assert!(asm.symbols().is_empty());
    }

    #[test]
    fn test_label_shift_between_passes_is_reported() {
        // pass 1 sizes `LDA far` as zero page because the placeholder is the
        // current address ($0010), putting `far` at $0102. Pass 2 needs three
        // bytes for it, so `far` turns up at $0103.
        let mut src = String::from("* = $0010\nLDA far\n");
        for _ in 0..0xF0 {
            src.push_str("NOP\n");
        }
        src.push_str("far: RTS\n");
        let err = assemble(&src, false).unwrap_err();
        assert_eq!(err.line(), Some(0xF0 + 3));
        assert_eq!(
            err.kind(),
            Some(&ErrorKind::LabelAddressMismatch {
                label: "far".to_string(),
                first_pass: 0x0102,
                second_pass: 0x0103,
            })
        );
    }

    #[test]
    fn test_backward_zero_page_reference_after_page_one() {
        // `LDA start` sits above $0100 but only looks back, so both passes
        // size it as zero page
        let mut src = String::from("* = $00F0\nstart: NOP\n");
        for _ in 0..20 {
            src.push_str("NOP\n");
        }
        src.push_str("LDA start\nend: RTS\nJMP end\n");

        let mut asm = Assembler6502::new();
        let out = asm.assemble_full(&src).unwrap();
        assert_eq!(out.labels.get("start"), Some(0x00F0));
        assert_eq!(out.labels.get("end"), Some(0x0107));
        assert_eq!(out.bytes.len(), 27);
        assert_eq!(out.bytes[21..], [0xA5, 0xF0, 0x60, 0x4C, 0x07, 0x01]);
    }

    #[test]
    fn test_last_byte_at_top_of_memory() {
        assert_eq!(assemble("* = $FFFF\nNOP", false).unwrap(), vec![0xEA]);
        assert_eq!(
            assemble("* = $FFFF\nNOP\n* = $0000\nNOP", false).unwrap(),
            vec![0xEA, 0xEA]
        );
    }

    #[test]
    fn test_label_past_end_of_memory() {
        let err = assemble("* = $FFFF\nNOP\nend: NOP\nJMP end", false).unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert_eq!(
            err.kind(),
            Some(&ErrorKind::ValueOutOfRange {
                value: 0x10000,
                bound: 0x10000
            })
        );
    }

    #[test]
    fn test_instruction_running_past_end_of_memory() {
        let err = assemble("* = $FFFE\nJMP $1234", false).unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert_eq!(
            err.kind(),
            Some(&ErrorKind::ValueOutOfRange {
                value: 0x10000,
                bound: 0x10000
            })
        );
    }

    #[test]
    fn test_write_bin() {
        let mut out = Vec::new();
        Assembler6502::write_bin(&[1, 2, 3], &mut out).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }
}
