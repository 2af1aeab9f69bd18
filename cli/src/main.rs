use std::{
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use asm6502_lite::{AsmError, Assembler6502, AssemblerConfig, DEFAULT_ORIGIN};
use clap::Parser;
use color_print::{ceprintln, cprintln};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Assembly source file (`-` reads stdin)
    input: PathBuf,

    /// Output file for the raw image
    #[arg(short, long, default_value = "a.out.bin")]
    output: PathBuf,

    /// Address assembly starts at, until the source sets `* =`
    #[arg(long, value_parser = parse_address, default_value_t = DEFAULT_ORIGIN)]
    origin: u16,

    /// Print every emitted instruction
    #[arg(short, long)]
    trace: bool,

    /// Write a listing file
    #[arg(short, long)]
    listing: Option<PathBuf>,

    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

/// `$C000`, `0xC000` or `49152`
fn parse_address(s: &str) -> Result<u16, String> {
    let parsed = if let Some(hex) = s.strip_prefix('$') {
        u16::from_str_radix(hex, 16)
    } else if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16)
    } else {
        s.parse::<u16>()
    };
    parsed.map_err(|e| format!("invalid address `{s}`: {e}"))
}

fn read_source(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut src = String::new();
        io::stdin().read_to_string(&mut src)?;
        return Ok(src);
    }
    fs::read_to_string(path)
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    match main_real(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_diag(&args, &e);
            ExitCode::FAILURE
        }
    }
}

fn main_real(args: &Args) -> Result<(), AsmError> {
    let src = read_source(&args.input)?;

    let mut assembler = Assembler6502::with_config(AssemblerConfig {
        origin: args.origin,
        trace: args.trace,
    });
    let assembly = assembler.assemble_full(&src)?;

    let mut out = BufWriter::new(File::create(&args.output)?);
    Assembler6502::write_bin(&assembly.bytes, &mut out)?;
    out.flush()?;

    if let Some(path) = &args.listing {
        assembly.save_listing(path)?;
        tracing::debug!("listing written to {}", path.display());
    }

    cprintln!(
        "<g,s>assembled</> {} bytes at ${:04X} -> {}",
        assembly.bytes.len(),
        assembly.origin,
        args.output.display()
    );
    Ok(())
}

fn print_diag(args: &Args, err: &AsmError) {
    ceprintln!("<r,s>error</>: {}", err);
    if let AsmError::Asm { line, text, .. } = err {
        ceprintln!("     <b>--></> <u>{}:{}</>", args.input.display(), line);
        ceprintln!("      <b>|</>");
        ceprintln!(" <b>{:>4} |</> {}", line, text);
        ceprintln!("      <b>|</>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("$C000"), Ok(0xC000));
        assert_eq!(parse_address("0x0800"), Ok(0x0800));
        assert_eq!(parse_address("49152"), Ok(49152));
        assert!(parse_address("$10000").is_err());
        assert!(parse_address("start").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["asm6502", "prog.s", "--origin", "$0800", "-t"]).unwrap();
        assert_eq!(args.input, PathBuf::from("prog.s"));
        assert_eq!(args.origin, 0x0800);
        assert!(args.trace);
        assert_eq!(args.output, PathBuf::from("a.out.bin"));
        assert!(args.listing.is_none());
        assert_eq!(args.log_level, Level::INFO);
    }

    #[test]
    fn test_default_origin() {
        let args = Args::try_parse_from(["asm6502", "prog.s"]).unwrap();
        assert_eq!(args.origin, DEFAULT_ORIGIN);
    }
}
