//! Human-readable assembly listings (feature: "listing")

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::assembler::{Assembly, ListingLine};

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("${:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_line<W: Write>(w: &mut W, line: &ListingLine) -> io::Result<()> {
    if let Some(label) = &line.label {
        writeln!(w, "${:04X}:              {}:", line.address, label)?;
    }
    writeln!(
        w,
        "${:04X}: {:<12}  {}",
        line.address,
        hex_bytes(&line.bytes),
        line.text
    )
}

impl Assembly {
    pub fn write_listing<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "Assembly Listing:")?;
        writeln!(w, "Address: Machine Code  Assembly")?;
        writeln!(w, "{}", "-".repeat(50))?;
        for line in &self.listing {
            write_line(&mut w, line)?;
        }
        writeln!(w, "{}", "-".repeat(50))?;
        writeln!(
            w,
            "{} bytes at ${:04X}, {} labels",
            self.bytes.len(),
            self.origin,
            self.labels.len()
        )?;
        for (name, addr) in self.labels.iter() {
            writeln!(w, "  {:<16} = ${:04X}", name, addr)?;
        }
        Ok(())
    }

    pub fn save_listing<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        let mut w = BufWriter::new(file);
        self.write_listing(&mut w)?;
        w.flush()
    }

    pub fn print_listing(&self) -> io::Result<()> {
        self.write_listing(io::stdout().lock())
    }
}

#[cfg(test)]
mod tests {
    use crate::assembler::Assembler6502;

    #[test]
    fn test_listing_layout() {
        let mut asm = Assembler6502::new();
        let out = asm
            .assemble_full("LDX #10\nloop: DEX\nBNE loop\ndone: RTS")
            .unwrap();
        let mut buf = Vec::new();
        out.write_listing(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[3], "$C000: $A2 $0A       LDX #10");
        assert_eq!(lines[4], "$C002:              loop:");
        assert_eq!(lines[5], "$C002: $CA           DEX");
        assert_eq!(lines[6], "$C003: $D0 $FD       BNE loop");
        assert_eq!(lines[7], "$C005:              done:");
        assert_eq!(lines[8], "$C005: $60           RTS");
        assert_eq!(lines[10], "6 bytes at $C000, 2 labels");
        assert_eq!(lines[11], "  loop             = $C002");
        assert_eq!(lines[12], "  done             = $C005");
        assert_eq!(lines.len(), 13);
    }
}
