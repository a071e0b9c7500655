//! The pretty print implementation written for both the decoded [`Opcodes`] (as a
//! disassembly) and the [`ChipSet`] (as a state dump).

use super::ChipSet;
use crate::opcode::{ArithmeticOp, KeyOp, MiscOp, Opcodes, Skip, System};
use once_cell::sync::Lazy;
use std::fmt::{self, Write};

/// The amount of bytes printed in a single memory row
const HEX_PRINT_STEP: usize = 16;

/// The values that are used when there are at least two rows of zeros.
const FILLER_BASE: &str = "...";

/// The width of a printed memory row, every byte is two digits followed by a space
const ROW_WIDTH: usize = HEX_PRINT_STEP * 3 - 1;

/// Prepares the line that will be used, in the case that there are at least two rows of only
/// zeros.
static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
    let zero = format!("{:02X}", 0u8);
    let inner = ROW_WIDTH - 2 * zero.len() - FILLER_BASE.len();
    let left = " ".repeat(inner / 2);
    let right = " ".repeat(inner - inner / 2);
    format!("{}{}{}{}{}", zero, left, FILLER_BASE, right, zero)
});

impl fmt::Display for Opcodes {
    /// Renders the instruction as an assembler mnemonic. The register of `BNNN` is printed
    /// as `VX`, even when the `V0` quirk is active.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Opcodes::System(System::Clear) => write!(f, "CLS"),
            Opcodes::System(System::Return) => write!(f, "RET"),
            Opcodes::Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Opcodes::Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            Opcodes::Skip(Skip::Equal { x, nn }) => write!(f, "SE V{:X}, {:#04X}", x, nn),
            Opcodes::Skip(Skip::NotEqual { x, nn }) => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            Opcodes::Skip(Skip::RegisterEqual { x, y }) => write!(f, "SE V{:X}, V{:X}", x, y),
            Opcodes::Skip(Skip::RegisterNotEqual { x, y }) => {
                write!(f, "SNE V{:X}, V{:X}", x, y)
            }
            Opcodes::Load { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Opcodes::Add { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Opcodes::Arithmetic { op, x, y } => {
                let name = match op {
                    ArithmeticOp::Assign => "LD",
                    ArithmeticOp::Or => "OR",
                    ArithmeticOp::And => "AND",
                    ArithmeticOp::Xor => "XOR",
                    ArithmeticOp::Add => "ADD",
                    ArithmeticOp::Sub => "SUB",
                    ArithmeticOp::ShiftRight => "SHR",
                    ArithmeticOp::SubReversed => "SUBN",
                    ArithmeticOp::ShiftLeft => "SHL",
                };
                write!(f, "{} V{:X}, V{:X}", name, x, y)
            }
            Opcodes::SetIndex { nnn } => write!(f, "LD I, {:#05X}", nnn),
            Opcodes::JumpOffset { x, nnn } => write!(f, "JP V{:X}, {:#05X}", x, nnn),
            Opcodes::Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Opcodes::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:#X}", x, y, n),
            Opcodes::Key {
                op: KeyOp::Pressed,
                x,
            } => write!(f, "SKP V{:X}", x),
            Opcodes::Key {
                op: KeyOp::NotPressed,
                x,
            } => write!(f, "SKNP V{:X}", x),
            Opcodes::Misc { op, x } => match op {
                MiscOp::GetDelayTimer => write!(f, "LD V{:X}, DT", x),
                MiscOp::AwaitKeyPress => write!(f, "LD V{:X}, K", x),
                MiscOp::SetDelayTimer => write!(f, "LD DT, V{:X}", x),
                MiscOp::SetSoundTimer => write!(f, "LD ST, V{:X}", x),
                MiscOp::AddVxToI => write!(f, "ADD I, V{:X}", x),
                MiscOp::SetIToSprite => write!(f, "LD F, V{:X}", x),
                MiscOp::StoreBCD => write!(f, "LD B, V{:X}", x),
                MiscOp::StoreV0ToVx => write!(f, "LD [I], V{:X}", x),
                MiscOp::FillV0ToVx => write!(f, "LD V{:X}, [I]", x),
            },
        }
    }
}

/// Will format a single memory row
fn format_row(row: &[u8]) -> Result<String, fmt::Error> {
    let mut line = String::with_capacity(ROW_WIDTH);
    for (i, byte) in row.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        write!(line, "{:02X}", byte)?;
    }
    Ok(line)
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rom: '{}' ({:?})", self.name, self.state)?;
        writeln!(
            f,
            "PC: {:#06X} I: {:#06X} DT: {} ST: {}",
            self.program_counter,
            self.index_register,
            self.delay_timer.get_value(),
            self.sound_timer.get_value()
        )?;

        for (i, chunk) in self.registers.chunks(4).enumerate() {
            let line = chunk
                .iter()
                .enumerate()
                .map(|(j, value)| format!("V{:X}: {:#04X}", i * 4 + j, value))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }

        let stack = self
            .stack
            .iter()
            .map(|pointer| format!("{:#06X}", pointer))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "stack: [{}]", stack)?;

        writeln!(f, "memory:")?;
        let is_zero = |row: &[u8]| row.iter().all(|byte| *byte == 0);
        let mut rows = self.memory.chunks(HEX_PRINT_STEP).enumerate().peekable();
        while let Some((i, row)) = rows.next() {
            let from = i * HEX_PRINT_STEP;
            let mut to = from + row.len() - 1;

            let line = if is_zero(row) {
                let mut collapsed = false;
                while let Some((j, next)) = rows.next_if(|(_, next)| is_zero(next)) {
                    to = j * HEX_PRINT_STEP + next.len() - 1;
                    collapsed = true;
                }
                if collapsed {
                    ZERO_FILLER.clone()
                } else {
                    format_row(row)?
                }
            } else {
                format_row(row)?
            };

            writeln!(f, "{:#06X} - {:#06X} : {}", from, to, line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Rom;
    use std::convert::TryFrom;

    #[test]
    fn test_disassembly() {
        let tests = [
            (0x00E0, "CLS"),
            (0x00EE, "RET"),
            (0x1234, "JP 0x234"),
            (0x3A2B, "SE VA, 0x2B"),
            (0x8AB5, "SUB VA, VB"),
            (0x8AB7, "SUBN VA, VB"),
            (0xA123, "LD I, 0x123"),
            (0xD125, "DRW V1, V2, 0x5"),
            (0xE1A1, "SKNP V1"),
            (0xF30A, "LD V3, K"),
            (0xF455, "LD [I], V4"),
        ];
        for (opcode, text) in tests.iter() {
            let opcode = Opcodes::try_from(*opcode as u16).unwrap();
            assert_eq!(&format!("{}", opcode), text);
        }
    }

    #[test]
    fn test_zero_filler_width() {
        assert_eq!(ZERO_FILLER.len(), ROW_WIDTH);
        assert_eq!(format_row(&[0; HEX_PRINT_STEP]).unwrap().len(), ROW_WIDTH);
    }

    #[test]
    fn test_state_dump() {
        let mut chip = ChipSet::default();
        chip.load(&Rom::new("dump", vec![0x60, 0x05])).unwrap();

        let dump = format!("{}", chip);

        assert!(dump.starts_with("rom: 'dump' (Running)\n"));
        assert!(dump.contains("PC: 0x0200 I: 0x0000 DT: 0 ST: 0"));
        assert!(dump.contains("V0: 0x00 V1: 0x00 V2: 0x00 V3: 0x00"));
        assert!(dump.contains("stack: []"));
        // the first font row
        assert!(dump.contains("0x0000 - 0x000F : F0 90 90 90 F0 20 60 20 20 70 F0 10 F0 80 F0 F0"));
        // the program row
        assert!(dump.contains("0x0200 - 0x020F : 60 05 00"));
        // the reserved area between font and program is collapsed
        assert!(dump.contains(&format!("0x0050 - 0x01FF : {}", *ZERO_FILLER)));
        assert!(dump.contains(&format!("0x0210 - 0x0FFF : {}", *ZERO_FILLER)));
    }
}
