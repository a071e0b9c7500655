//! Decoding of the raw 16 bit instructions and the table every executor has to implement.
use std::convert::TryFrom;

use crate::{definitions::memory, OpcodeError, ProcessError};

/// all bits set, the remaining masks are derived from it
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a nibble
const NIBBLE: u16 = 0x4;

/// A raw big endian instruction word
pub type Opcode = u16;

/// will build an opcode from data and the given point, the access wraps around the end of
/// `data`
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      assert_eq!(build_opcode(&SPLIT_OPCODE, i * 2), *val);
///  }
///  // the last byte is followed by the first one
///  assert_eq!(build_opcode(&SPLIT_OPCODE, 3), 0xDA00);
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Opcode {
    let high = data[pointer % data.len()];
    let low = data[(pointer + 1) % data.len()];
    Opcode::from_be_bytes([high, low])
}

/// The fields of a fetched opcode, every field is extracted regardless of whether the
/// instruction uses it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The raw instruction word
    pub opcode: Opcode,
    /// `_NNN` the 12 bit address
    pub nnn: u16,
    /// `__NN` the 8 bit constant
    pub nn: u8,
    /// `___N` the 4 bit constant
    pub n: u8,
    /// `_X__` a register index
    pub x: usize,
    /// `__Y_` a register index
    pub y: usize,
}

impl Instruction {
    /// The opcode group `T___`.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// assert_eq!(Instruction::from(0x1EDA).kind(), 0x1);
    /// ```
    pub fn kind(&self) -> u8 {
        ((self.opcode & OPCODE_MASK_F000) >> (3 * NIBBLE)) as u8
    }
}

impl From<Opcode> for Instruction {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// let instruction = Instruction::from(0x1EDA);
    /// assert_eq!(instruction.nnn, 0xEDA);
    /// assert_eq!(instruction.nn, 0xDA);
    /// assert_eq!(instruction.n, 0xA);
    /// assert_eq!((instruction.x, instruction.y), (0xE, 0xD));
    /// ```
    fn from(opcode: Opcode) -> Self {
        Self {
            opcode,
            nnn: opcode & OPCODE_MASK_0FFF,
            nn: (opcode & OPCODE_MASK_00FF) as u8,
            n: (opcode & OPCODE_MASK_000F) as u8,
            x: ((opcode & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE)) as usize,
            y: ((opcode & OPCODE_MASK_00FF & OPCODE_MASK_FFF0) >> NIBBLE) as usize,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents the movement of the program counter after an instruction was executed.
/// The counter already points past the executed instruction at that time.
pub enum ProgramCounterStep {
    /// Continue with the following instruction
    Next,
    /// Skip the following instruction
    Skip,
    /// Execute the same instruction again
    Repeat,
    /// Continue at the given address
    Jump(u16),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Maps the step onto the given program counter.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next.apply(0x202), 0x202);
    /// assert_eq!(ProgramCounterStep::Skip.apply(0x202), 0x204);
    /// assert_eq!(ProgramCounterStep::Repeat.apply(0x202), 0x200);
    /// assert_eq!(ProgramCounterStep::Jump(0x300).apply(0x202), 0x300);
    /// ```
    #[inline]
    pub fn apply(&self, pointer: u16) -> u16 {
        match *self {
            ProgramCounterStep::Next => pointer,
            ProgramCounterStep::Skip => pointer.wrapping_add(memory::opcodes::SIZE),
            ProgramCounterStep::Repeat => pointer.wrapping_sub(memory::opcodes::SIZE),
            ProgramCounterStep::Jump(pointer) => pointer,
        }
    }
}

/// `00E0` and `00EE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    /// Clears the display
    Clear,
    /// Returns from the subroutine
    Return,
}

/// `3XNN`, `4XNN`, `5XY0` and `9XY0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    Equal { x: usize, nn: u8 },
    NotEqual { x: usize, nn: u8 },
    RegisterEqual { x: usize, y: usize },
    RegisterNotEqual { x: usize, y: usize },
}

/// The `8XYN` sub opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    /// `8XY0`
    Assign,
    /// `8XY1`
    Or,
    /// `8XY2`
    And,
    /// `8XY3`
    Xor,
    /// `8XY4`
    Add,
    /// `8XY5`
    Sub,
    /// `8XY6`
    ShiftRight,
    /// `8XY7`
    SubReversed,
    /// `8XYE`
    ShiftLeft,
}

impl ArithmeticOp {
    fn from_nibble(n: u8) -> Option<Self> {
        let op = match n {
            0x0 => ArithmeticOp::Assign,
            0x1 => ArithmeticOp::Or,
            0x2 => ArithmeticOp::And,
            0x3 => ArithmeticOp::Xor,
            0x4 => ArithmeticOp::Add,
            0x5 => ArithmeticOp::Sub,
            0x6 => ArithmeticOp::ShiftRight,
            0x7 => ArithmeticOp::SubReversed,
            0xE => ArithmeticOp::ShiftLeft,
            _ => return None,
        };
        Some(op)
    }
}

/// The `EXNN` sub opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOp {
    /// `EX9E`
    Pressed,
    /// `EXA1`
    NotPressed,
}

impl KeyOp {
    fn from_byte(nn: u8) -> Option<Self> {
        match nn {
            0x9E => Some(KeyOp::Pressed),
            0xA1 => Some(KeyOp::NotPressed),
            _ => None,
        }
    }
}

/// The `FXNN` sub opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOp {
    /// `FX07`
    GetDelayTimer,
    /// `FX0A`
    AwaitKeyPress,
    /// `FX15`
    SetDelayTimer,
    /// `FX18`
    SetSoundTimer,
    /// `FX1E`
    AddVxToI,
    /// `FX29`
    SetIToSprite,
    /// `FX33`
    StoreBCD,
    /// `FX55`
    StoreV0ToVx,
    /// `FX65`
    FillV0ToVx,
}

impl MiscOp {
    fn from_byte(nn: u8) -> Option<Self> {
        let op = match nn {
            0x07 => MiscOp::GetDelayTimer,
            0x0A => MiscOp::AwaitKeyPress,
            0x15 => MiscOp::SetDelayTimer,
            0x18 => MiscOp::SetSoundTimer,
            0x1E => MiscOp::AddVxToI,
            0x29 => MiscOp::SetIToSprite,
            0x33 => MiscOp::StoreBCD,
            0x55 => MiscOp::StoreV0ToVx,
            0x65 => MiscOp::FillV0ToVx,
            _ => return None,
        };
        Some(op)
    }
}

/// A decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcodes {
    System(System),
    /// `1NNN`
    Jump { nnn: u16 },
    /// `2NNN`
    Call { nnn: u16 },
    Skip(Skip),
    /// `6XNN`
    Load { x: usize, nn: u8 },
    /// `7XNN`
    Add { x: usize, nn: u8 },
    /// `8XYN`
    Arithmetic { op: ArithmeticOp, x: usize, y: usize },
    /// `ANNN`
    SetIndex { nnn: u16 },
    /// `BNNN`
    JumpOffset { x: usize, nnn: u16 },
    /// `CXNN`
    Random { x: usize, nn: u8 },
    /// `DXYN`
    Draw { x: usize, y: usize, n: u8 },
    /// `EXNN`
    Key { op: KeyOp, x: usize },
    /// `FXNN`
    Misc { op: MiscOp, x: usize },
}

impl TryFrom<Instruction> for Opcodes {
    type Error = OpcodeError;

    fn try_from(value: Instruction) -> Result<Self, Self::Error> {
        let Instruction {
            opcode,
            nnn,
            nn,
            n,
            x,
            y,
        } = value;

        let res = match value.kind() {
            0x0 => match opcode {
                0x00E0 => Some(Opcodes::System(System::Clear)),
                0x00EE => Some(Opcodes::System(System::Return)),
                _ => None,
            },
            0x1 => Some(Opcodes::Jump { nnn }),
            0x2 => Some(Opcodes::Call { nnn }),
            0x3 => Some(Opcodes::Skip(Skip::Equal { x, nn })),
            0x4 => Some(Opcodes::Skip(Skip::NotEqual { x, nn })),
            0x5 if n == 0 => Some(Opcodes::Skip(Skip::RegisterEqual { x, y })),
            0x6 => Some(Opcodes::Load { x, nn }),
            0x7 => Some(Opcodes::Add { x, nn }),
            0x8 => ArithmeticOp::from_nibble(n).map(|op| Opcodes::Arithmetic { op, x, y }),
            0x9 if n == 0 => Some(Opcodes::Skip(Skip::RegisterNotEqual { x, y })),
            0xA => Some(Opcodes::SetIndex { nnn }),
            0xB => Some(Opcodes::JumpOffset { x, nnn }),
            0xC => Some(Opcodes::Random { x, nn }),
            0xD => Some(Opcodes::Draw { x, y, n }),
            0xE => KeyOp::from_byte(nn).map(|op| Opcodes::Key { op, x }),
            0xF => MiscOp::from_byte(nn).map(|op| Opcodes::Misc { op, x }),
            _ => None,
        };

        res.ok_or(OpcodeError::InvalidOpcode(opcode))
    }
}

impl TryFrom<Opcode> for Opcodes {
    type Error = OpcodeError;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        Opcodes::try_from(Instruction::from(value))
    }
}

/// Anything owning a program counter that can be moved by a [`ProgramCounterStep`].
pub trait ProgramCounter {
    /// will move the program counter by a single step.
    fn step(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents a command from the interpreter up to the driver.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The interpreter is blocked until a key was pressed and released.
    Wait,
    /// The display changed and shall be redrawn.
    Draw,
    /// The opcode is not part of the instruction set and was skipped.
    Unknown(Opcode),
}

/// The instruction set of the machine, one method per opcode group.
///
/// Every method reports how the [`ProgramCounter`] moves afterwards, [`ChipOpcodes::calc`] applies
/// that step once the instruction finished.
pub trait ChipOpcodes: ProgramCounter {
    /// will execute a single decoded opcode and move the program counter accordingly
    fn calc(&mut self, opcode: &Opcodes) -> Result<Operation, ProcessError> {
        let none = |step| (step, Operation::None);

        let (step, operation) = match *opcode {
            Opcodes::System(op) => self.system(op)?,
            Opcodes::Jump { nnn } => none(self.jump(nnn)),
            Opcodes::Call { nnn } => none(self.call(nnn)?),
            Opcodes::Skip(skip) => none(self.skip(skip)),
            Opcodes::Load { x, nn } => none(self.load(x, nn)),
            Opcodes::Add { x, nn } => none(self.add(x, nn)),
            Opcodes::Arithmetic { op, x, y } => none(self.arithmetic(op, x, y)),
            Opcodes::SetIndex { nnn } => none(self.set_index(nnn)),
            Opcodes::JumpOffset { x, nnn } => none(self.jump_offset(x, nnn)),
            Opcodes::Random { x, nn } => none(self.random(x, nn)),
            Opcodes::Draw { x, y, n } => self.draw(x, y, n),
            Opcodes::Key { op, x } => none(self.key(op, x)),
            Opcodes::Misc { op, x } => self.misc(op, x),
        };

        self.step(step);
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn system(&mut self, op: System) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn jump(&self, nnn: u16) -> ProgramCounterStep;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip(&self, skip: Skip) -> ProgramCounterStep;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn load(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XY6` - BitOp    - `Vx=Vy>>1`            - Stores the least significant bit of the source in `VF` and shifts it to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XYE` - BitOp    - `Vx=Vy<<1`            - Stores the most significant bit of the source in `VF` and shifts it to the left by `1`.
    fn arithmetic(&mut self, op: ArithmeticOp, x: usize, y: usize) -> ProgramCounterStep;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn set_index(&mut self, nnn: u16) -> ProgramCounterStep;

    /// - `BNNN` - Flow     - `PC=Vx+NNN`           - Jumps to the address `NNN` plus `VX` (or `V0`).
    fn jump_offset(&self, x: usize, nnn: u16) -> ProgramCounterStep;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random number and `NN`.
    fn random(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels. Each row of `8` pixels is read as bit-coded starting from memory location `I`; `I` value doesn’t change after the execution of this instruction. `VF` is set to `1` if any screen pixels are flipped from set to unset when the sprite is drawn, and to `0` if that doesn’t happen.
    fn draw(&mut self, x: usize, y: usize, n: u8) -> (ProgramCounterStep, Operation);

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&self, op: KeyOp, x: usize) -> ProgramCounterStep;

    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press and release is awaited, and then stored in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the font glyph for `VX`.
    /// - `FX33` - BCD      - `246 / 100 => 2` `246 / 10 => 24 % 10 => 4` `246 % 10 => 6` - Stores the [binary-coded decimal](https://en.wikipedia.org/wiki/Binary-coded_decimal) representation of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) with values from memory starting at address `I`.
    fn misc(&mut self, op: MiscOp, x: usize) -> (ProgramCounterStep, Operation);
}

#[cfg(test)]
mod tests {
    use std::convert::TryInto;

    use super::*;

    #[test]
    fn test_tryfrom_opcode_simple() {
        let value: Opcode = 0x00E0;
        let conv = value.try_into();
        assert_eq!(conv, Ok(Opcodes::System(System::Clear)));
    }

    #[test]
    fn test_tryfrom_opcode_simple_fail() {
        let value: Opcode = 0x00E1;
        let conv: Result<Opcodes, _> = value.try_into();
        assert_eq!(conv, Err(OpcodeError::InvalidOpcode(0x00E1)));
    }

    #[test]
    fn test_instruction_fields() {
        let instruction = Instruction::from(0xD12F);
        assert_eq!(instruction.kind(), 0xD);
        assert_eq!(instruction.nnn, 0x12F);
        assert_eq!(instruction.nn, 0x2F);
        assert_eq!(instruction.n, 0xF);
        assert_eq!(instruction.x, 0x1);
        assert_eq!(instruction.y, 0x2);
    }

    #[test]
    fn test_build_opcode_wraps() {
        let mut memory = vec![0u8; memory::SIZE];
        memory[memory::SIZE - 1] = 0x12;
        memory[0] = 0x34;
        assert_eq!(build_opcode(&memory, memory::SIZE - 1), 0x1234);
        assert_eq!(build_opcode(&memory, memory::SIZE + 1), 0x0000);
    }

    #[test]
    fn test_tryfrom_opcode_multiple() {
        let tests: &[(Opcode, Option<Opcodes>)] = &[
            // Zero
            (0x00EE, Some(Opcodes::System(System::Return))),
            (0x0123, None),
            // One
            (0x1919, Some(Opcodes::Jump { nnn: 0x919 })),
            // Two
            (0x2222, Some(Opcodes::Call { nnn: 0x222 })),
            // Three, Four
            (0x3123, Some(Opcodes::Skip(Skip::Equal { x: 0x1, nn: 0x23 }))),
            (0x4123, Some(Opcodes::Skip(Skip::NotEqual { x: 0x1, nn: 0x23 }))),
            // Five
            (
                0x5120,
                Some(Opcodes::Skip(Skip::RegisterEqual { x: 0x1, y: 0x2 })),
            ),
            (0x5121, None),
            // Six, Seven
            (0x6123, Some(Opcodes::Load { x: 0x1, nn: 0x23 })),
            (0x7123, Some(Opcodes::Add { x: 0x1, nn: 0x23 })),
            // Eight
            (
                0x8126,
                Some(Opcodes::Arithmetic {
                    op: ArithmeticOp::ShiftRight,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (
                0x812E,
                Some(Opcodes::Arithmetic {
                    op: ArithmeticOp::ShiftLeft,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (0x8128, None),
            (0x812F, None),
            // Nine
            (
                0x9120,
                Some(Opcodes::Skip(Skip::RegisterNotEqual { x: 0x1, y: 0x2 })),
            ),
            (0x9121, None),
            // A, B, C, D
            (0xA222, Some(Opcodes::SetIndex { nnn: 0x222 })),
            (0xB322, Some(Opcodes::JumpOffset { x: 0x3, nnn: 0x322 })),
            (0xC123, Some(Opcodes::Random { x: 0x1, nn: 0x23 })),
            (0xD123, Some(Opcodes::Draw { x: 0x1, y: 0x2, n: 0x3 })),
            // E
            (
                0xE19E,
                Some(Opcodes::Key {
                    op: KeyOp::Pressed,
                    x: 0x1,
                }),
            ),
            (
                0xE1A1,
                Some(Opcodes::Key {
                    op: KeyOp::NotPressed,
                    x: 0x1,
                }),
            ),
            (0xE111, None),
            // F
            (
                0xF00A,
                Some(Opcodes::Misc {
                    op: MiscOp::AwaitKeyPress,
                    x: 0x0,
                }),
            ),
            (
                0xF533,
                Some(Opcodes::Misc {
                    op: MiscOp::StoreBCD,
                    x: 0x5,
                }),
            ),
            (
                0xFF65,
                Some(Opcodes::Misc {
                    op: MiscOp::FillV0ToVx,
                    x: 0xF,
                }),
            ),
            (0xF0AA, None),
        ];
        for (value, res) in tests.iter() {
            let conv: Result<Opcodes, _> = (*value).try_into();
            assert_eq!(conv, res.ok_or(OpcodeError::InvalidOpcode(*value)));
        }
    }
}
