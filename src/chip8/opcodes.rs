use tinyvec::ArrayVec;

use crate::{
    config::JumpOffset,
    definitions::{cpu, display, memory},
    opcode::{
        ArithmeticOp, ChipOpcodes, KeyOp, MiscOp, Operation, ProgramCounterStep, Skip, System,
    },
    ProcessError,
};

use super::ChipSet;

impl ChipOpcodes for ChipSet {
    fn system(&mut self, op: System) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match op {
            System::Clear => {
                self.display.clear();
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            System::Return => {
                let pc = self.pop_stack()?;
                log::debug!("return to {:#06X}", pc);
                Ok((ProgramCounterStep::Jump(pc), Operation::None))
            }
        }
    }

    fn jump(&self, nnn: u16) -> ProgramCounterStep {
        ProgramCounterStep::Jump(nnn)
    }

    fn call(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError> {
        // the program counter already points to the instruction after the call
        self.push_stack(self.program_counter)?;
        log::debug!("call {:#06X} (depth {})", nnn, self.stack.len());
        Ok(ProgramCounterStep::Jump(nnn))
    }

    fn skip(&self, skip: Skip) -> ProgramCounterStep {
        let cond = match skip {
            Skip::Equal { x, nn } => self.registers[x] == nn,
            Skip::NotEqual { x, nn } => self.registers[x] != nn,
            Skip::RegisterEqual { x, y } => self.registers[x] == self.registers[y],
            Skip::RegisterNotEqual { x, y } => self.registers[x] != self.registers[y],
        };
        ProgramCounterStep::cond(cond)
    }

    fn load(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        self.registers[x] = nn;
        ProgramCounterStep::Next
    }

    fn add(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        // let VX overflow, but ignore carry
        self.registers[x] = self.registers[x].wrapping_add(nn);
        ProgramCounterStep::Next
    }

    fn arithmetic(&mut self, op: ArithmeticOp, x: usize, y: usize) -> ProgramCounterStep {
        let quirks = self.config.quirks;
        let vx = self.registers[x];
        let vy = self.registers[y];
        // the source of the shift operations
        let shifted = if quirks.shift_uses_vy { vy } else { vx };
        let reset = if quirks.vf_reset { Some(0) } else { None };

        // the flag is always written after the result, so it wins for `X == F`
        let (res, flag) = match op {
            ArithmeticOp::Assign => (vy, None),
            ArithmeticOp::Or => (vx | vy, reset),
            ArithmeticOp::And => (vx & vy, reset),
            ArithmeticOp::Xor => (vx ^ vy, reset),
            ArithmeticOp::Add => {
                let (res, carry) = vx.overflowing_add(vy);
                (res, Some(carry as u8))
            }
            ArithmeticOp::Sub => (vx.wrapping_sub(vy), Some((vy <= vx) as u8)),
            ArithmeticOp::ShiftRight => (shifted >> 1, Some(shifted & 0x01)),
            ArithmeticOp::SubReversed => (vy.wrapping_sub(vx), Some((vx <= vy) as u8)),
            ArithmeticOp::ShiftLeft => (shifted << 1, Some(shifted >> 7)),
        };

        self.registers[x] = res;
        if let Some(flag) = flag {
            self.registers[cpu::register::LAST] = flag;
        }
        ProgramCounterStep::Next
    }

    fn set_index(&mut self, nnn: u16) -> ProgramCounterStep {
        self.index_register = nnn;
        ProgramCounterStep::Next
    }

    fn jump_offset(&self, x: usize, nnn: u16) -> ProgramCounterStep {
        let offset = match self.config.quirks.jump_offset {
            JumpOffset::V0 => self.registers[0],
            JumpOffset::Vx => self.registers[x],
        };
        ProgramCounterStep::Jump(nnn + offset as u16)
    }

    fn random(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand = [0u8; 1];
        self.rng.fill_bytes(&mut rand);
        self.registers[x] = rand[0] & nn;
        ProgramCounterStep::Next
    }

    fn draw(&mut self, x: usize, y: usize, n: u8) -> (ProgramCounterStep, Operation) {
        let coorx = self.registers[x] as usize;
        let coory = self.registers[y] as usize;

        let index = self.index_register as usize;
        let sprite: ArrayVec<[u8; display::SPRITE_HEIGHT]> =
            (0..n as usize).map(|row| self.read(index + row)).collect();

        let collision = self
            .display
            .draw(coorx, coory, &sprite, self.config.quirks.clip_sprites);
        self.registers[cpu::register::LAST] = collision as u8;

        (ProgramCounterStep::Next, Operation::Draw)
    }

    fn key(&self, op: KeyOp, x: usize) -> ProgramCounterStep {
        // only the low nibble names a key
        let pressed = self.keyboard.is_pressed(self.registers[x]);
        match op {
            KeyOp::Pressed => ProgramCounterStep::cond(pressed),
            KeyOp::NotPressed => ProgramCounterStep::cond(!pressed),
        }
    }

    fn misc(&mut self, op: MiscOp, x: usize) -> (ProgramCounterStep, Operation) {
        let quirks = self.config.quirks;
        let index = self.index_register as usize;

        match op {
            MiscOp::GetDelayTimer => {
                self.registers[x] = self.delay_timer.get_value();
            }
            MiscOp::AwaitKeyPress => match self.keyboard.poll_wait(x) {
                Some(key) => {
                    log::debug!("key {:#X} released, stored in V{:X}", key, x);
                    self.registers[x] = key;
                }
                None => return (ProgramCounterStep::Repeat, Operation::Wait),
            },
            MiscOp::SetDelayTimer => {
                self.delay_timer.set_value(self.registers[x]);
            }
            MiscOp::SetSoundTimer => {
                self.sound_timer.set_value(self.registers[x]);
            }
            MiscOp::AddVxToI => {
                self.index_register = self
                    .index_register
                    .wrapping_add(self.registers[x] as u16);
                if quirks.index_overflow_flag && self.index_register > memory::ADDRESS_MAX {
                    self.registers[cpu::register::LAST] = 1;
                }
            }
            MiscOp::SetIToSprite => {
                let glyph = self.registers[x] as u16 * display::fontset::GLYPH_SIZE as u16;
                self.index_register = display::fontset::LOCATION as u16 + glyph;
            }
            MiscOp::StoreBCD => {
                let r = self.registers[x];
                self.write(index, r / 100); // 246u8 / 100 => 2
                self.write(index + 1, r / 10 % 10); // 246u8 / 10 => 24 % 10 => 4
                self.write(index + 2, r % 10); // 246u8 % 10 => 6
            }
            MiscOp::StoreV0ToVx => {
                for offset in 0..=x {
                    self.write(index + offset, self.registers[offset]);
                }
                if quirks.increment_index {
                    self.index_register = self.index_register.wrapping_add(x as u16 + 1);
                }
            }
            MiscOp::FillV0ToVx => {
                for offset in 0..=x {
                    self.registers[offset] = self.read(index + offset);
                }
                if quirks.increment_index {
                    self.index_register = self.index_register.wrapping_add(x as u16 + 1);
                }
            }
        }
        (ProgramCounterStep::Next, Operation::None)
    }
}
