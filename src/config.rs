//! Runtime configuration of the chipset.
//!
//! CHIP-8 derived machines disagree on a handful of opcodes. The [`Quirks`] toggles select
//! which interpretation the interpreter follows, so the same engine can run programs written
//! for different hardware.
use crate::{
    definitions::{cpu, display, memory},
    ConfigError,
};

/// Selects the register added to `NNN` by the `BNNN` jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOffset {
    /// `PC = V0 + NNN` (COSMAC VIP)
    V0,
    /// `PC = VX + NNN`, where `X` is the top nibble of `NNN` (CHIP-48, SUPER-CHIP)
    Vx,
}

/// The divergent opcode behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY1`, `8XY2` and `8XY3` reset `VF` to `0`.
    pub vf_reset: bool,
    /// `8XY6` and `8XYE` shift `VY` into `VX`, otherwise `VX` is shifted in place.
    pub shift_uses_vy: bool,
    /// The register used as the offset of `BNNN`.
    pub jump_offset: JumpOffset,
    /// `FX55` and `FX65` leave `I` pointing behind the last accessed address.
    pub increment_index: bool,
    /// `FX1E` sets `VF` to `1` when `I` leaves the 12 bit address space.
    pub index_overflow_flag: bool,
    /// `DXYN` clips sprites at the right and bottom edge, otherwise they wrap around.
    pub clip_sprites: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            vf_reset: true,
            shift_uses_vy: true,
            jump_offset: JumpOffset::Vx,
            increment_index: false,
            index_overflow_flag: true,
            clip_sprites: true,
        }
    }
}

impl Quirks {
    /// The behaviour of the original COSMAC VIP interpreter.
    pub fn cosmac_vip() -> Self {
        Self {
            vf_reset: true,
            shift_uses_vy: true,
            jump_offset: JumpOffset::V0,
            increment_index: true,
            index_overflow_flag: false,
            clip_sprites: true,
        }
    }

    /// The behaviour of the SUPER-CHIP (and most modern interpreters).
    pub fn super_chip() -> Self {
        Self {
            vf_reset: false,
            shift_uses_vy: false,
            jump_offset: JumpOffset::Vx,
            increment_index: false,
            index_overflow_flag: false,
            clip_sprites: true,
        }
    }
}

/// The configuration a [`ChipSet`](crate::chip8::ChipSet) is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Where the program is loaded and execution starts.
    pub entry_point: usize,
    /// The amount of pixels in a display row.
    pub display_width: usize,
    /// The amount of display rows.
    pub display_height: usize,
    pub quirks: Quirks,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entry_point: cpu::PROGRAM_COUNTER,
            display_width: display::WIDTH,
            display_height: display::HEIGHT,
            quirks: Quirks::default(),
        }
    }
}

impl Config {
    pub fn with_entry_point(mut self, entry_point: usize) -> Self {
        self.entry_point = entry_point;
        self
    }

    pub fn with_display(mut self, width: usize, height: usize) -> Self {
        self.display_width = width;
        self.display_height = height;
        self
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    /// Checks that a chipset can be built from this configuration.
    ///
    /// # Example
    /// ```rust
    /// # use chip::config::Config;
    /// # use chip::ConfigError;
    /// assert!(Config::default().validate().is_ok());
    /// assert_eq!(
    ///     Config::default().with_entry_point(0x10).validate(),
    ///     Err(ConfigError::EntryPoint(0x10))
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let font_end = display::fontset::LOCATION + display::fontset::FONTSET.len();
        let last = memory::SIZE - memory::opcodes::SIZE as usize;
        if self.entry_point < font_end || self.entry_point > last {
            return Err(ConfigError::EntryPoint(self.entry_point));
        }
        if self.display_width == 0 || self.display_height == 0 {
            return Err(ConfigError::Display {
                width: self.display_width,
                height: self.display_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quirks() {
        let quirks = Quirks::default();
        assert!(quirks.vf_reset);
        assert!(quirks.shift_uses_vy);
        assert_eq!(quirks.jump_offset, JumpOffset::Vx);
        assert!(!quirks.increment_index);
        assert!(quirks.index_overflow_flag);
        assert!(quirks.clip_sprites);
    }

    #[test]
    fn test_invalid_display() {
        let config = Config::default().with_display(0, 32);
        assert_eq!(
            config.validate(),
            Err(ConfigError::Display {
                width: 0,
                height: 32
            })
        );
    }

    #[test]
    fn test_entry_point_bounds() {
        assert!(Config::default().with_entry_point(0x50).validate().is_ok());
        assert!(Config::default().with_entry_point(0xFFE).validate().is_ok());
        assert!(Config::default().with_entry_point(0xFFF).validate().is_err());
        assert!(Config::default().with_entry_point(0x4F).validate().is_err());
    }
}
