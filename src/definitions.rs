/// The definitions

pub mod memory {
    /// The size of the chipset ram
    pub const SIZE: usize = 0x1000; // 4096

    /// The highest address reachable with the 12 bit address field
    pub const ADDRESS_MAX: u16 = 0x0FFF;

    /// opcode information
    pub mod opcodes {
        /// The step used for calculating the program counter increments
        pub const SIZE: u16 = 2;
    }
}

/// The definitions for the cpu
pub mod cpu {
    /// The default starting point for the program
    pub const PROGRAM_COUNTER: usize = 0x0200;
    /// The amount of instructions executed per second by the default driver.
    pub const HERTZ: u64 = 60;
    /// The interval in milliseconds between two driver ticks
    pub const INTERVAL: u64 = 1000 / HERTZ;

    /// The definitions needed for the register
    pub mod register {
        /// The size of the chip set registers
        pub const SIZE: usize = 16;
        /// The last entry of the registers, used as the flag register `VF`
        pub const LAST: usize = SIZE - 1;
    }

    /// The stack definitions
    pub mod stack {
        /// The count of nesting entries ([RCA 1802](https://en.wikipedia.org/wiki/RCA_1802)
        /// allocated `48` bytes for up to `12` levels)
        pub const SIZE: usize = 12;
    }
}

/// The display definitions
pub mod display {
    /// The amount of pixels in a row
    pub const WIDTH: usize = 64;
    /// The amount of rows
    pub const HEIGHT: usize = 32;
    /// The width of a sprite row in pixels
    pub const SPRITE_WIDTH: usize = 8;
    /// The maximum height of a sprite (`N` is a nibble)
    pub const SPRITE_HEIGHT: usize = 15;

    /// The fontset information
    pub mod fontset {
        /// Is the location of the beginning to the font in memory
        pub const LOCATION: usize = 0x000;
        /// The amount of bytes used by a single glyph
        pub const GLYPH_SIZE: usize = 5;
        /// The font set character to be rendered on the screen
        pub const FONTSET: [u8; 80] = [
            0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
            0x20, 0x60, 0x20, 0x20, 0x70, // 1
            0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
            0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
            0x90, 0x90, 0xF0, 0x10, 0x10, // 4
            0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
            0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
            0xF0, 0x10, 0x20, 0x40, 0x40, // 7
            0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
            0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
            0xF0, 0x90, 0xF0, 0x90, 0x90, // A
            0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
            0xF0, 0x80, 0x80, 0x80, 0xF0, // C
            0xE0, 0x90, 0x90, 0x90, 0xE0, // D
            0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
            0xF0, 0x80, 0xF0, 0x80, 0x80, // F
        ];
    }
}

/// The definitions needed for correct keyboard definitions.
pub mod keyboard {
    /// all the different keyboard entries
    pub const SIZE: usize = 16;
}
