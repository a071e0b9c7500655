use thiserror::Error;

use crate::{chip8::State, opcode::Opcode};

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum ProcessError {
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("The chipset is not running (state {0:?}).")]
    NotRunning(State),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X?}.")]
    InvalidOpcode(Opcode),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Full,
    #[error("Stack is empty!")]
    Empty,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unable to read the rom: {0}")]
    Io(#[from] std::io::Error),
    #[error("The rom is larger than the available memory (max {available} bytes, rom {size} bytes).")]
    TooLarge { size: usize, available: usize },
    #[error("A rom can only be loaded into a fresh chipset (state {0:?}).")]
    InvalidState(State),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum ConfigError {
    #[error("The entry point {0:#06X} has to lie between the font and the end of memory.")]
    EntryPoint(usize),
    #[error("The display needs a positive size, got {width}x{height}.")]
    Display { width: usize, height: usize },
}
