//! A CHIP-8 interpreter core.
//!
//! The [`chip8::ChipSet`] holds the full machine state and executes a single instruction per
//! [`chip8::ChipSet::next`] call. The host drives it through the [`Runner`], feeding input via
//! [`devices::KeyboardCommands`] and receiving frames via [`devices::DisplayCommands`].
pub mod chip8;
pub mod config;
pub mod definitions;
pub mod devices;
pub mod display;
pub mod opcode;
pub mod resources;
pub mod timer;
mod error;

// reexporting for convinience
mod runner;
pub use error::*;
pub use runner::*;
