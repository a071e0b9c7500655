//! The interpreter core, the machine state, the execution of the decoded opcodes and the
//! pretty printing of both.
mod chipset;
mod opcodes;
mod print;

/// reexport chipset structs and data for simpler usage
pub use chipset::*;
