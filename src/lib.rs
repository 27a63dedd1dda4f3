// Loading
mod loader;
pub use loader::parse_image;

// Running
mod machine;
pub use machine::{Machine, RunState, SP_INIT};
pub mod alu;
pub mod flags;
pub mod isa;
pub mod memory;
pub mod output;
pub mod registers;

pub mod error;
pub use error::MachineError;

pub mod env;

/// Amount of lines to show as context, each side of focus line (line containing span).
pub const DIAGNOSTIC_CONTEXT_LINES: usize = 4;
