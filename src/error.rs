use std::{error::Error, fmt};

use miette::{miette, LabeledSpan, NamedSource, Report, Severity, SourceSpan};

/// Fatal condition raised while running a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineError {
    DivisionByZero,
    UnsupportedOperation { opcode: u8 },
    OutOfBounds { address: usize },
    /// Push with the stack pointer already at address 0
    StackOverflow,
    InvalidRegister { index: u8 },
}

impl Error for MachineError {}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "Division by zero"),
            Self::UnsupportedOperation { opcode } => {
                write!(f, "Unsupported operation `{:08b}`", opcode)
            }
            Self::OutOfBounds { address } => {
                write!(f, "Address 0x{:02X} is out of bounds", address)
            }
            Self::StackOverflow => write!(f, "Stack overflow"),
            Self::InvalidRegister { index } => write!(f, "Invalid register R{}", index),
        }
    }
}

// Runtime errors

pub fn runtime(error: MachineError, pc: u8) -> Report {
    let (code, help) = match error {
        MachineError::DivisionByZero => (
            "run::div_zero",
            "check the second operand of DIV and MOD before dividing",
        ),
        MachineError::UnsupportedOperation { .. } => (
            "run::unsupported",
            "the program counter may have run into data, check jump targets",
        ),
        MachineError::OutOfBounds { .. } => (
            "run::out_of_bounds",
            "memory holds 256 bytes, check the stack depth and jump targets",
        ),
        MachineError::StackOverflow => (
            "run::stack_overflow",
            "the stack grew past address 0, check for unbalanced PUSH and CALL",
        ),
        MachineError::InvalidRegister { .. } => (
            "run::register",
            "registers are numbered R0 to R7",
        ),
    };
    miette!(
        severity = Severity::Error,
        code = code,
        help = help,
        "{error} (at PC 0x{pc:02X})",
    )
}

// Loader errors

pub fn load_bad_literal(span: SourceSpan, src: NamedSource<String>) -> Report {
    miette!(
        severity = Severity::Error,
        code = "load::bad_lit",
        help = "each instruction line must be 1 to 8 binary digits, optionally followed by a # comment",
        labels = vec![LabeledSpan::at(span, "not an 8-bit binary literal")],
        "Encountered an invalid binary literal",
    )
    .with_source_code(src)
}

pub fn load_too_large(span: SourceSpan, src: NamedSource<String>, max: usize) -> Report {
    miette!(
        severity = Severity::Error,
        code = "load::too_large",
        help = format!("programs may hold at most {max} bytes"),
        labels = vec![LabeledSpan::at(span, "does not fit in memory")],
        "Program image is too large",
    )
    .with_source_code(src)
}
