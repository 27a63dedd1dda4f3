use crate::error::MachineError;
use crate::flags::Flag;
use crate::registers::Word;

/// Operations handled by the arithmetic/logic unit.
///
/// Discriminants are the raw opcode bytes. Every ALU opcode has bit 5 set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum AluOp {
    ADD = 0b1010_0000,
    SUB = 0b1010_0001,
    MUL = 0b1010_0010,
    DIV = 0b1010_0011,
    MOD = 0b1010_0100,
    CMP = 0b1010_0111,
    AND = 0b1010_1000,
    /// Unary, second operand is ignored
    NOT = 0b0110_1001,
    OR = 0b1010_1010,
    XOR = 0b1010_1011,
    SHL = 0b1010_1100,
    SHR = 0b1010_1101,
}

/// Where the result of an ALU operation goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Written back into the first operand register
    Value(Word),
    /// Written to the flags register only
    Flag(Flag),
}

impl AluOp {
    const ALL: [AluOp; 12] = [
        Self::ADD,
        Self::SUB,
        Self::MUL,
        Self::DIV,
        Self::MOD,
        Self::CMP,
        Self::AND,
        Self::NOT,
        Self::OR,
        Self::XOR,
        Self::SHL,
        Self::SHR,
    ];

    pub fn from_opcode(opcode: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|op| *op as u8 == opcode)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ADD => "ADD",
            Self::SUB => "SUB",
            Self::MUL => "MUL",
            Self::DIV => "DIV",
            Self::MOD => "MOD",
            Self::CMP => "CMP",
            Self::AND => "AND",
            Self::NOT => "NOT",
            Self::OR => "OR",
            Self::XOR => "XOR",
            Self::SHL => "SHL",
            Self::SHR => "SHR",
        }
    }

    /// Apply the operation to the values of two registers.
    pub fn apply(self, a: Word, b: Word) -> Result<Outcome, MachineError> {
        let value = match self {
            Self::ADD => a.wrapping_add(b),
            Self::SUB => a.wrapping_sub(b),
            Self::MUL => a.wrapping_mul(b),
            Self::DIV => a.checked_div(b).ok_or(MachineError::DivisionByZero)?,
            Self::MOD => a.checked_rem(b).ok_or(MachineError::DivisionByZero)?,
            Self::CMP => return Ok(Outcome::Flag(Flag::from((a as i8).cmp(&(b as i8))))),
            Self::AND => a & b,
            Self::NOT => !a,
            Self::OR => a | b,
            Self::XOR => a ^ b,
            // Logical shifts; shifting out every bit leaves zero
            Self::SHL => a.checked_shl(b as u32).unwrap_or(0),
            Self::SHR => a.checked_shr(b as u32).unwrap_or(0),
        };
        Ok(Outcome::Value(value))
    }
}
