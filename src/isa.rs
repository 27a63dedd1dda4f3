use std::fmt;

use crate::alu::AluOp;

/// Every non-ALU opcode understood by the machine, keyed by its raw byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Opcode {
    LDI = 0b1000_0010,
    PRN = 0b0100_0111,
    HLT = 0b0000_0001,
    PUSH = 0b0100_0101,
    POP = 0b0100_0110,
    RET = 0b0001_0001,
    CALL = 0b0101_0000,
    JMP = 0b0101_0100,
    JEQ = 0b0101_0101,
    JNE = 0b0101_0110,
}

impl Opcode {
    const ALL: [Opcode; 10] = [
        Self::LDI,
        Self::PRN,
        Self::HLT,
        Self::PUSH,
        Self::POP,
        Self::RET,
        Self::CALL,
        Self::JMP,
        Self::JEQ,
        Self::JNE,
    ];

    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|op| *op as u8 == byte)
    }
}

/// Decoded opcode byte, before operands are read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoded {
    Alu(AluOp),
    Handler(Opcode),
}

impl Decoded {
    /// Decode a raw opcode byte, or `None` if nothing handles it.
    pub fn from_byte(byte: u8) -> Option<Self> {
        if is_alu(byte) {
            AluOp::from_opcode(byte).map(Decoded::Alu)
        } else {
            Opcode::from_byte(byte).map(Decoded::Handler)
        }
    }

    /// Number of operand bytes following the opcode.
    ///
    /// ALU instructions always take two, even when unary.
    pub fn operand_count(self) -> usize {
        match self {
            Self::Alu(_) => 2,
            Self::Handler(op) => operand_bits(op as u8) as usize,
        }
    }
}

/// Top two bits of an opcode.
pub fn operand_bits(byte: u8) -> u8 {
    (byte >> 6) & 0b11
}

/// Bit 5 of an opcode.
pub fn is_alu(byte: u8) -> bool {
    (byte >> 5) & 0b1 == 1
}

/// A complete instruction, with operands attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Load `imm` into `reg`
    Ldi { reg: u8, imm: u8 },
    /// Print the decimal value of `reg`
    Prn { reg: u8 },
    Hlt,
    /// Decrement stack pointer and store `reg` at the top of the stack
    Push { reg: u8 },
    /// Load the top of the stack into `reg` and increment stack pointer
    Pop { reg: u8 },
    /// Pop return address into program counter
    Ret,
    /// Push return address and jump to the address in `reg`
    Call { reg: u8 },
    Jmp { reg: u8 },
    /// Jump if the equal flag is set
    Jeq { reg: u8 },
    /// Jump if the equal flag is not set
    Jne { reg: u8 },
    Alu { op: AluOp, reg_a: u8, reg_b: u8 },
}

impl Instruction {
    /// Attach operands to a decoded opcode.
    ///
    /// Operands beyond [`Decoded::operand_count`] are ignored.
    pub fn new(decoded: Decoded, operands: [u8; 2]) -> Self {
        let [a, b] = operands;
        match decoded {
            Decoded::Alu(op) => Self::Alu {
                op,
                reg_a: a,
                reg_b: b,
            },
            Decoded::Handler(op) => match op {
                Opcode::LDI => Self::Ldi { reg: a, imm: b },
                Opcode::PRN => Self::Prn { reg: a },
                Opcode::HLT => Self::Hlt,
                Opcode::PUSH => Self::Push { reg: a },
                Opcode::POP => Self::Pop { reg: a },
                Opcode::RET => Self::Ret,
                Opcode::CALL => Self::Call { reg: a },
                Opcode::JMP => Self::Jmp { reg: a },
                Opcode::JEQ => Self::Jeq { reg: a },
                Opcode::JNE => Self::Jne { reg: a },
            },
        }
    }

    /// Length in bytes, opcode included.
    pub fn size(&self) -> usize {
        match self {
            Self::Hlt | Self::Ret => 1,
            Self::Ldi { .. } | Self::Alu { .. } => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ldi { reg, imm } => write!(f, "LDI R{reg}, {imm}"),
            Self::Prn { reg } => write!(f, "PRN R{reg}"),
            Self::Hlt => write!(f, "HLT"),
            Self::Push { reg } => write!(f, "PUSH R{reg}"),
            Self::Pop { reg } => write!(f, "POP R{reg}"),
            Self::Ret => write!(f, "RET"),
            Self::Call { reg } => write!(f, "CALL R{reg}"),
            Self::Jmp { reg } => write!(f, "JMP R{reg}"),
            Self::Jeq { reg } => write!(f, "JEQ R{reg}"),
            Self::Jne { reg } => write!(f, "JNE R{reg}"),
            Self::Alu {
                op: AluOp::NOT,
                reg_a,
                ..
            } => write!(f, "NOT R{reg_a}"),
            Self::Alu { op, reg_a, reg_b } => write!(f, "{} R{reg_a}, R{reg_b}", op.name()),
        }
    }
}
