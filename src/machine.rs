use std::fmt::Write as _;

use crate::alu::{AluOp, Outcome};
use crate::error::MachineError;
use crate::flags::Flag;
use crate::isa::{Decoded, Instruction};
use crate::memory::Memory;
use crate::output::Output;
use crate::registers::{Registers, Word, SP_REGISTER};

/// Initial stack pointer. The stack grows down from here.
pub const SP_INIT: u8 = 0xF4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Halted,
}

/// How the program counter moves after an instruction.
///
/// Only [`Machine::step`] applies this, handlers never touch `pc` themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    /// Move past the instruction
    Next,
    /// Set the program counter
    Jump(u8),
    Halt,
}

/// Represents complete machine state during runtime.
pub struct Machine {
    /// Code, data and stack
    mem: Memory,
    /// 8x 8-bit registers
    reg: Registers,
    /// Program counter
    pc: u8,
    /// Stack pointer, points at the top of the stack
    sp: u8,
    /// Result of the last `CMP`
    flag: Flag,
    state: RunState,
    trace: bool,
}

impl Machine {
    /// Create a machine with `image` loaded at address 0.
    pub fn new(image: &[u8]) -> Result<Self, MachineError> {
        let mut reg = Registers::new();
        reg.set(SP_REGISTER, SP_INIT)?;
        Ok(Self {
            mem: Memory::from_image(image)?,
            reg,
            pc: 0,
            sp: SP_INIT,
            flag: Flag::Uninit,
            state: RunState::Running,
            trace: false,
        })
    }

    /// Emit a trace line before every instruction.
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    pub fn pc(&self) -> u8 {
        self.pc
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn flag(&self) -> Flag {
        self.flag
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn registers(&self) -> &Registers {
        &self.reg
    }

    pub fn memory(&self) -> &Memory {
        &self.mem
    }

    /// Run until halted, or until a fatal error.
    ///
    /// A program which never halts runs forever.
    pub fn run(&mut self, out: &mut impl Output) -> Result<(), MachineError> {
        while self.state == RunState::Running {
            self.step(out)?;
        }
        Ok(())
    }

    /// Execute a single instruction.
    ///
    /// On error the machine is left as it was before the instruction, with the
    /// program counter pointing at it.
    pub fn step(&mut self, out: &mut impl Output) -> Result<RunState, MachineError> {
        if self.state == RunState::Halted {
            return Ok(RunState::Halted);
        }
        if self.trace {
            out.trace(&self.trace());
        }

        let instr = self.fetch()?;
        let next = Self::address(self.pc as usize + instr.size());
        // An instruction running off the end of memory must fail before it has any effect
        if self.falls_through(instr) {
            next?;
        }
        match self.execute(instr, out)? {
            Flow::Next => self.pc = next?,
            Flow::Jump(addr) => self.pc = addr,
            Flow::Halt => self.state = RunState::Halted,
        }
        Ok(self.state)
    }

    /// Decode the instruction at the program counter.
    ///
    /// Only the operand bytes the instruction uses are read, rather than always
    /// the two bytes after the opcode. Each read is bounds checked, so a `HLT`
    /// in the last byte of memory still runs.
    pub fn fetch(&self) -> Result<Instruction, MachineError> {
        let pc = self.pc as usize;
        let opcode = self.mem.read(pc)?;
        let decoded =
            Decoded::from_byte(opcode).ok_or(MachineError::UnsupportedOperation { opcode })?;

        let mut operands = [0; 2];
        for (i, operand) in operands
            .iter_mut()
            .take(decoded.operand_count())
            .enumerate()
        {
            *operand = self.mem.read(pc + 1 + i)?;
        }
        Ok(Instruction::new(decoded, operands))
    }

    /// Whether `instr` would move on to the following instruction.
    fn falls_through(&self, instr: Instruction) -> bool {
        match instr {
            Instruction::Hlt
            | Instruction::Ret
            | Instruction::Call { .. }
            | Instruction::Jmp { .. } => false,
            Instruction::Jeq { .. } => !self.flag.is_equal(),
            Instruction::Jne { .. } => self.flag.is_equal(),
            _ => true,
        }
    }

    fn execute(&mut self, instr: Instruction, out: &mut impl Output) -> Result<Flow, MachineError> {
        match instr {
            Instruction::Ldi { reg, imm } => self.ldi(reg, imm),
            Instruction::Prn { reg } => self.prn(reg, out),
            Instruction::Hlt => Ok(self.hlt(out)),
            Instruction::Push { reg } => self.push(reg),
            Instruction::Pop { reg } => self.pop(reg),
            Instruction::Ret => self.ret(),
            Instruction::Call { reg } => self.call(reg),
            Instruction::Jmp { reg } => self.jmp(reg),
            Instruction::Jeq { reg } => self.jeq(reg),
            Instruction::Jne { reg } => self.jne(reg),
            Instruction::Alu { op, reg_a, reg_b } => self.alu(op, reg_a, reg_b),
        }
    }

    #[inline]
    fn address(addr: usize) -> Result<u8, MachineError> {
        u8::try_from(addr).map_err(|_| MachineError::OutOfBounds { address: addr })
    }

    fn push_val(&mut self, val: Word) -> Result<(), MachineError> {
        // Decrement stack
        self.sp = self.sp.checked_sub(1).ok_or(MachineError::StackOverflow)?;
        // Save onto stack
        self.mem.write(self.sp as usize, val)
    }

    fn pop_val(&mut self) -> Result<Word, MachineError> {
        let val = self.mem.read(self.sp as usize)?;
        self.sp = Self::address(self.sp as usize + 1)?;
        Ok(val)
    }

    fn ldi(&mut self, reg: u8, imm: u8) -> Result<Flow, MachineError> {
        self.reg.set(reg, imm)?;
        Ok(Flow::Next)
    }

    fn prn(&mut self, reg: u8, out: &mut impl Output) -> Result<Flow, MachineError> {
        out.print_value(self.reg.get(reg)?);
        Ok(Flow::Next)
    }

    fn hlt(&mut self, out: &mut impl Output) -> Flow {
        out.halted();
        Flow::Halt
    }

    fn push(&mut self, reg: u8) -> Result<Flow, MachineError> {
        let val = self.reg.get(reg)?;
        self.push_val(val)?;
        Ok(Flow::Next)
    }

    fn pop(&mut self, reg: u8) -> Result<Flow, MachineError> {
        // Check register before touching the stack
        self.reg.get(reg)?;
        let val = self.pop_val()?;
        self.reg.set(reg, val)?;
        Ok(Flow::Next)
    }

    fn call(&mut self, reg: u8) -> Result<Flow, MachineError> {
        let target = self.reg.get(reg)?;
        // Return to the instruction after `CALL reg`
        let ret = Self::address(self.pc as usize + 2)?;
        self.push_val(ret)?;
        Ok(Flow::Jump(target))
    }

    fn ret(&mut self) -> Result<Flow, MachineError> {
        Ok(Flow::Jump(self.pop_val()?))
    }

    fn jmp(&mut self, reg: u8) -> Result<Flow, MachineError> {
        Ok(Flow::Jump(self.reg.get(reg)?))
    }

    fn jeq(&mut self, reg: u8) -> Result<Flow, MachineError> {
        let target = self.reg.get(reg)?;
        if self.flag.is_equal() {
            Ok(Flow::Jump(target))
        } else {
            Ok(Flow::Next)
        }
    }

    fn jne(&mut self, reg: u8) -> Result<Flow, MachineError> {
        let target = self.reg.get(reg)?;
        if self.flag.is_equal() {
            Ok(Flow::Next)
        } else {
            Ok(Flow::Jump(target))
        }
    }

    fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<Flow, MachineError> {
        let a = self.reg.get(reg_a)?;
        let b = match op {
            AluOp::NOT => 0,
            _ => self.reg.get(reg_b)?,
        };
        match op.apply(a, b)? {
            Outcome::Value(val) => self.reg.set(reg_a, val)?,
            Outcome::Flag(flag) => self.flag = flag,
        }
        Ok(Flow::Next)
    }

    /// One line of machine state: `TRACE: PC | OP A B | R0 .. R7 ; INSTR`.
    ///
    /// Bytes past the end of memory are shown as `--`. The decoded instruction
    /// is left off when it cannot be fetched.
    pub fn trace(&self) -> String {
        let byte = |addr: usize| match self.mem.peek(addr) {
            Some(val) => format!("{val:02X}"),
            None => "--".to_string(),
        };
        let pc = self.pc as usize;
        let mut line = format!(
            "TRACE: {:02X} | {} {} {} |",
            pc,
            byte(pc),
            byte(pc + 1),
            byte(pc + 2)
        );
        for val in self.reg.iter() {
            let _ = write!(line, " {val:02X}");
        }
        if let Ok(instr) = self.fetch() {
            let _ = write!(line, " ; {instr}");
        }
        line
    }

    /// Register file, pointers and flags, one per line.
    pub fn dump(&self) -> String {
        let mut dump = String::new();
        for (i, val) in self.reg.iter().enumerate() {
            let _ = writeln!(dump, "R{i} {val}");
        }
        let _ = writeln!(dump, "PC {}", self.pc);
        let _ = writeln!(dump, "SP {}", self.sp);
        let _ = writeln!(dump, "FL {:03b}", self.flag.bits());
        dump
    }
}
