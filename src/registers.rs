use crate::error::MachineError;

/// Width of a general purpose register.
///
/// Registers are 8 bits wide. Arithmetic wraps around in two's-complement,
/// so an overflowing result is truncated to the low 8 bits instead of failing.
pub type Word = u8;

/// Number of general purpose registers.
pub const REGISTER_COUNT: usize = 8;

/// Register conventionally holding the stack pointer.
pub const SP_REGISTER: u8 = 7;

/// 8x 8-bit registers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    values: [Word; REGISTER_COUNT],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: u8) -> Result<Word, MachineError> {
        self.values
            .get(index as usize)
            .copied()
            .ok_or(MachineError::InvalidRegister { index })
    }

    pub fn set(&mut self, index: u8, value: Word) -> Result<(), MachineError> {
        let slot = self
            .values
            .get_mut(index as usize)
            .ok_or(MachineError::InvalidRegister { index })?;
        *slot = value;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = Word> + '_ {
        self.values.iter().copied()
    }
}
