use crate::error::MachineError;

/// LS-8 can address 256 bytes of memory.
pub const MEMORY_MAX: usize = 0x100;

/// Flat byte-addressed memory, shared by code, data and the stack.
#[derive(Clone)]
pub struct Memory {
    cells: [u8; MEMORY_MAX],
}

impl Memory {
    pub fn new() -> Self {
        Self {
            cells: [0; MEMORY_MAX],
        }
    }

    /// Copy a program image into memory, starting at address 0.
    pub fn from_image(image: &[u8]) -> Result<Self, MachineError> {
        if image.len() > MEMORY_MAX {
            return Err(MachineError::OutOfBounds {
                address: image.len(),
            });
        }
        let mut memory = Self::new();
        memory.cells[..image.len()].copy_from_slice(image);
        Ok(memory)
    }

    pub fn read(&self, address: usize) -> Result<u8, MachineError> {
        self.cells
            .get(address)
            .copied()
            .ok_or(MachineError::OutOfBounds { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<(), MachineError> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(MachineError::OutOfBounds { address })?;
        *cell = value;
        Ok(())
    }

    /// Read without failing, for diagnostics only.
    pub fn peek(&self, address: usize) -> Option<u8> {
        self.cells.get(address).copied()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
