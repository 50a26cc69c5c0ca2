use crate::constants::{MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Fault;

/// # Memory
/// 4K of flat, byte-addressable RAM.
///
/// ```text
/// 0x000-0x04F  sprite sheet (hex digit glyphs)
/// 0x050-0x1FF  unused
/// 0x200-0xFFF  program
/// ```
///
/// Addresses are taken as `usize` so that `I + offset` never wraps before it
/// is checked; anything at or past `MEMORY_SIZE` is a fault.
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    /// Zeroed memory with the sprite sheet in place
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: vec![0; MEMORY_SIZE].into_boxed_slice(),
        };
        memory.load_font();
        memory
    }

    /// Zero everything and restore the sprite sheet
    pub fn reset(&mut self) {
        self.bytes.iter_mut().for_each(|b| *b = 0);
        self.load_font();
    }

    /// Overwrite 0x000..0x050 with the sprite sheet
    pub fn load_font(&mut self) {
        self.bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
    }

    /// Copy a ROM image into memory from `PROGRAM_START`
    ///
    /// Images that would run past 0xFFF are rejected rather than truncated.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<(), Fault> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Fault::ProgramTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        self.slice_mut(PROGRAM_START as usize, rom.len())?
            .copy_from_slice(rom);
        Ok(())
    }

    pub fn read(&self, address: usize) -> Result<u8, Fault> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(Fault::OutOfBoundsAccess { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<(), Fault> {
        let byte = self
            .bytes
            .get_mut(address)
            .ok_or(Fault::OutOfBoundsAccess { address })?;
        *byte = value;
        Ok(())
    }

    /// Two consecutive bytes combined big-endian, as instructions are stored
    pub fn read_word(&self, address: usize) -> Result<u16, Fault> {
        let high = u16::from(self.read(address)?);
        let low = u16::from(self.read(address + 1)?);
        Ok(high << 8 | low)
    }

    /// `len` bytes starting at `address`
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8], Fault> {
        let end = Self::checked_end(address, len)?;
        Ok(&self.bytes[address..end])
    }

    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8], Fault> {
        let end = Self::checked_end(address, len)?;
        Ok(&mut self.bytes[address..end])
    }

    /// Reports the first out-of-range address of `address..address + len`
    fn checked_end(address: usize, len: usize) -> Result<usize, Fault> {
        let end = address + len;
        if end > MEMORY_SIZE {
            Err(Fault::OutOfBoundsAccess {
                address: address.max(MEMORY_SIZE),
            })
        } else {
            Ok(end)
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
