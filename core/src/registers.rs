use crate::constants::{FLAG_REGISTER, PROGRAM_START, REGISTER_COUNT};

/// # Registers
/// - (v) sixteen 8-bit registers V0..VF; VF is overwritten by carry, borrow,
///   shift and collision results so programs can't rely on it surviving
/// - (i) a 16-bit index register, used as a memory address
/// - (pc) the program counter, starting at 0x200
///
/// Register indices come from opcode nibbles so they are always below 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterFile {
    v: [u8; REGISTER_COUNT],
    i: u16,
    pc: u16,
}

impl RegisterFile {
    pub fn new() -> Self {
        RegisterFile {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
        }
    }

    pub fn get(&self, x: usize) -> u8 {
        self.v[x]
    }

    pub fn set(&mut self, x: usize, value: u8) {
        self.v[x] = value;
    }

    /// VF = 1 if `raised` else 0
    pub fn set_flag(&mut self, raised: bool) {
        self.v[FLAG_REGISTER] = u8::from(raised);
    }

    /// V0..=Vx
    pub fn range(&self, x: usize) -> &[u8] {
        &self.v[..=x]
    }

    pub fn range_mut(&mut self, x: usize) -> &mut [u8] {
        &mut self.v[..=x]
    }

    pub fn all(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn set_index(&mut self, value: u16) {
        self.i = value;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, address: u16) {
        self.pc = address;
    }

    /// Move past one two-byte instruction
    pub fn advance_pc(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_program_start() {
        let registers = RegisterFile::new();
        assert_eq!(registers.pc(), 0x200);
        assert_eq!(registers.index(), 0);
        assert_eq!(registers.all(), &[0; 16]);
    }

    #[test]
    fn test_advance_moves_two_bytes() {
        let mut registers = RegisterFile::new();
        registers.advance_pc();
        registers.advance_pc();
        assert_eq!(registers.pc(), 0x204);
    }

    #[test]
    fn test_flag_lives_in_vf() {
        let mut registers = RegisterFile::new();
        registers.set_flag(true);
        assert_eq!(registers.get(0xF), 1);
        registers.set_flag(false);
        assert_eq!(registers.get(0xF), 0);
    }

    #[test]
    fn test_range_is_inclusive() {
        let mut registers = RegisterFile::new();
        registers.range_mut(2).copy_from_slice(&[7, 8, 9]);
        assert_eq!(registers.range(2), &[7, 8, 9]);
        assert_eq!(registers.get(3), 0);
    }
}
