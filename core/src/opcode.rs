/// # Opcode fields
///
/// Instructions are two bytes, read big-endian from memory. The high nibble
/// picks the instruction group and the remaining nibbles carry operands,
/// depending on the group:
/// - `(_, n, n, n)` a 12-bit address `nnn`
/// - `(_, _, n, n)` an 8-bit immediate `nn`
/// - `(_, _, _, n)` a 4-bit immediate `n` (sprite height, or an ALU selector)
/// - `(_, x, _, _)` register Vx, or the upper bound of V0..=Vx
/// - `(_, _, y, _)` register Vy
pub trait Opcode {
    /// All four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[x___]`
    fn group(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> usize;

    /// `[__y_]`
    fn y(&self) -> usize;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__nn]`
    fn nn(&self) -> u8;

    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (
            self.group(),
            self.x() as u8,
            self.y() as u8,
            self.n(),
        )
    }

    fn group(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> usize {
        ((self & 0x0F00) >> 8) as usize
    }

    fn y(&self) -> usize {
        ((self & 0x00F0) >> 4) as usize
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_into_nibbles() {
        assert_eq!(0xD12Fu16.nibbles(), (0xD, 0x1, 0x2, 0xF));
    }

    #[test]
    fn test_register_fields() {
        let op: u16 = 0x8AB4;
        assert_eq!(op.group(), 0x8);
        assert_eq!(op.x(), 0xA);
        assert_eq!(op.y(), 0xB);
    }

    #[test]
    fn test_immediate_fields() {
        let op: u16 = 0x3C7E;
        assert_eq!(op.n(), 0xE);
        assert_eq!(op.nn(), 0x7E);
        assert_eq!(op.nnn(), 0xC7E);
    }
}
