use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// A full copy of the screen, indexed as `[y][x]`; 1 is lit, 0 is unlit
pub type Frame = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Frame buffer
/// 64x32 monochrome pixels stored row by row.
///
/// Sprites are XORed onto the buffer: drawing the same sprite twice in the
/// same place erases it again. Coordinates wrap around both edges, so every
/// write lands inside the grid.
///
/// Any change sets the dirty flag, which the renderer clears with
/// `take_dirty` once it has drawn the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer {
    cells: Frame,
    dirty: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            cells: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.cells = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XOR `sprite` onto the buffer with its top-left corner at `(x, y)`.
    ///
    /// Each byte is one 8-pixel row, most significant bit leftmost.
    /// Returns true if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (y as usize + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                let pixel = (byte >> (7 - bit)) & 1;
                if pixel == 0 {
                    continue;
                }
                let px = (x as usize + bit) % DISPLAY_WIDTH;
                let cell = &mut self.cells[py][px];
                collision |= *cell == 1;
                *cell ^= 1;
            }
        }
        self.dirty = true;
        collision
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.cells[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH] == 1
    }

    /// Copy of the whole grid for rendering
    pub fn snapshot(&self) -> Frame {
        self.cells
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the dirty flag and clears it
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(buffer: &FrameBuffer) -> usize {
        buffer
            .snapshot()
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == 1)
            .count()
    }

    #[test]
    fn test_draws_sprite_rows() {
        let mut buffer = FrameBuffer::new();
        buffer.draw_sprite(1, 1, &[0xF0, 0x90]);
        let frame = buffer.snapshot();
        assert_eq!(frame[1][0..6], [0, 1, 1, 1, 1, 0]);
        assert_eq!(frame[2][0..6], [0, 1, 0, 0, 1, 0]);
        assert_eq!(lit(&buffer), 6);
    }

    #[test]
    fn test_xors_existing_pixels() {
        let mut buffer = FrameBuffer::new();
        // 0 1 0 1 -> set
        buffer.draw_sprite(2, 0, &[0x50]);
        // 1 1 0 0 -> xor
        let collision = buffer.draw_sprite(2, 0, &[0xC0]);
        assert_eq!(buffer.snapshot()[0][2..6], [1, 0, 0, 1]);
        assert!(collision);
    }

    #[test]
    fn test_no_collision_on_blank_buffer() {
        let mut buffer = FrameBuffer::new();
        assert!(!buffer.draw_sprite(10, 10, &[0xFF, 0xFF]));
    }

    #[test]
    fn test_wraps_horizontally() {
        let mut buffer = FrameBuffer::new();
        buffer.draw_sprite(63, 0, &[0x80 | 0x40]);
        assert!(buffer.pixel(63, 0));
        assert!(buffer.pixel(0, 0));
        assert_eq!(lit(&buffer), 2);
    }

    #[test]
    fn test_wraps_vertically() {
        let mut buffer = FrameBuffer::new();
        buffer.draw_sprite(0, 31, &[0x80, 0x80]);
        assert!(buffer.pixel(0, 31));
        assert!(buffer.pixel(0, 0));
    }

    #[test]
    fn test_origin_past_edge_wraps() {
        let mut buffer = FrameBuffer::new();
        buffer.draw_sprite(64 + 3, 32 + 2, &[0x80]);
        assert!(buffer.pixel(3, 2));
    }

    #[test]
    fn test_second_draw_erases() {
        let mut buffer = FrameBuffer::new();
        let sprite = [0x3C, 0x42, 0x81];
        assert!(!buffer.draw_sprite(60, 30, &sprite));
        assert!(buffer.draw_sprite(60, 30, &sprite));
        assert_eq!(lit(&buffer), 0);
    }

    #[test]
    fn test_clear_blanks_and_dirties() {
        let mut buffer = FrameBuffer::new();
        buffer.draw_sprite(0, 0, &[0xFF]);
        buffer.take_dirty();
        buffer.clear();
        assert_eq!(lit(&buffer), 0);
        assert!(buffer.is_dirty());
    }

    #[test]
    fn test_take_dirty_clears_flag() {
        let mut buffer = FrameBuffer::new();
        assert!(!buffer.is_dirty());
        buffer.draw_sprite(0, 0, &[]);
        assert!(buffer.take_dirty());
        assert!(!buffer.take_dirty());
    }
}
