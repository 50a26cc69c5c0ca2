use anyhow::{anyhow, Context, Result};
use sdl2::pixels::PixelFormatEnum;

use c8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use c8_core::Frame;

/// RGB colours for unlit and lit pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub off: [u8; 3],
    pub on: [u8; 3],
}

impl Default for Palette {
    /// Lime on black
    fn default() -> Self {
        Palette {
            off: [0x00, 0x00, 0x00],
            on: [0x00, 0xFF, 0x00],
        }
    }
}

/// # Display
/// Presents a 64x32 frame on an SDL2 window, each pixel blown up to a
/// `scale`-sized square.
///
/// Only gets a call to `render` when the interpreter reports a dirty frame.
/// Failures are returned to the caller; the machine never sees them.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    palette: Palette,
}

impl Display {
    /// Creates a new display bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    /// * `palette` colours for unlit and lit pixels
    pub fn new(sdl: &sdl2::Sdl, scale: u32, palette: Palette) -> Result<Self> {
        let video_subsystem = sdl.video().map_err(|e| anyhow!(e))?;
        let window = video_subsystem
            .window(
                "C8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .context("creating window")?;
        let canvas = window
            .into_canvas()
            .build()
            .context("creating canvas")?;

        Ok(Display { canvas, palette })
    }

    /// Formats a frame as an RGB24 texture: rows concatenated, three bytes per
    /// pixel taken from the palette
    fn frame_to_texture(frame: &Frame, palette: &Palette) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&cell| if cell == 1 { palette.on } else { palette.off })
            .collect()
    }

    /// Formats the frame as an SDL2 RGB24 texture and presents it.
    pub fn render(&mut self, frame: &Frame) -> Result<()> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .context("creating texture")?;

        let pixels = Display::frame_to_texture(frame, &self.palette);
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                for (row, line) in pixels.chunks(DISPLAY_WIDTH * 3).enumerate() {
                    buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
                }
            })
            .map_err(|e| anyhow!(e))?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(|e| anyhow!(e))?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_texture() {
        let mut frame: Frame = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][0..2].copy_from_slice(&[0, 1]);
        frame[1][0..2].copy_from_slice(&[1, 0]);
        let texture = Display::frame_to_texture(&frame, &Palette::default());

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 0, 255, 0]);
        expected[192..198].copy_from_slice(&[0, 255, 0, 0, 0, 0]);

        assert_eq!(texture, expected);
    }

    #[test]
    fn test_palette_applies_to_unlit_pixels() {
        let frame: Frame = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        let palette = Palette {
            off: [1, 2, 3],
            on: [0xFF; 3],
        };
        let texture = Display::frame_to_texture(&frame, &palette);
        assert_eq!(texture.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT * 3);
        assert!(texture.chunks(3).all(|pixel| pixel == [1, 2, 3]));
    }
}
