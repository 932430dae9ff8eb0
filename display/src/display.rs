use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use machine::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use machine::FrameBuffer;

/// # Display
/// Presents the machine's 64x32 one-bit framebuffer in an SDL2 window.
///
/// `render` is only called when the machine reports a redraw; the window
/// otherwise keeps its last frame.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Opens a window scaled by `scale` pixels per framebuffer cell.
    pub fn new(sdl: &sdl2::Sdl, title: &str, scale: u32) -> Result<Self, String> {
        let video = sdl.video()?;
        let window = video
            .window(
                title,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        Ok(Display { canvas })
    }

    /// Renders a frame by streaming it into an RGB24 texture stretched over
    /// the whole canvas.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        texture.with_lock(None, |buffer: &mut [u8], _pitch: usize| {
            buffer.copy_from_slice(&rgb24(frame));
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    /// Blanks the window, used when the emulator drops back to the menu.
    pub fn blank(&mut self) {
        self.canvas.set_draw_color(sdl2::pixels::Color::BLACK);
        self.canvas.clear();
        self.canvas.present();
    }
}

/// Flattens the framebuffer into concatenated rows of RGB pixels, mapping
/// cell values 0/1 to black/white.
fn rgb24(frame: &FrameBuffer) -> Vec<u8> {
    frame
        .iter()
        .flatten()
        .flat_map(|&cell| [cell * 255; 3])
        .collect()
}
