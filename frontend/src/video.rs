use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};

/// SDL window plus renderer, letterboxed to the DMG's 10:9 aspect.
pub struct Video {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    native_width: u32,
    native_height: u32,
}

impl Video {
    pub fn new(
        sdl_video: &sdl2::VideoSubsystem,
        title: &str,
        native_width: u32,
        native_height: u32,
        scale: u32,
    ) -> Self {
        let window = sdl_video
            .window(title, native_width * scale, native_height * scale)
            .position_centered()
            .resizable()
            .build()
            .expect("Failed to create window");

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .expect("Failed to create canvas");

        // The renderer scales the native resolution up for us and
        // letterboxes when the window aspect does not match.
        canvas
            .set_logical_size(native_width, native_height)
            .expect("Failed to set logical size");
        canvas.set_draw_color(Color::RGB(0, 0, 0));

        let texture_creator = canvas.texture_creator();

        Self {
            canvas,
            texture_creator,
            native_width,
            native_height,
        }
    }

    /// Blit one RGB24 frame and flip.
    pub fn present(&mut self, framebuffer: &[u8]) {
        let mut texture = self
            .texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                self.native_width,
                self.native_height,
            )
            .expect("Failed to create texture");

        let pitch = (self.native_width * 3) as usize;
        texture
            .update(None, framebuffer, pitch)
            .expect("Failed to update texture");

        self.canvas.clear();
        self.canvas
            .copy(&texture, None, None)
            .expect("Failed to copy texture");
        self.canvas.present();
    }
}
