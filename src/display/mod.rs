mod color;
mod framebuffer;
mod memory;

pub use color::{quantize_color, Rgb565};
pub use framebuffer::Framebuffer;
pub use memory::{HeapRegion, MemoryRegion, PsramRegion};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

/// Panel resolution of the target board
pub const DEFAULT_WIDTH: u32 = 320;
pub const DEFAULT_HEIGHT: u32 = 240;

/// Host-side stand-in for the panel transport: an SDL2 window that the
/// finished framebuffer is flushed to each frame.
pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
    scale: u32,
}

/// Streaming RGB565 texture the framebuffer is copied into
pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    KeyUp(Keycode),
    /// Pointer position in framebuffer coordinates (window scale removed)
    PointerMove { x: i32, y: i32 },
}

impl Display {
    /// Create a window `scale` times the framebuffer size
    /// vsync=true: locked to monitor refresh (typically 60fps)
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        scale: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let scale = scale.max(1);
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width * scale, height * scale)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
                scale,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flush a finished frame. The framebuffer is only read.
    pub fn present(&mut self, target: &mut RenderTarget, fb: &Framebuffer) -> Result<(), String> {
        if fb.width() != target.width || fb.height() != target.height {
            return Err(format!(
                "framebuffer {}x{} does not match render target {}x{}",
                fb.width(),
                fb.height(),
                target.width,
                target.height
            ));
        }

        target.texture.with_lock(None, |bytes: &mut [u8], pitch: usize| {
            for (row, dst) in fb.rows().zip(bytes.chunks_exact_mut(pitch)) {
                for (pixel, out) in row.iter().zip(dst.chunks_exact_mut(2)) {
                    out.copy_from_slice(&pixel.raw().to_ne_bytes());
                }
            }
        })?;

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let scale = self.scale as i32;

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k),
                    repeat: false,
                    ..
                } => events.push(InputEvent::KeyDown(k)),
                Event::KeyUp {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyUp(k)),
                Event::MouseMotion { x, y, .. } | Event::MouseButtonDown { x, y, .. } => {
                    events.push(InputEvent::PointerMove {
                        x: x / scale,
                        y: y / scale,
                    });
                },
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB565, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}
