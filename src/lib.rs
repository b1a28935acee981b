//! tinydoom: raster core for a microcontroller Doom port
//!
//! Per tick: the input tracker's held buttons feed `Engine::tick`, the
//! `Renderer` paints a frame from the resulting `GameState` into the
//! `Framebuffer`, and the display transport flushes that buffer.

pub mod config;
pub mod display;
pub mod effects;
pub mod engine;
pub mod error;
pub mod input;
pub mod render;
pub mod util;

pub use display::{quantize_color, Framebuffer, MemoryRegion, Rgb565};
pub use engine::{ArchiveKind, Engine, GameState};
pub use error::{Error, Result};
pub use input::{Button, ButtonSet, InputState};
pub use render::Renderer;
