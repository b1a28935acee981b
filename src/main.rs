//! Host preview: runs the engine core in an SDL2 window
//!
//! The window stands in for the panel transport and the keyboard for the
//! board's buttons. Remote presses can also arrive over MQTT.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use sdl2::keyboard::Keycode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tinydoom::config::{EngineConfig, DEFAULT_CONFIG_PATH};
use tinydoom::display::{Display, InputEvent, PsramRegion, RenderTarget};
use tinydoom::input::keymap::KeyMap;
use tinydoom::input::remote::RemoteInput;
use tinydoom::util::FpsCounter;
use tinydoom::{Engine, Framebuffer, InputState, Renderer};

/// Empty but well-formed IWAD header (no lumps, directory at offset 12),
/// used when no WAD file is configured
const EMPTY_IWAD: &[u8] = b"IWAD\x00\x00\x00\x00\x0c\x00\x00\x00";

/// Quits the preview. Escape is the in-game Menu button.
const QUIT_KEY: Keycode = Keycode::F10;

/// Command line overrides, applied on top of the config file
#[derive(Default)]
struct Args {
    config: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    scale: Option<u32>,
    wad: Option<PathBuf>,
    no_vsync: bool,
}

impl Args {
    fn apply(&self, config: &mut EngineConfig) {
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
        if let Some(s) = self.scale {
            config.scale = s;
        }
        if let Some(wad) = &self.wad {
            config.wad = Some(wad.clone());
        }
        if self.no_vsync {
            config.vsync = false;
        }
    }
}

fn print_help() {
    println!("Usage: tinydoom [OPTIONS]");
    println!();
    println!("Options:");
    println!(
        "  --config PATH, -c PATH    Config file (default: {})",
        DEFAULT_CONFIG_PATH
    );
    println!("  --wad PATH                WAD file to load");
    println!("  --width W, -w W           Framebuffer width");
    println!("  --height H, -h H          Framebuffer height");
    println!("  --resolution WxH, -r WxH  Framebuffer size (e.g., 320x240)");
    println!("  --scale N, -s N           Window pixels per framebuffer pixel");
    println!("  --no-vsync                Disable VSync");
    println!("  --help                    Show this help message");
    println!();
    println!("Controls: arrows/WASD move and turn, Ctrl fire, Space use,");
    println!("          Escape menu, Shift run, F10 quit");
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--no-vsync" => parsed.no_vsync = true,
            "--config" | "-c" => {
                parsed.config = value.map(PathBuf::from);
                i += 1;
            },
            "--wad" => {
                parsed.wad = value.map(PathBuf::from);
                i += 1;
            },
            "--width" | "-w" => {
                parsed.width = value.and_then(|v| v.parse().ok());
                i += 1;
            },
            "--height" | "-h" => {
                parsed.height = value.and_then(|v| v.parse().ok());
                i += 1;
            },
            "--scale" | "-s" => {
                parsed.scale = value.and_then(|v| v.parse().ok());
                i += 1;
            },
            "--resolution" | "-r" => {
                if let Some((w, h)) = value.and_then(|v| v.split_once('x')) {
                    if let (Ok(w), Ok(h)) = (w.parse(), h.parse()) {
                        parsed.width = Some(w);
                        parsed.height = Some(h);
                    }
                }
                i += 1;
            },
            "--help" => {
                print_help();
                std::process::exit(0);
            },
            other => tracing::warn!("Ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    parsed
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tinydoom=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args();
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::load_or_default(DEFAULT_CONFIG_PATH)?,
    };
    args.apply(&mut config);

    // No framebuffer means no output at all, so this is fatal
    let mut psram = PsramRegion::new(config.psram_bytes);
    let mut fb = Framebuffer::initialize(config.width, config.height, &mut psram)
        .context("graphics init failed")?;
    tracing::info!(
        "PSRAM: {} of {} bytes reserved for the framebuffer",
        psram.used(),
        psram.capacity()
    );

    let mut engine = Engine::new();
    match &config.wad {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            if let Err(e) = engine.load(&bytes) {
                tracing::error!("{}: {}; engine stays idle", path.display(), e);
            }
        },
        None => {
            tracing::info!("No WAD configured, starting with an empty IWAD");
            engine.load(EMPTY_IWAD)?;
        },
    }
    engine.load_assets();

    let input = Arc::new(InputState::new());
    input.initialize();
    let keymap = if config.keymap.is_empty() {
        KeyMap::default()
    } else {
        KeyMap::from_names(&config.keymap)
    };

    // Keep the subscriber thread alive for the whole session
    let _remote = config.mqtt.as_ref().and_then(|mqtt| {
        RemoteInput::connect(&mqtt.host, mqtt.port, &mqtt.topic, Arc::clone(&input))
            .map_err(|e| tracing::warn!("Remote input disabled: {}", e))
            .ok()
    });

    let (mut display, texture_creator) =
        Display::with_options("tinydoom", config.width, config.height, config.scale, config.vsync)
            .map_err(|e| anyhow!(e))?;
    let mut target = RenderTarget::with_size(&texture_creator, config.width, config.height)
        .map_err(|e| anyhow!(e))?;
    let mut renderer = Renderer::new();

    let (display_width, display_height) = (display.width(), display.height());
    tracing::info!(
        "Running {}x{} (x{} window), VSync {}",
        display_width,
        display_height,
        config.scale,
        if config.vsync { "on" } else { "off" }
    );

    let mut fps_counter = FpsCounter::new(60);
    let mut since_report = 0.0;

    'main: loop {
        since_report += fps_counter.tick().as_secs_f32();

        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(QUIT_KEY) => break 'main,
                InputEvent::KeyDown(key) => {
                    if let Some(button) = keymap.lookup(key) {
                        input.key_down(button);
                    }
                },
                InputEvent::KeyUp(key) => {
                    if let Some(button) = keymap.lookup(key) {
                        input.key_up(button);
                    }
                },
                InputEvent::PointerMove { x, y } => input.set_pointer(x, y),
            }
        }

        engine.tick(&input);
        renderer.render_frame(&mut fb, engine.state());
        display.present(&mut target, &fb).map_err(|e| anyhow!(e))?;

        if since_report >= 1.0 {
            since_report = 0.0;
            let state = engine.state();
            let (min_fps, max_fps) = fps_counter.min_max_fps();
            tracing::debug!(
                "fps avg {:.0} min {:.0} max {:.0} | frame {} pos ({}, {}) angle {} keys {:#04x}",
                fps_counter.avg_fps(),
                min_fps,
                max_fps,
                state.frame_count(),
                state.player_x,
                state.player_y,
                state.angle(),
                input.current_keys().bits()
            );
        }
    }

    tracing::info!("Exiting after {} frames", engine.state().frame_count());
    Ok(())
}
