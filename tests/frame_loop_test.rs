//! End-to-end: input -> tick -> render over several frames

use std::sync::Arc;
use std::thread;

use tinydoom::display::{HeapRegion, PsramRegion};
use tinydoom::effects::palette;
use tinydoom::input::remote::parse_command;
use tinydoom::{Button, Engine, Error, Framebuffer, InputState, Renderer};

#[test]
fn test_held_keys_drive_state_across_ticks() {
    let mut engine = Engine::new();
    engine.load(b"IWAD").unwrap();
    let input = InputState::new();
    let mut fb = Framebuffer::initialize(320, 240, &mut HeapRegion).unwrap();
    let mut renderer = Renderer::new();

    input.key_down(Button::Up);
    input.key_down(Button::Right);
    for _ in 0..3 {
        engine.tick(&input);
        renderer.render_frame(&mut fb, engine.state());
    }
    input.key_up(Button::Right);
    engine.tick(&input);
    renderer.render_frame(&mut fb, engine.state());

    let state = engine.state();
    assert_eq!(state.player_y, -8);
    assert_eq!(state.angle(), 15);
    assert_eq!(state.frame_count(), 4);
    assert_eq!(renderer.frame(), 4);
    // Crosshair survives every frame
    assert_eq!(fb.get_pixel(160, 120), Some(palette::CROSSHAIR));
}

#[test]
fn test_framebuffer_too_large_for_psram_is_fatal() {
    let mut psram = PsramRegion::new(320 * 240);
    let err = Framebuffer::initialize(320, 240, &mut psram).unwrap_err();
    assert!(matches!(err, Error::Allocation { requested: 153_600, .. }));
}

#[test]
fn test_remote_producer_races_with_ticks() {
    let mut engine = Engine::new();
    engine.load(b"PWAD").unwrap();
    let input = Arc::new(InputState::new());

    let producer = {
        let input = Arc::clone(&input);
        thread::spawn(move || {
            for _ in 0..500 {
                parse_command("down fire").unwrap().apply(&input);
                parse_command(r#"{"pointer": [3, 4]}"#).unwrap().apply(&input);
                parse_command("up fire").unwrap().apply(&input);
            }
            parse_command("down down").unwrap().apply(&input);
        })
    };

    for _ in 0..500 {
        // Only Fire/Down can ever be seen
        let keys = input.current_keys();
        assert_eq!(keys.bits() & !(Button::Fire.bit() | Button::Down.bit()), 0);
        engine.tick(&input);
    }
    producer.join().unwrap();

    assert_eq!(input.pointer(), Some((3, 4)));
    assert!(input.current_keys().contains(Button::Down));
    assert_eq!(engine.state().angle(), 0);
    assert_eq!(engine.state().frame_count(), 500);
}

#[test]
fn test_reload_after_failed_load_restarts_session() {
    let mut engine = Engine::new();
    engine.load(b"IWAD").unwrap();
    let input = InputState::new();
    input.key_down(Button::Left);
    engine.tick(&input);

    assert!(engine.load(b"iwad").is_err());
    assert_eq!(engine.state().angle(), 355);

    engine.load(b"PWAD").unwrap();
    assert_eq!(engine.state().angle(), 0);
    assert_eq!(engine.state().frame_count(), 0);
}
