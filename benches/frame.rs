use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tinydoom::display::HeapRegion;
use tinydoom::{quantize_color, Button, Engine, Framebuffer, InputState, Renderer};

fn bench_render_frame(c: &mut Criterion) {
    let mut fb = Framebuffer::initialize(320, 240, &mut HeapRegion).unwrap();
    let mut engine = Engine::new();
    engine.load(b"IWAD").unwrap();
    let mut renderer = Renderer::new();

    c.bench_function("render_frame_320x240", |b| {
        b.iter(|| {
            renderer.render_frame(&mut fb, black_box(engine.state()));
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut engine = Engine::new();
    engine.load(b"IWAD").unwrap();
    let input = InputState::new();
    input.key_down(Button::Up);
    input.key_down(Button::Left);

    c.bench_function("engine_tick", |b| {
        b.iter(|| {
            engine.tick(black_box(&input));
        })
    });
}

fn bench_lines(c: &mut Criterion) {
    let mut fb = Framebuffer::initialize(320, 240, &mut HeapRegion).unwrap();
    let color = quantize_color(255, 128, 0);

    c.bench_function("draw_line_fan", |b| {
        b.iter(|| {
            for x in (0..320).step_by(8) {
                fb.draw_line(160, 120, black_box(x), 0, color);
                fb.draw_line(160, 120, black_box(x), 239, color);
            }
        })
    });
}

criterion_group!(benches, bench_render_frame, bench_tick, bench_lines);
criterion_main!(benches);
