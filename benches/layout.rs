use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use moodboard::{
    EngineOptions, IntrinsicSize, LayoutConfig, LayoutEngine, LayoutEvent, Logger,
    MemoryDocument, NullSink, Result, SeededRandom, Viewport,
};

const SELECTOR: &str = ".moodboard img";
const ELEMENTS: usize = 48;

fn build_engine() -> Result<LayoutEngine<MemoryDocument, SeededRandom>> {
    let mut doc = MemoryDocument::new(Viewport::new(1440.0, 900.0));
    for idx in 0..ELEMENTS {
        doc.add_image(SELECTOR, format!("moodboard-{idx}.jpg"));
    }
    let options = EngineOptions::default().with_logger(Logger::new(NullSink));
    let mut engine = LayoutEngine::with_options(
        SELECTOR,
        LayoutConfig::default().with_coverage(0.6),
        doc,
        SeededRandom::new(0xC0FFEE),
        options,
    )?;

    let ids: Vec<_> = engine.elements().iter().map(|element| element.id()).collect();
    for (idx, id) in ids.into_iter().enumerate() {
        engine.handle_event(LayoutEvent::ImageLoaded {
            element: id,
            size: IntrinsicSize::new(400.0 + (idx % 7) as f64 * 60.0, 300.0),
        })?;
    }
    Ok(engine)
}

fn resize_storm() -> Vec<LayoutEvent> {
    let mut events = Vec::new();
    for step in 0..60 {
        let width = 900.0 + (step * 12) as f64;
        events.push(LayoutEvent::Resize(Viewport::new(width, 700.0)));
        events.push(LayoutEvent::Tick {
            elapsed: Duration::from_millis(16),
        });
    }
    events.push(LayoutEvent::Tick {
        elapsed: Duration::from_millis(300),
    });
    events
}

fn layout_pass(c: &mut Criterion) {
    let mut engine = build_engine().expect("engine");
    c.bench_function("layout_pass_48", |b| {
        b.iter(|| black_box(engine.layout_pass()));
    });
}

fn resize_script(c: &mut Criterion) {
    let script = resize_storm();
    c.bench_function("resize_storm_48", |b| {
        b.iter(|| {
            let mut engine = build_engine().expect("engine");
            black_box(engine.run_scripted(black_box(script.clone())));
        });
    });
}

criterion_group!(benches, layout_pass, resize_script);
criterion_main!(benches);
