//! Render loop tests: drag/render interleaving, shutdown, idle gating and
//! layout invalidation.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use abacus_core::{AbacusConfig, AbacusError, Reading, Rect};
use abacus_runtime::{
    AbacusView, FrameGate, RecordingSurface, RenderWorker, SharedAbacus, WorkerConfig,
};
use abacus_ui::{NullReadout, RenderCommand, TouchEvent};

const WIDTH: f32 = 1080.0;
const HEIGHT: f32 = 1920.0;
/// Bead width for a 1080x1920 surface with five rows.
const UNIT: f32 = 90.0;
const BEADS: usize = 9;
const TIMEOUT: Duration = Duration::from_secs(5);

fn laid_out() -> SharedAbacus {
    let shared = SharedAbacus::new(AbacusConfig::default());
    shared.resize(WIDTH, HEIGHT).unwrap();
    shared
}

fn fast() -> WorkerConfig {
    WorkerConfig {
        frame_interval: Duration::from_millis(1),
        ..WorkerConfig::default()
    }
}

/// Device-space x of every bead on `row`, read back from a recorded frame.
fn bead_xs(frame: &[RenderCommand], row: usize) -> Vec<f32> {
    frame
        .iter()
        .filter_map(|c| match c {
            RenderCommand::Oval { bounds, .. } => Some(bounds.x),
            _ => None,
        })
        .skip(row * BEADS)
        .take(BEADS)
        .collect()
}

/// Center of a bead rect, as a touch point.
fn grab_point(rect: &Rect) -> (f32, f32) {
    let center = rect.center();
    (center.x, center.y)
}

#[test]
fn test_frames_never_show_overlapping_beads() {
    let shared = laid_out();
    let gate = Arc::new(FrameGate::new(false));
    let (surface, frames) = RecordingSurface::new();
    let mut worker = RenderWorker::spawn(surface, shared.clone(), gate, fast());

    let (point, edge) = shared
        .with_engine(|e| {
            let rect = e.row(2).unwrap().bead_rect(0).unwrap();
            (grab_point(&rect), rect.x)
        })
        .unwrap();
    let bead = shared.hit_test(point.0, point.1).unwrap();
    let mut recorded = vec![frames.recv_timeout(TIMEOUT).unwrap()];

    let dragger = {
        let shared = shared.clone();
        thread::spawn(move || {
            for step in 0..=700 {
                shared.drag(bead, edge + step as f32).unwrap();
                if step % 50 == 0 {
                    thread::sleep(Duration::from_millis(1));
                }
            }
        })
    };
    dragger.join().unwrap();
    assert!(worker.stop().is_some());

    recorded.extend(frames.try_iter());

    let mut last_first = f32::MIN;
    for frame in &recorded {
        let xs = bead_xs(frame, 2);
        assert_eq!(xs.len(), BEADS);
        for pair in xs.windows(2) {
            assert!(pair[1] - pair[0] >= UNIT, "overlapping beads in frame: {xs:?}");
        }
        // Drags only ever moved right, and frames arrive in order.
        assert!(xs[0] >= last_first);
        last_first = xs[0];
    }

    // The most significant rows were never touched.
    assert_eq!(shared.value(), Reading::Value(900));
}

#[test]
fn test_stop_blocks_until_no_more_frames() {
    let gate = Arc::new(FrameGate::new(false));
    let (surface, frames) = RecordingSurface::new();
    let mut worker = RenderWorker::spawn(surface, laid_out(), gate, fast());

    frames.recv_timeout(TIMEOUT).unwrap();
    // Keep the surface alive so the channel stays open.
    let _surface = worker.stop().unwrap();
    let drawn = worker.frames_drawn();

    while frames.try_recv().is_ok() {}
    thread::sleep(Duration::from_millis(50));
    assert!(frames.try_recv().is_err());
    assert_eq!(worker.frames_drawn(), drawn);
}

#[test]
fn test_idle_worker_draws_nothing() {
    let gate = Arc::new(FrameGate::new(true));
    let (surface, frames) = RecordingSurface::new();
    let mut worker = RenderWorker::spawn(surface, laid_out(), Arc::clone(&gate), fast());

    gate.request_redraw();
    frames.recv_timeout(TIMEOUT).unwrap();
    assert!(frames.recv_timeout(Duration::from_millis(150)).is_err());
    assert_eq!(worker.frames_drawn(), 1);

    gate.begin_drag();
    for _ in 0..3 {
        frames.recv_timeout(TIMEOUT).unwrap();
    }
    gate.end_drag();

    thread::sleep(Duration::from_millis(100));
    while frames.try_recv().is_ok() {}
    assert!(frames.recv_timeout(Duration::from_millis(150)).is_err());

    worker.stop();
}

#[test]
fn test_resize_drops_gesture_in_flight() {
    let mut view: AbacusView<RecordingSurface> =
        AbacusView::new(AbacusConfig::default(), Arc::new(NullReadout));
    view.surface_changed(WIDTH, HEIGHT).unwrap();

    let (x, y) = view
        .shared()
        .with_engine(|e| grab_point(&e.row(0).unwrap().bead_rect(0).unwrap()))
        .unwrap();
    let stale = view.shared().hit_test(x, y).unwrap();
    assert!(view.on_touch(&TouchEvent::down(x, y)));

    view.surface_changed(HEIGHT, WIDTH).unwrap();
    assert!(!view.on_touch(&TouchEvent::moved(x + 500.0, y)));
    assert_eq!(
        view.shared().drag(stale, x + 500.0),
        Err(AbacusError::StaleGesture { held: 1, current: 2 })
    );

    // Every row of the rebuilt layout is at rest.
    let at_rest = view
        .shared()
        .with_engine(|e| {
            e.rows()
                .iter()
                .all(|row| (0..row.bead_count()).all(|i| row.offsets()[i] == row.rest_offset(i)))
        })
        .unwrap();
    assert!(at_rest);
    assert_eq!(view.value(), Reading::Value(0));
}

#[test]
fn test_concurrent_rows_compose_one_value() {
    let shared = laid_out();
    let rows = 5;
    let barrier = Arc::new(Barrier::new(rows));

    // Row r is set to digit r + 1 by pushing bead (9 - digit) to the far end.
    let handles: Vec<_> = (0..rows)
        .map(|r| {
            let shared = shared.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let bead = BEADS - (r + 1);
                let (point, far) = shared
                    .with_engine(|e| {
                        let row = e.row(r).unwrap();
                        let rect = row.bead_rect(bead).unwrap();
                        (grab_point(&rect), row.origin().x + row.reachable_max(bead))
                    })
                    .unwrap();
                let grabbed = shared.hit_test(point.0, point.1).unwrap();
                barrier.wait();
                shared.drag(grabbed, far).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(shared.value(), Reading::Value(12_345));
}
