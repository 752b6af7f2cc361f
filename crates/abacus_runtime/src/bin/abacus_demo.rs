//! Headless abacus run.
//!
//! Lays out a portrait surface, spells the leading digits of pi with scripted
//! drags (one gesture per row) and logs every value the readout receives.
//!
//! Usage: `abacus_demo [config.toml]`. Set `RUST_LOG=debug` to see gestures.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use abacus_core::AbacusConfig;
use abacus_runtime::{AbacusView, RecordingSurface};
use abacus_ui::{readout_text, ChannelReadout, TouchEvent};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SURFACE: (f32, f32) = (1080.0, 1920.0);
const DIGITS: &str = "3141592653589793238";
const STEP: Duration = Duration::from_millis(20);

/// Touch sequence that sets `row` to `digit`, starting from rest.
///
/// Grabs the bead whose push leaves exactly `digit` beads past the gap and
/// drags it to the far end of its reach.
fn digit_gesture(
    view: &AbacusView<RecordingSurface>,
    row: usize,
    digit: usize,
) -> Option<Vec<TouchEvent>> {
    view.shared()
        .with_engine(|engine| {
            let row = engine.row(row)?;
            if digit == 0 || digit > row.bead_count() {
                return None;
            }
            let bead = row.bead_count() - digit;
            let start = row.bead_rect(bead)?.center();
            let travel = row.reachable_max(bead) - row.offsets()[bead];
            Some(vec![
                TouchEvent::down(start.x, start.y),
                TouchEvent::moved(start.x + travel / 2.0, start.y),
                TouchEvent::moved(start.x + travel, start.y),
                TouchEvent::up(start.x + travel, start.y),
            ])
        })
        .flatten()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => AbacusConfig::load(path)?,
        None => AbacusConfig::default(),
    };
    info!(rows = config.layout.rows, beads = config.layout.beads_per_row, "starting abacus demo");

    let (readout, readings) = ChannelReadout::unbounded();
    let (surface, frames) = RecordingSurface::new();
    let mut view = AbacusView::new(config, Arc::new(readout));

    view.surface_created(surface);
    view.surface_changed(SURFACE.0, SURFACE.1)?;

    let digits = DIGITS.chars().filter_map(|c| c.to_digit(10)).take(config.layout.rows);
    for (row, digit) in digits.enumerate() {
        let digit = digit as usize;
        let Some(gesture) = digit_gesture(&view, row, digit) else {
            if digit > config.layout.beads_per_row {
                warn!(row, digit, "digit needs more beads than the row has");
            }
            continue;
        };
        for event in &gesture {
            view.on_touch(event);
            thread::sleep(STEP);
        }
    }

    let value = view.value();
    view.surface_destroyed();

    for reading in readings.try_iter() {
        info!(readout = %readout_text(reading), "readout");
    }
    info!(frames = frames.try_iter().count(), value = %value, "demo finished");

    if value.is_indeterminate() {
        warn!("abacus ended in an indeterminate state");
    }
    Ok(())
}
