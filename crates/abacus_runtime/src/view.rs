//! Host-facing abacus view.
//!
//! Mirrors the lifecycle a platform surface goes through: created, resized
//! any number of times, destroyed. Touch events may arrive at any point and
//! are ignored while nothing is laid out.

use std::sync::Arc;

use abacus_core::{AbacusConfig, AbacusResult, Reading};
use abacus_ui::{Palette, Readout, TouchEvent};
use tracing::{debug, info};

use crate::gate::FrameGate;
use crate::gesture::GestureTracker;
use crate::shared::SharedAbacus;
use crate::worker::{RenderWorker, Surface, WorkerConfig};

/// An interactive abacus bound to a host surface.
pub struct AbacusView<S: Surface> {
    shared: SharedAbacus,
    gate: Arc<FrameGate>,
    gestures: GestureTracker,
    readout: Arc<dyn Readout>,
    worker_config: WorkerConfig,
    worker: Option<RenderWorker<S>>,
}

impl<S: Surface> AbacusView<S> {
    /// Creates a view that reports values to `readout`.
    #[must_use]
    pub fn new(config: AbacusConfig, readout: Arc<dyn Readout>) -> Self {
        let shared = SharedAbacus::new(config);
        let gate = Arc::new(FrameGate::new(config.render.idle_gating));
        let gestures = GestureTracker::new(shared.clone(), Arc::clone(&gate), Arc::clone(&readout));
        Self {
            shared,
            gate,
            gestures,
            readout,
            worker_config: WorkerConfig {
                frame_interval: config.render.frame_interval(),
                palette: Palette::CLASSIC,
            },
            worker: None,
        }
    }

    /// The surface became available: starts rendering onto it.
    ///
    /// A worker still bound to a previous surface is stopped first.
    pub fn surface_created(&mut self, surface: S) {
        drop(self.worker.take());
        self.worker = Some(RenderWorker::spawn(
            surface,
            self.shared.clone(),
            Arc::clone(&self.gate),
            self.worker_config,
        ));
        self.readout.show(self.shared.value());
        self.gate.request_redraw();
    }

    /// The surface was resized: rebuilds the layout with every row at rest.
    ///
    /// A gesture in flight is dropped on its next event.
    ///
    /// # Errors
    ///
    /// Returns the layout error for sizes that cannot fit the abacus. The
    /// view then has no layout until the next successful resize.
    pub fn surface_changed(&mut self, width: f32, height: f32) -> AbacusResult<()> {
        let result = self.shared.resize(width, height);
        debug!(width, height, ok = result.is_ok(), "surface changed");
        self.readout.show(self.shared.value());
        self.gate.request_redraw();
        result
    }

    /// The surface is going away: stops rendering and hands the surface back.
    ///
    /// Blocks until the render thread has exited.
    pub fn surface_destroyed(&mut self) -> Option<S> {
        self.gestures.abandon();
        let surface = self.worker.take().and_then(|mut worker| worker.stop());
        info!("surface destroyed");
        surface
    }

    /// Feeds a touch event. Returns true if it moved or released a bead.
    pub fn on_touch(&mut self, event: &TouchEvent) -> bool {
        self.gestures.handle(event)
    }

    /// Decodes the whole abacus.
    #[must_use]
    pub fn value(&self) -> Reading {
        self.shared.value()
    }

    /// Returns the shared state handle.
    #[must_use]
    pub fn shared(&self) -> &SharedAbacus {
        &self.shared
    }

    /// Returns true while a render worker is attached.
    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.worker.is_some()
    }

    /// Frames painted by the current worker, 0 if none is attached.
    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        self.worker.as_ref().map_or(0, RenderWorker::frames_drawn)
    }
}

impl<S: Surface> std::fmt::Debug for AbacusView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbacusView")
            .field("gestures", &self.gestures)
            .field("worker", &self.worker)
            .finish_non_exhaustive()
    }
}
