//! Touch gesture state machine.
//!
//! ```text
//!   Idle ──Down/Move on a bead──▶ Holding ──Up/Cancel──▶ Idle (readout shown)
//!    ▲                              │
//!    │                       layout rebuilt
//!    │                              ▼
//!    └──────Down/Up/Cancel────── Cancelled (moves ignored)
//! ```

use std::sync::Arc;

use abacus_core::AbacusError;
use abacus_ui::{Readout, TouchAction, TouchEvent};
use tracing::{debug, warn};

use crate::gate::FrameGate;
use crate::shared::{BeadRef, SharedAbacus};

#[derive(Debug, Clone, Copy)]
struct Held {
    bead: BeadRef,
    /// Pointer x minus the bead's leading edge at grab time.
    grab_dx: f32,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Holding(Held),
    /// The finger that was dragging is still down but its gesture is void.
    Cancelled,
}

/// Turns touch events into bead drags.
pub struct GestureTracker {
    shared: SharedAbacus,
    gate: Arc<FrameGate>,
    readout: Arc<dyn Readout>,
    phase: Phase,
}

impl GestureTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new(shared: SharedAbacus, gate: Arc<FrameGate>, readout: Arc<dyn Readout>) -> Self {
        Self {
            shared,
            gate,
            readout,
            phase: Phase::Idle,
        }
    }

    /// Returns the bead currently held, if any.
    #[must_use]
    pub fn held(&self) -> Option<BeadRef> {
        match self.phase {
            Phase::Holding(held) => Some(held.bead),
            Phase::Idle | Phase::Cancelled => None,
        }
    }

    /// Returns true while the current gesture has been voided and its
    /// remaining moves are ignored.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.phase, Phase::Cancelled)
    }

    /// Feeds one event. Returns true if the event moved or released a bead.
    pub fn handle(&mut self, event: &TouchEvent) -> bool {
        match event.action {
            TouchAction::Down => {
                if self.is_cancelled() {
                    self.phase = Phase::Idle;
                }
                self.track(event)
            }
            TouchAction::Move => self.track(event),
            TouchAction::Up | TouchAction::Cancel => self.release(event.action),
        }
    }

    fn track(&mut self, event: &TouchEvent) -> bool {
        let held = match self.phase {
            Phase::Holding(held) => held,
            Phase::Cancelled => return false,
            Phase::Idle => match self.acquire(event) {
                Some(held) => held,
                None => return false,
            },
        };

        match self.shared.drag(held.bead, event.x - held.grab_dx) {
            Ok(_) => true,
            Err(e @ AbacusError::StaleGesture { .. }) => {
                warn!(error = %e, "dropping gesture");
                self.abandon();
                false
            }
            Err(e) => {
                warn!(error = %e, row = held.bead.row, bead = held.bead.bead, "drag rejected");
                self.abandon();
                false
            }
        }
    }

    /// Scans the coalesced points, oldest first, for a bead to grab.
    fn acquire(&mut self, event: &TouchEvent) -> Option<Held> {
        let (bead, grab_dx) = event
            .points()
            .find_map(|(x, y)| self.shared.grab(x, y).map(|(bead, edge)| (bead, x - edge)))?;

        debug!(row = bead.row, bead = bead.bead, epoch = bead.epoch, "bead grabbed");
        let held = Held { bead, grab_dx };
        self.phase = Phase::Holding(held);
        self.gate.begin_drag();
        Some(held)
    }

    fn release(&mut self, action: TouchAction) -> bool {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::Holding(held) = phase else {
            return false;
        };

        self.gate.end_drag();
        let reading = self.shared.value();
        debug!(row = held.bead.row, bead = held.bead.bead, ?action, %reading, "bead released");
        self.readout.show(reading);
        true
    }

    /// Voids the current gesture without reporting a value.
    ///
    /// Moves are ignored until the finger lifts or a new one goes down.
    pub fn abandon(&mut self) {
        if matches!(self.phase, Phase::Holding(_)) {
            self.gate.end_drag();
            self.phase = Phase::Cancelled;
        }
    }
}

impl std::fmt::Debug for GestureTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureTracker")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
