//! Frame gating and cancellation for the render worker.
//!
//! The worker only paints while a drag is in progress or after someone asked
//! for a redraw. Between those moments it sleeps on a condition variable
//! instead of spinning.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// Cloneable one-shot stop flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a live token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token and every clone of it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true once cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[derive(Debug, Default)]
struct GateState {
    dragging: bool,
    redraw_pending: bool,
}

/// Decides when the next frame is due.
#[derive(Debug)]
pub struct FrameGate {
    state: Mutex<GateState>,
    wake: Condvar,
    idle_gating: bool,
}

impl FrameGate {
    /// Creates a gate. Without idle gating every wait returns a frame at once.
    #[must_use]
    pub fn new(idle_gating: bool) -> Self {
        Self {
            state: Mutex::new(GateState::default()),
            wake: Condvar::new(),
            idle_gating,
        }
    }

    /// Marks the start of a drag; frames are due until [`FrameGate::end_drag`].
    pub fn begin_drag(&self) {
        self.state.lock().dragging = true;
        self.wake.notify_all();
    }

    /// Marks the end of a drag and schedules one last frame.
    pub fn end_drag(&self) {
        {
            let mut state = self.state.lock();
            state.dragging = false;
            state.redraw_pending = true;
        }
        self.wake.notify_all();
    }

    /// Schedules a single frame.
    pub fn request_redraw(&self) {
        self.state.lock().redraw_pending = true;
        self.wake.notify_all();
    }

    /// Returns true while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.lock().dragging
    }

    /// Wakes every waiter so it can observe a cancelled token.
    pub fn wake_all(&self) {
        let _state = self.state.lock();
        self.wake.notify_all();
    }

    /// Blocks until a frame is due, the token is cancelled, or `timeout`
    /// elapses. Returns true only when a frame should be drawn; a pending
    /// redraw is consumed.
    pub fn wait_for_frame(&self, token: &CancellationToken, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        loop {
            if token.is_cancelled() {
                return false;
            }
            if !self.idle_gating || state.dragging || state.redraw_pending {
                state.redraw_pending = false;
                return true;
            }
            if self.wake.wait_until(&mut state, deadline).timed_out() {
                return false;
            }
        }
    }

    /// Sleeps for `duration` unless the token is cancelled first.
    pub fn pause(&self, token: &CancellationToken, duration: Duration) {
        let deadline = Instant::now() + duration;
        let mut state = self.state.lock();
        while !token.is_cancelled() {
            if self.wake.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
    }
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new(true)
    }
}
