//! Background render loop.
//!
//! One thread per live surface. It waits on the [`FrameGate`], locks a canvas,
//! paints the shared state and posts the canvas, then sleeps out the rest of
//! the frame interval.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use abacus_ui::{Palette, Renderer};
use tracing::{error, info, trace};

use crate::gate::{CancellationToken, FrameGate};
use crate::shared::SharedAbacus;

/// Longest the loop blocks before re-checking for cancellation.
const IDLE_WAIT: Duration = Duration::from_millis(100);

/// A drawable surface owned by the render thread.
pub trait Surface: Send + 'static {
    /// Canvas handed out for one frame.
    type Canvas: Renderer;

    /// Locks a canvas for drawing, or `None` if the surface is not ready.
    fn lock_canvas(&mut self) -> Option<Self::Canvas>;

    /// Releases a canvas and presents what was drawn on it.
    fn unlock_and_post(&mut self, canvas: Self::Canvas);
}

/// Render loop settings.
#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig {
    /// Minimum time between two frames.
    pub frame_interval: Duration,
    /// Colors to paint with.
    pub palette: Palette,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            palette: Palette::CLASSIC,
        }
    }
}

/// Handle to a running render thread.
///
/// Dropping the handle stops the thread and waits for it.
pub struct RenderWorker<S: Surface> {
    token: CancellationToken,
    gate: Arc<FrameGate>,
    frames: Arc<AtomicU64>,
    handle: Option<JoinHandle<S>>,
}

impl<S: Surface> RenderWorker<S> {
    /// Starts rendering `shared` onto `surface`.
    pub fn spawn(
        surface: S,
        shared: SharedAbacus,
        gate: Arc<FrameGate>,
        config: WorkerConfig,
    ) -> Self {
        let token = CancellationToken::new();
        let frames = Arc::new(AtomicU64::new(0));

        let loop_token = token.clone();
        let loop_gate = Arc::clone(&gate);
        let loop_frames = Arc::clone(&frames);

        let handle = thread::spawn(move || {
            Self::render_loop(surface, &shared, &loop_gate, &loop_token, &loop_frames, config)
        });

        info!(frame_interval = ?config.frame_interval, "render worker started");

        Self {
            token,
            gate,
            frames,
            handle: Some(handle),
        }
    }

    fn render_loop(
        mut surface: S,
        shared: &SharedAbacus,
        gate: &FrameGate,
        token: &CancellationToken,
        frames: &AtomicU64,
        config: WorkerConfig,
    ) -> S {
        while !token.is_cancelled() {
            if !gate.wait_for_frame(token, IDLE_WAIT) {
                continue;
            }

            let started = Instant::now();
            if let Some(mut canvas) = surface.lock_canvas() {
                if shared.render(&mut canvas, &config.palette) {
                    let frame = frames.fetch_add(1, Ordering::Relaxed) + 1;
                    trace!(frame, "frame drawn");
                }
                surface.unlock_and_post(canvas);
            }

            if let Some(remaining) = config.frame_interval.checked_sub(started.elapsed()) {
                gate.pause(token, remaining);
            }
        }
        surface
    }

    /// Number of frames painted so far.
    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Returns true until the worker has been stopped.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stops the thread and waits for it to exit, handing the surface back.
    ///
    /// No frame is drawn after this returns. Calling it again returns `None`.
    pub fn stop(&mut self) -> Option<S> {
        let handle = self.handle.take()?;

        self.token.cancel();
        self.gate.wake_all();

        match handle.join() {
            Ok(surface) => {
                info!(frames = self.frames_drawn(), "render worker stopped");
                Some(surface)
            }
            Err(_) => {
                error!("render worker panicked");
                None
            }
        }
    }
}

impl<S: Surface> Drop for RenderWorker<S> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

impl<S: Surface> std::fmt::Debug for RenderWorker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderWorker")
            .field("running", &self.is_running())
            .field("frames", &self.frames_drawn())
            .finish_non_exhaustive()
    }
}
