//! # Abacus Runtime
//!
//! Wires the engine to a host: a lock around the state, a render thread per
//! surface and a gesture tracker on the input thread.
//!
//! ## Threading
//!
//! ```text
//!  input thread                         render thread
//!  ────────────                         ─────────────
//!  TouchEvent                           FrameGate::wait_for_frame
//!     │                                        │
//!  GestureTracker ──drag──▶ SharedAbacus ◀──render── Surface canvas
//!     │                   (one Mutex)
//!  Readout
//! ```
//!
//! Every state operation holds the one lock for its whole duration, so a
//! frame shows either all of a drag step or none of it. Stopping a worker
//! blocks until its thread has exited.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod gate;
pub mod gesture;
pub mod headless;
pub mod shared;
pub mod view;
pub mod worker;

pub use gate::{CancellationToken, FrameGate};
pub use gesture::GestureTracker;
pub use headless::RecordingSurface;
pub use shared::{AbacusState, BeadRef, SharedAbacus};
pub use view::AbacusView;
pub use worker::{RenderWorker, Surface, WorkerConfig};
