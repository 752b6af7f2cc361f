//! # Abacus Core
//!
//! State engine for a simulated mechanical abacus: a stack of rows, each
//! holding sliding beads whose arrangement encodes one decimal digit.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      ABACUS ENGINE                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  Surface size → layout → Rows → hit-test → drag → decode │
//! │                    ↓                ↓        ↓       ↓    │
//! │                 geometry        (row,bead) push   Reading │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here renders or spawns threads. The engine is plain data that a
//! host wraps in a lock (see `abacus_runtime`).
//!
//! ## Example
//!
//! ```rust
//! use abacus_core::{AbacusEngine, Reading};
//!
//! let mut engine = AbacusEngine::layout(360.0, 640.0, 5)?;
//! assert_eq!(engine.value(), Reading::Value(0));
//!
//! // Push bead 0 of the last row (and every bead after it) to the far edge.
//! let (row, bead) = (4, 0);
//! let x = engine.row(row).map(|r| r.origin().x + r.reachable_max(bead)).unwrap_or_default();
//! engine.drag_bead(row, bead, x)?;
//! assert_eq!(engine.value(), Reading::Value(9));
//! # Ok::<(), abacus_core::AbacusError>(())
//! ```

#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod decode;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod row;

pub use config::{AbacusConfig, LayoutConfig, RenderConfig};
pub use decode::{DecodeBands, Reading};
pub use engine::{AbacusEngine, MAX_ROWS, MIN_BEAD_WIDTH};
pub use error::{AbacusError, AbacusResult};
pub use geometry::{Point, Rect};
pub use row::{Row, MAX_BEADS};
