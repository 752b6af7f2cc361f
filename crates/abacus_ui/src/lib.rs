//! # Abacus UI
//!
//! Everything between the engine and the host's pixels.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     UI PIPELINE                       │
//! ├──────────────────────────────────────────────────────┤
//! │  TouchEvent → (runtime) → AbacusEngine → paint()     │
//! │                                   ↓          ↓        │
//! │                               Readout    Renderer     │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! [`Renderer`] and [`Readout`] are capabilities the host implements. The
//! crate ships [`CommandRenderer`] and [`ChannelReadout`] for hosts that
//! want to consume frames and values on another thread.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod input;
pub mod readout;
pub mod render;
pub mod style;

pub use input::{TouchAction, TouchEvent};
pub use readout::{readout_text, ChannelReadout, NullReadout, Readout, INDETERMINATE_TEXT};
pub use render::{paint, track_rect, CommandRenderer, RenderCommand, Renderer};
pub use style::{Color, Palette};
