//! Abacus rendering.
//!
//! Painting targets the [`Renderer`] capability, which only needs a clear and
//! two fill primitives. [`CommandRenderer`] records the calls instead of
//! rasterizing them so a host can replay or batch them.

use abacus_core::{AbacusEngine, Rect, Row};

use crate::style::{Color, Palette};

/// Raster primitives supplied by the host.
pub trait Renderer {
    /// Fills the whole surface.
    fn clear(&mut self, color: Color);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fills the oval inscribed in `rect`.
    fn fill_oval(&mut self, rect: Rect, color: Color);
}

/// A recorded renderer call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
    /// Whole-surface fill.
    Clear {
        /// Fill color.
        color: Color,
    },
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// Filled oval.
    Oval {
        /// Bounding box.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
}

/// Renderer that records every call as a [`RenderCommand`].
#[derive(Debug, Clone, Default)]
pub struct CommandRenderer {
    commands: Vec<RenderCommand>,
}

impl CommandRenderer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(128),
        }
    }

    /// Returns the recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Returns the number of recorded ovals.
    #[must_use]
    pub fn oval_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Oval { .. }))
            .count()
    }
}

impl Renderer for CommandRenderer {
    fn clear(&mut self, color: Color) {
        self.commands.push(RenderCommand::Clear { color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(RenderCommand::Rect { bounds: rect, color });
    }

    fn fill_oval(&mut self, rect: Rect, color: Color) {
        self.commands.push(RenderCommand::Oval { bounds: rect, color });
    }
}

/// The bar a row's beads slide on: half a bead wide (rounded down to an even
/// number of units), centered on the bead band.
#[must_use]
pub fn track_rect(row: &Row) -> Rect {
    let mut thickness = (row.bead_width() / 2.0).floor();
    thickness -= thickness % 2.0;
    let band = row.band_rect();
    let mid = band.y + band.height / 2.0;
    Rect::new(band.x, mid - thickness / 2.0, band.width, thickness)
}

/// Paints one full frame of the abacus.
///
/// Order: background, frame bars, then for each row its track followed by
/// its beads.
pub fn paint<R: Renderer + ?Sized>(engine: &AbacusEngine, renderer: &mut R, palette: &Palette) {
    renderer.clear(palette.background);

    for bar in engine.frame_rects() {
        renderer.fill_rect(bar, palette.frame);
    }

    for row in engine.rows() {
        renderer.fill_rect(track_rect(row), palette.track);
        for bead in (0..row.bead_count()).filter_map(|i| row.bead_rect(i)) {
            renderer.fill_oval(bead, palette.bead);
        }
    }
}
