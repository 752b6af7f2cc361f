//! # Abacus Engine
//!
//! The full stack of rows, laid out from a drawing-surface size.
//!
//! ## Geometry
//!
//! Everything derives from one unit, the bead width:
//!
//! ```text
//! unit = min(height / (3·rows + 2), width / (beads + 3))
//!
//!  ┌──────────────────────────────┐  ← border (unit / 2)
//!  │                              │  ← one unit of air
//!  │ ○○○○○○○○○──────              │  row 0  (bead height = 2 units)
//!  │                              │  ← gutter (one unit)
//!  │ ○○○○○○○○○──────              │  row 1
//!  │            ...               │
//!  └──────────────────────────────┘
//! ```
//!
//! Row centers are 1.5 bead heights apart. The whole frame is centered on the
//! surface. A rebuilt engine starts with every row at rest.

use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::decode::{DecodeBands, Reading};
use crate::error::{AbacusError, AbacusResult};
use crate::geometry::{Point, Rect};
use crate::row::{Row, BEAD_ASPECT, MAX_BEADS, TRACK_SLACK};

/// Maximum number of rows (19 decimal digits fit in a `u64`).
pub const MAX_ROWS: usize = 19;

/// Smallest bead width, in device units, that still counts as a usable layout.
pub const MIN_BEAD_WIDTH: f32 = 1.0;

/// Vertical distance between consecutive rows, in bead heights.
pub const ROW_PITCH: f32 = 1.5;

/// The abacus: an ordered stack of rows, row 0 being the most significant.
#[derive(Debug, Clone, PartialEq)]
pub struct AbacusEngine {
    /// Surface size this layout was computed for.
    surface: (f32, f32),
    /// Top-left corner of the frame.
    origin: Point,
    /// Bead width; every other dimension is a multiple of it.
    unit: f32,
    /// The rows, most significant first.
    rows: Vec<Row>,
}

impl AbacusEngine {
    /// Lays out `row_count` rows of nine beads on a `width` x `height` surface.
    ///
    /// # Errors
    ///
    /// See [`AbacusEngine::layout_with`].
    pub fn layout(width: f32, height: f32, row_count: usize) -> AbacusResult<Self> {
        let layout = LayoutConfig {
            rows: row_count,
            beads_per_row: MAX_BEADS,
        };
        Self::layout_with(width, height, &layout, DecodeBands::CANONICAL)
    }

    /// Lays out the configured rows on a `width` x `height` surface.
    ///
    /// # Errors
    ///
    /// - [`AbacusError::InvalidRowCount`] if the row count is 0 or above [`MAX_ROWS`]
    /// - [`AbacusError::InvalidBeadCount`] if the bead count is 0 or above [`MAX_BEADS`]
    /// - [`AbacusError::DegenerateLayout`] if the surface cannot fit a bead of
    ///   at least [`MIN_BEAD_WIDTH`]
    pub fn layout_with(
        width: f32,
        height: f32,
        layout: &LayoutConfig,
        bands: DecodeBands,
    ) -> AbacusResult<Self> {
        let rows = layout.rows;
        let beads = layout.beads_per_row;

        if rows == 0 || rows > MAX_ROWS {
            return Err(AbacusError::InvalidRowCount(rows));
        }
        if beads == 0 || beads > MAX_BEADS {
            return Err(AbacusError::InvalidBeadCount(beads));
        }

        let unit = if width.is_finite() && height.is_finite() {
            (height / (3 * rows + 2) as f32)
                .min(width / (beads + TRACK_SLACK + 1) as f32)
                .floor()
        } else {
            f32::NAN
        };

        if !(unit >= MIN_BEAD_WIDTH) {
            warn!(width, height, rows, unit, "surface too small for abacus layout");
            return Err(AbacusError::DegenerateLayout {
                width,
                height,
                rows,
                bead_width: unit,
            });
        }

        let frame_width = (beads + TRACK_SLACK + 1) as f32 * unit;
        let frame_height = (3 * rows + 2) as f32 * unit;
        let origin = Point::new((width - frame_width) / 2.0, (height - frame_height) / 2.0);
        let border = unit / 2.0;
        let pitch = ROW_PITCH * BEAD_ASPECT * unit;

        let rows = (0..rows)
            .map(|i| {
                let top = origin.y + border + unit + i as f32 * pitch;
                let row_origin = Point::new(origin.x + border, top);
                Row::new(row_origin, unit, beads, bands)
            })
            .collect::<AbacusResult<Vec<_>>>()?;

        debug!(width, height, rows = rows.len(), beads, unit, "abacus laid out");

        Ok(Self {
            surface: (width, height),
            origin,
            unit,
            rows,
        })
    }

    /// Returns the surface size this layout was computed for.
    #[inline]
    #[must_use]
    pub fn surface_size(&self) -> (f32, f32) {
        self.surface
    }

    /// Returns the bead width.
    #[inline]
    #[must_use]
    pub fn bead_width(&self) -> f32 {
        self.unit
    }

    /// Returns the bead height.
    #[inline]
    #[must_use]
    pub fn bead_height(&self) -> f32 {
        self.unit * BEAD_ASPECT
    }

    /// Returns the frame border thickness.
    #[inline]
    #[must_use]
    pub fn border(&self) -> f32 {
        self.unit / 2.0
    }

    /// Returns the number of rows.
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns all rows, most significant first.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns row `index`.
    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Outer bounds of the frame.
    #[must_use]
    pub fn frame_rect(&self) -> Rect {
        let beads = self.rows.first().map_or(MAX_BEADS, Row::bead_count);
        Rect::new(
            self.origin.x,
            self.origin.y,
            (beads + TRACK_SLACK + 1) as f32 * self.unit,
            (3 * self.rows.len() + 2) as f32 * self.unit,
        )
    }

    /// The four border bars of the frame: top, right, bottom, left.
    #[must_use]
    pub fn frame_rects(&self) -> [Rect; 4] {
        let frame = self.frame_rect();
        let border = self.border();
        [
            Rect::new(frame.x, frame.y, frame.width, border),
            Rect::new(frame.right() - border, frame.y, border, frame.height),
            Rect::new(frame.x, frame.bottom() - border, frame.width, border),
            Rect::new(frame.x, frame.y, border, frame.height),
        ]
    }

    /// Returns the row whose bead band contains the point.
    ///
    /// Points on the frame border or in the gutter between rows match nothing.
    #[must_use]
    pub fn row_at(&self, x: f32, y: f32) -> Option<usize> {
        self.rows.iter().position(|row| row.band_rect().contains(x, y))
    }

    /// Resolves a device-space point to `(row, bead)`.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let row = self.row_at(x, y)?;
        let bead = self.rows[row].bead_at(x, y)?;
        Some((row, bead))
    }

    /// Drags a bead so its leading edge follows device-space `x`.
    ///
    /// Returns the bead's resulting row-local offset.
    ///
    /// # Errors
    ///
    /// Returns [`AbacusError::RowOutOfRange`] or [`AbacusError::BeadOutOfRange`]
    /// for indices that do not exist in this layout.
    pub fn drag_bead(&mut self, row: usize, bead: usize, x: f32) -> AbacusResult<f32> {
        let count = self.rows.len();
        self.rows
            .get_mut(row)
            .ok_or(AbacusError::RowOutOfRange { index: row, count })?
            .move_bead_to(bead, x)
    }

    /// Returns every row to rest.
    pub fn reset(&mut self) {
        self.rows.iter_mut().for_each(Row::reset);
    }

    /// The base-10 number spelled by the rows, most significant first.
    ///
    /// One indeterminate row makes the whole abacus indeterminate; digits
    /// already read are discarded.
    #[must_use]
    pub fn value(&self) -> Reading {
        let mut accumulator = 0u64;
        for row in &self.rows {
            match row.value() {
                Reading::Value(digit) => accumulator = accumulator * 10 + digit,
                Reading::Indeterminate => return Reading::Indeterminate,
            }
        }
        Reading::Value(accumulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 360x640 portrait surface, five rows: unit 30, frame at (0, 65).
    fn engine() -> AbacusEngine {
        AbacusEngine::layout(360.0, 640.0, 5).unwrap()
    }

    /// Device x that pushes the last `digit` beads of a row to the far edge.
    fn set_digit(engine: &mut AbacusEngine, row: usize, digit: usize) {
        let r = engine.row(row).unwrap();
        if digit == 0 {
            let x = r.origin().x - 1000.0;
            engine.drag_bead(row, 8, x).unwrap();
            return;
        }
        let first = 9 - digit;
        let x = r.origin().x + r.reachable_max(first);
        engine.drag_bead(row, first, x).unwrap();
    }

    #[test]
    fn test_layout_geometry() {
        let engine = engine();
        assert_eq!(engine.bead_width(), 30.0);
        assert_eq!(engine.bead_height(), 60.0);
        assert_eq!(engine.frame_rect(), Rect::new(0.0, 65.0, 360.0, 510.0));

        let row0 = engine.row(0).unwrap();
        let row1 = engine.row(1).unwrap();
        assert_eq!(row0.origin(), Point::new(15.0, 110.0));
        assert_eq!(row1.origin(), Point::new(15.0, 200.0));
        assert_eq!(row0.track_width(), 330.0);

        // 1.5 bead heights between row centers.
        let pitch = row1.band_rect().center().y - row0.band_rect().center().y;
        assert_eq!(pitch, 1.5 * engine.bead_height());
    }

    #[test]
    fn test_layout_is_centered() {
        let engine = AbacusEngine::layout(1000.0, 400.0, 3).unwrap();
        let frame = engine.frame_rect();
        assert_eq!(engine.bead_width(), 36.0);
        assert!((frame.center().x - 500.0).abs() < 1e-3);
        assert!((frame.center().y - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_rows_fit_inside_frame() {
        for rows in 1..=MAX_ROWS {
            let engine = AbacusEngine::layout(480.0, 800.0, rows).unwrap();
            let frame = engine.frame_rect();
            let border = engine.border();
            for pair in engine.rows().windows(2) {
                assert!(!pair[0].band_rect().intersects(&pair[1].band_rect()));
            }
            for row in engine.rows() {
                let band = row.band_rect();
                assert!(band.x >= frame.x + border - 1e-3);
                assert!(band.right() <= frame.right() - border + 1e-3);
                assert!(band.bottom() <= frame.bottom() - border + 1e-3);
            }
        }
    }

    #[test]
    fn test_degenerate_layout() {
        assert!(matches!(
            AbacusEngine::layout(10.0, 10.0, 5),
            Err(AbacusError::DegenerateLayout { .. })
        ));
        assert!(matches!(
            AbacusEngine::layout(0.0, 640.0, 5),
            Err(AbacusError::DegenerateLayout { .. })
        ));
        assert!(matches!(
            AbacusEngine::layout(f32::NAN, 640.0, 5),
            Err(AbacusError::DegenerateLayout { .. })
        ));
        assert_eq!(AbacusEngine::layout(360.0, 640.0, 0), Err(AbacusError::InvalidRowCount(0)));
        assert_eq!(AbacusEngine::layout(360.0, 640.0, 20), Err(AbacusError::InvalidRowCount(20)));
    }

    #[test]
    fn test_row_at_and_gutter() {
        let engine = engine();
        assert_eq!(engine.row_at(100.0, 140.0), Some(0));
        assert_eq!(engine.row_at(100.0, 230.0), Some(1));
        // Gutter between row 0 (110..170) and row 1 (200..260).
        assert_eq!(engine.row_at(100.0, 185.0), None);
        // Left border.
        assert_eq!(engine.row_at(5.0, 140.0), None);
    }

    #[test]
    fn test_hit_test_rest_centers() {
        let engine = engine();
        for (r, row) in engine.rows().iter().enumerate() {
            for b in 0..row.bead_count() {
                let center = row.bead_rect(b).unwrap().center();
                assert_eq!(engine.hit_test(center.x, center.y), Some((r, b)));
            }
        }
        assert_eq!(engine.hit_test(100.0, 185.0), None);
        // Empty track to the right of the packed beads.
        assert_eq!(engine.hit_test(15.0 + 10.0 * 30.0, 140.0), None);
    }

    #[test]
    fn test_value_concatenates_rows() {
        let mut engine = engine();
        assert_eq!(engine.value(), Reading::Value(0));

        set_digit(&mut engine, 0, 4);
        set_digit(&mut engine, 2, 9);
        set_digit(&mut engine, 4, 1);
        assert_eq!(engine.value(), Reading::Value(40_901));
    }

    #[test]
    fn test_value_short_circuits_on_indeterminate_row() {
        let mut engine = AbacusEngine::layout(360.0, 640.0, 3).unwrap();
        set_digit(&mut engine, 0, 7);
        set_digit(&mut engine, 2, 3);
        assert_eq!(engine.value(), Reading::Value(703));

        let row1 = engine.row(1).unwrap();
        let x = row1.origin().x + 8.75 * row1.bead_width();
        engine.drag_bead(1, 8, x).unwrap();
        assert_eq!(engine.row(1).unwrap().value(), Reading::Indeterminate);
        assert_eq!(engine.value(), Reading::Indeterminate);
    }

    #[test]
    fn test_drag_bad_indices() {
        let mut engine = engine();
        assert_eq!(
            engine.drag_bead(5, 0, 0.0),
            Err(AbacusError::RowOutOfRange { index: 5, count: 5 })
        );
        assert_eq!(
            engine.drag_bead(0, 9, 0.0),
            Err(AbacusError::BeadOutOfRange { index: 9, count: 9 })
        );
    }

    #[test]
    fn test_reset_and_max_value() {
        let mut engine = AbacusEngine::layout(480.0, 800.0, MAX_ROWS).unwrap();
        for row in 0..MAX_ROWS {
            set_digit(&mut engine, row, 9);
        }
        assert_eq!(engine.value(), Reading::Value(9_999_999_999_999_999_999));

        engine.reset();
        assert_eq!(engine.value(), Reading::Value(0));
    }
}
