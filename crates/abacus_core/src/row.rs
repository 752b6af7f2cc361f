//! # Row
//!
//! One horizontal track holding a fixed number of sliding beads.
//!
//! ```text
//!  origin
//!    ▼
//!    ┌──┬──┬──┬──┬──┬──┬──┬──┬──┬─────┐
//!    │0 │1 │2 │3 │4 │5 │6 │7 │8 │     │   rest configuration
//!    └──┴──┴──┴──┴──┴──┴──┴──┴──┴─────┘
//!    |<-------- track_width (n + 2) ------->|
//! ```
//!
//! Offsets are the beads' leading (left) edges in row-local device units.
//! Beads counted into the digit are the ones pushed against the far (right)
//! edge; the two bead widths of slack form the visible split.

use tracing::trace;

use crate::decode::{DecodeBands, Reading};
use crate::error::{AbacusError, AbacusResult};
use crate::geometry::{Point, Rect};

/// Maximum beads on a row (one decimal digit).
pub const MAX_BEADS: usize = 9;

/// Bead height as a multiple of its width.
pub const BEAD_ASPECT: f32 = 2.0;

/// Bead widths of free track beyond the packed beads.
pub const TRACK_SLACK: usize = 2;

/// A single row of beads.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Device-space top-left corner of the row's bead band.
    origin: Point,
    /// Width of one bead.
    bead_width: f32,
    /// Height of one bead.
    bead_height: f32,
    /// Total length of the track.
    track_width: f32,
    /// Leading edge of each bead, row-local. Non-decreasing with index.
    offsets: Vec<f32>,
    /// Thresholds used by [`Row::value`].
    bands: DecodeBands,
}

impl Row {
    /// Creates a row with every bead packed against the start edge.
    ///
    /// # Errors
    ///
    /// Returns [`AbacusError::InvalidBeadCount`] if `bead_count` is zero or
    /// above [`MAX_BEADS`], and [`AbacusError::DegenerateLayout`] if
    /// `bead_width` is not a positive finite number.
    pub fn new(
        origin: Point,
        bead_width: f32,
        bead_count: usize,
        bands: DecodeBands,
    ) -> AbacusResult<Self> {
        if bead_count == 0 || bead_count > MAX_BEADS {
            return Err(AbacusError::InvalidBeadCount(bead_count));
        }
        if !(bead_width.is_finite() && bead_width > 0.0) {
            return Err(AbacusError::DegenerateLayout {
                width: bead_width * (bead_count + TRACK_SLACK) as f32,
                height: bead_width * BEAD_ASPECT,
                rows: 1,
                bead_width,
            });
        }

        let offsets = (0..bead_count).map(|i| i as f32 * bead_width).collect();

        Ok(Self {
            origin,
            bead_width,
            bead_height: bead_width * BEAD_ASPECT,
            track_width: (bead_count + TRACK_SLACK) as f32 * bead_width,
            offsets,
            bands,
        })
    }

    /// Returns the device-space origin of the row.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the number of beads.
    #[inline]
    #[must_use]
    pub fn bead_count(&self) -> usize {
        self.offsets.len()
    }

    /// Returns the width of one bead.
    #[inline]
    #[must_use]
    pub fn bead_width(&self) -> f32 {
        self.bead_width
    }

    /// Returns the height of one bead.
    #[inline]
    #[must_use]
    pub fn bead_height(&self) -> f32 {
        self.bead_height
    }

    /// Returns the track length.
    #[inline]
    #[must_use]
    pub fn track_width(&self) -> f32 {
        self.track_width
    }

    /// Returns the current leading-edge offsets.
    #[inline]
    #[must_use]
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    /// Rest offset of bead `index`.
    #[inline]
    #[must_use]
    pub fn rest_offset(&self, index: usize) -> f32 {
        index as f32 * self.bead_width
    }

    /// Lowest offset bead `index` can reach (its predecessors packed left).
    #[inline]
    #[must_use]
    pub fn reachable_min(&self, index: usize) -> f32 {
        self.rest_offset(index)
    }

    /// Highest offset bead `index` can reach (its successors packed right).
    #[inline]
    #[must_use]
    pub fn reachable_max(&self, index: usize) -> f32 {
        self.track_width - (self.bead_count() - index) as f32 * self.bead_width
    }

    /// Drags bead `index` towards row-local offset `target`.
    ///
    /// The target is clamped to the bead's reachable range. Any beads in the
    /// direction of motion that would end up closer than one bead width get
    /// pushed along in the same direction, so the chain settles in a single
    /// pass. Returns the dragged bead's resulting offset.
    ///
    /// # Errors
    ///
    /// Returns [`AbacusError::BeadOutOfRange`] for an invalid index.
    pub fn move_bead(&mut self, index: usize, target: f32) -> AbacusResult<f32> {
        let count = self.bead_count();
        if index >= count {
            return Err(AbacusError::BeadOutOfRange { index, count });
        }

        let current = self.offsets[index];
        if target.is_nan() {
            return Ok(current);
        }

        let x = target.clamp(self.reachable_min(index), self.reachable_max(index));

        if x > current {
            self.offsets[index] = x;
            for next in index + 1..count {
                let floor = self.offsets[next - 1] + self.bead_width;
                if self.offsets[next] >= floor {
                    break;
                }
                self.offsets[next] = floor;
            }
        } else if x < current {
            self.offsets[index] = x;
            for prev in (0..index).rev() {
                let ceiling = self.offsets[prev + 1] - self.bead_width;
                if self.offsets[prev] <= ceiling {
                    break;
                }
                self.offsets[prev] = ceiling;
            }
        }

        trace!(bead = index, requested = target, from = current, to = x, "bead moved");
        Ok(x)
    }

    /// Drags bead `index` so its leading edge sits at device-space `x`.
    ///
    /// # Errors
    ///
    /// Returns [`AbacusError::BeadOutOfRange`] for an invalid index.
    pub fn move_bead_to(&mut self, index: usize, x: f32) -> AbacusResult<f32> {
        self.move_bead(index, x - self.origin.x)
    }

    /// Returns every bead to its rest slot.
    pub fn reset(&mut self) {
        let width = self.bead_width;
        for (i, offset) in self.offsets.iter_mut().enumerate() {
            *offset = i as f32 * width;
        }
    }

    /// Decodes the row's digit from the current bead arrangement.
    ///
    /// Reads, in order: bead 0 pushed off its home slot (every bead
    /// counted), the first wide gap between neighbours (beads after the gap
    /// are counted), the last bead still near home (nothing counted). Any
    /// other arrangement is [`Reading::Indeterminate`].
    #[must_use]
    pub fn value(&self) -> Reading {
        let count = self.bead_count();
        let width = self.bead_width;

        if self.offsets[0] - self.rest_offset(0) >= self.bands.home_shift * width {
            return Reading::Value(count as u64);
        }

        let gap = self.bands.gap * width;
        if let Some(i) = self.offsets.windows(2).position(|pair| pair[1] - pair[0] >= gap) {
            return Reading::Value((count - 1 - i) as u64);
        }

        if self.offsets[count - 1] <= self.track_width - self.bands.far_margin * width {
            return Reading::Value(0);
        }

        Reading::Indeterminate
    }

    /// Device-space extent of the bead band (the track plus bead height).
    #[must_use]
    pub fn band_rect(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.track_width, self.bead_height)
    }

    /// Device-space extent of bead `index`, or `None` for an invalid index.
    #[must_use]
    pub fn bead_rect(&self, index: usize) -> Option<Rect> {
        self.offsets.get(index).map(|&offset| {
            Rect::new(self.origin.x + offset, self.origin.y, self.bead_width, self.bead_height)
        })
    }

    /// Returns the first bead whose extent contains the device-space point.
    #[must_use]
    pub fn bead_at(&self, x: f32, y: f32) -> Option<usize> {
        (0..self.bead_count()).find(|&i| self.bead_rect(i).is_some_and(|rect| rect.contains(x, y)))
    }
}
