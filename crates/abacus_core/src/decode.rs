//! Decoded values and the tolerance bands used to read a row.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AbacusError, AbacusResult};

/// Outcome of decoding a row or a whole abacus.
///
/// `Indeterminate` means the beads are not in a recognised configuration
/// (typically mid-drag). It is never the same thing as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reading {
    /// A well-defined value.
    Value(u64),
    /// Beads sit between two recognised configurations.
    Indeterminate,
}

impl Reading {
    /// Returns the value, or `None` if indeterminate.
    #[inline]
    #[must_use]
    pub const fn value(self) -> Option<u64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Indeterminate => None,
        }
    }

    /// Returns true if this reading is indeterminate.
    #[inline]
    #[must_use]
    pub const fn is_indeterminate(self) -> bool {
        matches!(self, Self::Indeterminate)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Indeterminate => f.write_str("?"),
        }
    }
}

/// Decode thresholds, expressed as multiples of the bead width.
///
/// Offsets are leading edges, so the offset-to-offset distance between two
/// touching beads is exactly one bead width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeBands {
    /// Minimum shift of bead 0 away from its rest slot that reads as "all
    /// beads counted".
    pub home_shift: f32,
    /// Minimum offset-to-offset distance between neighbours that reads as
    /// the split point between uncounted and counted beads.
    pub gap: f32,
    /// The last bead reads as uncounted while its offset stays at or below
    /// `track_width - far_margin * bead_width`.
    pub far_margin: f32,
}

impl DecodeBands {
    /// Canonical bands.
    pub const CANONICAL: Self = Self {
        home_shift: 1.5,
        gap: 2.0,
        far_margin: 2.5,
    };

    /// Checks that the bands can distinguish rest from counted positions.
    ///
    /// # Errors
    ///
    /// Returns [`AbacusError::InvalidConfig`] if a band lies outside the
    /// range the row's two bead widths of slack can express.
    pub fn validate(&self) -> AbacusResult<()> {
        if !(self.home_shift > 0.0 && self.home_shift <= 2.0) {
            return Err(AbacusError::InvalidConfig(format!(
                "decode.home_shift must be in (0, 2], got {}",
                self.home_shift
            )));
        }
        if !(self.gap > 1.0 && self.gap <= 3.0) {
            return Err(AbacusError::InvalidConfig(format!(
                "decode.gap must be in (1, 3], got {}",
                self.gap
            )));
        }
        if !(self.far_margin > 1.0 && self.far_margin <= 3.0) {
            return Err(AbacusError::InvalidConfig(format!(
                "decode.far_margin must be in (1, 3], got {}",
                self.far_margin
            )));
        }
        Ok(())
    }
}

impl Default for DecodeBands {
    fn default() -> Self {
        Self::CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_display() {
        assert_eq!(Reading::Value(4021).to_string(), "4021");
        assert_eq!(Reading::Value(0).to_string(), "0");
        assert_eq!(Reading::Indeterminate.to_string(), "?");
    }

    #[test]
    fn test_indeterminate_is_not_zero() {
        assert_ne!(Reading::Indeterminate, Reading::Value(0));
        assert_eq!(Reading::Indeterminate.value(), None);
        assert_eq!(Reading::Value(0).value(), Some(0));
    }

    #[test]
    fn test_band_validation() {
        assert!(DecodeBands::CANONICAL.validate().is_ok());

        let touching_reads_as_gap = DecodeBands { gap: 1.0, ..DecodeBands::CANONICAL };
        assert!(touching_reads_as_gap.validate().is_err());

        let unreachable_shift = DecodeBands { home_shift: 2.5, ..DecodeBands::CANONICAL };
        assert!(unreachable_shift.validate().is_err());

        let nan = DecodeBands { far_margin: f32::NAN, ..DecodeBands::CANONICAL };
        assert!(nan.validate().is_err());
    }
}
