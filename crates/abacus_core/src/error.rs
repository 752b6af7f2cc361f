//! # Abacus Error Types
//!
//! Every error here is locally recoverable. Out-of-range pointer input is not
//! an error at all: it is clamped or reported as "no match".

use thiserror::Error;

/// Errors that can occur while laying out or manipulating the abacus.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AbacusError {
    /// The drawing surface is too small to fit a single bead.
    #[error("degenerate layout: {width}x{height} cannot fit {rows} rows (bead width {bead_width})")]
    DegenerateLayout {
        /// Surface width.
        width: f32,
        /// Surface height.
        height: f32,
        /// Requested number of rows.
        rows: usize,
        /// Bead width the sizing formula produced.
        bead_width: f32,
    },

    /// Row count outside the supported range.
    #[error("invalid row count {0}: must be between 1 and {max}", max = crate::engine::MAX_ROWS)]
    InvalidRowCount(usize),

    /// Bead count outside the supported range.
    #[error("invalid bead count {0}: must be between 1 and {max}", max = crate::row::MAX_BEADS)]
    InvalidBeadCount(usize),

    /// Bead index does not exist on the row.
    #[error("bead {index} out of range for row of {count} beads")]
    BeadOutOfRange {
        /// Requested bead index.
        index: usize,
        /// Number of beads on the row.
        count: usize,
    },

    /// Row index does not exist on the engine.
    #[error("row {index} out of range for abacus of {count} rows")]
    RowOutOfRange {
        /// Requested row index.
        index: usize,
        /// Number of rows.
        count: usize,
    },

    /// A gesture refers to a layout that has since been rebuilt.
    #[error("stale gesture: bead grabbed in layout epoch {held}, current epoch is {current}")]
    StaleGesture {
        /// Epoch the bead reference was issued in.
        held: u64,
        /// Current layout epoch.
        current: u64,
    },

    /// No surface size has been delivered yet.
    #[error("abacus has not been laid out yet")]
    NotLaidOut,

    /// Invalid configuration value or file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for abacus operations.
pub type AbacusResult<T> = Result<T, AbacusError>;
