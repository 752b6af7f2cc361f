//! # Configuration
//!
//! Loaded once at startup from TOML. Every section and field is optional:
//!
//! ```toml
//! [layout]
//! rows = 5
//! beads_per_row = 9
//!
//! [decode]
//! home_shift = 1.5
//! gap = 2.0
//! far_margin = 2.5
//!
//! [render]
//! frame_interval_ms = 16
//! idle_gating = true
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::decode::DecodeBands;
use crate::engine::MAX_ROWS;
use crate::error::{AbacusError, AbacusResult};
use crate::row::MAX_BEADS;

/// Shape of the abacus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Number of rows (decimal digits).
    pub rows: usize,
    /// Beads on every row.
    pub beads_per_row: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            beads_per_row: MAX_BEADS,
        }
    }
}

/// Render loop pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Minimum time between two frames.
    pub frame_interval_ms: u64,
    /// Only paint while a drag is active or a redraw was requested.
    pub idle_gating: bool,
}

impl RenderConfig {
    /// Returns the frame interval as a [`Duration`].
    #[inline]
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            idle_gating: true,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbacusConfig {
    /// Shape of the abacus.
    pub layout: LayoutConfig,
    /// Row decode thresholds.
    pub decode: DecodeBands,
    /// Render loop pacing.
    pub render: RenderConfig,
}

impl AbacusConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`AbacusError::InvalidConfig`] on malformed TOML or
    /// out-of-range values.
    pub fn from_toml_str(source: &str) -> AbacusResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| AbacusError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AbacusError::InvalidConfig`] if the file cannot be read or
    /// does not hold a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> AbacusResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            AbacusError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`AbacusError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> AbacusResult<String> {
        toml::to_string(self).map_err(|e| AbacusError::InvalidConfig(e.to_string()))
    }

    /// Checks every value against the ranges the engine supports.
    ///
    /// # Errors
    ///
    /// Returns [`AbacusError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> AbacusResult<()> {
        if self.layout.rows == 0 || self.layout.rows > MAX_ROWS {
            return Err(AbacusError::InvalidConfig(format!(
                "layout.rows must be in 1..={MAX_ROWS}, got {}",
                self.layout.rows
            )));
        }
        if self.layout.beads_per_row == 0 || self.layout.beads_per_row > MAX_BEADS {
            return Err(AbacusError::InvalidConfig(format!(
                "layout.beads_per_row must be in 1..={MAX_BEADS}, got {}",
                self.layout.beads_per_row
            )));
        }
        if self.render.frame_interval_ms == 0 {
            return Err(AbacusError::InvalidConfig(
                "render.frame_interval_ms must be positive".to_string(),
            ));
        }
        self.decode.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = AbacusConfig::from_toml_str("").unwrap();
        assert_eq!(config, AbacusConfig::default());
        assert_eq!(config.layout.rows, 5);
        assert_eq!(config.decode, DecodeBands::CANONICAL);
        assert_eq!(config.render.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_partial_sections() {
        let config = AbacusConfig::from_toml_str(
            r#"
            [layout]
            rows = 8

            [decode]
            gap = 2.5

            [render]
            idle_gating = false
            "#,
        )
        .unwrap();

        assert_eq!(config.layout.rows, 8);
        assert_eq!(config.layout.beads_per_row, 9);
        assert_eq!(config.decode.gap, 2.5);
        assert_eq!(config.decode.home_shift, 1.5);
        assert!(!config.render.idle_gating);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = AbacusConfig::from_toml_str("[layout]\nrows = 25\n").unwrap_err();
        assert!(matches!(err, AbacusError::InvalidConfig(msg) if msg.contains("layout.rows")));

        let err = AbacusConfig::from_toml_str("[decode]\ngap = 0.5\n").unwrap_err();
        assert!(matches!(err, AbacusError::InvalidConfig(msg) if msg.contains("decode.gap")));

        assert!(AbacusConfig::from_toml_str("[render]\nframe_interval_ms = 0\n").is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            AbacusConfig::from_toml_str("[layout\nrows = 5"),
            Err(AbacusError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_toml_round_trip_preserves_values() {
        let mut config = AbacusConfig::default();
        config.layout.rows = 3;
        config.render.frame_interval_ms = 33;

        let text = config.to_toml_string().unwrap();
        assert_eq!(AbacusConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AbacusConfig::load("/nonexistent/abacus.toml").unwrap_err();
        assert!(matches!(err, AbacusError::InvalidConfig(msg) if msg.contains("failed to read")));
    }
}
