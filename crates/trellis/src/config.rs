//! Configuration types for trellis layout.
//!
//! All types implement [`serde::Deserialize`] with per-field defaults, so a
//! configuration file only needs to mention the values it overrides.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`LayoutConfig`] - Spacing constants used by every arranger and by bounds fitting.
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().margin(), 30.0);
//! assert_eq!(config.layout().slot_gap(), 10.0);
//! assert_eq!(config.layout().default_slot_width(), 130.0);
//! ```

use serde::Deserialize;

/// Distance from a container's origin to its first child, and the gap
/// between consecutive siblings.
pub const DEFAULT_MARGIN: f32 = 30.0;

/// Vertical gap between stacked handler slots.
pub const DEFAULT_SLOT_GAP: f32 = 10.0;

/// Width used for a handler slot that has no children to measure.
pub const DEFAULT_SLOT_WIDTH: f32 = 130.0;

/// Top-level configuration root.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Spacing constants of the layout rules.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    margin: f32,
    slot_gap: f32,
    default_slot_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            slot_gap: DEFAULT_SLOT_GAP,
            default_slot_width: DEFAULT_SLOT_WIDTH,
        }
    }
}

impl LayoutConfig {
    pub fn new(margin: f32, slot_gap: f32, default_slot_width: f32) -> Self {
        Self {
            margin,
            slot_gap,
            default_slot_width,
        }
    }

    /// Returns the outer margin and sibling gap.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Returns the gap between stacked handler slots.
    pub fn slot_gap(&self) -> f32 {
        self.slot_gap
    }

    /// Returns the fallback width of an empty handler slot.
    pub fn default_slot_width(&self) -> f32 {
        self.default_slot_width
    }

    /// Checks that every spacing value is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("margin", self.margin),
            ("slot_gap", self.slot_gap),
            ("default_slot_width", self.default_slot_width),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "layout.{name} must be a non-negative number, got {value}"
                ));
            }
        }
        Ok(())
    }
}
