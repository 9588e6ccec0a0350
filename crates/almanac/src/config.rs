//! Configuration types for Almanac timelines.
//!
//! All types implement [`serde::Deserialize`] with per-field defaults, so a
//! configuration file only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining ingest, layout and style settings.
//! - [`LayoutConfig`] - Geometry constants for the two packing layouts.
//! - [`StyleConfig`] - Entity palette and description truncation.
//!
//! # Example
//!
//! ```
//! # use almanac::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.layout().vertical().row_height(), 98.0);
//! ```

use serde::Deserialize;

use almanac_core::{
    color::{DEFAULT_BASE_HUE, PaletteStrategy},
    text::WidthEstimate,
};
use almanac_ingest::NormalizeConfig;

use crate::AlmanacError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Column mapping and literal parsing settings.
    #[serde(default)]
    ingest: NormalizeConfig,

    /// Layout geometry section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(ingest: NormalizeConfig, layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            ingest,
            layout,
            style,
        }
    }

    /// Returns the ingest configuration.
    pub fn ingest(&self) -> &NormalizeConfig {
        &self.ingest
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks that every geometry value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`AlmanacError::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<(), AlmanacError> {
        let horizontal = self.layout.horizontal();
        let vertical = self.layout.vertical();

        let non_negative = [
            ("layout.horizontal.gap", horizontal.gap),
            ("layout.horizontal.card_height", horizontal.card_height),
            ("layout.horizontal.subrow_height", horizontal.subrow_height),
            ("layout.horizontal.subrow_gap", horizontal.subrow_gap),
            ("layout.horizontal.lane_header", horizontal.lane_header),
            ("layout.horizontal.lane_gap", horizontal.lane_gap),
            ("layout.horizontal.width.min", horizontal.width.min()),
            ("layout.vertical.row_height", vertical.row_height),
            ("layout.vertical.row_gap", vertical.row_gap),
            ("layout.vertical.column_gap", vertical.column_gap),
            ("layout.vertical.wrapper_width", vertical.wrapper_width),
            ("layout.vertical.subcolumn_width", vertical.subcolumn_width),
            ("layout.vertical.stack_header", vertical.stack_header),
            ("layout.vertical.stack_padding", vertical.stack_padding),
            ("layout.vertical.stack_item", vertical.stack_item),
            ("layout.vertical.stack_item_gap", vertical.stack_item_gap),
            ("layout.vertical.bottom_margin", vertical.bottom_margin),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(AlmanacError::Config(format!(
                    "`{key}` must be a finite, non-negative number (got {value})"
                )));
            }
        }

        if vertical.max_subcolumns == 0 {
            return Err(AlmanacError::Config(
                "`layout.vertical.max_subcolumns` must be at least 1".to_string(),
            ));
        }
        if !self.style.base_hue.is_finite() {
            return Err(AlmanacError::Config(
                "`style.base_hue` must be a finite number".to_string(),
            ));
        }
        let truncation = self.style.truncation();
        if truncation.horizontal() == 0 || truncation.vertical() == 0 {
            return Err(AlmanacError::Config(
                "`style.truncation` lengths must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Geometry constants for both layouts.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    horizontal: HorizontalConfig,

    #[serde(default)]
    vertical: VerticalConfig,
}

impl LayoutConfig {
    pub fn new(horizontal: HorizontalConfig, vertical: VerticalConfig) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn horizontal(&self) -> &HorizontalConfig {
        &self.horizontal
    }

    pub fn vertical(&self) -> &VerticalConfig {
        &self.vertical
    }
}

/// Geometry of the horizontal (per-entity lane) layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HorizontalConfig {
    /// Space between consecutive slots.
    gap: f32,
    /// Card width estimate from the card text.
    width: WidthEstimate,
    card_height: f32,
    /// Height reserved for one subrow; cards are drawn at its top.
    subrow_height: f32,
    subrow_gap: f32,
    /// Height of the entity title above a lane's subrows.
    lane_header: f32,
    lane_gap: f32,
}

impl Default for HorizontalConfig {
    fn default() -> Self {
        Self {
            gap: 24.0,
            width: WidthEstimate::default(),
            card_height: 90.0,
            subrow_height: 95.0,
            subrow_gap: 2.0,
            lane_header: 34.0,
            lane_gap: 5.0,
        }
    }
}

impl HorizontalConfig {
    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn width(&self) -> &WidthEstimate {
        &self.width
    }

    pub fn card_height(&self) -> f32 {
        self.card_height
    }

    pub fn subrow_height(&self) -> f32 {
        self.subrow_height
    }

    pub fn subrow_gap(&self) -> f32 {
        self.subrow_gap
    }

    pub fn lane_header(&self) -> f32 {
        self.lane_header
    }

    pub fn lane_gap(&self) -> f32 {
        self.lane_gap
    }
}

/// Geometry of the vertical (slot and wrapper column) layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VerticalConfig {
    /// Minimum height of every slot row.
    row_height: f32,
    row_gap: f32,
    /// Horizontal gap between wrapper columns and before the stack area.
    column_gap: f32,
    wrapper_width: f32,
    subcolumn_width: f32,
    max_subcolumns: usize,
    stack_header: f32,
    stack_padding: f32,
    stack_item: f32,
    stack_item_gap: f32,
    /// Space added below the last row.
    bottom_margin: f32,
}

impl Default for VerticalConfig {
    fn default() -> Self {
        Self {
            row_height: 98.0,
            row_gap: 12.0,
            column_gap: 20.0,
            wrapper_width: 240.0,
            subcolumn_width: 340.0,
            max_subcolumns: 4,
            stack_header: 34.0,
            stack_padding: 20.0,
            stack_item: 76.0,
            stack_item_gap: 10.0,
            bottom_margin: 40.0,
        }
    }
}

impl VerticalConfig {
    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn row_gap(&self) -> f32 {
        self.row_gap
    }

    pub fn column_gap(&self) -> f32 {
        self.column_gap
    }

    pub fn wrapper_width(&self) -> f32 {
        self.wrapper_width
    }

    pub fn subcolumn_width(&self) -> f32 {
        self.subcolumn_width
    }

    pub fn max_subcolumns(&self) -> usize {
        self.max_subcolumns
    }

    /// Height of a stack holding `members` point events, before the row minimum applies.
    pub fn stack_height(&self, members: usize) -> f32 {
        let members = members as f32;
        self.stack_header
            + self.stack_padding
            + members * self.stack_item
            + (members - 1.0).max(0.0) * self.stack_item_gap
    }

    pub fn bottom_margin(&self) -> f32 {
        self.bottom_margin
    }
}

/// Visual style settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    palette: PaletteStrategy,
    /// Hue of the first entity in the golden-angle sequence.
    base_hue: f32,
    truncation: TruncationConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            palette: PaletteStrategy::default(),
            base_hue: DEFAULT_BASE_HUE,
            truncation: TruncationConfig::default(),
        }
    }
}

impl StyleConfig {
    pub fn palette(&self) -> PaletteStrategy {
        self.palette
    }

    pub fn base_hue(&self) -> f32 {
        self.base_hue
    }

    pub fn truncation(&self) -> &TruncationConfig {
        &self.truncation
    }
}

/// Maximum description length, in characters, shown on a card body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TruncationConfig {
    horizontal: usize,
    vertical: usize,
}

impl Default for TruncationConfig {
    fn default() -> Self {
        Self {
            horizontal: 120,
            vertical: 140,
        }
    }
}

impl TruncationConfig {
    pub fn horizontal(&self) -> usize {
        self.horizontal
    }

    pub fn vertical(&self) -> usize {
        self.vertical
    }
}
