//! Entity color assignment.
//!
//! Every entity gets one HSL color that both layouts and the presentation
//! layer share. Two strategies are available:
//!
//! - [`PaletteStrategy::GoldenAngle`] (preferred): entities are sorted
//!   case-insensitively and the n-th entity gets hue
//!   `base + n * 137.508°`, which keeps neighbouring hues far apart even for
//!   dozens of entities.
//! - [`PaletteStrategy::Hashed`]: the hue is a checksum of the name. It does
//!   not need the full entity set but clusters similar names more often.
//!
//! Both are pure functions of their input, so colors are stable across runs.

use std::collections::HashMap;

use color::{AlphaColor, Hsl, Srgb};
use serde::{Deserialize, Serialize, Serializer};

use crate::identifier::Id;

/// The golden angle in degrees.
pub const GOLDEN_ANGLE: f32 = 137.508;

/// Default starting hue for the golden-angle sequence.
pub const DEFAULT_BASE_HUE: f32 = 24.0;

/// How entity hues are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteStrategy {
    #[default]
    GoldenAngle,
    Hashed,
}

/// An HSL color with integral components, as emitted to CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityColor {
    hue: u16,
    saturation: u8,
    lightness: u8,
}

impl EntityColor {
    /// Creates a color. Hue wraps at 360, saturation and lightness saturate at 100.
    pub fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue: hue % 360,
            saturation: saturation.min(100),
            lightness: lightness.min(100),
        }
    }

    pub fn hue(self) -> u16 {
        self.hue
    }

    pub fn saturation(self) -> u8 {
        self.saturation
    }

    pub fn lightness(self) -> u8 {
        self.lightness
    }

    /// CSS `hsl()` notation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use almanac_core::color::EntityColor;
    /// assert_eq!(EntityColor::new(24, 60, 68).to_css(), "hsl(24, 60%, 68%)");
    /// ```
    pub fn to_css(self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }

    /// Hex `#rrggbb` notation, converted through sRGB.
    ///
    /// # Examples
    ///
    /// ```
    /// # use almanac_core::color::EntityColor;
    /// assert_eq!(EntityColor::new(0, 100, 50).to_hex(), "#ff0000");
    /// ```
    pub fn to_hex(self) -> String {
        let hsl = AlphaColor::<Hsl>::new([
            f32::from(self.hue),
            f32::from(self.saturation),
            f32::from(self.lightness),
            1.0,
        ]);
        let rgba = hsl.convert::<Srgb>().to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }
}

impl Serialize for EntityColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

/// Hue from a rolling checksum of the name: `h = (h * 31 + code point) mod 360`.
pub fn hashed_color(name: &str) -> EntityColor {
    let hue = name
        .chars()
        .fold(0u32, |h, ch| (h * 31 + u32::from(ch)) % 360);
    EntityColor::new(hue as u16, 55, 72)
}

/// A fixed mapping from entity to color.
///
/// # Examples
///
/// ```
/// use almanac_core::{color::{EntityPalette, PaletteStrategy}, identifier::Id};
///
/// let entities = [Id::new("bravo"), Id::new("Alpha"), Id::new("charlie")];
/// let palette = EntityPalette::build(entities, PaletteStrategy::GoldenAngle, 24.0);
///
/// // "Alpha" sorts first and gets the base hue.
/// assert_eq!(palette.color(Id::new("Alpha")).hue(), 24);
/// // Insertion order does not matter.
/// let reordered = EntityPalette::build(
///     [Id::new("charlie"), Id::new("Alpha"), Id::new("bravo")],
///     PaletteStrategy::GoldenAngle,
///     24.0,
/// );
/// assert_eq!(palette.color(Id::new("bravo")), reordered.color(Id::new("bravo")));
/// ```
#[derive(Debug, Clone)]
pub struct EntityPalette {
    colors: HashMap<Id, EntityColor>,
}

impl EntityPalette {
    /// Builds a palette for the given entities. Duplicates are ignored.
    pub fn build<I>(entities: I, strategy: PaletteStrategy, base_hue: f32) -> Self
    where
        I: IntoIterator<Item = Id>,
    {
        let mut ordered: Vec<(String, String, Id)> = entities
            .into_iter()
            .map(|id| (id.sort_key(), id.name(), id))
            .collect();
        ordered.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
        ordered.dedup_by_key(|(_, _, id)| *id);

        let colors = ordered
            .into_iter()
            .enumerate()
            .map(|(index, (_, name, id))| {
                let color = match strategy {
                    PaletteStrategy::GoldenAngle => {
                        let hue = (base_hue + index as f32 * GOLDEN_ANGLE).rem_euclid(360.0);
                        EntityColor::new(hue.floor() as u16, 60, 68)
                    }
                    PaletteStrategy::Hashed => hashed_color(&name),
                };
                (id, color)
            })
            .collect();

        Self { colors }
    }

    /// Color for `entity`. Entities outside the palette fall back to the hashed color.
    pub fn color(&self, entity: Id) -> EntityColor {
        self.colors
            .get(&entity)
            .copied()
            .unwrap_or_else(|| hashed_color(&entity.name()))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
