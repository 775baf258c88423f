//! Stroke, fill, and font styling for markups

use crate::{approx_eq, MarkupError};
use serde::{Deserialize, Serialize};

// =============================================================================
// Color
// =============================================================================

/// Opaque RGB color; transparency lives in the style's opacity fields.
///
/// Serialized as a "#RRGGBB" string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    /// Convert to a "#RRGGBB" string
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse "#RRGGBB", "RRGGBB", or the short "#RGB" form
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::RED
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = MarkupError;

    fn try_from(hex: String) -> Result<Self, Self::Error> {
        Color::from_hex(&hex).ok_or(MarkupError::InvalidColor(hex))
    }
}

// =============================================================================
// Style
// =============================================================================

/// Visual style shared by every markup kind.
///
/// Kinds ignore the fields that do not apply to them (an arrow has no fill,
/// a rectangle has no font), but every markup carries the full set so that a
/// restyle can be captured and reverted as one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupStyle {
    /// Stroke width in markup units
    pub stroke_width: f64,
    pub stroke_color: Color,
    /// 0.0 (invisible) to 1.0 (opaque)
    pub stroke_opacity: f64,
    /// `None` means the shape is not filled
    pub fill_color: Option<Color>,
    pub fill_opacity: f64,
    /// Font size in markup units, used by text and callouts
    pub font_size: f64,
    pub font_family: String,
}

impl MarkupStyle {
    /// Style with a solid stroke and no fill
    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            stroke_width: width,
            stroke_color: color,
            ..Self::default()
        }
    }

    /// Builder: set the fill
    pub fn with_fill(mut self, color: Color, opacity: f64) -> Self {
        self.fill_color = Some(color);
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Builder: set the font
    pub fn with_font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    /// Equality with float fields compared within the geometry epsilon
    pub fn approx_eq(&self, other: &MarkupStyle) -> bool {
        approx_eq(self.stroke_width, other.stroke_width)
            && self.stroke_color == other.stroke_color
            && approx_eq(self.stroke_opacity, other.stroke_opacity)
            && self.fill_color == other.fill_color
            && approx_eq(self.fill_opacity, other.fill_opacity)
            && approx_eq(self.font_size, other.font_size)
            && self.font_family == other.font_family
    }
}

impl Default for MarkupStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            stroke_color: Color::RED,
            stroke_opacity: 1.0,
            fill_color: None,
            fill_opacity: 0.0,
            font_size: 12.0,
            font_family: "Arial".to_string(),
        }
    }
}
