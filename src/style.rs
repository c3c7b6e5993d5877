use serde::{Deserialize, Serialize};

use crate::app_config::{BorderStyleChoice, FontChoice, HorizontalAlignment, StyleConfiguration, VerticalAlignment};

// @module: Style configuration to document style mapping

/// Face used for `FontChoice::Default`
pub const DEFAULT_FONT_NAME: &str = "Arial";

/// Face used for `FontChoice::Alternate`
pub const ALTERNATE_FONT_NAME: &str = "Teletext";

/// Border style code rendering an outline around glyphs
pub const BORDER_STYLE_OUTLINE: i32 = 1;

/// Border style code rendering an opaque box behind the text
pub const BORDER_STYLE_BOX: i32 = 3;

/// Charset marker written into every generated style
pub const CHARSET_MARKER: i32 = 1;

/// RGBA colour in the ASS convention
///
/// `a` is transparency: 0 is fully opaque, 255 fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Colour used for any index outside the palette, same as palette entry 4
    pub const FALLBACK: Color = Color::new(0, 0, 0, 255);

    /// Palette colour for a settings index, `FALLBACK` when out of range
    pub fn from_palette_index(index: u8) -> Self {
        PALETTE
            .get(usize::from(index))
            .copied()
            .unwrap_or(Self::FALLBACK)
    }

    /// `&HAABBGGRR` notation used in ASS style lines
    pub fn to_ass(&self) -> String {
        format!("&H{:02X}{:02X}{:02X}{:02X}", self.a, self.b, self.g, self.r)
    }
}

/// Colours selectable for every colour setting, shared by all five channels
pub const PALETTE: [Color; 5] = [
    Color::new(0, 0, 0, 0),
    Color::new(255, 255, 255, 0),
    Color::new(255, 255, 0, 3),
    Color::new(0, 0, 255, 0),
    Color::new(0, 0, 0, 255),
];

/// Fields of a document's default style controlled by this library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRecord {
    pub font_name: String,
    pub font_size: f64,

    pub primary_color: Color,
    pub secondary_color: Color,
    pub tertiary_color: Color,
    pub outline_color: Color,
    pub back_color: Color,

    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,

    pub scale_x: f64,
    pub scale_y: f64,
    pub spacing: f64,
    pub angle: f64,

    pub border_style: i32,
    pub outline: f64,
    pub shadow: f64,

    /// Numpad position, 1 (bottom left) to 9 (top right)
    pub alignment: i32,
    pub margin_l: i32,
    pub margin_r: i32,
    pub margin_v: i32,

    pub encoding: i32,
}

/// Numpad alignment code for a vertical/horizontal placement
pub fn alignment_code(vertical: VerticalAlignment, horizontal: HorizontalAlignment) -> i32 {
    3 * vertical as i32 + horizontal as i32 + 1
}

/// Turns a style configuration into the default style of a generated file
pub struct StyleMapper;

impl StyleMapper {
    /// Build the style record. Text decorations, scaling, spacing, rotation
    /// and charset are always reset, whatever the source file contained.
    pub fn apply(config: &StyleConfiguration) -> StyleRecord {
        let font_name = match config.font {
            FontChoice::Default => DEFAULT_FONT_NAME,
            FontChoice::Alternate => ALTERNATE_FONT_NAME,
        };

        let border_style = match config.border_style {
            BorderStyleChoice::Outline => BORDER_STYLE_OUTLINE,
            BorderStyleChoice::Box => BORDER_STYLE_BOX,
        };

        StyleRecord {
            font_name: font_name.to_string(),
            font_size: config.font_size,
            primary_color: Color::from_palette_index(config.primary_color),
            secondary_color: Color::from_palette_index(config.secondary_color),
            tertiary_color: Color::from_palette_index(config.tertiary_color),
            outline_color: Color::from_palette_index(config.outline_color),
            back_color: Color::from_palette_index(config.back_color),
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
            scale_x: 100.0,
            scale_y: 100.0,
            spacing: 0.0,
            angle: 0.0,
            border_style,
            outline: config.outline_width,
            shadow: config.shadow_width,
            alignment: alignment_code(config.vertical_alignment, config.horizontal_alignment),
            margin_l: config.margin_left,
            margin_r: config.margin_right,
            margin_v: config.margin_vertical,
            encoding: CHARSET_MARKER,
        }
    }
}
