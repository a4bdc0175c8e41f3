// Chunk: docs/chunks/style_attributes - Style attributes shared by renderers
//!
//! Text attribute types handed to the hosting view.
//!
//! The core computes *which* attributes apply to which range; the host decides
//! how to draw them. Values here are deliberately renderer-agnostic:
//! - [`Color`]: named (16 ANSI), indexed (256), and RGB
//! - [`Style`]: colors, weight, slant, underline, strikethrough, size scale,
//!   and the `dim`/`hidden` flags used for muted and collapsed markup.

// =============================================================================
// Color Types
// =============================================================================

/// The 16 standard ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Let the host theme decide.
    #[default]
    Default,
    /// Named ANSI colors (0-15).
    Named(NamedColor),
    /// 256-color palette index.
    Indexed(u8),
    /// 24-bit RGB color.
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Parses `#rrggbb` into an RGB color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Color::Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

// =============================================================================
// Underline Types
// =============================================================================

/// Underline rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnderlineStyle {
    #[default]
    None,
    Single,
    Double,
    Curly,
    Dotted,
    Dashed,
}

// =============================================================================
// Style
// =============================================================================

/// Text styling attributes for one range.
///
/// # Default
///
/// The default style is plain text: default colors, no attributes, scale 1.0.
///
/// # Example
///
/// ```
/// use markpad_buffer::{Color, NamedColor, Style};
///
/// let heading = Style {
///     bold: true,
///     scale: 1.6,
///     ..Style::default()
/// };
///
/// let code = Style {
///     fg: Color::Named(NamedColor::Green),
///     monospace: true,
///     ..Style::default()
/// };
/// assert!(heading.bold && code.monospace);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
    /// Muted rendering (used for revealed markup).
    pub dim: bool,
    pub underline: UnderlineStyle,
    /// Underline color (None = use fg color).
    pub underline_color: Option<Color>,
    pub strikethrough: bool,
    /// Render in a fixed-width face.
    pub monospace: bool,
    /// Font size relative to body text.
    pub scale: f32,
    /// Zero visual footprint; the text still occupies buffer offsets.
    pub hidden: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: Color::Default,
            bg: Color::Default,
            bold: false,
            italic: false,
            dim: false,
            underline: UnderlineStyle::None,
            underline_color: None,
            strikethrough: false,
            monospace: false,
            scale: 1.0,
            hidden: false,
        }
    }
}

impl Style {
    /// A style that collapses its range.
    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Style::default()
        }
    }

    /// Returns a copy of this style rendered muted.
    pub fn muted(self) -> Self {
        Self { dim: true, ..self }
    }
}
