// Chunk: docs/chunks/markdown_theme - Catppuccin Mocha styles for markdown categories

//! Markdown theme mapping categories to styles.
//!
//! Styles are a pure function of category. The defaults use the Catppuccin
//! Mocha palette; hosts can override individual attributes per category
//! through [`StyleOverride`], usually loaded from the editor config.

use std::collections::{BTreeMap, HashMap};

use markpad_buffer::{Color, Style, UnderlineStyle};
use serde::{Deserialize, Serialize};

use crate::category::{Category, PRIORITY};
use crate::error::ThemeError;

/// Catppuccin Mocha color palette constants.
mod catppuccin {
    use markpad_buffer::Color;

    pub const MAUVE: Color = Color::Rgb {
        r: 0xcb,
        g: 0xa6,
        b: 0xf7,
    }; // #cba6f7
    pub const BLUE: Color = Color::Rgb {
        r: 0x89,
        g: 0xb4,
        b: 0xfa,
    }; // #89b4fa
    pub const SAPPHIRE: Color = Color::Rgb {
        r: 0x74,
        g: 0xc7,
        b: 0xec,
    }; // #74c7ec
    pub const GREEN: Color = Color::Rgb {
        r: 0xa6,
        g: 0xe3,
        b: 0xa1,
    }; // #a6e3a1
    pub const PEACH: Color = Color::Rgb {
        r: 0xfa,
        g: 0xb3,
        b: 0x87,
    }; // #fab387
    pub const YELLOW: Color = Color::Rgb {
        r: 0xf9,
        g: 0xe2,
        b: 0xaf,
    }; // #f9e2af
    pub const LAVENDER: Color = Color::Rgb {
        r: 0xb4,
        g: 0xbe,
        b: 0xfe,
    }; // #b4befe
    pub const SURFACE1: Color = Color::Rgb {
        r: 0x45,
        g: 0x47,
        b: 0x5a,
    }; // #45475a
    pub const SURFACE0: Color = Color::Rgb {
        r: 0x31,
        g: 0x32,
        b: 0x44,
    }; // #313244
    pub const OVERLAY0: Color = Color::Rgb {
        r: 0x6c,
        g: 0x70,
        b: 0x86,
    }; // #6c7086
}

/// Per-attribute overrides for one category. Unset fields keep the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverride {
    /// Foreground as `#rrggbb`.
    pub fg: Option<String>,
    /// Background as `#rrggbb`.
    pub bg: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    pub monospace: Option<bool>,
    pub scale: Option<f32>,
}

impl StyleOverride {
    fn apply(&self, category: Category, style: &mut Style) -> Result<(), ThemeError> {
        let color = |value: &String| {
            Color::from_hex(value).ok_or_else(|| ThemeError::InvalidColor {
                category,
                value: value.clone(),
            })
        };
        if let Some(fg) = &self.fg {
            style.fg = color(fg)?;
        }
        if let Some(bg) = &self.bg {
            style.bg = color(bg)?;
        }
        if let Some(bold) = self.bold {
            style.bold = bold;
        }
        if let Some(italic) = self.italic {
            style.italic = italic;
        }
        if let Some(underline) = self.underline {
            style.underline = if underline {
                UnderlineStyle::Single
            } else {
                UnderlineStyle::None
            };
        }
        if let Some(strikethrough) = self.strikethrough {
            style.strikethrough = strikethrough;
        }
        if let Some(monospace) = self.monospace {
            style.monospace = monospace;
        }
        if let Some(scale) = self.scale {
            style.scale = scale;
        }
        Ok(())
    }
}

/// A mapping from markdown categories to visual styles.
#[derive(Debug, Clone)]
pub struct MarkdownTheme {
    styles: HashMap<Category, Style>,
    /// Style for revealed markup.
    syntax: Style,
}

impl MarkdownTheme {
    /// Creates the Catppuccin Mocha markdown theme.
    pub fn catppuccin_mocha() -> Self {
        let mut styles = HashMap::new();

        // Headings - bold, scaled down by level
        styles.insert(
            Category::Heading1,
            Style {
                fg: catppuccin::MAUVE,
                bold: true,
                scale: 1.6,
                ..Style::default()
            },
        );
        styles.insert(
            Category::Heading2,
            Style {
                fg: catppuccin::BLUE,
                bold: true,
                scale: 1.35,
                ..Style::default()
            },
        );
        styles.insert(
            Category::Heading3,
            Style {
                fg: catppuccin::SAPPHIRE,
                bold: true,
                scale: 1.15,
                ..Style::default()
            },
        );

        // Emphasis
        styles.insert(
            Category::Bold,
            Style {
                bold: true,
                ..Style::default()
            },
        );
        styles.insert(
            Category::Italic,
            Style {
                italic: true,
                ..Style::default()
            },
        );
        styles.insert(
            Category::BoldItalic,
            Style {
                bold: true,
                italic: true,
                ..Style::default()
            },
        );
        styles.insert(
            Category::Strikethrough,
            Style {
                fg: catppuccin::OVERLAY0,
                strikethrough: true,
                ..Style::default()
            },
        );
        styles.insert(
            Category::Highlight,
            Style {
                bg: catppuccin::YELLOW,
                fg: catppuccin::SURFACE0,
                ..Style::default()
            },
        );

        // Code - Green on Surface0
        styles.insert(
            Category::InlineCode,
            Style {
                fg: catppuccin::GREEN,
                bg: catppuccin::SURFACE0,
                monospace: true,
                ..Style::default()
            },
        );

        // Links and images - underlined Lavender/Blue
        styles.insert(
            Category::Link,
            Style {
                fg: catppuccin::LAVENDER,
                underline: UnderlineStyle::Single,
                ..Style::default()
            },
        );
        styles.insert(
            Category::Image,
            Style {
                fg: catppuccin::BLUE,
                underline: UnderlineStyle::Dotted,
                italic: true,
                ..Style::default()
            },
        );

        // List markers - Peach accent
        styles.insert(
            Category::UnorderedListMarker,
            Style {
                fg: catppuccin::PEACH,
                bold: true,
                ..Style::default()
            },
        );
        styles.insert(
            Category::OrderedListMarker,
            Style {
                fg: catppuccin::PEACH,
                ..Style::default()
            },
        );

        Self {
            styles,
            syntax: Style {
                fg: catppuccin::SURFACE1,
                ..Style::default()
            }
            .muted(),
        }
    }

    /// Returns the content style for `category`.
    pub fn style_for(&self, category: Category) -> Style {
        self.styles.get(&category).copied().unwrap_or_default()
    }

    /// Style for markup revealed around the cursor.
    pub fn syntax_style(&self) -> Style {
        self.syntax
    }

    pub fn set_style(&mut self, category: Category, style: Style) {
        self.styles.insert(category, style);
    }

    /// Applies per-category overrides on top of the current styles.
    ///
    /// Nothing is changed if any override is invalid.
    pub fn apply_overrides(
        &mut self,
        overrides: &BTreeMap<Category, StyleOverride>,
    ) -> Result<(), ThemeError> {
        let mut styles = self.styles.clone();
        for (category, style_override) in overrides {
            let style = styles.entry(*category).or_default();
            style_override.apply(*category, style)?;
        }
        self.styles = styles;
        Ok(())
    }

    /// Categories this theme knows, in priority order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        PRIORITY.into_iter().filter(|category| self.styles.contains_key(category))
    }
}

impl Default for MarkdownTheme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}
