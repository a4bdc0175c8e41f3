// Chunk: docs/chunks/markdown_tokenizer - Markdown construct categories and their priority

//! Markdown construct categories.
//!
//! The order in [`PRIORITY`] decides overlap resolution: a category listed
//! earlier claims its text first, and nothing later can take it back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A kind of markdown construct the tokenizer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Heading1,
    Heading2,
    Heading3,
    UnorderedListMarker,
    OrderedListMarker,
    BoldItalic,
    Bold,
    Strikethrough,
    Highlight,
    InlineCode,
    Image,
    Link,
    Italic,
}

/// Categories in the order the tokenizer tries them.
pub const PRIORITY: [Category; 13] = [
    Category::Heading1,
    Category::Heading2,
    Category::Heading3,
    Category::UnorderedListMarker,
    Category::OrderedListMarker,
    Category::BoldItalic,
    Category::Bold,
    Category::Strikethrough,
    Category::Highlight,
    Category::InlineCode,
    Category::Image,
    Category::Link,
    Category::Italic,
];

impl Category {
    /// Stable identifier used in config files and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            Category::Heading1 => "heading1",
            Category::Heading2 => "heading2",
            Category::Heading3 => "heading3",
            Category::UnorderedListMarker => "unordered_list_marker",
            Category::OrderedListMarker => "ordered_list_marker",
            Category::BoldItalic => "bold_italic",
            Category::Bold => "bold",
            Category::Strikethrough => "strikethrough",
            Category::Highlight => "highlight",
            Category::InlineCode => "inline_code",
            Category::Image => "image",
            Category::Link => "link",
            Category::Italic => "italic",
        }
    }

    /// Position in [`PRIORITY`]; lower wins.
    pub fn priority(self) -> usize {
        PRIORITY
            .iter()
            .position(|&category| category == self)
            .unwrap_or(PRIORITY.len())
    }

    pub fn is_heading(self) -> bool {
        matches!(self, Category::Heading1 | Category::Heading2 | Category::Heading3)
    }

    /// List markers stay visible and carry no syntax ranges.
    pub fn is_list_marker(self) -> bool {
        matches!(self, Category::UnorderedListMarker | Category::OrderedListMarker)
    }

    /// Links and images carry a URL.
    pub fn has_url(self) -> bool {
        matches!(self, Category::Link | Category::Image)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown markdown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PRIORITY
            .iter()
            .copied()
            .find(|category| category.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_lists_every_category_once() {
        let mut seen = PRIORITY.to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), PRIORITY.len());
    }

    #[test]
    fn test_priority_order_matches_content_rules() {
        assert!(Category::Heading1.priority() < Category::UnorderedListMarker.priority());
        assert!(Category::OrderedListMarker.priority() < Category::BoldItalic.priority());
        assert!(Category::BoldItalic.priority() < Category::Bold.priority());
        assert!(Category::InlineCode.priority() < Category::Image.priority());
        assert!(Category::Image.priority() < Category::Link.priority());
        assert_eq!(Category::Italic.priority(), PRIORITY.len() - 1);
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for category in PRIORITY {
            assert_eq!(category.name().parse::<Category>(), Ok(category));
        }
        assert!("heading4".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&Category::InlineCode).unwrap();
        assert_eq!(json, "\"inline_code\"");
        assert_eq!(Category::InlineCode.to_string(), "inline_code");
    }
}
