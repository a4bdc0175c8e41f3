// Chunk: docs/chunks/markdown_tokenizer - Pattern table for markdown constructs

//! The markdown rule table.
//!
//! Each [`Rule`] pairs a category with a pattern and a [`Shape`] describing
//! which capture groups hold the content, the URL, and the marker. Rules are
//! plain data; [`PatternSet::compile`] orders them by [`PRIORITY`](crate::PRIORITY) and
//! compiles each once.
//!
//! Patterns run in multi-line mode. Inline constructs use `.` or explicit
//! `[^\n]` classes so they never span a line break.

use fancy_regex::{Regex, RegexBuilder};

use crate::category::Category;
use crate::error::TokenizerError;

/// Backtracking budget per match attempt.
///
/// Exceeding it turns into [`TokenizerError::Match`] rather than a stall.
pub const BACKTRACK_LIMIT: usize = 100_000;

/// How a rule's capture groups map onto a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Group 1 is the content; the text before and after it is markup.
    Delimited,
    /// Group 1 is the marker itself. No markup is hidden.
    Marker,
    /// Group 1 is the label, group 2 the URL; everything else is markup.
    Link,
}

impl Shape {
    fn required_groups(self) -> usize {
        match self {
            Shape::Delimited | Shape::Marker => 1,
            Shape::Link => 2,
        }
    }
}

/// One pattern for one category.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: Category,
    pub pattern: &'static str,
    pub shape: Shape,
}

const fn rule(category: Category, pattern: &'static str, shape: Shape) -> Rule {
    Rule {
        category,
        pattern,
        shape,
    }
}

/// The built-in rules.
///
/// Order within a category is the order the patterns are tried.
pub const BUILTIN_RULES: &[Rule] = &[
    rule(Category::Heading1, r"(?m)^# (.+?)\r?$", Shape::Delimited),
    rule(Category::Heading2, r"(?m)^## (.+?)\r?$", Shape::Delimited),
    rule(Category::Heading3, r"(?m)^### (.+?)\r?$", Shape::Delimited),
    rule(Category::UnorderedListMarker, r"(?m)^[ \t]*([-*+])(?= )", Shape::Marker),
    rule(Category::OrderedListMarker, r"(?m)^[ \t]*(\d+\.)(?= )", Shape::Marker),
    rule(Category::BoldItalic, r"\*\*\*(?!\s)(.+?)(?<!\s)\*\*\*", Shape::Delimited),
    rule(Category::BoldItalic, r"___(?!\s)(.+?)(?<!\s)___", Shape::Delimited),
    rule(Category::Bold, r"\*\*(?!\s)(.+?)(?<!\s)\*\*", Shape::Delimited),
    rule(Category::Bold, r"__(?!\s)(.+?)(?<!\s)__", Shape::Delimited),
    rule(Category::Strikethrough, r"~~(?!\s)(.+?)(?<!\s)~~", Shape::Delimited),
    rule(Category::Highlight, r"==(?!\s)(.+?)(?<!\s)==", Shape::Delimited),
    rule(Category::InlineCode, r"`([^`\n]+)`", Shape::Delimited),
    rule(Category::Image, r"!\[([^\]\n]*)\]\(([^)\s]+)\)", Shape::Link),
    rule(Category::Link, r"\[([^\]\n]+)\]\(([^)\s]+)\)", Shape::Link),
    rule(
        Category::Italic,
        r"(?<![\*\w])\*(?![\s\*])(.+?)(?<![\s\*])\*(?![\*\w])",
        Shape::Delimited,
    ),
    rule(
        Category::Italic,
        r"(?<![_\w])_(?![\s_])(.+?)(?<![\s_])_(?![_\w])",
        Shape::Delimited,
    ),
];

/// A rule with its compiled pattern.
#[derive(Debug)]
pub struct CompiledRule {
    pub category: Category,
    pub shape: Shape,
    pub regex: Regex,
}

/// Compiled rules in priority order.
#[derive(Debug)]
pub struct PatternSet {
    rules: Vec<CompiledRule>,
}

impl PatternSet {
    /// Compiles `rules`, ordering them by [`PRIORITY`](crate::PRIORITY).
    ///
    /// Rules of the same category keep their relative order.
    pub fn compile(rules: &[Rule]) -> Result<Self, TokenizerError> {
        let mut ordered: Vec<&Rule> = rules.iter().collect();
        ordered.sort_by_key(|rule| rule.category.priority());

        let mut compiled = Vec::with_capacity(ordered.len());
        for rule in ordered {
            let regex = RegexBuilder::new(rule.pattern)
                .backtrack_limit(BACKTRACK_LIMIT)
                .build()
                .map_err(|source| TokenizerError::Pattern {
                    category: rule.category,
                    pattern: rule.pattern.to_string(),
                    source: Box::new(source),
                })?;

            // captures_len counts the implicit whole-match group.
            let found = regex.captures_len().saturating_sub(1);
            let expected = rule.shape.required_groups();
            if found < expected {
                return Err(TokenizerError::MissingGroups {
                    category: rule.category,
                    pattern: rule.pattern.to_string(),
                    expected,
                    found,
                });
            }

            compiled.push(CompiledRule {
                category: rule.category,
                shape: rule.shape,
                regex,
            });
        }

        Ok(Self { rules: compiled })
    }

    /// Compiles [`BUILTIN_RULES`].
    pub fn builtin() -> Result<Self, TokenizerError> {
        Self::compile(BUILTIN_RULES)
    }

    /// Rules in the order the tokenizer applies them.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
