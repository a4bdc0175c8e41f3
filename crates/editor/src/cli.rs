// Chunk: docs/chunks/cli_harness - Inspection CLI
//!
//! Command-line interface for inspecting the engine's output.
//!
//! Supports:
//! - Styled ranges for a file at a cursor position
//! - Search matches and viewport highlights
//! - Word suggestions from a corpus folder
//! - The line index of a file
//!
//! Output is plain text, one item per line, meant for eyeballing and for
//! diffing in scripts. The CLI owns no file formats.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use markpad_buffer::TextRange;
use markpad_markdown::{Role, SyntaxVisibility};
use markpad_suggest::{CorpusLoader, WordCorpus};

use crate::config::EditorConfig;
use crate::document::Document;

/// Inspect markdown styling, search and suggestions
#[derive(Parser, Debug)]
#[command(name = "markpad", version, about = "Inspect markdown styling, search and suggestions")]
pub struct CliArgs {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the styled ranges of a file
    Styles {
        file: PathBuf,
        /// Cursor offset in UTF-16 code units
        #[arg(long, default_value_t = 0)]
        cursor: usize,
    },
    /// Print the matches of a query in a file
    Search {
        file: PathBuf,
        query: String,
        /// Viewport as START:LEN in UTF-16 code units
        #[arg(long, value_parser = parse_viewport)]
        viewport: Option<TextRange>,
        /// Emphasize this match index
        #[arg(long, value_name = "N")]
        select: Option<usize>,
    },
    /// Print the suggested completion for a prefix
    Suggest {
        prefix: String,
        /// Folder of text files to build the word corpus from
        #[arg(long, value_name = "DIR")]
        corpus: Option<PathBuf>,
    },
    /// Print the line index of a file
    Lines { file: PathBuf },
}

/// Parses `START:LEN` into a range.
pub fn parse_viewport(value: &str) -> Result<TextRange, String> {
    let (start, len) = value
        .split_once(':')
        .ok_or_else(|| format!("expected START:LEN, got {value:?}"))?;
    let start: usize = start.trim().parse().map_err(|e| format!("invalid start: {e}"))?;
    let len: usize = len.trim().parse().map_err(|e| format!("invalid length: {e}"))?;
    Ok(TextRange::from_len(start, len))
}

/// Loads the config named on the command line, or the platform one.
pub fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    match path {
        Some(path) => {
            EditorConfig::load_from(path).with_context(|| format!("loading {}", path.display()))
        }
        None => EditorConfig::load().context("loading config"),
    }
}

/// Runs `command`, writing its output to `out`.
pub fn run(command: &Command, config: &EditorConfig, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Styles { file, cursor } => {
            let mut doc = open(file, config)?;
            for styled in doc.compute_styles(*cursor) {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{:?}",
                    styled.range,
                    styled.category,
                    role_label(styled.role),
                    doc.buffer().substring(styled.range)
                )?;
            }
        }
        Command::Search {
            file,
            query,
            viewport,
            select,
        } => {
            let mut doc = open(file, config)?;
            let count = doc.set_query(query);
            writeln!(out, "{count} matches")?;
            if let Some(index) = select {
                let nav = doc
                    .navigate_to_match(*index)
                    .with_context(|| format!("selecting match {index}"))?;
                writeln!(out, "selected {} at {}", nav.index, nav.selection)?;
            }
            match viewport {
                Some(viewport) => {
                    let visible = doc.visible_matches(*viewport);
                    for highlight in visible.highlights {
                        let marker = if highlight.emphasized { "*" } else { " " };
                        writeln!(out, "{marker}{}\t{}", highlight.match_index, highlight.range)?;
                    }
                }
                None => {
                    for (index, range) in doc.matches().iter().enumerate() {
                        writeln!(out, " {index}\t{range}")?;
                    }
                }
            }
        }
        Command::Suggest { prefix, corpus } => {
            let folder = corpus
                .clone()
                .or_else(|| config.suggestions.corpus_folder.clone())
                .ok_or_else(|| anyhow!("no corpus folder given and none configured"))?;
            let words = CorpusLoader::new().load_or_empty(&folder);
            let mut doc = Document::from_config(config, words, None).context("building theme")?;
            match doc.suggest(prefix) {
                Some(suffix) => writeln!(out, "{prefix}{suffix}\t+{suffix}")?,
                None => writeln!(out, "no suggestion")?,
            }
        }
        Command::Lines { file } => {
            let doc = open(file, config)?;
            let buffer = doc.buffer();
            for line in 0..buffer.line_count() {
                let range = buffer.line_range(line);
                writeln!(out, "{line}\t{range}\t{:?}", buffer.line_content(line))?;
            }
        }
    }
    Ok(())
}

fn open(file: &Path, config: &EditorConfig) -> Result<Document> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let mut doc = Document::from_config(config, WordCorpus::new(), None).context("building theme")?;
    doc.load(&text);
    Ok(doc)
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Content => "content",
        Role::Syntax(SyntaxVisibility::Hidden) => "syntax-hidden",
        Role::Syntax(SyntaxVisibility::VisibleMuted) => "syntax-muted",
        Role::ListMarker => "list-marker",
    }
}
