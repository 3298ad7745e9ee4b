use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::filter::Selection;
use super::model::{Document, Series};

/// Prefix of every header line.
pub const DIRECTIVE_MARKER: char = '@';
/// A line holding only this symbol closes a data block.
pub const BLOCK_TERMINATOR: &str = "&";
/// The only graph type the data phase knows how to read.
pub const SUPPORTED_TYPE: &str = "xy";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A structural violation of the .agr format, with its 1-based line number.
#[derive(Debug, Error, PartialEq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseErrorKind {
    #[error("cannot tokenize directive `{0}`")]
    MalformedDirective(String),
    #[error("directive `{0}` is missing its argument")]
    MissingArgument(String),
    #[error("unsupported graph type `{0}`, only `xy` is supported")]
    UnsupportedType(String),
    #[error("expected two numbers, got `{0}`")]
    MalformedPoint(String),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load an .agr file, parsing data blocks only for series in `selection`.
///
/// The whole file is read up front and closed before parsing starts.
pub fn load_file(path: &Path, selection: &Selection) -> Result<Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let doc = parse_str(&text, selection)
        .with_context(|| format!("parsing {}", path.display()))?;

    log::info!(
        "Loaded {} series from {} ({} selected)",
        doc.len(),
        path.display(),
        selection.apply(&doc).len()
    );
    Ok(doc)
}

/// Parse .agr text.
///
/// Assumptions about the layout:
/// * all directive lines (`@...`) come first
/// * every data block ends with a lone `&`, one block per legend, in
///   legend order
pub fn parse_str(text: &str, selection: &Selection) -> Result<Document, ParseError> {
    let mut cursor = LineCursor::new(text);
    let mut doc = Document::default();

    parse_header(&mut cursor, &mut doc)?;

    let declared: Vec<&str> = doc.series_names().collect();
    for name in selection.unmatched(&declared) {
        log::warn!("No series named `{name}` in the file");
    }

    parse_blocks(&mut cursor, &mut doc, selection)?;
    Ok(doc)
}

// ---------------------------------------------------------------------------
// Line cursor
// ---------------------------------------------------------------------------

/// Buffered lines with an explicit position, so the header scan can stop on
/// the first data line without consuming it.
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        LineCursor {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Next line together with its 1-based number.
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let line = self.peek()?;
        self.pos += 1;
        Some((self.pos, line))
    }
}

// ---------------------------------------------------------------------------
// Header phase
// ---------------------------------------------------------------------------

fn parse_header(cursor: &mut LineCursor<'_>, doc: &mut Document) -> Result<(), ParseError> {
    // Stop on the first non-directive line, leaving it for the data phase.
    while cursor.peek().is_some_and(|l| l.starts_with(DIRECTIVE_MARKER)) {
        let Some((line_no, raw)) = cursor.next_line() else {
            break;
        };
        apply_directive(raw, line_no, doc)?;
    }
    Ok(())
}

fn apply_directive(raw: &str, line: usize, doc: &mut Document) -> Result<(), ParseError> {
    let fail = |kind: ParseErrorKind| ParseError { line, kind };

    let text = raw.trim();
    let tokens = shlex::split(text)
        .ok_or_else(|| fail(ParseErrorKind::MalformedDirective(text.to_string())))?;
    let Some((command, values)) = tokens.split_first() else {
        return Ok(());
    };
    let command = command.trim_start_matches(DIRECTIVE_MARKER);

    let argument = |idx: usize| {
        values
            .get(idx)
            .ok_or_else(|| fail(ParseErrorKind::MissingArgument(command.to_string())))
    };

    match command {
        "title" => doc.title = argument(0)?.clone(),
        _ if command.starts_with('s') && values.first().is_some_and(|v| v == "legend") => {
            doc.series.push(Series::new(argument(1)?.as_str()));
        }
        "type" => {
            let kind = argument(0)?;
            if kind != SUPPORTED_TYPE {
                return Err(fail(ParseErrorKind::UnsupportedType(kind.clone())));
            }
        }
        other => log::info!("Unrecognized command: {other}"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Data phase
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum BlockEnd {
    Terminated,
    EndOfInput,
}

fn parse_blocks(
    cursor: &mut LineCursor<'_>,
    doc: &mut Document,
    selection: &Selection,
) -> Result<(), ParseError> {
    for series in doc.series.iter_mut() {
        let end = if selection.contains(&series.name) {
            let end = read_block(cursor, series)?;
            log::debug!("series `{}`: {} point(s)", series.name, series.len());
            end
        } else {
            log::debug!("series `{}`: block skipped", series.name);
            skip_block(cursor)
        };

        if end == BlockEnd::EndOfInput {
            log::warn!(
                "Input ended before the data block of `{}` was terminated",
                series.name
            );
            break;
        }
    }
    Ok(())
}

fn read_block(cursor: &mut LineCursor<'_>, series: &mut Series) -> Result<BlockEnd, ParseError> {
    while let Some((line_no, raw)) = cursor.next_line() {
        let line = raw.trim();
        if line == BLOCK_TERMINATOR {
            return Ok(BlockEnd::Terminated);
        }

        let (x, y) = parse_point(line).ok_or_else(|| ParseError {
            line: line_no,
            kind: ParseErrorKind::MalformedPoint(line.to_string()),
        })?;

        if series.insert(x, y).is_some() {
            log::warn!(
                "Data inconsistency: {x} occurs twice as x in `{}` (line {line_no})",
                series.name
            );
        }
    }
    Ok(BlockEnd::EndOfInput)
}

fn skip_block(cursor: &mut LineCursor<'_>) -> BlockEnd {
    while let Some((_, raw)) = cursor.next_line() {
        if raw.trim() == BLOCK_TERMINATOR {
            return BlockEnd::Terminated;
        }
    }
    BlockEnd::EndOfInput
}

/// Exactly two whitespace-separated floats.
fn parse_point(line: &str) -> Option<(f64, f64)> {
    let mut tokens = line.split_whitespace();
    let x = tokens.next()?.parse::<f64>().ok()?;
    let y = tokens.next()?.parse::<f64>().ok()?;
    match tokens.next() {
        Some(_) => None,
        None => Some((x, y)),
    }
}
