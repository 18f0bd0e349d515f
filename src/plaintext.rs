//! # Plaintext Dialect Parser
//!
//! Two-line chord-over-lyric layout: a line whose tokens are mostly chord
//! symbols is attached to the lyric line beneath it, preserving each chord's
//! original character column.
//!
//! ## Chord line heuristic
//! A line is a chord line iff it is non-empty, splits into at least two
//! whitespace-separated tokens, and strictly more than half of those tokens
//! are recognized chord symbols. Exactly half does not qualify.
//!
//! ## Pair consumption
//! A qualifying line with a following line consumes both: the next line is the
//! lyric line unconditionally (even if it would itself qualify), and the walk
//! advances two lines. A qualifying line at the end of input falls through to
//! plain-line handling.
//!
//! ## Columns
//! The chord line is split on single spaces; a token's column is the
//! accumulated `len + 1` of every preceding token, with the empty tokens
//! produced by runs of spaces each contributing one column. This reproduces
//! the raw source columns of the chord line as originally written.

use crate::ast::{ChordLinePair, PositionedChord, Sheet, SheetBody, SongMetadata, TextLine};
use crate::chord;
use crate::transpose::transpose_token;

/// Parse plaintext source into a sheet.
pub fn parse(source: &str) -> Sheet {
    let lines: Vec<&str> = source.lines().collect();
    let metadata = extract_metadata(&lines);

    let mut body = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if is_chord_line(line) && i + 1 < lines.len() {
            body.push(TextLine::Pair(ChordLinePair {
                chords: chord_positions(line),
                lyric: lines[i + 1].to_string(),
            }));
            i += 2;
            continue;
        }
        if line.trim().is_empty() {
            body.push(TextLine::Empty);
        } else {
            body.push(TextLine::Plain(line.to_string()));
        }
        i += 1;
    }

    Sheet {
        metadata,
        body: SheetBody::Plaintext(body),
    }
}

/// Transpose the tokens of detected chord lines, leaving lyric lines and
/// non-chord lines untouched.
///
/// Re-runs the same chord-line walk as [`parse`], so a chord line directly
/// after another chord line is a lyric line and is not rewritten. Rewritten
/// lines are split on single spaces and rejoined, which keeps runs of spaces
/// intact; columns shift only where token lengths change.
pub fn transpose_source(source: &str, steps: i32) -> String {
    if steps == 0 {
        return source.to_string();
    }

    let mut segments: Vec<&str> = source.split('\n').collect();
    let trailing_newline = segments.last() == Some(&"");
    if trailing_newline {
        segments.pop();
    }

    let mut out: Vec<String> = Vec::with_capacity(segments.len());
    let mut i = 0;
    while i < segments.len() {
        let raw = segments[i];
        let (line, cr) = match raw.strip_suffix('\r') {
            Some(stripped) => (stripped, "\r"),
            None => (raw, ""),
        };
        if is_chord_line(line) && i + 1 < segments.len() {
            let moved: Vec<String> = line
                .split(' ')
                .map(|token| transpose_token(token, steps))
                .collect();
            out.push(format!("{}{}", moved.join(" "), cr));
            out.push(segments[i + 1].to_string());
            i += 2;
        } else {
            out.push(raw.to_string());
            i += 1;
        }
    }

    let mut result = out.join("\n");
    if trailing_newline {
        result.push('\n');
    }
    result
}

/// Strictly more than half of at least two whitespace-separated tokens must be
/// recognized chord symbols.
fn is_chord_line(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return false;
    }
    let recognized = tokens
        .iter()
        .filter(|token| chord::recognize(token).is_some())
        .count();
    recognized * 2 > tokens.len()
}

/// Recognized chords of a chord line with their original character columns.
fn chord_positions(line: &str) -> Vec<PositionedChord> {
    let mut chords = Vec::new();
    let mut column = 0;
    for token in line.split(' ') {
        if let Some(chord) = chord::recognize(token) {
            chords.push(PositionedChord { column, chord });
        }
        column += token.chars().count() + 1;
    }
    chords
}

/// First-line `<title> - <artist>` heuristic plus a `Key:` scan over the first
/// five lines, first match wins.
fn extract_metadata(lines: &[&str]) -> SongMetadata {
    let mut metadata = SongMetadata::default();

    if let Some(first) = lines.first() {
        let first = first.trim();
        match first.split_once(" - ") {
            Some((title, artist)) => {
                metadata.title = title.trim().to_string();
                metadata.artist = artist.trim().to_string();
            }
            None => metadata.title = first.to_string(),
        }
    }

    for line in lines.iter().take(5) {
        if let Some(prefix) = line.get(..4) {
            if prefix.eq_ignore_ascii_case("key:") {
                let value = line[4..].trim();
                if !value.is_empty() {
                    metadata.key = value.to_string();
                    break;
                }
            }
        }
    }

    metadata
}
