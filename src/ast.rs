//! # Parsed Sheet Structure Types
//!
//! This module defines the structures produced by the two dialect parsers.
//!
//! ## Type Hierarchy
//! ```text
//! Sheet
//!   ├── SongMetadata (title, artist, album, year, key)
//!   └── SheetBody (enum)
//!         ├── ChordPro(Region)            - nested region tree
//!         │     Region
//!         │       ├── kind: RegionKind (plain | verse | chorus | bridge)
//!         │       ├── label: Option<String>
//!         │       └── Vec<Node> (Line | Region)
//!         │     SheetLine = Vec<Span>
//!         │       Span = Text | Chord | Annotation
//!         └── Plaintext(Vec<TextLine>)    - flat line sequence
//!               TextLine = Pair | Plain | Empty
//!               ChordLinePair
//!                 ├── chords: Vec<PositionedChord> (column + Chord)
//!                 └── lyric: String
//! ```
//!
//! ## Key Concepts
//!
//! ### Regions (chordpro)
//! `{start_of_verse}` / `{end_of_verse}` and the chorus/bridge analogues open and
//! close regions. Regions nest; every parse produces a single root region of kind
//! `Plain` whose children are lines and sub-regions in source order.
//!
//! ### Chord line pairs (plaintext)
//! A line classified as a chord line is attached to the following lyric line.
//! Each chord carries the character column it occupied in the chord line as
//! originally written. Columns are recomputed on every parse, never transposed.
//!
//! ## Related Modules
//! - `chordpro` / `plaintext` - produce these types from song source
//! - `html` - serializes these types to display HTML
//! - `chord` - the `Chord` and `PitchClass` leaf types

use crate::chord::Chord;
use serde::Serialize;

/// Markup dialect of a stored song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SongFormat {
    ChordPro,
    Plaintext,
}

impl SongFormat {
    /// Parse a stored format tag ("chordpro" or "plaintext").
    pub fn from_str(tag: &str) -> Option<Self> {
        match tag.trim() {
            "chordpro" => Some(SongFormat::ChordPro),
            "plaintext" => Some(SongFormat::Plaintext),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SongFormat::ChordPro => "chordpro",
            SongFormat::Plaintext => "plaintext",
        }
    }
}

/// Song header fields, extracted once per parse and never mutated by
/// transposition. Absent fields stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub key: String,
}

/// Kind of a chordpro region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    /// Top-level content outside any structural directive.
    Plain,
    Verse,
    Chorus,
    Bridge,
}

/// Inline span within a chordpro line.
///
/// `Chord` spans hold the raw bracket content; only spans whose content the
/// recognizer accepts are moved by transposition, but all of them render with
/// chord emphasis. `Annotation` spans (`[*note]`) are editorial notes and are
/// never transposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Span {
    Text(String),
    Chord(String),
    Annotation(String),
}

/// One rendered line of a chordpro region: inline spans in source order.
/// A blank source line is a line with no spans.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetLine {
    pub spans: Vec<Span>,
}

/// A child of a region: either a content line or a nested region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Line(SheetLine),
    Region(Region),
}

/// A structural block of a chordpro sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub kind: RegionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub children: Vec<Node>,
}

impl Region {
    /// The implicit top-level region every chordpro parse starts from.
    pub fn root() -> Self {
        Region {
            kind: RegionKind::Plain,
            label: None,
            children: Vec::new(),
        }
    }
}

/// A chord anchored to a character column of its chord line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedChord {
    pub column: usize,
    pub chord: Chord,
}

/// A chord line attached to the lyric line beneath it.
///
/// Invariant: `chords` columns are monotonically non-decreasing in source
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordLinePair {
    pub chords: Vec<PositionedChord>,
    pub lyric: String,
}

/// One line of a parsed plaintext sheet, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextLine {
    /// A chord line with its lyric line.
    Pair(ChordLinePair),
    /// A line that is neither blank nor part of a pair.
    Plain(String),
    /// A blank line, kept so vertical layout survives rendering.
    Empty,
}

/// A fully parsed song: header metadata plus the dialect-specific body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub metadata: SongMetadata,
    pub body: SheetBody,
}

/// Dialect-specific renderable body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetBody {
    ChordPro(Region),
    Plaintext(Vec<TextLine>),
}
