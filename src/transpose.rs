//! Chord transposition
//!
//! A single transposition function shared by both dialect drivers. Every call
//! site goes through [`transpose_chord`], so sharp/flat selection cannot
//! drift between the chordpro and plaintext paths.

use crate::ast::SongFormat;
use crate::chord::{self, Chord, PitchClass};
use crate::{chordpro, plaintext};

/// Shift a pitch class by a signed number of semitones, keeping its spelling
/// style. Canonical positive modulo: negative steps and negative intermediate
/// indices wrap into 0..=11.
fn transpose_pitch(pitch: PitchClass, steps: i32) -> PitchClass {
    let index = (pitch.index as i32 + steps).rem_euclid(12) as u8;
    PitchClass {
        index,
        style: pitch.style,
    }
}

/// Transpose a recognized chord by `steps` semitones.
///
/// The quality suffix passes through unmodified. The slash bass, when present,
/// moves by the same delta with the same spelling rule as the root.
///
/// # Examples
/// ```
/// use chordsheet::chord::recognize;
/// use chordsheet::transpose::transpose_chord;
///
/// let chord = recognize("F#m7").unwrap();
/// assert_eq!(transpose_chord(&chord, 2).symbol(), "G#m7");
///
/// let flat = recognize("Bb").unwrap();
/// assert_eq!(transpose_chord(&flat, 2).symbol(), "C");
/// ```
pub fn transpose_chord(chord: &Chord, steps: i32) -> Chord {
    Chord {
        root: transpose_pitch(chord.root, steps),
        quality: chord.quality.clone(),
        bass: chord.bass.map(|bass| transpose_pitch(bass, steps)),
    }
}

/// Transpose a bare token when it is a recognizable chord symbol; pass
/// anything else through unchanged.
pub fn transpose_token(token: &str, steps: i32) -> String {
    match chord::recognize(token) {
        Some(chord) => transpose_chord(&chord, steps).symbol(),
        None => token.to_string(),
    }
}

/// Transpose stored song source by `steps` semitones.
///
/// Dispatches to the dialect's source-level rewrite: chordpro touches only
/// `[...]` spans, plaintext only tokens of detected chord lines. `steps = 0`
/// returns the input unchanged.
///
/// The delta is always relative to the untransposed stored content; callers
/// that stack transpositions keep a single running offset and re-apply it to
/// the original source rather than summing deltas over displayed text.
pub fn transpose_source(source: &str, format: SongFormat, steps: i32) -> String {
    if steps == 0 {
        return source.to_string();
    }
    match format {
        SongFormat::ChordPro => chordpro::transpose_source(source, steps),
        SongFormat::Plaintext => plaintext::transpose_source(source, steps),
    }
}
