//! Chord symbol recognition
//!
//! Classifies a text token as a chord symbol (root + quality + optional slash
//! bass) or rejects it. Everything else in the engine funnels through
//! [`recognize`]: both dialect parsers and the transposition driver treat a
//! token as a chord exactly when this module says so.

use serde::Serialize;
use std::fmt;

/// Chromatic scale spelled with sharps, index 0 = C.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Chromatic scale spelled with flats, index 0 = C.
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Recognized quality suffixes, longest first so that greedy matching strips
/// "maj" before "m" and "min" before "m".
const QUALITY_SUFFIXES: [&str; 14] = [
    "maj", "min", "sus", "aug", "dim", "add", "11", "13", "m", "M", "7", "9", "6", "5",
];

/// Sharp or flat spelling, derived per token from the original symbol and
/// preserved across transposition of that token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotationStyle {
    Sharp,
    Flat,
}

/// One of the 12 chromatic positions plus the spelling its token used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchClass {
    /// 0..=11, starting at C.
    pub index: u8,
    pub style: NotationStyle,
}

impl PitchClass {
    /// Look up a root symbol ("C", "F#", "Bb", ...) in the two spelling tables.
    ///
    /// Style selection: sharp when the symbol contains `#` or appears only in
    /// the sharp table; flat otherwise. Naturals appear in both tables and take
    /// the flat path, which spells identically.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let sharp = SHARP_NAMES.iter().position(|&name| name == symbol);
        let flat = FLAT_NAMES.iter().position(|&name| name == symbol);
        let index = sharp.or(flat)? as u8;
        let style = if symbol.contains('#') || (sharp.is_some() && flat.is_none()) {
            NotationStyle::Sharp
        } else {
            NotationStyle::Flat
        };
        Some(PitchClass { index, style })
    }

    /// The symbol for this pitch class in its own spelling table.
    pub fn name(&self) -> &'static str {
        match self.style {
            NotationStyle::Sharp => SHARP_NAMES[self.index as usize],
            NotationStyle::Flat => FLAT_NAMES[self.index as usize],
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recognized chord symbol: root pitch class, quality suffix text, and an
/// optional slash bass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub root: PitchClass,
    /// The suffix text exactly as written ("m7", "maj7", "sus", "" for a plain
    /// triad). Passed through transposition unmodified.
    pub quality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bass: Option<PitchClass>,
}

impl Chord {
    /// Re-serialize to a chord symbol ("F#m7", "G/B", ...).
    pub fn symbol(&self) -> String {
        match &self.bass {
            Some(bass) => format!("{}{}/{}", self.root.name(), self.quality, bass.name()),
            None => format!("{}{}", self.root.name(), self.quality),
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bass {
            Some(bass) => write!(f, "{}{}/{}", self.root.name(), self.quality, bass.name()),
            None => write!(f, "{}{}", self.root.name(), self.quality),
        }
    }
}

/// Recognize a whole token as a chord symbol.
///
/// A chord is one letter A-G, an optional `#` or `b`, zero or more quality
/// suffixes from the closed set (`maj`, `min`, `m`, `sus`, `aug`, `dim`,
/// `add`, `M`, `7`, `9`, `11`, `13`, `6`, `5`), and an optional `/` slash bass
/// (letter plus optional accidental). Any leftover text rejects the token.
///
/// Pure function; returns `None` for anything that is not a chord, and callers
/// leave such tokens untouched.
///
/// # Examples
/// ```
/// use chordsheet::chord::recognize;
///
/// assert!(recognize("G").is_some());
/// assert!(recognize("F#m7").is_some());
/// assert!(recognize("Bbmaj7").is_some());
/// assert!(recognize("G/B").is_some());
///
/// assert!(recognize("Hello").is_none());
/// assert!(recognize("cat").is_none());
/// ```
pub fn recognize(token: &str) -> Option<Chord> {
    let root_len = root_symbol_len(token)?;
    let root = PitchClass::from_symbol(&token[..root_len])?;
    let after_root = &token[root_len..];

    // Greedily strip quality suffixes until the slash or the end of the token.
    let mut rest = after_root;
    while !rest.is_empty() && !rest.starts_with('/') {
        match QUALITY_SUFFIXES.iter().find(|s| rest.starts_with(*s)) {
            Some(suffix) => rest = &rest[suffix.len()..],
            None => return None,
        }
    }
    let quality = after_root[..after_root.len() - rest.len()].to_string();

    let bass = match rest.strip_prefix('/') {
        Some(bass_symbol) => {
            let bass_len = root_symbol_len(bass_symbol)?;
            if bass_len != bass_symbol.len() {
                return None;
            }
            Some(PitchClass::from_symbol(bass_symbol)?)
        }
        None => None,
    };

    Some(Chord { root, quality, bass })
}

/// Length in bytes of the leading root symbol (letter plus optional
/// accidental), or None when the token does not start with A-G.
fn root_symbol_len(token: &str) -> Option<usize> {
    let first = token.chars().next()?;
    if !('A'..='G').contains(&first) {
        return None;
    }
    match token.as_bytes().get(1) {
        Some(b'#') | Some(b'b') => Some(2),
        _ => Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_plain_roots() {
        for symbol in ["A", "B", "C", "D", "E", "F", "G"] {
            let chord = recognize(symbol).unwrap();
            assert_eq!(chord.symbol(), symbol);
            assert!(chord.quality.is_empty());
            assert!(chord.bass.is_none());
        }
    }

    #[test]
    fn test_recognize_accidentals() {
        let f_sharp = recognize("F#").unwrap();
        assert_eq!(f_sharp.root.index, 6);
        assert_eq!(f_sharp.root.style, NotationStyle::Sharp);

        let b_flat = recognize("Bb").unwrap();
        assert_eq!(b_flat.root.index, 10);
        assert_eq!(b_flat.root.style, NotationStyle::Flat);
    }

    #[test]
    fn test_natural_roots_spell_identically_in_both_tables() {
        // Naturals take the flat path; the rendered name must not change.
        for symbol in ["C", "D", "E", "F", "G", "A", "B"] {
            let chord = recognize(symbol).unwrap();
            assert_eq!(chord.root.style, NotationStyle::Flat);
            assert_eq!(chord.root.name(), symbol);
        }
    }

    #[test]
    fn test_recognize_qualities() {
        assert_eq!(recognize("Am").unwrap().quality, "m");
        assert_eq!(recognize("Cmaj7").unwrap().quality, "maj7");
        assert_eq!(recognize("Dm7").unwrap().quality, "m7");
        assert_eq!(recognize("Gsus").unwrap().quality, "sus");
        assert_eq!(recognize("C13").unwrap().quality, "13");
        assert_eq!(recognize("Eaug").unwrap().quality, "aug");
        assert_eq!(recognize("F#dim").unwrap().quality, "dim");
    }

    #[test]
    fn test_recognize_slash_chords() {
        let chord = recognize("G/B").unwrap();
        assert_eq!(chord.root.index, 7);
        assert_eq!(chord.bass.unwrap().index, 11);
        assert_eq!(chord.symbol(), "G/B");

        let with_quality = recognize("Am7/G").unwrap();
        assert_eq!(with_quality.quality, "m7");
        assert_eq!(with_quality.bass.unwrap().index, 7);
    }

    #[test]
    fn test_reject_non_chords() {
        assert!(recognize("").is_none());
        assert!(recognize("Hello").is_none());
        assert!(recognize("cat").is_none());
        assert!(recognize("H").is_none());
        // Residue outside the closed suffix set rejects the whole token.
        assert!(recognize("Cat").is_none());
        assert!(recognize("Good").is_none());
        // Dangling or malformed slash bass.
        assert!(recognize("G/").is_none());
        assert!(recognize("G/H").is_none());
        assert!(recognize("G/Bx").is_none());
    }

    #[test]
    fn test_quality_outside_closed_set_rejects() {
        // "sus4" is not in the suffix set: "sus" strips, "4" remains.
        assert!(recognize("Asus4").is_none());
        assert!(recognize("C#5b").is_none());
    }

    #[test]
    fn test_symbol_round_trip() {
        for symbol in ["C", "F#m7", "Bbmaj7", "G/B", "Dsus", "Abm", "E7/G#"] {
            assert_eq!(recognize(symbol).unwrap().symbol(), symbol);
        }
    }
}
