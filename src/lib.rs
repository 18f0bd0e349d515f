pub mod ast;
pub mod chord;
pub mod chordpro;
pub mod error;
pub mod html;
pub mod plaintext;
pub mod transpose;

pub use ast::*;
pub use chord::{recognize, Chord, NotationStyle, PitchClass};
pub use error::SheetError;
pub use transpose::{transpose_chord, transpose_source};

/// Parse song source in the given dialect into a renderable sheet.
/// This is the main entry point for the library.
pub fn parse(content: &str, format: SongFormat) -> Sheet {
    match format {
        SongFormat::ChordPro => chordpro::parse(content),
        SongFormat::Plaintext => plaintext::parse(content),
    }
}

/// Transpose stored song source by a semitone delta, relative to the
/// untransposed content. The result can be re-parsed or served as-is.
pub fn transpose(content: &str, format: SongFormat, steps: i32) -> String {
    transpose_source(content, format, steps)
}

/// Parse and render to display HTML.
pub fn render(content: &str, format: SongFormat) -> String {
    html::render(&parse(content, format))
}

/// Transpose, then parse and render to display HTML.
pub fn render_transposed(content: &str, format: SongFormat, steps: i32) -> String {
    let moved = transpose_source(content, format, steps);
    html::render(&parse(&moved, format))
}

/// Parse with a raw format tag as stored by the song library
/// ("chordpro" or "plaintext").
pub fn parse_tagged(content: &str, format: &str) -> Result<Sheet, SheetError> {
    let format = SongFormat::from_str(format)
        .ok_or_else(|| SheetError::UnknownFormat(format.to_string()))?;
    Ok(parse(content, format))
}

/// Transpose with a raw format tag as stored by the song library.
pub fn transpose_tagged(content: &str, format: &str, steps: i32) -> Result<String, SheetError> {
    let format = SongFormat::from_str(format)
        .ok_or_else(|| SheetError::UnknownFormat(format.to_string()))?;
    Ok(transpose_source(content, format, steps))
}
