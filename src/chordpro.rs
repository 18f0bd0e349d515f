//! # ChordPro Dialect Parser
//!
//! Consumes directive/bracket markup and produces the nested region structure
//! defined in `ast`.
//!
//! ## Directive handling
//! - Metadata: `{title: ...}`, `{artist: ...}`, `{album: ...}`, `{year: ...}`,
//!   `{key: ...}`: first match wins, absent fields stay empty.
//! - Structure: `{start_of_verse[: label]}` / `{end_of_verse}` and the chorus
//!   and bridge analogues. Regions are parsed with an explicit stack: push on
//!   open, pop on close, auto-close anything still open at end of input.
//!   Chorus and bridge take default labels ("Chorus" / "Bridge") when none is
//!   given; a verse without a label has none.
//! - Anything else in braces is dropped without rendering. A close directive
//!   with no open region is dropped the same way. Parsing never fails.
//!
//! ## Inline markers
//! `[chord]` becomes a chord span before the following text run; `[*note]`
//! becomes an annotation span. An unclosed `[` degrades to plain text.
//!
//! ## Transposition
//! [`transpose_source`] rewrites bracket spans in place on the raw source,
//! independent of the structural parse, so it can run before parsing or its
//! result can be re-parsed.

use crate::ast::{Node, Region, RegionKind, Sheet, SheetBody, SheetLine, SongMetadata, Span};
use crate::transpose::transpose_token;

/// Parse chordpro source into a sheet.
pub fn parse(source: &str) -> Sheet {
    let metadata = extract_metadata(source);
    let mut root = Region::root();
    let mut stack: Vec<Region> = Vec::new();

    for line in source.lines() {
        parse_line_into(line, &mut root, &mut stack);
    }

    // Auto-close regions left open at end of input.
    while let Some(region) = stack.pop() {
        current(&mut root, &mut stack).children.push(Node::Region(region));
    }

    Sheet {
        metadata,
        body: SheetBody::ChordPro(root),
    }
}

/// Transpose every `[...]` span that is not an annotation, leaving directives
/// and all other text byte-for-byte untouched.
pub fn transpose_source(source: &str, steps: i32) -> String {
    if steps == 0 {
        return source.to_string();
    }
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(open) = rest.find('[') {
        match rest[open..].find(']') {
            Some(close_rel) => {
                let close = open + close_rel;
                out.push_str(&rest[..open]);
                let inner = &rest[open + 1..close];
                out.push('[');
                if inner.starts_with('*') {
                    out.push_str(inner);
                } else {
                    out.push_str(&transpose_token(inner, steps));
                }
                out.push(']');
                rest = &rest[close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// The innermost open region, or the root when none is open.
fn current<'a>(root: &'a mut Region, stack: &'a mut Vec<Region>) -> &'a mut Region {
    stack.last_mut().unwrap_or(root)
}

enum Directive {
    Open(RegionKind, Option<String>),
    Close,
    /// Metadata or unrecognized: contributes nothing to the structure.
    Drop,
}

fn classify_directive(body: &str) -> Directive {
    let body = body.trim();

    let openers: [(&str, RegionKind, Option<&str>); 3] = [
        ("start_of_verse", RegionKind::Verse, None),
        ("start_of_chorus", RegionKind::Chorus, Some("Chorus")),
        ("start_of_bridge", RegionKind::Bridge, Some("Bridge")),
    ];
    for (prefix, kind, default_label) in openers {
        if let Some(rest) = body.strip_prefix(prefix) {
            if rest.is_empty() {
                return Directive::Open(kind, default_label.map(String::from));
            }
            if let Some(raw_label) = rest.strip_prefix(':') {
                let label = raw_label.trim();
                let label = if label.is_empty() {
                    default_label.map(String::from)
                } else {
                    Some(label.to_string())
                };
                return Directive::Open(kind, label);
            }
        }
    }

    match body {
        "end_of_verse" | "end_of_chorus" | "end_of_bridge" => Directive::Close,
        _ => Directive::Drop,
    }
}

/// Process one source line: directives mutate the region stack, the remaining
/// text becomes a content line. A line that held only directives produces no
/// content line; every other line (blank lines included) produces exactly one.
fn parse_line_into(line: &str, root: &mut Region, stack: &mut Vec<Region>) {
    let mut text = String::new();
    let mut saw_directive = false;
    let mut rest = line;

    while let Some(open) = rest.find('{') {
        let close = match rest[open..].find('}') {
            Some(close_rel) => open + close_rel,
            None => break,
        };
        let body = &rest[open + 1..close];

        // A '{' inside the candidate body means the directive opens at the
        // inner brace; everything before it is text.
        if let Some(inner) = body.rfind('{') {
            text.push_str(&rest[..open + 1 + inner]);
            rest = &rest[open + 1 + inner..];
            continue;
        }

        text.push_str(&rest[..open]);
        saw_directive = true;
        match classify_directive(body) {
            Directive::Open(kind, label) => {
                flush_text(&mut text, root, stack);
                stack.push(Region {
                    kind,
                    label,
                    children: Vec::new(),
                });
            }
            Directive::Close => {
                flush_text(&mut text, root, stack);
                if let Some(region) = stack.pop() {
                    current(root, stack).children.push(Node::Region(region));
                }
            }
            Directive::Drop => {}
        }
        rest = &rest[close + 1..];
    }

    text.push_str(rest);
    if !text.is_empty() || !saw_directive {
        current(root, stack)
            .children
            .push(Node::Line(parse_spans(&text)));
    }
}

fn flush_text(text: &mut String, root: &mut Region, stack: &mut Vec<Region>) {
    if !text.is_empty() {
        current(root, stack)
            .children
            .push(Node::Line(parse_spans(text)));
        text.clear();
    }
}

/// Split a text run into inline spans around `[...]` markers.
fn parse_spans(text: &str) -> SheetLine {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let close = match rest[open..].find(']') {
            Some(close_rel) => open + close_rel,
            None => break,
        };
        if open > 0 {
            spans.push(Span::Text(rest[..open].to_string()));
        }
        let inner = &rest[open + 1..close];
        match inner.strip_prefix('*') {
            Some(note) => spans.push(Span::Annotation(note.to_string())),
            None => spans.push(Span::Chord(inner.to_string())),
        }
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        spans.push(Span::Text(rest.to_string()));
    }

    SheetLine { spans }
}

/// First-match metadata directive extraction over the whole source.
fn extract_metadata(source: &str) -> SongMetadata {
    let mut metadata = SongMetadata::default();
    let mut rest = source;

    while let Some(open) = rest.find('{') {
        let close = match rest[open..].find('}') {
            Some(close_rel) => open + close_rel,
            None => break,
        };
        let body = &rest[open + 1..close];
        if let Some(inner) = body.rfind('{') {
            rest = &rest[open + 1 + inner..];
            continue;
        }
        if let Some((name, value)) = body.split_once(':') {
            let value = value.trim();
            if !value.is_empty() {
                let field = match name.trim() {
                    "title" => Some(&mut metadata.title),
                    "artist" => Some(&mut metadata.artist),
                    "album" => Some(&mut metadata.album),
                    "year" => Some(&mut metadata.year),
                    "key" => Some(&mut metadata.key),
                    _ => None,
                };
                if let Some(field) = field {
                    if field.is_empty() {
                        *field = value.to_string();
                    }
                }
            }
        }
        rest = &rest[close + 1..];
    }

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_of(sheet: &Sheet) -> &Region {
        match &sheet.body {
            SheetBody::ChordPro(root) => root,
            SheetBody::Plaintext(_) => panic!("expected chordpro body"),
        }
    }

    #[test]
    fn test_metadata_extraction() {
        let sheet = parse(
            "{title: Wonderwall}\n{artist: Oasis}\n{album: Morning Glory}\n{year: 1995}\n{key: F#m}\nHello",
        );
        assert_eq!(sheet.metadata.title, "Wonderwall");
        assert_eq!(sheet.metadata.artist, "Oasis");
        assert_eq!(sheet.metadata.album, "Morning Glory");
        assert_eq!(sheet.metadata.year, "1995");
        assert_eq!(sheet.metadata.key, "F#m");
    }

    #[test]
    fn test_metadata_first_match_wins() {
        let sheet = parse("{title: First}\n{title: Second}");
        assert_eq!(sheet.metadata.title, "First");
    }

    #[test]
    fn test_metadata_absent_fields_stay_empty() {
        let sheet = parse("{title: Only Title}\nLyrics");
        assert_eq!(sheet.metadata.title, "Only Title");
        assert_eq!(sheet.metadata.artist, "");
        assert_eq!(sheet.metadata.key, "");
    }

    #[test]
    fn test_chord_and_annotation_spans() {
        let sheet = parse("[C]Hello [G]world [*quietly]");
        let root = root_of(&sheet);
        assert_eq!(root.children.len(), 1);
        let line = match &root.children[0] {
            Node::Line(line) => line,
            other => panic!("expected line, got {:?}", other),
        };
        assert_eq!(
            line.spans,
            vec![
                Span::Chord("C".to_string()),
                Span::Text("Hello ".to_string()),
                Span::Chord("G".to_string()),
                Span::Text("world ".to_string()),
                Span::Annotation("quietly".to_string()),
            ]
        );
    }

    #[test]
    fn test_unclosed_bracket_degrades_to_text() {
        let sheet = parse("Hello [C world");
        let root = root_of(&sheet);
        let line = match &root.children[0] {
            Node::Line(line) => line,
            other => panic!("expected line, got {:?}", other),
        };
        assert_eq!(line.spans, vec![Span::Text("Hello [C world".to_string())]);
    }

    #[test]
    fn test_regions_nest_and_label() {
        let source = "{start_of_verse: Verse 1}\n[C]Line one\n{end_of_verse}\n{start_of_chorus}\n[G]Line two\n{end_of_chorus}";
        let sheet = parse(source);
        let root = root_of(&sheet);
        assert_eq!(root.kind, RegionKind::Plain);
        assert_eq!(root.children.len(), 2);

        let verse = match &root.children[0] {
            Node::Region(region) => region,
            other => panic!("expected region, got {:?}", other),
        };
        assert_eq!(verse.kind, RegionKind::Verse);
        assert_eq!(verse.label.as_deref(), Some("Verse 1"));
        assert_eq!(verse.children.len(), 1);

        let chorus = match &root.children[1] {
            Node::Region(region) => region,
            other => panic!("expected region, got {:?}", other),
        };
        assert_eq!(chorus.kind, RegionKind::Chorus);
        assert_eq!(chorus.label.as_deref(), Some("Chorus"));
    }

    #[test]
    fn test_verse_has_no_default_label() {
        let sheet = parse("{start_of_verse}\nLine\n{end_of_verse}");
        let root = root_of(&sheet);
        let verse = match &root.children[0] {
            Node::Region(region) => region,
            other => panic!("expected region, got {:?}", other),
        };
        assert_eq!(verse.label, None);
    }

    #[test]
    fn test_bridge_default_label() {
        let sheet = parse("{start_of_bridge}\nLine\n{end_of_bridge}");
        let root = root_of(&sheet);
        let bridge = match &root.children[0] {
            Node::Region(region) => region,
            other => panic!("expected region, got {:?}", other),
        };
        assert_eq!(bridge.kind, RegionKind::Bridge);
        assert_eq!(bridge.label.as_deref(), Some("Bridge"));
    }

    #[test]
    fn test_unclosed_region_auto_closes() {
        let sheet = parse("{start_of_chorus}\nStill inside");
        let root = root_of(&sheet);
        assert_eq!(root.children.len(), 1);
        let chorus = match &root.children[0] {
            Node::Region(region) => region,
            other => panic!("expected region, got {:?}", other),
        };
        assert_eq!(chorus.children.len(), 1);
    }

    #[test]
    fn test_stray_close_is_dropped() {
        let sheet = parse("{end_of_verse}\nHello");
        let root = root_of(&sheet);
        assert_eq!(root.children.len(), 1);
        assert!(matches!(root.children[0], Node::Line(_)));
    }

    #[test]
    fn test_unknown_directives_are_dropped() {
        let sheet = parse("{comment: ignore me}\n{capo: 2}\nHello");
        let root = root_of(&sheet);
        assert_eq!(root.children.len(), 1);
        let line = match &root.children[0] {
            Node::Line(line) => line,
            other => panic!("expected line, got {:?}", other),
        };
        assert_eq!(line.spans, vec![Span::Text("Hello".to_string())]);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let sheet = parse("One\n\nTwo");
        let root = root_of(&sheet);
        assert_eq!(root.children.len(), 3);
        let blank = match &root.children[1] {
            Node::Line(line) => line,
            other => panic!("expected line, got {:?}", other),
        };
        assert!(blank.spans.is_empty());
    }

    #[test]
    fn test_transpose_source_moves_chords_only() {
        let source = "{title: Test}\n[C]Hello [G]world";
        let transposed = transpose_source(source, 2);
        assert_eq!(transposed, "{title: Test}\n[D]Hello [A]world");
    }

    #[test]
    fn test_transpose_source_skips_annotations() {
        let source = "[C]la [*a tempo] [G]la";
        assert_eq!(transpose_source(source, 2), "[D]la [*a tempo] [A]la");
    }

    #[test]
    fn test_transpose_source_leaves_unrecognized_spans() {
        let source = "[Coffee]Hello [C]world";
        assert_eq!(transpose_source(source, 2), "[Coffee]Hello [D]world");
    }

    #[test]
    fn test_transpose_source_zero_steps_is_identity() {
        let source = "{title: T}\n[Csus]Hello [Riff]";
        assert_eq!(transpose_source(source, 0), source);
    }

    #[test]
    fn test_transpose_then_parse_keeps_metadata() {
        let transposed = transpose_source("{title: Test}\n[C]Hello [G]world", 2);
        let sheet = parse(&transposed);
        assert_eq!(sheet.metadata.title, "Test");
    }
}
