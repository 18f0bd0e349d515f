//! Display-HTML serializer over the parsed sheet structure.
//!
//! Output vocabulary: `chord` and `annotation` spans, `verse`/`chorus`/`bridge`
//! region divs with `*-label` headers, and a `<pre class="plaintext">` block
//! for the two-line dialect with chords re-anchored at their original columns.
//! Song text is HTML-escaped; metadata is not rendered (header display belongs
//! to the consuming shell).

use crate::ast::{Node, PositionedChord, Region, RegionKind, Sheet, SheetBody, SheetLine, Span, TextLine};

/// Render a parsed sheet to display HTML.
pub fn render(sheet: &Sheet) -> String {
    match &sheet.body {
        SheetBody::ChordPro(root) => {
            let mut out = String::new();
            render_children(root, &mut out);
            out
        }
        SheetBody::Plaintext(lines) => render_plaintext(lines),
    }
}

fn render_children(region: &Region, out: &mut String) {
    for child in &region.children {
        match child {
            Node::Line(line) => render_line(line, out),
            Node::Region(nested) => render_region(nested, out),
        }
    }
}

fn render_region(region: &Region, out: &mut String) {
    let kind = kind_class(region.kind);
    out.push_str(&format!("<div class=\"{}\">\n", kind));
    if let Some(label) = &region.label {
        out.push_str(&format!(
            "<div class=\"{}-label\">{}</div>\n",
            kind,
            escape_html(label)
        ));
    }
    render_children(region, out);
    out.push_str("</div>\n");
}

fn render_line(line: &SheetLine, out: &mut String) {
    for span in &line.spans {
        match span {
            Span::Text(text) => out.push_str(&escape_html(text)),
            Span::Chord(symbol) => out.push_str(&format!(
                "<span class=\"chord\">{}</span>",
                escape_html(symbol)
            )),
            Span::Annotation(note) => out.push_str(&format!(
                "<span class=\"annotation\">{}</span>",
                escape_html(note)
            )),
        }
    }
    out.push_str("<br>\n");
}

fn render_plaintext(lines: &[TextLine]) -> String {
    let mut out = String::from("<pre class=\"plaintext\">\n");
    for line in lines {
        match line {
            TextLine::Pair(pair) => {
                render_chord_line(&pair.chords, &mut out);
                out.push_str(&escape_html(&pair.lyric));
                out.push('\n');
            }
            TextLine::Plain(text) => {
                out.push_str(&escape_html(text));
                out.push('\n');
            }
            TextLine::Empty => out.push('\n'),
        }
    }
    out.push_str("</pre>\n");
    out
}

/// Rebuild a chord line at its original columns, each chord wrapped for
/// styling. Markup width does not disturb `<pre>` column alignment.
fn render_chord_line(chords: &[PositionedChord], out: &mut String) {
    let mut column = 0;
    for positioned in chords {
        while column < positioned.column {
            out.push(' ');
            column += 1;
        }
        let symbol = positioned.chord.symbol();
        column += symbol.chars().count();
        out.push_str(&format!("<span class=\"chord\">{}</span>", escape_html(&symbol)));
    }
    out.push('\n');
}

fn kind_class(kind: RegionKind) -> &'static str {
    match kind {
        RegionKind::Plain => "plain",
        RegionKind::Verse => "verse",
        RegionKind::Chorus => "chorus",
        RegionKind::Bridge => "bridge",
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
