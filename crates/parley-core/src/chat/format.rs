//! Response formatter: raw backend text to [`FormattedBlock`]s.
//!
//! The backend answers in a tiny markdown subset. Each input line becomes
//! exactly one block; a line starting with `"* "` becomes a single-item
//! bullet, anything else a paragraph. Inside a line, `**text**` marks bold.
//! Unmatched markers stay in the output as literal text.

use parley_types::format::{FormattedBlock, Span};

const BULLET_PREFIX: &str = "* ";
const BOLD_MARKER: &str = "**";

/// Parse a full response into blocks, one per line.
///
/// Blank lines yield an empty paragraph so vertical spacing survives.
pub fn format_response(raw: &str) -> Vec<FormattedBlock> {
    raw.split('\n').map(format_line).collect()
}

/// Parse a single line (without its line break).
pub fn format_line(line: &str) -> FormattedBlock {
    let trimmed = line.trim();

    match trimmed.strip_prefix(BULLET_PREFIX) {
        Some(rest) => FormattedBlock::BulletItem(parse_spans(rest.trim())),
        None => FormattedBlock::Paragraph(parse_spans(trimmed)),
    }
}

/// Split `content` into plain and bold spans.
///
/// Markers pair up left to right without overlap. An opening marker with no
/// closing partner is emitted verbatim along with the rest of the line.
/// Empty spans are omitted.
pub fn parse_spans(content: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = content;

    while let Some(open) = rest.find(BOLD_MARKER) {
        let after_open = &rest[open + BOLD_MARKER.len()..];
        let Some(close) = after_open.find(BOLD_MARKER) else {
            break;
        };

        push_span(&mut spans, &rest[..open], false);
        push_span(&mut spans, &after_open[..close], true);
        rest = &after_open[close + BOLD_MARKER.len()..];
    }

    push_span(&mut spans, rest, false);
    spans
}

fn push_span(spans: &mut Vec<Span>, text: &str, bold: bool) {
    if text.is_empty() {
        return;
    }
    spans.push(if bold { Span::bold(text) } else { Span::plain(text) });
}
