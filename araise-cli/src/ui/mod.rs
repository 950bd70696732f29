pub mod theme;

use std::io::{self, IsTerminal, Write};

use ratatui::text::{Line, Span};

use araise_core::render::{RenderedLine, Segment, Tone};

pub use theme::Theme;

/// Convert a rendered line into a styled ratatui line
pub fn to_line(line: &RenderedLine, theme: &Theme, selected: bool) -> Line<'static> {
    let mut spans = Vec::with_capacity(line.segments.len() + 1);
    if line.indent > 0 {
        spans.push(Span::raw(" ".repeat(line.indent as usize)));
    }
    for segment in &line.segments {
        let style = if selected {
            theme.selection_style()
        } else {
            theme.tone_style(segment.tone)
        };
        spans.push(Span::styled(segment.text.clone(), style));
    }
    Line::from(spans)
}

/// Word-wrap a line to `width` columns, keeping indent and item on every row
pub fn wrap(line: &RenderedLine, width: usize) -> Vec<RenderedLine> {
    let indent = line.indent as usize;
    if width < indent + 4 {
        return vec![line.clone()];
    }
    let avail = width - indent;
    let fresh = || RenderedLine {
        segments: Vec::new(),
        indent: line.indent,
        item: line.item,
    };

    let mut rows = Vec::new();
    let mut current = fresh();
    let mut used = 0;
    for segment in &line.segments {
        for word in segment.text.split_inclusive(' ') {
            let visible = word.trim_end_matches(' ').chars().count();
            if used > 0 && used + visible > avail {
                rows.push(std::mem::replace(&mut current, fresh()));
                used = 0;
            }
            let mut rest = word;
            while used == 0 && rest.chars().count() > avail {
                let split = rest
                    .char_indices()
                    .nth(avail)
                    .map(|(idx, _)| idx)
                    .unwrap_or(rest.len());
                push_text(&mut current, segment.tone, &rest[..split]);
                rows.push(std::mem::replace(&mut current, fresh()));
                rest = &rest[split..];
            }
            if !rest.is_empty() {
                push_text(&mut current, segment.tone, rest);
                used += rest.chars().count();
            }
        }
    }
    rows.push(current);
    rows
}

fn push_text(line: &mut RenderedLine, tone: Tone, text: &str) {
    match line.segments.last_mut() {
        Some(last) if last.tone == tone => last.text.push_str(text),
        _ => line.segments.push(Segment {
            text: text.to_string(),
            tone,
        }),
    }
}

/// Line text with ANSI colors, for output outside the full-screen terminal
pub fn format_ansi(line: &RenderedLine, color: bool) -> String {
    let mut out = " ".repeat(line.indent as usize);
    for segment in &line.segments {
        let code = theme::ansi(segment.tone);
        if color && !code.is_empty() {
            out.push_str(code);
            out.push_str(&segment.text);
            out.push_str("\x1b[0m");
        } else {
            out.push_str(&segment.text);
        }
    }
    out
}

/// Print lines to stdout, colored when stdout is a terminal
pub fn print_lines(lines: &[RenderedLine]) -> io::Result<()> {
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", format_ansi(line, color))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_breaks_on_words() {
        let line = RenderedLine::new(Tone::Text, "aaa bbb ccc");
        let rows: Vec<String> = wrap(&line, 7)
            .iter()
            .map(|row| row.plain().trim_end().to_string())
            .collect();
        assert_eq!(rows, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_wrap_keeps_indent_item_and_tones() {
        let line = RenderedLine::new(Tone::Accent, "help        ")
            .push(Tone::Dim, "Display available commands")
            .indent(2)
            .item(3);
        let rows = wrap(&line, 24);
        assert!(rows.len() > 1);
        assert!(rows.iter().all(|row| row.indent == 2 && row.item == Some(3)));
        assert_eq!(rows[0].segments[0].tone, Tone::Accent);
        assert_eq!(rows.last().unwrap().segments[0].tone, Tone::Dim);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let line = RenderedLine::new(Tone::Link, "https://example.com/very/long/path");
        let rows = wrap(&line, 10);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.plain().chars().count() <= 10));
    }

    #[test]
    fn test_wrap_blank_line() {
        assert_eq!(wrap(&RenderedLine::blank(), 20), vec![RenderedLine::blank()]);
    }

    #[test]
    fn test_format_ansi() {
        let line = RenderedLine::new(Tone::Error, "boom").indent(1);
        assert_eq!(format_ansi(&line, false), " boom");
        assert_eq!(format_ansi(&line, true), " \x1b[31mboom\x1b[0m");
    }
}
