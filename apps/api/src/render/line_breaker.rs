//! Greedy word wrap against a static metric table.
//!
//! Same algorithm as a typesetter's first-fit pass: words are appended to the current
//! line until the next one would cross `max_width_em`. A single word wider than the
//! line (URLs, long e-mail addresses) is split at character boundaries.

use crate::render::font_metrics::FontMetricTable;

/// Wraps one logical line of text into printed lines. Runs of whitespace collapse
/// to a single space. Blank input yields no lines.
pub fn wrap_line(text: &str, metrics: &FontMetricTable, max_width_em: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_str(word);

        if word_w > max_width_em {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = split_long_word(word, metrics, max_width_em);
            // Last piece stays open so following words can share its line.
            let tail = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
            current_width = metrics.measure_str(&tail);
            current = tail;
            continue;
        }

        let space_w = if current.is_empty() {
            0.0
        } else {
            metrics.space_width
        };

        if !current.is_empty() && current_width + space_w + word_w > max_width_em {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wraps a paragraph that may contain explicit `\n` line breaks. Each explicit break
/// starts a new printed line; blank explicit lines are kept as empty lines.
pub fn wrap_paragraph(paragraph: &str, metrics: &FontMetricTable, max_width_em: f32) -> Vec<String> {
    paragraph
        .lines()
        .flat_map(|line| {
            let wrapped = wrap_line(line, metrics, max_width_em);
            if wrapped.is_empty() {
                vec![String::new()]
            } else {
                wrapped
            }
        })
        .collect()
}

fn split_long_word(word: &str, metrics: &FontMetricTable, max_width_em: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;

    for c in word.chars() {
        let w = metrics.char_width(c);
        if !piece.is_empty() && width + w > max_width_em {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
