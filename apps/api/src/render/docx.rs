use std::io::Cursor;

use docx_rs::{BreakType, Docx, LineSpacing, Paragraph, Run, RunFonts};

use crate::render::{split_paragraphs, RenderError};

pub const FONT_FAMILY: &str = "Calibri";
/// 11pt, expressed in OOXML half-points.
pub const FONT_SIZE_HALF_POINTS: usize = 22;
/// 6pt after each paragraph, expressed in twentieths of a point.
pub const SPACE_AFTER_TWIPS: u32 = 120;

/// Builds a .docx whose document defaults fix the font family and size; every
/// paragraph carries the same spacing-after.
pub fn render_docx(text: &str) -> Result<Vec<u8>, RenderError> {
    let mut cursor = Cursor::new(Vec::new());
    build_docx(text)
        .build()
        .pack(&mut cursor)
        .map_err(|e| RenderError::Docx(e.to_string()))?;
    Ok(cursor.into_inner())
}

fn build_docx(text: &str) -> Docx {
    let fonts = RunFonts::new()
        .ascii(FONT_FAMILY)
        .hi_ansi(FONT_FAMILY)
        .east_asia(FONT_FAMILY)
        .cs(FONT_FAMILY);
    let mut docx = Docx::new()
        .default_fonts(fonts)
        .default_size(FONT_SIZE_HALF_POINTS);

    for segment in split_paragraphs(text) {
        docx = docx.add_paragraph(build_paragraph(&segment));
    }
    docx
}

/// One run per paragraph; `\n` inside the segment becomes a soft line break.
fn build_paragraph(segment: &str) -> Paragraph {
    let mut run = Run::new();
    for (i, line) in segment.lines().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    Paragraph::new()
        .add_run(run)
        .line_spacing(LineSpacing::new().after(SPACE_AFTER_TWIPS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract_docx_paragraphs, join_blocks};

    #[test]
    fn test_two_paragraphs_round_trip_through_extractor() {
        let text = "Madame, Monsieur,\n\nJe vous adresse ma candidature.";
        let bytes = render_docx(text).unwrap();
        let paragraphs = extract_docx_paragraphs(&bytes).unwrap();
        assert_eq!(
            paragraphs,
            vec![
                "Madame, Monsieur,".to_string(),
                "Je vous adresse ma candidature.".to_string()
            ]
        );
        assert_eq!(join_blocks(paragraphs).as_str(), text);
    }

    #[test]
    fn test_empty_text_renders_valid_empty_document() {
        let bytes = render_docx("").unwrap();
        assert!(bytes.starts_with(b"PK"), "docx must be a zip container");
        assert!(extract_docx_paragraphs(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_blank_segments_produce_no_paragraphs() {
        let bytes = render_docx("\n\nA\n\n   \n\nB\n\n").unwrap();
        assert_eq!(
            extract_docx_paragraphs(&bytes).unwrap(),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn test_line_breaks_stay_inside_the_paragraph() {
        let bytes = render_docx("Jean Dupont\n75002 Paris\n\nMadame,").unwrap();
        assert_eq!(
            extract_docx_paragraphs(&bytes).unwrap(),
            vec!["Jean Dupont\n75002 Paris".to_string(), "Madame,".to_string()]
        );
    }

    #[test]
    fn test_defaults_are_calibri_11pt_with_6pt_after() {
        let xml = build_docx("Madame,\n\nCordialement").build();
        let styles = String::from_utf8(xml.styles).unwrap();
        let document = String::from_utf8(xml.document).unwrap();

        assert!(styles.contains(r#"w:ascii="Calibri""#), "{styles}");
        assert!(styles.contains(r#"w:hAnsi="Calibri""#), "{styles}");
        assert!(styles.contains(r#"<w:sz w:val="22""#), "{styles}");
        assert_eq!(document.matches(r#"w:after="120""#).count(), 2, "{document}");
    }

    #[test]
    fn test_markup_characters_round_trip_literally() {
        let bytes = render_docx("<b>Rust</b> & \"Python\"").unwrap();
        assert_eq!(
            extract_docx_paragraphs(&bytes).unwrap(),
            vec!["<b>Rust</b> & \"Python\"".to_string()]
        );
    }
}
