use docx_rs::{DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild};

use super::ExtractError;

/// Returns the text of every body paragraph, in document order.
///
/// Tables, images and other non-paragraph nodes are skipped. Blank paragraphs are
/// returned as-is; filtering happens in `join_blocks`.
pub fn extract_docx_paragraphs(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Malformed {
        format: "docx",
        reason: e.to_string(),
    })?;

    Ok(docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect())
}

/// Paragraph → Run → Text. Runs are fragments of the same sentence, so they join
/// without a separator; explicit breaks inside a paragraph become newlines.
/// Runs nested in hyperlinks and tracked insertions are part of the visible text.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&paragraph.children, &mut text);
    text
}

fn push_children_text(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, text),
            ParagraphChild::Hyperlink(link) => push_children_text(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for insert_child in &insert.children {
                    if let InsertChild::Run(run) = insert_child {
                        push_run_text(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}
