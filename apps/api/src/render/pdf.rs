//! PDF export: A4 pages, Helvetica body text, greedy line wrapping.
//!
//! Text is only ever emitted as string operands of `Tj`, never parsed as markup, so
//! `<b>` or `&amp;` in a letter print exactly as typed. String-syntax characters
//! (`(`, `)`, `\`) are escaped by lopdf when the content stream is encoded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use crate::render::font_metrics::{default_page_config, FontMetricTable, PageConfig, HELVETICA};
use crate::render::line_breaker::wrap_paragraph;
use crate::render::{split_paragraphs, RenderError};

const FONT_RESOURCE: &str = "F1";

/// A line of text positioned on a page, coordinates in points from the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

pub fn render_pdf(text: &str) -> Result<Vec<u8>, RenderError> {
    render_pdf_with(text, &default_page_config(), &HELVETICA)
}

pub fn render_pdf_with(
    text: &str,
    config: &PageConfig,
    metrics: &FontMetricTable,
) -> Result<Vec<u8>, RenderError> {
    let paragraphs = split_paragraphs(text);
    let pages = layout_pages(&paragraphs, config, metrics);
    debug!(
        paragraphs = paragraphs.len(),
        pages = pages.len(),
        "PDF layout computed"
    );
    build_document(&pages, config, metrics)
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// Flows paragraphs down the page, breaking to a new page when the next baseline
/// would fall below the bottom margin. Always returns at least one (possibly blank) page.
pub fn layout_pages(
    paragraphs: &[String],
    config: &PageConfig,
    metrics: &FontMetricTable,
) -> Vec<Vec<PlacedLine>> {
    let max_width_em = config.text_width_em();
    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = config.first_baseline_pt();

    for paragraph in paragraphs {
        for line in wrap_paragraph(paragraph, metrics, max_width_em) {
            if y < config.margin_pt {
                pages.push(Vec::new());
                y = config.first_baseline_pt();
            }
            if !line.is_empty() {
                if let Some(page) = pages.last_mut() {
                    page.push(PlacedLine {
                        x: config.margin_pt,
                        y,
                        text: line,
                    });
                }
            }
            y -= config.leading_pt;
        }
        y -= config.space_after_pt;
    }

    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Serialization
// ────────────────────────────────────────────────────────────────────────────

fn build_document(
    pages: &[Vec<PlacedLine>],
    config: &PageConfig,
    metrics: &FontMetricTable,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => metrics.base_font,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
    for lines in pages {
        let content = Content {
            operations: page_operations(lines, config),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| Object::from(*id)).collect::<Vec<Object>>(),
        "Count" => page_ids.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            Object::Real(config.page_width_pt),
            Object::Real(config.page_height_pt),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Lettre de motivation"),
        "Producer" => Object::string_literal(concat!("coach-api ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).map_err(lopdf::Error::from)?;
    Ok(buffer)
}

fn page_operations(lines: &[PlacedLine], config: &PageConfig) -> Vec<Operation> {
    let mut operations = Vec::with_capacity(lines.len() * 5);
    for line in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), Object::Real(config.font_size_pt)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Real(line.x), Object::Real(line.y)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(&line.text))],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    operations
}

/// Encodes text for a core-14 font using WinAnsiEncoding (Windows-1252).
///
/// Latin-1 maps 1:1; typographic punctuation common in French letters (’ “ ” – — …)
/// and € map to their cp1252 slots. Tabs and exotic spaces become plain spaces;
/// anything else unrepresentable becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '\t' | '\u{2002}'..='\u{200A}' | '\u{202F}' => b' ',
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => b'?',
        })
        .collect()
}
