use lopdf::{
    content::{Content, Operation},
    dictionary, Document, Object, Stream,
};

use crate::{
    cv::{Align, DocumentSink},
    errors::AppError,
};

// US Letter, in points
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const LINE_SPACING: f32 = 1.2;
const DEFAULT_FONT_SIZE: f32 = 12.0;
const FONT_NAME: &str = "F1";

/// Paginated PDF writer using the built-in Helvetica-Bold face.
///
/// Text is laid out top to bottom; lines wider than the printable area are
/// wrapped on word boundaries and a new page starts whenever the next line
/// would cross the bottom margin.
pub struct PdfDocument {
    pages: Vec<Vec<Operation>>,
    cursor: f32,
    font_size: f32,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    pub fn new() -> Self {
        PdfDocument {
            pages: vec![Vec::new()],
            cursor: PAGE_HEIGHT - MARGIN,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn start_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor - height < MARGIN {
            self.start_page();
        }
    }

    fn draw_line(&mut self, size: f32, x: f32, line: &str) {
        let baseline = self.cursor - size;
        let operations = [
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![FONT_NAME.into(), size.into()]),
            Operation::new("Td", vec![x.into(), baseline.into()]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(line))]),
            Operation::new("ET", vec![]),
        ];

        if let Some(page) = self.pages.last_mut() {
            page.extend(operations);
        }
    }
}

impl DocumentSink for PdfDocument {
    type Output = Vec<u8>;

    fn text(&mut self, size: f32, align: Align, content: &str) {
        self.font_size = size;
        let line_height = size * LINE_SPACING;
        let printable = PAGE_WIDTH - 2.0 * MARGIN;

        for line in wrap_text(content, size, printable) {
            self.ensure_room(line_height);
            let x = match align {
                Align::Left => MARGIN,
                Align::Center => MARGIN + (printable - text_width(&line, size)).max(0.0) / 2.0,
            };
            self.draw_line(size, x, &line);
            self.cursor -= line_height;
        }
    }

    fn move_down(&mut self, lines: f32) {
        self.cursor -= lines * self.font_size * LINE_SPACING;
    }

    fn finish(self) -> Result<Vec<u8>, AppError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FONT_NAME => font_id,
            },
        });

        let page_count = self.pages.len();
        let mut kids: Vec<Object> = Vec::with_capacity(page_count);
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let media_box: Vec<Object> = vec![Object::Integer(0), Object::Integer(0), PAGE_WIDTH.into(), PAGE_HEIGHT.into()];
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

/// Approximate Helvetica-Bold advance widths, in thousandths of an em.
fn glyph_width(c: char) -> f32 {
    match c {
        ' ' | 'i' | 'j' | 'l' | 'I' | ',' | '.' | ':' | ';' | '!' | '\'' => 278.0,
        'f' | 't' | '-' | '(' | ')' => 333.0,
        'r' => 389.0,
        'm' => 889.0,
        'w' => 778.0,
        'M' => 833.0,
        'W' => 944.0,
        '0'..='9' => 556.0,
        'a'..='z' => 611.0,
        'A'..='Z' => 722.0,
        _ => 600.0,
    }
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().map(glyph_width).sum::<f32>() * size / 1000.0
}

/// Greedy word wrap. Explicit line breaks are kept; words wider than a whole
/// line are split by character.
fn wrap_text(content: &str, size: f32, max_width: f32) -> Vec<String> {
    content
        .split('\n')
        .flat_map(|paragraph| wrap_paragraph(paragraph.trim_end_matches('\r'), size, max_width))
        .collect()
}

fn wrap_paragraph(paragraph: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if text_width(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if text_width(word, size) <= max_width {
            current = word.to_string();
        } else {
            for c in word.chars() {
                if !current.is_empty() && text_width(&current, size) + glyph_width(c) * size / 1000.0 > max_width {
                    lines.push(std::mem::take(&mut current));
                }
                current.push(c);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Maps text onto the single-byte WinAnsi range the standard fonts understand.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => win_ansi_extra(c).unwrap_or(b'?'),
        })
        .collect()
}

/// Characters WinAnsi places in 0x80..=0x9F, where Latin-1 has control codes.
fn win_ansi_extra(c: char) -> Option<u8> {
    let byte = match c {
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
        _ => return None,
    };
    Some(byte)
}
