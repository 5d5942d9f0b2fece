//! Fragment collection from PDF documents via lopdf.
//!
//! The reconstruction engine never parses PDF bytes itself; it consumes the
//! [`PageSource`] trait. [`PdfReader`] is the built-in implementation,
//! walking each page's content stream and emitting positioned
//! [`TextFragment`]s.

use std::collections::HashMap;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::TextFragment;

/// TJ kerning adjustment (in 1/1000 text-space units) beyond which a word
/// space is assumed.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A per-page supplier of positioned text fragments.
///
/// Abstracting the decoder behind a trait lets tests drive the engine with
/// in-memory pages and lets embedders plug in another PDF backend.
pub trait PageSource {
    /// Total number of pages in the document.
    fn page_count(&self) -> u32;

    /// Fragments for a 1-indexed page.
    fn page_fragments(&self, page_no: u32) -> Result<Vec<TextFragment>>;
}

/// lopdf-backed [`PageSource`].
pub struct PdfReader {
    doc: LopdfDocument,
}

impl PdfReader {
    /// Load a document from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| Error::Parse(e.to_string()))?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Load a document from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path).map_err(|e| Error::Parse(e.to_string()))?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    fn page_id(&self, page_no: u32) -> Result<ObjectId> {
        let pages = self.doc.get_pages();
        pages
            .get(&page_no)
            .copied()
            .ok_or(Error::PageOutOfRange(page_no, pages.len() as u32))
    }

    /// Font-name-key to (base font name, encoding name) for one page.
    fn page_font_info(&self, page_id: ObjectId) -> HashMap<Vec<u8>, FontInfo> {
        let mut fonts = HashMap::new();
        let Ok(font_dicts) = self.doc.get_page_fonts(page_id) else {
            return fonts;
        };
        for (name, dict) in &font_dicts {
            let base_font = dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).into_owned())
                .unwrap_or_else(|| String::from_utf8_lossy(name).into_owned());
            let encoding = dict.get(b"Encoding").ok().and_then(|o| match o {
                Object::Name(n) => Some(String::from_utf8_lossy(n).into_owned()),
                _ => None,
            });
            fonts.insert(
                name.clone(),
                FontInfo {
                    base_font,
                    encoding,
                },
            );
        }
        fonts
    }

    /// Walk a page's content stream, collecting text-showing operations.
    fn collect_fragments(
        &self,
        content: &[u8],
        fonts: &HashMap<Vec<u8>, FontInfo>,
    ) -> Result<Vec<TextFragment>> {
        let content = Content::decode(content).map_err(|e| Error::Parse(e.to_string()))?;

        let mut fragments = Vec::new();
        let mut font = FontInfo::default();
        let mut font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            font = fonts.get(name.as_slice()).cloned().unwrap_or_else(|| {
                                FontInfo {
                                    base_font: String::from_utf8_lossy(name).into_owned(),
                                    encoding: None,
                                }
                            });
                        }
                        font_size = as_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = as_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = as_number(&op.operands[1]).unwrap_or(0.0);
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            as_number(&op.operands[0]).unwrap_or(1.0),
                            as_number(&op.operands[1]).unwrap_or(0.0),
                            as_number(&op.operands[2]).unwrap_or(0.0),
                            as_number(&op.operands[3]).unwrap_or(1.0),
                            as_number(&op.operands[4]).unwrap_or(0.0),
                            as_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    matrix.next_line();
                }
                "Tj" | "TJ" => {
                    if in_text {
                        let text = if op.operator == "TJ" {
                            decode_tj_array(op.operands.first(), &font)
                        } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                            decode_string(bytes, &font)
                        } else {
                            String::new()
                        };
                        push_fragment(&mut fragments, text, &matrix, font_size, &font);
                    }
                }
                "'" | "\"" => {
                    matrix.next_line();
                    if in_text {
                        let text_idx = if op.operator == "\"" { 2 } else { 0 };
                        if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                            let text = decode_string(bytes, &font);
                            push_fragment(&mut fragments, text, &matrix, font_size, &font);
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(fragments)
    }
}

impl PageSource for PdfReader {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn page_fragments(&self, page_no: u32) -> Result<Vec<TextFragment>> {
        let page_id = self.page_id(page_no)?;
        let fonts = self.page_font_info(page_id);
        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::Parse(e.to_string()))?;
        self.collect_fragments(&content, &fonts)
    }
}

fn push_fragment(
    fragments: &mut Vec<TextFragment>,
    text: String,
    matrix: &TextMatrix,
    font_size: f32,
    font: &FontInfo,
) {
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = matrix.position();
    let effective_size = font_size * matrix.scale();
    fragments.push(TextFragment::new(
        text,
        x,
        y,
        effective_size,
        font.base_font.clone(),
    ));
}

/// Decode a TJ operand array: strings interleaved with kerning adjustments.
/// Large negative adjustments usually stand in for word spaces.
fn decode_tj_array(operand: Option<&Object>, font: &FontInfo) -> String {
    let Some(Object::Array(items)) = operand else {
        return String::new();
    };

    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode_string(bytes, font)),
            Object::Integer(n) => maybe_push_space(&mut combined, -(*n as f32)),
            Object::Real(n) => maybe_push_space(&mut combined, -n),
            _ => {}
        }
    }
    combined
}

fn maybe_push_space(text: &mut String, adjustment: f32) {
    if adjustment > TJ_SPACE_THRESHOLD && !text.is_empty() && !text.ends_with(' ') {
        text.push(' ');
    }
}

/// Decode raw string bytes using the font's declared encoding as a hint.
fn decode_string(bytes: &[u8], font: &FontInfo) -> String {
    // Identity-encoded fonts typically carry 2-byte CID codes; try UTF-16BE.
    if let Some(encoding) = &font.encoding {
        if encoding.contains("Identity") && bytes.len() >= 2 && bytes.len() % 2 == 0 {
            let code_units: Vec<u16> = bytes
                .chunks(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            let decoded = String::from_utf16_lossy(&code_units);
            if !decoded.is_empty() && !decoded.chars().all(|c| c == '\u{FFFD}' || c == '\0') {
                return decoded;
            }
        }
    }
    decode_text_simple(bytes)
}

/// Best-effort decoding: UTF-16BE with BOM, then UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let code_units: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16_lossy(&code_units);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

/// Base font name and declared encoding for the current font.
#[derive(Debug, Clone, Default)]
struct FontInfo {
    base_font: String,
    encoding: Option<String>,
}

/// Text matrix state for tracking glyph positions in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default leading; a TL-aware reader could refine this.
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    /// Effective font scale: the larger-magnitude axis of the transform.
    fn scale(&self) -> f32 {
        self.a.abs().max(self.d.abs())
    }
}

/// Extract a number from a content-stream operand.
fn as_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
