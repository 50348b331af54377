//! PDF renderer built on `printpdf`.
//!
//! Lays blocks out top to bottom with embedded DejaVu faces, wrapping lines
//! by measured glyph width and starting a new page when the cursor reaches
//! the bottom margin. Text with a character the faces have no glyph for is
//! refused rather than dropped. The whole document is assembled in memory
//! and serialized once, so a failure never yields partial bytes.

use printpdf::{
    Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Rect, Rgb,
};
use ttf_parser::Face;

use crate::domain::markdown::Block;
use crate::ports::{DocumentRenderer, ExportError, ExportFormat};

const PT_TO_MM: f32 = 0.352_778;
const LINE_HEIGHT_FACTOR: f32 = 1.4;

const TITLE_SIZE: f32 = 20.0;
const BODY_SIZE: f32 = 12.0;
const CODE_SIZE: f32 = 10.0;

/// Space after the title, in points.
const TITLE_GAP_PT: f32 = 20.0;
/// Left indent of list items, in points.
const LIST_INDENT_PT: f32 = 10.0;
/// Padding around code regions, in points.
const CODE_PADDING_PT: f32 = 5.0;
/// Height of a blank line, in points.
const BLANK_LINE_PT: f32 = 5.0;

const TAB_WIDTH: usize = 4;

const CODE_BACKGROUND: (f32, f32, f32) = (0.93, 0.93, 0.93);

const SANS_REGULAR: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");
const SANS_BOLD: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans-Bold.ttf");
const SANS_MONO: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSansMono.ttf");

/// Page geometry in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
}

impl PdfLayout {
    pub fn new(page_width_mm: f32, page_height_mm: f32, margin_mm: f32) -> Self {
        Self {
            page_width_mm,
            page_height_mm,
            margin_mm,
        }
    }

    /// A4 portrait with 20 mm margins.
    pub fn a4() -> Self {
        Self::new(210.0, 297.0, 20.0)
    }

    fn content_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self::a4()
    }
}

/// Renders blocks into a standalone PDF document.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    layout: PdfLayout,
}

impl PdfRenderer {
    pub fn new(layout: PdfLayout) -> Self {
        Self { layout }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&self, title: &str, blocks: &[Block]) -> Result<Vec<u8>, ExportError> {
        let (doc, pages) = self.lay_out(title, blocks)?;
        let bytes = doc
            .save_to_bytes()
            .map_err(|e| ExportError::pdf_failed(e.to_string()))?;

        tracing::debug!(pages, bytes = bytes.len(), "PDF rendered");
        Ok(bytes)
    }
}

impl PdfRenderer {
    /// Builds the in-memory document and returns it with its page count.
    fn lay_out(
        &self,
        title: &str,
        blocks: &[Block],
    ) -> Result<(PdfDocumentReference, usize), ExportError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(self.layout.page_width_mm),
            Mm(self.layout.page_height_mm),
            "Layer 1",
        );
        let fonts = Fonts::load(&doc)?;
        let first_layer = doc.get_page(page).get_layer(layer);

        let mut writer = PageWriter {
            doc: &doc,
            layout: self.layout,
            layer: first_layer,
            cursor_mm: self.layout.page_height_mm - self.layout.margin_mm,
            pages: 1,
        };

        writer.text_block(title, TITLE_SIZE, &fonts.bold, 0.0)?;
        writer.space_pt(TITLE_GAP_PT);

        for block in blocks {
            match block {
                Block::Heading { level, text } => {
                    let (size, gap) = heading_style(*level);
                    writer.space_pt(gap);
                    writer.text_block(text, size, &fonts.bold, 0.0)?;
                }
                Block::ListItem(text) => {
                    let item = format!("\u{2022} {}", text);
                    writer.text_block(&item, BODY_SIZE, &fonts.regular, LIST_INDENT_PT * PT_TO_MM)?;
                }
                Block::CodeLine(code) => writer.code_block(code, &fonts.mono)?,
                Block::Paragraph(text) => {
                    writer.text_block(text, BODY_SIZE, &fonts.regular, 0.0)?;
                }
                Block::BlankLine => writer.space_pt(BLANK_LINE_PT),
            }
        }

        let pages = writer.pages;
        Ok((doc, pages))
    }
}

/// Bold size and space-before, in points, per heading level.
fn heading_style(level: u8) -> (f32, f32) {
    match level {
        1 => (18.0, 10.0),
        2 => (16.0, 8.0),
        _ => (14.0, 6.0),
    }
}

/// An embedded font plus the parsed face used to measure and check text.
struct Typeface {
    name: &'static str,
    font: IndirectFontRef,
    face: Face<'static>,
}

impl Typeface {
    fn load(
        doc: &PdfDocumentReference,
        name: &'static str,
        bytes: &'static [u8],
    ) -> Result<Self, ExportError> {
        let face = Face::parse(bytes, 0)
            .map_err(|e| ExportError::pdf_failed(format!("Failed to parse font {}: {}", name, e)))?;
        let font = doc
            .add_external_font(bytes)
            .map_err(|e| ExportError::pdf_failed(format!("Failed to load font {}: {}", name, e)))?;
        Ok(Self { name, font, face })
    }

    /// Fails on the first visible character this face cannot draw.
    fn ensure_covers(&self, text: &str) -> Result<(), ExportError> {
        match text
            .chars()
            .filter(|c| !c.is_whitespace())
            .find(|c| self.face.glyph_index(*c).is_none())
        {
            Some(c) => Err(ExportError::pdf_failed(format!(
                "character '{}' (U+{:04X}) has no glyph in font {}",
                c, c as u32, self.name
            ))),
            None => Ok(()),
        }
    }

    /// Advance width of `text` at `size` points, in millimetres.
    fn width_mm(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .filter_map(|c| self.face.glyph_index(c))
            .filter_map(|g| self.face.glyph_hor_advance(g))
            .map(u32::from)
            .sum();
        units as f32 / f32::from(self.face.units_per_em()) * size * PT_TO_MM
    }
}

struct Fonts {
    regular: Typeface,
    bold: Typeface,
    mono: Typeface,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, ExportError> {
        Ok(Self {
            regular: Typeface::load(doc, "DejaVu Sans", SANS_REGULAR)?,
            bold: Typeface::load(doc, "DejaVu Sans Bold", SANS_BOLD)?,
            mono: Typeface::load(doc, "DejaVu Sans Mono", SANS_MONO)?,
        })
    }
}

/// Cursor over the current page. `cursor_mm` is the baseline distance from
/// the bottom edge, as PDF coordinates run bottom-up.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layout: PdfLayout,
    layer: PdfLayerReference,
    cursor_mm: f32,
    pages: usize,
}

impl PageWriter<'_> {
    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm(self.layout.page_width_mm),
            Mm(self.layout.page_height_mm),
            format!("Page {} Layer 1", self.pages + 1),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor_mm = self.layout.page_height_mm - self.layout.margin_mm;
        self.pages += 1;
    }

    /// Starts a new page unless `height_mm` still fits above the bottom margin.
    fn reserve(&mut self, height_mm: f32) {
        if self.cursor_mm - height_mm < self.layout.margin_mm {
            self.new_page();
        }
    }

    fn space_pt(&mut self, points: f32) {
        let height = points * PT_TO_MM;
        if self.cursor_mm - height < self.layout.margin_mm {
            self.new_page();
        } else {
            self.cursor_mm -= height;
        }
    }

    fn text_block(
        &mut self,
        text: &str,
        size: f32,
        face: &Typeface,
        indent_mm: f32,
    ) -> Result<(), ExportError> {
        face.ensure_covers(text)?;

        let line_height = size * LINE_HEIGHT_FACTOR * PT_TO_MM;
        let width = self.layout.content_width_mm() - indent_mm;
        for line in wrap(text, width, |s| face.width_mm(s, size)) {
            self.reserve(line_height);
            self.cursor_mm -= line_height;
            self.layer.use_text(
                line,
                size,
                Mm(self.layout.margin_mm + indent_mm),
                Mm(self.cursor_mm),
                &face.font,
            );
        }
        Ok(())
    }

    /// Monospace lines on a shaded band. Each line paints its own slice of
    /// the band so a region split across pages stays shaded on both.
    fn code_block(&mut self, code: &str, face: &Typeface) -> Result<(), ExportError> {
        let code = expand_whitespace(code);
        face.ensure_covers(&code)?;

        let padding = CODE_PADDING_PT * PT_TO_MM;
        let line_height = CODE_SIZE * LINE_HEIGHT_FACTOR * PT_TO_MM;
        let left = self.layout.margin_mm;
        let right = self.layout.page_width_mm - self.layout.margin_mm;
        let width = self.layout.content_width_mm() - 2.0 * padding;

        self.space_pt(CODE_PADDING_PT);
        for source_line in code.split('\n') {
            for line in wrap_hard(source_line, width, |s| face.width_mm(s, CODE_SIZE)) {
                self.reserve(line_height);
                let top = self.cursor_mm;
                self.cursor_mm -= line_height;
                self.shade(left, self.cursor_mm - padding / 2.0, right, top);
                self.layer.use_text(
                    line,
                    CODE_SIZE,
                    Mm(left + padding),
                    Mm(self.cursor_mm + line_height * 0.25),
                    &face.font,
                );
            }
        }
        self.space_pt(CODE_PADDING_PT);
        Ok(())
    }

    fn shade(&self, left: f32, bottom: f32, right: f32, top: f32) {
        let (r, g, b) = CODE_BACKGROUND;
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
        self.layer
            .add_rect(Rect::new(Mm(left), Mm(bottom), Mm(right), Mm(top)));
        self.layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }
}

/// Tabs become spaces and other whitespace besides newlines becomes a
/// single space, so every drawn character has a glyph.
fn expand_whitespace(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    for c in code.chars() {
        match c {
            '\t' => out.extend(std::iter::repeat(' ').take(TAB_WIDTH)),
            '\n' => out.push('\n'),
            c if c.is_whitespace() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// Greedy word wrap against a measured width. Words wider than a line are
/// split.
fn wrap(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && measure(format!("{} {}", current, word).as_str()) > max_width {
            lines.push(std::mem::take(&mut current));
        }
        if measure(word) > max_width {
            let mut pieces = wrap_hard(word, max_width, &measure);
            if let Some(last) = pieces.pop() {
                lines.extend(pieces);
                current = last;
            }
            continue;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits wherever the next character would overflow, keeping whitespace
/// intact. A line always takes at least one character.
fn wrap_hard(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;
    let mut buf = [0u8; 4];

    for c in text.chars() {
        let advance = measure(&*c.encode_utf8(&mut buf));
        if !current.is_empty() && width + advance > max_width {
            lines.push(std::mem::take(&mut current));
            width = 0.0;
        }
        current.push(c);
        width += advance;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
