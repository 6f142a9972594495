use crate::export::text_metrics::{encode_winansi, text_width};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A4 portrait, used for tabular exports.
pub const A4: (f32, f32) = (595.0, 842.0);
/// A5 portrait, used for receipts.
pub const A5: (f32, f32) = (420.0, 595.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl FontStyle {
    fn resource(&self) -> Name<'static> {
        match self {
            FontStyle::Regular => Name(b"F1"),
            FontStyle::Bold => Name(b"F2"),
        }
    }
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl PdfManager {
    pub fn with_page((page_w, page_h): (f32, f32), margin: f32) -> Self {
        let mut pdf = Pdf::new();

        // fixed object ids; pages and streams are numbered from 5
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);
        let next_id = 5;

        // WinAnsi so accented Portuguese text renders with the base-14 fonts
        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w,
            page_h,
            margin,
            row_h: 20.0,

            next_id,
            font_id,
            bold_font_id,

            font_size: 10.0,
            header_font_size: 11.0,
            title_font_size: 14.0,
        }
    }

    pub fn page_width(&self) -> f32 {
        self.page_w
    }

    pub fn page_height(&self) -> f32 {
        self.page_h
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Start a new page. The returned content must go back through
    /// [`PdfManager::finalize_page`] before the next page is opened.
    pub fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(FontStyle::Regular.resource(), self.font_id);
        fonts.pair(FontStyle::Bold.resource(), self.bold_font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    pub fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    pub fn draw_styled_text(
        &self,
        content: &mut Content,
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        text: &str,
    ) {
        content.begin_text();
        content.set_font(style.resource(), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&encode_winansi(text)));
        content.end_text();
    }

    pub fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        self.draw_styled_text(content, x, y, size, FontStyle::Regular, text);
    }

    /// Regular text whose right edge sits at `right`.
    pub fn draw_text_right(&self, content: &mut Content, right: f32, y: f32, size: f32, text: &str) {
        let x = right - text_width(text, size);
        self.draw_text(content, x, y, size, text);
    }

    pub fn draw_hline(&self, content: &mut Content, x1: f32, x2: f32, y: f32) {
        content.save_state();
        content.set_stroke_rgb(0.4, 0.4, 0.4);
        content.set_line_width(0.6);
        content.move_to(x1, y);
        content.line_to(x2, y);
        content.stroke();
        content.restore_state();
    }

    pub fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    pub fn fill_band(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32, gray: f32) {
        content.save_state();
        content.set_fill_rgb(gray, gray, gray);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        x_start: f32,
        row: &[String],
        font_size: f32,
    ) {
        let mut x = x_start;

        for (i, text) in row.iter().enumerate() {
            let w = col_widths[i];
            self.draw_text(content, x + 4.0, y + 5.0, font_size, text);
            self.draw_cell_borders(content, x, y, w, self.row_h);
            x += w;
        }
    }

    /// Column widths from measured header and cell text, scaled down to the page.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| text_width(h, self.header_font_size) + 8.0)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                let w = (text_width(cell, self.font_size) + 8.0).max(widths[i]);
                widths[i] = w;
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_header_footer(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_styled_text(
            content,
            self.margin,
            self.page_h - self.margin + 15.0,
            self.title_font_size,
            FontStyle::Bold,
            title,
        );

        let pg = format!("Página {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 60.0,
            self.margin - 35.0,
            self.font_size,
            &pg,
        );
    }

    fn draw_header_row(&self, content: &mut Content, y: f32, col_widths: &[f32], headers: &[&str]) {
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        self.fill_band(content, self.margin, y, col_widths.iter().sum(), self.row_h, 0.87);
        self.draw_row(
            content,
            y,
            col_widths,
            self.margin,
            &header_row,
            self.header_font_size,
        );
    }

    /// Multi-page table with a title on every page.
    pub fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);

        // at least one page, even without rows
        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title, page_idx);

            let mut y = self.page_h - self.margin - 30.0;
            self.draw_header_row(&mut content, y, &col_widths, headers);
            y -= self.row_h;

            let mut consumed = 0;

            for (i, row) in remaining.iter().enumerate() {
                if y - self.row_h < self.margin {
                    break;
                }

                // zebra stripe
                if i % 2 == 0 {
                    self.fill_band(&mut content, self.margin, y, col_widths.iter().sum(), self.row_h, 0.96);
                }

                self.draw_row(
                    &mut content,
                    y,
                    &col_widths,
                    self.margin,
                    row,
                    self.font_size,
                );

                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}
