// src/export/receipt_pdf.rs

//! Single receipt on an A5 page: company block, payer block, description
//! and total table, declaration paragraph, date line and signature.

use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::export::pdf::{A5, FontStyle, PdfManager};
use crate::export::text_metrics::wrap_text;
use crate::models::receipt::Receipt;
use crate::utils::date::long_date;
use crate::utils::documents::format_document;
use crate::utils::formatting::format_brl;
use pdf_writer::Content;
use std::io;
use std::path::Path;

const MARGIN: f32 = 36.0;
const BODY_SIZE: f32 = 10.0;
const LINE_H: f32 = 14.0;

/// Issuer data printed on the receipt.
#[derive(Debug, Clone, Default)]
pub struct Issuer {
    pub name: String,
    pub cnpj: String,
    pub address: String,
    pub city: String,
}

/// Draws top to bottom and opens a new page whenever the next block
/// would cross the bottom margin.
struct Composer {
    pdf: PdfManager,
    content: Content,
    y: f32,
}

impl Composer {
    fn new() -> Self {
        let mut pdf = PdfManager::with_page(A5, MARGIN);
        let content = pdf.new_page();
        let y = pdf.page_height() - MARGIN;
        Self { pdf, content, y }
    }

    fn left(&self) -> f32 {
        self.pdf.margin()
    }

    fn right(&self) -> f32 {
        self.pdf.page_width() - self.pdf.margin()
    }

    fn width(&self) -> f32 {
        self.right() - self.left()
    }

    fn ensure(&mut self, height: f32) {
        if self.y - height >= self.pdf.margin() {
            return;
        }
        let done = std::mem::replace(&mut self.content, Content::new());
        self.pdf.finalize_page(done);
        self.content = self.pdf.new_page();
        self.y = self.pdf.page_height() - self.pdf.margin();
    }

    fn text(&mut self, size: f32, style: FontStyle, text: &str) {
        self.ensure(LINE_H);
        self.y -= LINE_H;
        let x = self.left();
        self.pdf
            .draw_styled_text(&mut self.content, x, self.y, size, style, text);
    }

    fn paragraph(&mut self, text: &str) {
        for line in wrap_text(text, BODY_SIZE, self.width()) {
            self.text(BODY_SIZE, FontStyle::Regular, &line);
        }
    }

    fn rule(&mut self) {
        self.ensure(10.0);
        self.y -= 6.0;
        let (l, r) = (self.left(), self.right());
        self.pdf.draw_hline(&mut self.content, l, r, self.y);
        self.y -= 4.0;
    }

    fn gap(&mut self, h: f32) {
        self.y -= h;
    }

    fn finish(mut self, path: &Path) -> AppResult<usize> {
        let done = std::mem::replace(&mut self.content, Content::new());
        self.pdf.finalize_page(done);
        let pages = self.pdf.page_count();
        self.pdf
            .save(path)
            .map_err(|e| AppError::from(io::Error::other(format!("PDF export error: {e}"))))?;
        Ok(pages)
    }
}

fn header(c: &mut Composer, receipt: &Receipt) {
    c.ensure(40.0);
    c.y -= 20.0;
    let (x, right, y) = (c.left(), c.right(), c.y);
    c.pdf
        .draw_styled_text(&mut c.content, x, y, 18.0, FontStyle::Bold, "RECIBO");
    c.pdf.draw_text_right(
        &mut c.content,
        right,
        y,
        11.0,
        &format!("Nº {}", receipt.number()),
    );

    c.y -= 18.0;
    let y = c.y;
    c.pdf.draw_text_right(
        &mut c.content,
        right,
        y,
        13.0,
        &format_brl(receipt.amount_cents),
    );
}

fn company_block(c: &mut Composer, issuer: &Issuer) {
    c.text(11.0, FontStyle::Bold, &issuer.name);
    if !issuer.cnpj.is_empty() {
        c.text(
            BODY_SIZE,
            FontStyle::Regular,
            &format!("CNPJ: {}", format_document(&issuer.cnpj)),
        );
    }
    if !issuer.address.is_empty() {
        c.paragraph(&issuer.address);
    }
    if !issuer.city.is_empty() {
        c.text(BODY_SIZE, FontStyle::Regular, &issuer.city);
    }
}

fn payer_block(c: &mut Composer, receipt: &Receipt) {
    c.text(BODY_SIZE, FontStyle::Bold, "Recebemos de");
    c.paragraph(&receipt.payer_name);
    if !receipt.payer_document.is_empty() {
        c.text(
            BODY_SIZE,
            FontStyle::Regular,
            &format!("CPF/CNPJ: {}", format_document(&receipt.payer_document)),
        );
    }
}

/// Two-column table. The description wraps inside its column; the amount
/// sits on the first line of the row.
fn items_table(c: &mut Composer, receipt: &Receipt) {
    let amount_col = 90.0;
    let desc_w = c.width() - amount_col - 8.0;
    let amount = format_brl(receipt.amount_cents);

    c.ensure(2.0 * LINE_H);
    c.y -= LINE_H;
    let (l, r, y) = (c.left(), c.right(), c.y);
    c.pdf
        .fill_band(&mut c.content, l, y - 4.0, r - l, LINE_H, 0.87);
    c.pdf
        .draw_styled_text(&mut c.content, l + 4.0, y, BODY_SIZE, FontStyle::Bold, "Descrição");
    c.pdf
        .draw_styled_text(&mut c.content, r - amount_col, y, BODY_SIZE, FontStyle::Bold, "Valor");

    for (i, line) in wrap_text(&receipt.description, BODY_SIZE, desc_w)
        .iter()
        .enumerate()
    {
        c.ensure(LINE_H);
        c.y -= LINE_H;
        let y = c.y;
        c.pdf.draw_text(&mut c.content, l + 4.0, y, BODY_SIZE, line);
        if i == 0 {
            c.pdf
                .draw_text_right(&mut c.content, r - 4.0, y, BODY_SIZE, &amount);
        }
    }

    c.rule();
    c.ensure(LINE_H);
    c.y -= LINE_H;
    let y = c.y;
    c.pdf
        .draw_styled_text(&mut c.content, l + 4.0, y, BODY_SIZE, FontStyle::Bold, "Total");
    c.pdf
        .draw_text_right(&mut c.content, r - 4.0, y, BODY_SIZE, &amount);
}

pub fn declaration_text(receipt: &Receipt) -> String {
    format!(
        "Declaramos, para os devidos fins, que recebemos de {} a importância de {} \
         referente a {}, dando plena e geral quitação.",
        receipt.payer_name,
        format_brl(receipt.amount_cents),
        receipt.description.trim_end_matches('.'),
    )
}

fn signature(c: &mut Composer, issuer: &Issuer) {
    c.ensure(60.0);
    c.gap(40.0);
    let mid = c.left() + c.width() / 2.0;
    let y = c.y;
    c.pdf
        .draw_hline(&mut c.content, mid - 100.0, mid + 100.0, y);
    c.text(BODY_SIZE, FontStyle::Regular, &issuer.name);
}

/// Render `receipt` to `path`. Returns the number of pages written.
pub fn write_receipt_pdf(receipt: &Receipt, issuer: &Issuer, path: &Path) -> AppResult<usize> {
    let mut c = Composer::new();

    header(&mut c, receipt);
    c.rule();
    company_block(&mut c, issuer);
    c.rule();
    payer_block(&mut c, receipt);
    c.gap(6.0);
    items_table(&mut c, receipt);
    c.gap(12.0);
    c.paragraph(&declaration_text(receipt));
    c.gap(12.0);

    let city = if receipt.city.is_empty() {
        issuer.city.as_str()
    } else {
        receipt.city.as_str()
    };
    c.text(
        BODY_SIZE,
        FontStyle::Regular,
        &format!("{}, {}", city, long_date(receipt.issue_date)),
    );
    signature(&mut c, issuer);

    let pages = c.finish(path)?;
    notify_export_success("Receipt PDF", path);
    Ok(pages)
}
