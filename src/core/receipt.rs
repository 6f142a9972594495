//! Receipts: per-year sequential numbering allocated by the database,
//! amounts in cents, optional PDF rendering.

use crate::config::Config;
use crate::core::permissions::{Action, Operator};
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::{clients, receipts};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::receipt_pdf::{Issuer, write_receipt_pdf};
use crate::models::receipt::Receipt;
use crate::utils::documents::normalize_document;
use crate::utils::formatting::{format_brl, parse_amount_cents};
use chrono::NaiveDate;
use std::path::Path;

/// Who pays: a registered client, or a free-form payer.
#[derive(Debug, Clone)]
pub enum Payer {
    Client(i64),
    Other { name: String, document: String },
}

#[derive(Debug, Clone)]
pub struct ReceiptInput {
    pub payer: Payer,
    pub amount: String,
    pub description: String,
    pub issue_date: NaiveDate,
}

impl Issuer {
    pub fn from_config(cfg: &Config) -> Self {
        Issuer {
            name: cfg.company_name.clone(),
            cnpj: cfg.company_cnpj.clone(),
            address: cfg.company_address.clone(),
            city: cfg.company_city.clone(),
        }
    }
}

pub struct ReceiptLogic;

impl ReceiptLogic {
    pub fn issue(
        pool: &mut DbPool,
        op: &Operator,
        cfg: &Config,
        input: &ReceiptInput,
    ) -> AppResult<Receipt> {
        op.require(Action::IssueReceipt)?;

        let amount_cents = parse_amount_cents(&input.amount)?;
        if amount_cents == 0 {
            return Err(AppError::InvalidAmount(input.amount.clone()));
        }

        let description = input.description.trim();
        if description.is_empty() {
            return Err(AppError::InvalidInput("description is required".into()));
        }

        let (client_id, payer_name, payer_document) = match &input.payer {
            Payer::Client(id) => {
                let c = clients::get_client(&pool.conn, *id)?
                    .ok_or_else(|| AppError::NotFound(format!("Client #{id}")))?;
                (Some(c.id), c.name, c.cnpj)
            }
            Payer::Other { name, document } => {
                if name.trim().is_empty() {
                    return Err(AppError::InvalidInput("payer name is required".into()));
                }
                (None, name.trim().to_string(), normalize_document(document)?)
            }
        };

        let draft = Receipt {
            id: 0,
            year: 0,
            seq: 0,
            client_id,
            payer_name,
            payer_document,
            description: description.to_string(),
            amount_cents,
            issue_date: input.issue_date,
            city: cfg.company_city.clone(),
            created_at: String::new(),
        };

        let receipt = receipts::insert_with_next_number(&mut pool.conn, &draft)?;

        audit_or_warn(
            &pool.conn,
            "receipt",
            &receipt.number(),
            &format!("{} to {}", format_brl(receipt.amount_cents), receipt.payer_name),
        );

        Ok(receipt)
    }

    pub fn list(
        pool: &mut DbPool,
        op: &Operator,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<Receipt>> {
        op.require(Action::ViewFinancials)?;
        receipts::list_receipts(&pool.conn, bounds)
    }

    pub fn find(pool: &mut DbPool, op: &Operator, number: &str) -> AppResult<Receipt> {
        op.require(Action::ViewFinancials)?;

        let (seq, year) = Receipt::parse_number(number)
            .ok_or_else(|| AppError::InvalidInput(format!("receipt number '{number}' (expected NNN/YYYY)")))?;

        receipts::find_by_number(&pool.conn, seq, year)?
            .ok_or_else(|| AppError::NotFound(format!("Receipt {number}")))
    }

    /// Render a stored receipt. Returns the page count.
    pub fn render_pdf(receipt: &Receipt, cfg: &Config, file: &str, force: bool) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;
        write_receipt_pdf(receipt, &Issuer::from_config(cfg), path)
    }
}
