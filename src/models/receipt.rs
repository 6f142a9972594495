use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub id: i64,
    pub year: i32,
    pub seq: i64,
    pub client_id: Option<i64>,
    pub payer_name: String,
    pub payer_document: String,
    pub description: String,
    pub amount_cents: i64,
    pub issue_date: NaiveDate,
    pub city: String,
    pub created_at: String,
}

impl Receipt {
    /// Display number, e.g. `007/2025`.
    pub fn number(&self) -> String {
        format!("{:03}/{}", self.seq, self.year)
    }

    /// Parse `NNN/YYYY` back into `(seq, year)`.
    pub fn parse_number(s: &str) -> Option<(i64, i32)> {
        let (seq, year) = s.trim().split_once('/')?;
        Some((seq.parse().ok()?, year.parse().ok()?))
    }
}
