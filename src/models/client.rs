use serde::Serialize;

/// A co-owner / charter client. `cnpj` holds digits only (CNPJ or CPF).
#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub cnpj: String,
    pub aircraft_id: Option<i64>,
    pub share_percent: Option<f64>,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<String>, // raw: ISO, dd/MM/yyyy or dd/MM
}
