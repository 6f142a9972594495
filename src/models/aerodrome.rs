use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Aerodrome {
    pub id: i64,
    pub icao: String,
    pub name: String,
    pub city: String,
    pub state: String,
}
