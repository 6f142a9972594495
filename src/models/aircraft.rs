use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Aircraft {
    pub id: i64,
    pub registration: String, // ⇔ aircraft.registration (upper case, unique)
    pub model: String,
    pub serial_number: String,
    pub initial_cell_hours: f64, // cell hours when the aircraft entered the system
    pub active: bool,
}
