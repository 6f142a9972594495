pub mod aerodrome;
pub mod aircraft;
pub mod client;
pub mod crew;
pub mod logbook_entry;
pub mod logbook_month;
pub mod message;
pub mod portal_session;
pub mod receipt;
pub mod role;
