pub mod aerodromes;
pub mod aircraft;
pub mod clients;
pub mod crew;
pub mod initialize;
pub mod log;
pub mod logbook;
pub mod messages;
pub mod migrate;
pub mod pool;
pub mod portal_sessions;
pub mod queries;
pub mod receipts;
pub mod stats;
