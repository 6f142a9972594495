pub mod backup;
pub mod birthdays;
pub mod calculator;
pub mod log;
pub mod logbook;
pub mod messaging;
pub mod permissions;
pub mod portal;
pub mod receipt;
pub mod records;
