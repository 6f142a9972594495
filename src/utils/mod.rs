pub mod colors;
pub mod date;
pub mod documents;
pub mod formatting;
pub mod path;
pub mod period;
pub mod table;
pub mod time;
