use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CrewFunction {
    Pic,        // pilot in command
    Sic,        // second in command
    Mechanic,
    Dispatcher,
}

impl CrewFunction {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CrewFunction::Pic => "pic",
            CrewFunction::Sic => "sic",
            CrewFunction::Mechanic => "mechanic",
            CrewFunction::Dispatcher => "dispatcher",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pic" => Some(CrewFunction::Pic),
            "sic" => Some(CrewFunction::Sic),
            "mechanic" => Some(CrewFunction::Mechanic),
            "dispatcher" => Some(CrewFunction::Dispatcher),
            _ => None,
        }
    }

    /// CLI input, any case.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_db_str(&code.trim().to_lowercase())
    }
}

impl fmt::Display for CrewFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    pub canac: String,
    pub function: CrewFunction,
    pub birth_date: Option<String>,
    pub medical_expiry: Option<String>,
}
