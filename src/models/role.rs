use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Admin,
    Director,
    Financial,
    Operations,
    Pilot,
    Mechanic,
}

impl Role {
    pub fn code(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Director => "director",
            Role::Financial => "financial",
            Role::Operations => "operations",
            Role::Pilot => "pilot",
            Role::Mechanic => "mechanic",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "director" => Some(Role::Director),
            "financial" => Some(Role::Financial),
            "operations" => Some(Role::Operations),
            "pilot" => Some(Role::Pilot),
            "mechanic" => Some(Role::Mechanic),
            _ => None,
        }
    }

    /// Parse a list of role codes, failing on the first unknown one.
    pub fn parse_all<S: AsRef<str>>(codes: &[S]) -> AppResult<Vec<Role>> {
        codes
            .iter()
            .map(|c| {
                Role::from_code(c.as_ref())
                    .ok_or_else(|| AppError::InvalidRole(c.as_ref().to_string()))
            })
            .collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
