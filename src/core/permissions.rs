//! Capability checks: one policy table instead of role tests in every command.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ManageReference,
    EditLogbook,
    EditClosedLogbook,
    CloseLogbookMonth,
    IssueReceipt,
    ViewFinancials,
    SendMessage,
    ExportData,
    ManageDatabase,
}

impl Action {
    pub fn describe(&self) -> &'static str {
        match self {
            Action::ManageReference => "manage aircraft, clients, crew and aerodromes",
            Action::EditLogbook => "edit the logbook",
            Action::EditClosedLogbook => "edit a closed logbook month",
            Action::CloseLogbookMonth => "close a logbook month",
            Action::IssueReceipt => "issue receipts",
            Action::ViewFinancials => "view financial records",
            Action::SendMessage => "send internal messages",
            Action::ExportData => "export data",
            Action::ManageDatabase => "manage the database",
        }
    }
}

use Role::*;

/// Roles allowed to perform each action, besides `admin` which may do everything.
const POLICY: &[(Action, &[Role])] = &[
    (Action::ManageReference, &[Director, Operations]),
    (Action::EditLogbook, &[Director, Operations, Pilot]),
    (Action::EditClosedLogbook, &[Director]),
    (Action::CloseLogbookMonth, &[Director, Operations]),
    (Action::IssueReceipt, &[Director, Financial]),
    (Action::ViewFinancials, &[Director, Financial]),
    (
        Action::SendMessage,
        &[Director, Financial, Operations, Pilot, Mechanic],
    ),
    (Action::ExportData, &[Director, Financial, Operations]),
    (Action::ManageDatabase, &[]),
];

pub fn allowed_roles(action: Action) -> &'static [Role] {
    POLICY
        .iter()
        .find(|(a, _)| *a == action)
        .map(|(_, roles)| *roles)
        .unwrap_or(&[])
}

pub fn is_allowed(roles: &[Role], action: Action) -> bool {
    let allowed = allowed_roles(action);
    roles.iter().any(|r| *r == Admin || allowed.contains(r))
}

pub fn require(roles: &[Role], action: Action) -> AppResult<()> {
    if is_allowed(roles, action) {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(format!(
            "your roles cannot {}",
            action.describe()
        )))
    }
}

/// Who is running the command: name and roles from the config. `--role`
/// can only narrow them: each requested role must be configured, unless
/// the configured roles include `admin`.
#[derive(Debug, Clone)]
pub struct Operator {
    pub name: String,
    pub roles: Vec<Role>,
}

impl Operator {
    pub fn new(name: &str, roles: Vec<Role>) -> Self {
        Self {
            name: name.to_string(),
            roles,
        }
    }

    pub fn resolve(cfg: &Config, role_override: &[String]) -> AppResult<Self> {
        let granted = Role::parse_all(&cfg.operator_roles)?;
        if role_override.is_empty() {
            return Ok(Self::new(&cfg.operator, granted));
        }

        let requested = Role::parse_all(role_override)?;
        if let Some(r) = requested
            .iter()
            .find(|r| !granted.contains(&Admin) && !granted.contains(r))
        {
            return Err(AppError::PermissionDenied(format!(
                "role '{r}' is not granted to {} in the configuration",
                cfg.operator
            )));
        }
        Ok(Self::new(&cfg.operator, requested))
    }

    pub fn can(&self, action: Action) -> bool {
        is_allowed(&self.roles, action)
    }

    pub fn require(&self, action: Action) -> AppResult<()> {
        require(&self.roles, action)
    }
}
