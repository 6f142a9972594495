//! Reference records: aircraft, clients, crew members and aerodromes.

use crate::core::birthdays::parse_birth_date;
use crate::core::calculator::hours::parse_optional_hours;
use crate::core::permissions::{Action, Operator};
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::{aerodromes, aircraft, clients, crew};
use crate::errors::{AppError, AppResult};
use crate::models::aerodrome::Aerodrome;
use crate::models::aircraft::Aircraft;
use crate::models::client::Client;
use crate::models::crew::{CrewFunction, CrewMember};
use crate::utils::date::parse_date_arg;
use crate::utils::documents::{
    normalize_canac, normalize_document, normalize_icao, normalize_registration,
};

/// Fields accepted when registering a client.
#[derive(Debug, Default, Clone)]
pub struct ClientInput {
    pub name: String,
    pub cnpj: String,
    pub aircraft: Option<String>,
    pub share_percent: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
}

fn validated_birth_date(raw: Option<&String>) -> AppResult<Option<String>> {
    match raw {
        Some(s) if !s.trim().is_empty() => {
            parse_birth_date(s).ok_or_else(|| AppError::InvalidBirthDate(s.to_string()))?;
            Ok(Some(s.trim().to_string()))
        }
        _ => Ok(None),
    }
}

pub struct RecordsLogic;

impl RecordsLogic {
    pub fn add_aircraft(
        pool: &mut DbPool,
        op: &Operator,
        registration: &str,
        model: Option<&String>,
        serial_number: Option<&String>,
        initial_cell: Option<&String>,
    ) -> AppResult<Aircraft> {
        op.require(Action::ManageReference)?;

        let mut a = Aircraft {
            id: 0,
            registration: normalize_registration(registration)?,
            model: model.cloned().unwrap_or_default(),
            serial_number: serial_number.cloned().unwrap_or_default(),
            initial_cell_hours: parse_optional_hours(initial_cell)?.unwrap_or(0.0),
            active: true,
        };

        a.id = aircraft::insert_aircraft(&pool.conn, &a)?;
        audit_or_warn(&pool.conn, "add", &a.registration, "Aircraft registered");
        Ok(a)
    }

    pub fn set_aircraft_active(
        pool: &mut DbPool,
        op: &Operator,
        registration: &str,
        active: bool,
    ) -> AppResult<Aircraft> {
        op.require(Action::ManageReference)?;

        let mut a = aircraft::require_by_registration(&pool.conn, registration)?;
        aircraft::set_active(&pool.conn, a.id, active)?;
        a.active = active;

        let msg = if active { "Aircraft activated" } else { "Aircraft deactivated" };
        audit_or_warn(&pool.conn, "edit", &a.registration, msg);
        Ok(a)
    }

    pub fn delete_aircraft(pool: &mut DbPool, op: &Operator, registration: &str) -> AppResult<()> {
        op.require(Action::ManageReference)?;

        let a = aircraft::require_by_registration(&pool.conn, registration)?;
        aircraft::delete_aircraft(&pool.conn, a.id)?;
        audit_or_warn(&pool.conn, "del", &a.registration, "Aircraft deleted");
        Ok(())
    }

    pub fn add_client(pool: &mut DbPool, op: &Operator, input: &ClientInput) -> AppResult<Client> {
        op.require(Action::ManageReference)?;

        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("client name is empty".into()));
        }

        if let Some(p) = input.share_percent
            && !(0.0..=100.0).contains(&p)
        {
            return Err(AppError::InvalidInput(format!("share percent {p}")));
        }

        let aircraft_id = match &input.aircraft {
            Some(reg) => Some(aircraft::require_by_registration(&pool.conn, reg)?.id),
            None => None,
        };

        let mut c = Client {
            id: 0,
            name: name.to_string(),
            cnpj: normalize_document(&input.cnpj)?,
            aircraft_id,
            share_percent: input.share_percent,
            email: input.email.clone().unwrap_or_default(),
            phone: input.phone.clone().unwrap_or_default(),
            birth_date: validated_birth_date(input.birth_date.as_ref())?,
        };

        c.id = clients::insert_client(&pool.conn, &c)?;
        audit_or_warn(&pool.conn, "add", &format!("client #{}", c.id), &c.name);
        Ok(c)
    }

    pub fn delete_client(pool: &mut DbPool, op: &Operator, id: i64) -> AppResult<()> {
        op.require(Action::ManageReference)?;

        let c = clients::get_client(&pool.conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("Client #{id}")))?;
        clients::delete_client(&pool.conn, id)?;
        audit_or_warn(&pool.conn, "del", &format!("client #{id}"), &c.name);
        Ok(())
    }

    pub fn add_crew(
        pool: &mut DbPool,
        op: &Operator,
        name: &str,
        canac: &str,
        function: &str,
        birth_date: Option<&String>,
        medical_expiry: Option<&String>,
    ) -> AppResult<CrewMember> {
        op.require(Action::ManageReference)?;

        let function = CrewFunction::from_code(function)
            .ok_or_else(|| AppError::InvalidInput(format!("crew function '{function}'")))?;

        let medical_expiry = match medical_expiry {
            Some(d) => Some(parse_date_arg(d)?.format("%Y-%m-%d").to_string()),
            None => None,
        };

        let mut c = CrewMember {
            id: 0,
            name: name.trim().to_string(),
            canac: normalize_canac(canac)?,
            function,
            birth_date: validated_birth_date(birth_date)?,
            medical_expiry,
        };

        c.id = crew::insert_crew(&pool.conn, &c)?;
        audit_or_warn(&pool.conn, "add", &format!("crew {}", c.canac), &c.name);
        Ok(c)
    }

    pub fn delete_crew(pool: &mut DbPool, op: &Operator, canac: &str) -> AppResult<()> {
        op.require(Action::ManageReference)?;

        let canac = normalize_canac(canac)?;
        if crew::delete_crew(&pool.conn, &canac)? == 0 {
            return Err(AppError::NotFound(format!("Crew member {canac}")));
        }
        audit_or_warn(&pool.conn, "del", &format!("crew {canac}"), "Crew member deleted");
        Ok(())
    }

    pub fn add_aerodrome(
        pool: &mut DbPool,
        op: &Operator,
        icao: &str,
        name: Option<&String>,
        city: Option<&String>,
        state: Option<&String>,
    ) -> AppResult<Aerodrome> {
        op.require(Action::ManageReference)?;

        let mut a = Aerodrome {
            id: 0,
            icao: normalize_icao(icao)?,
            name: name.cloned().unwrap_or_default(),
            city: city.cloned().unwrap_or_default(),
            state: state.map(|s| s.to_uppercase()).unwrap_or_default(),
        };

        a.id = aerodromes::insert_aerodrome(&pool.conn, &a)?;
        audit_or_warn(&pool.conn, "add", &a.icao, "Aerodrome registered");
        Ok(a)
    }

    pub fn delete_aerodrome(pool: &mut DbPool, op: &Operator, icao: &str) -> AppResult<()> {
        op.require(Action::ManageReference)?;

        let icao = normalize_icao(icao)?;
        if aerodromes::delete_aerodrome(&pool.conn, &icao)? == 0 {
            return Err(AppError::NotFound(format!("Aerodrome {icao}")));
        }
        audit_or_warn(&pool.conn, "del", &icao, "Aerodrome deleted");
        Ok(())
    }
}
