#![allow(dead_code)]
use aerodesk::core::permissions::Operator;
use aerodesk::core::records::{ClientInput, RecordsLogic};
use aerodesk::db::initialize::init_db;
use aerodesk::db::pool::DbPool;
use aerodesk::models::role::Role;
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const REG: &str = "PR-ABC";
pub const CNPJ: &str = "12.345.678/0001-90";
pub const PIC: &str = "123456";
pub const SIC: &str = "654321";

pub fn aero() -> Command {
    cargo_bin_cmd!("aerodesk")
}

/// `aerodesk --db <path> <args…>`
pub fn aero_db(db_path: &str, args: &[&str]) -> Command {
    let mut cmd = aero();
    cmd.args(["--db", db_path]).args(args);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_aerodesk.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB and register one aircraft, two aerodromes, two pilots
/// and one client (id 1) attached to the aircraft.
pub fn init_db_with_fleet(db_path: &str) {
    aero()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    let steps: [&[&str]; 6] = [
        &["aircraft", "add", REG, "--model", "C208B", "--initial-cell", "187.3"],
        &["aerodrome", "add", "SBSP", "--name", "Congonhas", "--city", "São Paulo", "--state", "SP"],
        &["aerodrome", "add", "SBRJ", "--name", "Santos Dumont", "--city", "Rio de Janeiro", "--state", "RJ"],
        &["crew", "add", "--name", "Ana Souza", "--canac", PIC, "--birth", "15/03/1985"],
        &["crew", "add", "--name", "Bruno Lima", "--canac", SIC, "--function", "sic"],
        &["client", "add", "--name", "Acme Participações", "--cnpj", CNPJ, "--aircraft", REG, "--share", "50"],
    ];

    for args in steps {
        aero_db(db_path, args).assert().success();
    }
}

/// Record one SBSP→SBRJ leg with DEP/POU times.
pub fn add_leg(db_path: &str, date: &str, dep: &str, pou: &str) {
    aero_db(
        db_path,
        &[
            "logbook", "add", "--aircraft", REG, "--date", date, "--from", "SBSP", "--to", "SBRJ",
            "--dep", dep, "--pou", pou, "--landings", "1", "--pic", PIC, "--client", "1",
        ],
    )
    .assert()
    .success();
}

pub fn admin() -> Operator {
    Operator::new("tester", vec![Role::Admin])
}

/// In-memory database with the same fleet as [`init_db_with_fleet`].
pub fn memory_pool_with_fleet() -> DbPool {
    let mut pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    let op = admin();

    RecordsLogic::add_aircraft(
        &mut pool,
        &op,
        REG,
        Some(&"C208B".to_string()),
        None,
        Some(&"187.3".to_string()),
    )
    .expect("add aircraft");

    for icao in ["SBSP", "SBRJ"] {
        RecordsLogic::add_aerodrome(&mut pool, &op, icao, None, None, None).expect("add aerodrome");
    }

    RecordsLogic::add_crew(&mut pool, &op, "Ana Souza", PIC, "pic", None, None).expect("add pic");
    RecordsLogic::add_crew(&mut pool, &op, "Bruno Lima", SIC, "sic", None, None).expect("add sic");

    let client = ClientInput {
        name: "Acme Participações".into(),
        cnpj: CNPJ.into(),
        aircraft: Some(REG.into()),
        share_percent: Some(50.0),
        ..Default::default()
    };
    RecordsLogic::add_client(&mut pool, &op, &client).expect("add client");

    pool
}
