use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_operator")]
    pub operator: String,
    #[serde(default = "default_operator_roles")]
    pub operator_roles: Vec<String>,
    #[serde(default = "default_company_name")]
    pub company_name: String,
    #[serde(default)]
    pub company_cnpj: String,
    #[serde(default)]
    pub company_address: String,
    #[serde(default = "default_company_city")]
    pub company_city: String,
    #[serde(default = "default_portal_session_hours")]
    pub portal_session_hours: i64,
    #[serde(default = "default_cell_inspection_interval")]
    pub cell_inspection_interval: f64,
}

fn default_operator() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "operator".to_string())
}
fn default_operator_roles() -> Vec<String> {
    vec!["admin".to_string()]
}
fn default_company_name() -> String {
    "Aerodesk Táxi Aéreo".to_string()
}
fn default_company_city() -> String {
    "São Paulo".to_string()
}
fn default_portal_session_hours() -> i64 {
    12
}
fn default_cell_inspection_interval() -> f64 {
    10.0
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            operator: default_operator(),
            operator_roles: default_operator_roles(),
            company_name: default_company_name(),
            company_cnpj: String::new(),
            company_address: String::new(),
            company_city: default_company_city(),
            portal_session_hours: default_portal_session_hours(),
            cell_inspection_interval: default_cell_inspection_interval(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("aerodesk")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".aerodesk")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("aerodesk.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("aerodesk.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Resolve a user-provided DB name against the config dir.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = crate::utils::path::expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Initialize configuration and database files.
    /// Returns the configuration that was written (or would have been in test mode).
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_name {
            Some(name) => Self::resolve_db_path(&name),
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path.clone());

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(config)
    }
}
