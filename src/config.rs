use crate::error::RoutineError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Default listen key; `main` warns when it is still in use.
pub const DEFAULT_ROUTINE_KEY: &str = "change-me";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub routine_key: String,
    pub markers: LedgerMarkers,
}

/// Sentinel identifiers the ledger aggregation treats specially.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerMarkers {
    /// Item id whose entries are payroll income.
    pub salary_item_id: String,
    /// Category id whose entries count as income rather than expense.
    pub income_category_id: String,
    /// Salary received on or before this day of month belongs to the previous month.
    pub salary_cutoff_day: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:routine.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            routine_key: DEFAULT_ROUTINE_KEY.to_string(),
            markers: LedgerMarkers::default(),
        }
    }
}

impl Default for LedgerMarkers {
    fn default() -> Self {
        Self {
            salary_item_id: "salary".to_string(),
            income_category_id: "income".to_string(),
            salary_cutoff_day: 20,
        }
    }
}

impl Config {
    /// Defaults, then `routine.toml`, then `ROUTINE_*` variables
    /// (`ROUTINE_MARKERS__SALARY_ITEM_ID` for nested keys).
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("routine.toml"))
            .merge(Env::prefixed("ROUTINE_").split("__"))
    }

    pub fn load() -> Result<Self, RoutineError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, RoutineError> {
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), RoutineError> {
        if !(1..=31).contains(&self.markers.salary_cutoff_day) {
            return Err(RoutineError::validation(format!(
                "markers.salary_cutoff_day must be within 1..=31, got {}",
                self.markers.salary_cutoff_day
            )));
        }
        if self.routine_key.trim().is_empty() {
            return Err(RoutineError::validation("routine_key must not be empty"));
        }
        Ok(())
    }
}

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("FATAL: invalid routine configuration"));
