//! JSON request bodies and query strings accepted by the HTTP API.

use crate::error::RoutineError;
use crate::service::calendar;
use crate::types::fitness::Activity;
use crate::types::period::{Granularity, Period};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;

fn require_text(field: &str, value: &str) -> Result<(), RoutineError> {
    if value.trim().is_empty() {
        return Err(RoutineError::validation(format!("`{field}` must not be empty")));
    }
    Ok(())
}

/// Largest amount accepted for a single expense or refund.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

fn require_amount(field: &str, value: Decimal) -> Result<(), RoutineError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(RoutineError::validation(format!(
            "`{field}` must not be negative"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(RoutineError::validation(format!(
            "`{field}` must not exceed {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

fn require_supported_date(field: &str, value: NaiveDate) -> Result<(), RoutineError> {
    if !calendar::is_supported_year(value.year()) {
        return Err(RoutineError::validation(format!(
            "`{field}` year must be between {} and {}",
            calendar::MIN_YEAR,
            calendar::MAX_YEAR
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), RoutineError> {
        require_text("username", &self.username)?;
        require_text("password", &self.password)
    }
}

/// Blank fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFitnessRecord {
    pub activity_date: NaiveDate,
    pub activities: Vec<Activity>,
    pub user_id: Option<String>,
}

impl NewFitnessRecord {
    pub fn validate(&self) -> Result<(), RoutineError> {
        require_supported_date("activity_date", self.activity_date)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FitnessPatch {
    pub activities: Option<Vec<Activity>>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub category_id: String,
    pub name: String,
    pub remark: Option<String>,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), RoutineError> {
        require_text("category_id", &self.category_id)?;
        require_text("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub remark: Option<String>,
}

impl CategoryPatch {
    pub fn validate(&self) -> Result<(), RoutineError> {
        match &self.name {
            Some(name) => require_text("name", name),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub item_id: String,
    pub category_id: String,
    pub name: String,
    pub remark: Option<String>,
}

impl NewItem {
    pub fn validate(&self) -> Result<(), RoutineError> {
        require_text("item_id", &self.item_id)?;
        require_text("category_id", &self.category_id)?;
        require_text("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub remark: Option<String>,
}

impl ItemPatch {
    pub fn validate(&self) -> Result<(), RoutineError> {
        match &self.name {
            Some(name) => require_text("name", name),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLedgerEntry {
    pub date: NaiveDate,
    pub category_id: String,
    pub item_id: String,
    pub expense: Decimal,
    pub refund: Option<Decimal>,
    pub remarks: Option<String>,
    pub user_id: Option<String>,
}

impl NewLedgerEntry {
    pub fn validate(&self) -> Result<(), RoutineError> {
        require_supported_date("date", self.date)?;
        require_text("category_id", &self.category_id)?;
        require_text("item_id", &self.item_id)?;
        require_amount("expense", self.expense)?;
        if let Some(refund) = self.refund {
            require_amount("refund", refund)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerPatch {
    pub date: Option<NaiveDate>,
    pub category_id: Option<String>,
    pub item_id: Option<String>,
    pub expense: Option<Decimal>,
    pub refund: Option<Decimal>,
    pub remarks: Option<String>,
    pub user_id: Option<String>,
}

impl LedgerPatch {
    pub fn validate(&self) -> Result<(), RoutineError> {
        if let Some(date) = self.date {
            require_supported_date("date", date)?;
        }
        if let Some(expense) = self.expense {
            require_amount("expense", expense)?;
        }
        if let Some(refund) = self.refund {
            require_amount("refund", refund)?;
        }
        Ok(())
    }
}

/// `?user_id=` filter for list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnerQuery {
    pub user_id: Option<String>,
}

/// `?user_id=&year=[&month=]` for the statistics endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsQuery {
    pub user_id: String,
    pub year: i32,
    pub month: Option<u32>,
}

impl StatsQuery {
    pub fn period(&self) -> Result<Period, RoutineError> {
        Period::from_parts(self.year, self.month)
    }
}

/// `?user_id=&granularity=` for the period pickers.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodsQuery {
    pub user_id: String,
    #[serde(default = "default_granularity")]
    pub granularity: Granularity,
}

fn default_granularity() -> Granularity {
    Granularity::Month
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_entry_rejects_negative_amounts() {
        let entry = NewLedgerEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            category_id: "food".into(),
            item_id: "lunch".into(),
            expense: Decimal::new(-100, 2),
            refund: None,
            remarks: None,
            user_id: None,
        };
        assert!(entry.validate().is_err());

        let entry = NewLedgerEntry {
            expense: Decimal::new(1250, 2),
            refund: Some(Decimal::new(-1, 0)),
            ..entry
        };
        assert!(entry.validate().is_err());
    }

    #[test]
    fn ledger_amounts_are_capped() {
        assert_eq!(MAX_AMOUNT, Decimal::new(1_000_000_000_000_000, 0));
        let entry: NewLedgerEntry = serde_json::from_str(
            r#"{"date":"2024-03-01","category_id":"food","item_id":"lunch","expense":"50000000000000000000000000000"}"#,
        )
        .unwrap();
        assert!(entry.validate().is_err());

        let at_cap = NewLedgerEntry {
            expense: MAX_AMOUNT,
            ..entry
        };
        assert!(at_cap.validate().is_ok());

        let patch = LedgerPatch {
            refund: Some(MAX_AMOUNT + Decimal::new(1, 2)),
            ..LedgerPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn dates_outside_supported_years_are_rejected() {
        let far = NaiveDate::from_ymd_opt(262_000, 1, 5).unwrap();
        let record = NewFitnessRecord {
            activity_date: far,
            activities: vec![Activity::Legs],
            user_id: None,
        };
        assert!(record.validate().is_err());
        let patch = LedgerPatch {
            date: Some(far),
            ..LedgerPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn amounts_accept_numbers_and_strings() {
        let entry: NewLedgerEntry = serde_json::from_str(
            r#"{"date":"2024-03-01","category_id":"food","item_id":"lunch","expense":"12.50","refund":1.5}"#,
        )
        .unwrap();
        assert_eq!(entry.expense, Decimal::new(1250, 2));
        assert_eq!(entry.refund, Some(Decimal::new(15, 1)));
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn blank_names_are_rejected() {
        let cat = NewCategory {
            category_id: "food".into(),
            name: "  ".into(),
            remark: None,
        };
        assert!(cat.validate().is_err());
        let user = NewUser {
            username: "".into(),
            password: "pw".into(),
            email: String::new(),
        };
        assert!(user.validate().is_err());
    }

    #[test]
    fn periods_query_defaults_to_month() {
        let q: PeriodsQuery = serde_json::from_str(r#"{"user_id":"u"}"#).unwrap();
        assert_eq!(q.granularity, Granularity::Month);
    }
}
