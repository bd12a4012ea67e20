use crate::types::Activity;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DbUser {
    pub user_id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_digest: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DbFitness {
    pub fitness_id: String,
    pub activity_date: NaiveDate,
    pub activities: Vec<Activity>,
    pub trained: bool,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DbCategory {
    pub category_id: String,
    pub name: String,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DbItem {
    pub item_id: String,
    pub category_id: String,
    pub name: String,
    pub remark: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DbLedgerEntry {
    pub entry_id: String,
    pub date: NaiveDate,
    pub category_id: String,
    pub item_id: String,
    pub expense: Decimal,
    pub refund: Decimal,
    pub remarks: String,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbLedgerEntry {
    /// Expense minus refund.
    pub fn net(&self) -> Decimal {
        self.expense - self.refund
    }
}
