use crate::db::models::DbLedgerEntry;
use crate::db::sqlite::RoutineStorage;
use crate::error::RoutineError;
use crate::types::payload::{LedgerPatch, NewLedgerEntry};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

const LEDGER_COLUMNS: &str = "entry_id, date, category_id, item_id, expense, refund, remarks, user_id, created_at, updated_at";

impl RoutineStorage {
    pub async fn create_ledger_entry(
        &self,
        new: &NewLedgerEntry,
    ) -> Result<DbLedgerEntry, RoutineError> {
        self.ensure_item_in_category(&new.item_id, &new.category_id)
            .await?;

        let now = Utc::now();
        let entry = DbLedgerEntry {
            entry_id: Uuid::new_v4().to_string(),
            date: new.date,
            category_id: new.category_id.clone(),
            item_id: new.item_id.clone(),
            expense: new.expense.round_dp(2),
            refund: new.refund.unwrap_or(Decimal::ZERO).round_dp(2),
            remarks: new.remarks.clone().unwrap_or_default(),
            user_id: new.user_id.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"INSERT INTO account_book (
                entry_id, date, category_id, item_id, expense, refund,
                remarks, user_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&entry.entry_id)
        .bind(entry.date)
        .bind(&entry.category_id)
        .bind(&entry.item_id)
        .bind(entry.expense.to_string())
        .bind(entry.refund.to_string())
        .bind(&entry.remarks)
        .bind(&entry.user_id)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await?;

        info!(
            entry_id = %entry.entry_id,
            date = %entry.date,
            category_id = %entry.category_id,
            item_id = %entry.item_id,
            "ledger entry created"
        );
        Ok(entry)
    }

    /// All entries, or one user's, newest date first.
    pub async fn list_ledger_entries(
        &self,
        user_id: Option<&str>,
    ) -> Result<Vec<DbLedgerEntry>, RoutineError> {
        let rows = match user_id {
            Some(uid) => {
                sqlx::query(&format!(
                    "SELECT {LEDGER_COLUMNS} FROM account_book WHERE user_id = ? ORDER BY date DESC, created_at DESC"
                ))
                .bind(uid)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {LEDGER_COLUMNS} FROM account_book ORDER BY date DESC, created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.into_iter().map(Self::row_to_ledger_entry).collect()
    }

    pub async fn get_ledger_entry(&self, entry_id: &str) -> Result<DbLedgerEntry, RoutineError> {
        let row = sqlx::query(&format!(
            "SELECT {LEDGER_COLUMNS} FROM account_book WHERE entry_id = ?"
        ))
        .bind(entry_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RoutineError::not_found("ledger entry", entry_id))?;
        Self::row_to_ledger_entry(row)
    }

    pub async fn update_ledger_entry(
        &self,
        entry_id: &str,
        patch: &LedgerPatch,
    ) -> Result<DbLedgerEntry, RoutineError> {
        let mut entry = self.get_ledger_entry(entry_id).await?;
        if let Some(date) = patch.date {
            entry.date = date;
        }
        if let Some(category_id) = &patch.category_id {
            entry.category_id = category_id.clone();
        }
        if let Some(item_id) = &patch.item_id {
            entry.item_id = item_id.clone();
        }
        if let Some(expense) = patch.expense {
            entry.expense = expense.round_dp(2);
        }
        if let Some(refund) = patch.refund {
            entry.refund = refund.round_dp(2);
        }
        if let Some(remarks) = &patch.remarks {
            entry.remarks = remarks.clone();
        }
        if let Some(user_id) = &patch.user_id {
            entry.user_id = Some(user_id.clone());
        }
        if patch.category_id.is_some() || patch.item_id.is_some() {
            self.ensure_item_in_category(&entry.item_id, &entry.category_id)
                .await?;
        }
        entry.updated_at = Utc::now();

        sqlx::query(
            r#"UPDATE account_book SET
                date = ?,
                category_id = ?,
                item_id = ?,
                expense = ?,
                refund = ?,
                remarks = ?,
                user_id = ?,
                updated_at = ?
              WHERE entry_id = ?"#,
        )
        .bind(entry.date)
        .bind(&entry.category_id)
        .bind(&entry.item_id)
        .bind(entry.expense.to_string())
        .bind(entry.refund.to_string())
        .bind(&entry.remarks)
        .bind(&entry.user_id)
        .bind(entry.updated_at)
        .bind(&entry.entry_id)
        .execute(&self.pool)
        .await?;

        info!(entry_id = %entry.entry_id, "ledger entry updated");
        Ok(entry)
    }

    pub async fn delete_ledger_entry(&self, entry_id: &str) -> Result<(), RoutineError> {
        let done = sqlx::query("DELETE FROM account_book WHERE entry_id = ?")
            .bind(entry_id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(RoutineError::not_found("ledger entry", entry_id));
        }
        info!(entry_id, "ledger entry deleted");
        Ok(())
    }

    /// An existing item must belong to the entry's category. A missing item is
    /// left for the foreign key to reject.
    async fn ensure_item_in_category(
        &self,
        item_id: &str,
        category_id: &str,
    ) -> Result<(), RoutineError> {
        match self.find_item(item_id).await? {
            Some(item) if item.category_id != category_id => Err(RoutineError::validation(
                format!(
                    "item `{item_id}` belongs to category `{}`, not `{category_id}`",
                    item.category_id
                ),
            )),
            _ => Ok(()),
        }
    }

    fn row_to_ledger_entry(row: SqliteRow) -> Result<DbLedgerEntry, RoutineError> {
        let expense_str: String = row.try_get("expense")?;
        let refund_str: String = row.try_get("refund")?;
        let expense =
            Decimal::from_str(&expense_str).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let refund =
            Decimal::from_str(&refund_str).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(DbLedgerEntry {
            entry_id: row.try_get("entry_id")?,
            date: row.try_get("date")?,
            category_id: row.try_get("category_id")?,
            item_id: row.try_get("item_id")?,
            expense,
            refund,
            remarks: row.try_get("remarks")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
