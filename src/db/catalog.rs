//! Categories and the items they own.

use crate::db::models::{DbCategory, DbItem};
use crate::db::sqlite::RoutineStorage;
use crate::error::RoutineError;
use crate::types::payload::{CategoryPatch, ItemPatch, NewCategory, NewItem};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::info;

impl RoutineStorage {
    pub async fn create_category(&self, new: &NewCategory) -> Result<DbCategory, RoutineError> {
        let category = DbCategory {
            category_id: new.category_id.trim().to_string(),
            name: new.name.trim().to_string(),
            remark: new.remark.clone(),
        };
        sqlx::query("INSERT INTO category (category_id, name, remark) VALUES (?, ?, ?)")
            .bind(&category.category_id)
            .bind(&category.name)
            .bind(&category.remark)
            .execute(&self.pool)
            .await?;
        info!(category_id = %category.category_id, "category created");
        Ok(category)
    }

    pub async fn list_categories(&self) -> Result<Vec<DbCategory>, RoutineError> {
        let rows = sqlx::query("SELECT category_id, name, remark FROM category ORDER BY category_id")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Self::row_to_category).collect()
    }

    pub async fn get_category(&self, category_id: &str) -> Result<DbCategory, RoutineError> {
        let row = sqlx::query("SELECT category_id, name, remark FROM category WHERE category_id = ?")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RoutineError::not_found("category", category_id))?;
        Self::row_to_category(row)
    }

    pub async fn update_category(
        &self,
        category_id: &str,
        patch: &CategoryPatch,
    ) -> Result<DbCategory, RoutineError> {
        let mut category = self.get_category(category_id).await?;
        if let Some(name) = &patch.name {
            category.name = name.trim().to_string();
        }
        if let Some(remark) = &patch.remark {
            category.remark = Some(remark.clone());
        }
        sqlx::query("UPDATE category SET name = ?, remark = ? WHERE category_id = ?")
            .bind(&category.name)
            .bind(&category.remark)
            .bind(&category.category_id)
            .execute(&self.pool)
            .await?;
        info!(category_id = %category.category_id, "category updated");
        Ok(category)
    }

    /// Cascades to the category's items and ledger entries.
    pub async fn delete_category(&self, category_id: &str) -> Result<(), RoutineError> {
        let done = sqlx::query("DELETE FROM category WHERE category_id = ?")
            .bind(category_id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(RoutineError::not_found("category", category_id));
        }
        info!(category_id, "category deleted");
        Ok(())
    }

    pub async fn create_item(&self, new: &NewItem) -> Result<DbItem, RoutineError> {
        let item = DbItem {
            item_id: new.item_id.trim().to_string(),
            category_id: new.category_id.trim().to_string(),
            name: new.name.trim().to_string(),
            remark: new.remark.clone().unwrap_or_default(),
        };
        sqlx::query("INSERT INTO item (item_id, category_id, name, remark) VALUES (?, ?, ?, ?)")
            .bind(&item.item_id)
            .bind(&item.category_id)
            .bind(&item.name)
            .bind(&item.remark)
            .execute(&self.pool)
            .await?;
        info!(item_id = %item.item_id, category_id = %item.category_id, "item created");
        Ok(item)
    }

    pub async fn list_items(&self) -> Result<Vec<DbItem>, RoutineError> {
        let rows =
            sqlx::query("SELECT item_id, category_id, name, remark FROM item ORDER BY item_id")
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(Self::row_to_item).collect()
    }

    /// Items of one category; `NotFound` when the category itself is missing.
    pub async fn list_items_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<DbItem>, RoutineError> {
        self.get_category(category_id).await?;
        let rows = sqlx::query(
            "SELECT item_id, category_id, name, remark FROM item WHERE category_id = ? ORDER BY item_id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_item).collect()
    }

    pub async fn get_item(&self, item_id: &str) -> Result<DbItem, RoutineError> {
        self.find_item(item_id)
            .await?
            .ok_or_else(|| RoutineError::not_found("item", item_id))
    }

    pub async fn find_item(&self, item_id: &str) -> Result<Option<DbItem>, RoutineError> {
        sqlx::query("SELECT item_id, category_id, name, remark FROM item WHERE item_id = ?")
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?
            .map(Self::row_to_item)
            .transpose()
    }

    pub async fn update_item(&self, item_id: &str, patch: &ItemPatch) -> Result<DbItem, RoutineError> {
        let mut item = self.get_item(item_id).await?;
        if let Some(name) = &patch.name {
            item.name = name.trim().to_string();
        }
        if let Some(remark) = &patch.remark {
            item.remark = remark.clone();
        }
        sqlx::query("UPDATE item SET name = ?, remark = ? WHERE item_id = ?")
            .bind(&item.name)
            .bind(&item.remark)
            .bind(&item.item_id)
            .execute(&self.pool)
            .await?;
        info!(item_id = %item.item_id, "item updated");
        Ok(item)
    }

    /// Cascades to ledger entries referencing the item.
    pub async fn delete_item(&self, item_id: &str) -> Result<(), RoutineError> {
        let done = sqlx::query("DELETE FROM item WHERE item_id = ?")
            .bind(item_id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(RoutineError::not_found("item", item_id));
        }
        info!(item_id, "item deleted");
        Ok(())
    }

    fn row_to_category(row: SqliteRow) -> Result<DbCategory, RoutineError> {
        Ok(DbCategory {
            category_id: row.try_get("category_id")?,
            name: row.try_get("name")?,
            remark: row.try_get("remark")?,
        })
    }

    fn row_to_item(row: SqliteRow) -> Result<DbItem, RoutineError> {
        Ok(DbItem {
            item_id: row.try_get("item_id")?,
            category_id: row.try_get("category_id")?,
            name: row.try_get("name")?,
            remark: row.try_get("remark")?,
        })
    }
}
