use crate::db::models::DbFitness;
use crate::db::sqlite::RoutineStorage;
use crate::error::RoutineError;
use crate::types::{Activity, ActivitySelection};
use chrono::{NaiveDate, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::info;
use uuid::Uuid;

const FITNESS_COLUMNS: &str =
    "fitness_id, activity_date, activities, status, user_id, created_at, updated_at";

impl RoutineStorage {
    pub async fn create_fitness(
        &self,
        activity_date: NaiveDate,
        selection: &ActivitySelection,
        user_id: Option<&str>,
    ) -> Result<DbFitness, RoutineError> {
        let now = Utc::now();
        let record = DbFitness {
            fitness_id: Uuid::new_v4().to_string(),
            activity_date,
            activities: selection.activities().to_vec(),
            trained: selection.trained(),
            user_id: user_id.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        let activities_json = serde_json::to_string(&record.activities)?;

        sqlx::query(
            r#"INSERT INTO fitness (
                fitness_id, activity_date, activities, status, user_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&record.fitness_id)
        .bind(record.activity_date)
        .bind(activities_json)
        .bind(record.trained)
        .bind(&record.user_id)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        info!(
            fitness_id = %record.fitness_id,
            date = %record.activity_date,
            trained = record.trained,
            "fitness record created"
        );
        Ok(record)
    }

    /// All records, or one user's, newest date first.
    pub async fn list_fitness(&self, user_id: Option<&str>) -> Result<Vec<DbFitness>, RoutineError> {
        let rows = match user_id {
            Some(uid) => {
                sqlx::query(&format!(
                    "SELECT {FITNESS_COLUMNS} FROM fitness WHERE user_id = ? ORDER BY activity_date DESC"
                ))
                .bind(uid)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {FITNESS_COLUMNS} FROM fitness ORDER BY activity_date DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.into_iter().map(Self::row_to_fitness).collect()
    }

    pub async fn get_fitness(&self, fitness_id: &str) -> Result<DbFitness, RoutineError> {
        let row = sqlx::query(&format!(
            "SELECT {FITNESS_COLUMNS} FROM fitness WHERE fitness_id = ?"
        ))
        .bind(fitness_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RoutineError::not_found("fitness record", fitness_id))?;
        Self::row_to_fitness(row)
    }

    /// Replace the activity selection and/or the owner of a record.
    pub async fn update_fitness(
        &self,
        fitness_id: &str,
        selection: Option<&ActivitySelection>,
        user_id: Option<&str>,
    ) -> Result<DbFitness, RoutineError> {
        let mut record = self.get_fitness(fitness_id).await?;
        if let Some(selection) = selection {
            record.activities = selection.activities().to_vec();
            record.trained = selection.trained();
        }
        if let Some(uid) = user_id {
            record.user_id = Some(uid.to_string());
        }
        record.updated_at = Utc::now();
        let activities_json = serde_json::to_string(&record.activities)?;

        sqlx::query(
            r#"UPDATE fitness SET
                activities = ?,
                status = ?,
                user_id = ?,
                updated_at = ?
              WHERE fitness_id = ?"#,
        )
        .bind(activities_json)
        .bind(record.trained)
        .bind(&record.user_id)
        .bind(record.updated_at)
        .bind(&record.fitness_id)
        .execute(&self.pool)
        .await?;

        info!(fitness_id = %record.fitness_id, "fitness record updated");
        Ok(record)
    }

    pub async fn delete_fitness(&self, fitness_id: &str) -> Result<(), RoutineError> {
        let done = sqlx::query("DELETE FROM fitness WHERE fitness_id = ?")
            .bind(fitness_id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(RoutineError::not_found("fitness record", fitness_id));
        }
        info!(fitness_id, "fitness record deleted");
        Ok(())
    }

    fn row_to_fitness(row: SqliteRow) -> Result<DbFitness, RoutineError> {
        let activities_json: String = row.try_get("activities")?;
        let activities: Vec<Activity> = serde_json::from_str(&activities_json)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let status: i64 = row.try_get("status")?;

        Ok(DbFitness {
            fitness_id: row.try_get("fitness_id")?,
            activity_date: row.try_get("activity_date")?,
            activities,
            trained: status != 0,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
