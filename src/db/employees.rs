use anyhow::{Context, Result};
use sqlx::{Pool, Sqlite};

/// Employee lookups. The employee directory itself is managed elsewhere;
/// this service only resolves usernames to ids.
pub struct EmployeeRepo;

impl EmployeeRepo {
    pub async fn find_id_by_username(pool: &Pool<Sqlite>, username: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT id FROM employee WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(id,)| id))
    }

    pub async fn ensure(pool: &Pool<Sqlite>, username: &str) -> Result<String> {
        sqlx::query("INSERT OR IGNORE INTO employee (id, username) VALUES (?, ?)")
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(username)
            .execute(pool)
            .await?;

        Self::find_id_by_username(pool, username)
            .await?
            .context("Employee not found after insert")
    }
}
