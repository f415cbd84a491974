use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite};

use crate::models::*;

fn map_tender_row(row: &SqliteRow) -> Tender {
    Tender {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        status: row.get("status"),
        creator_username: row.get("creator_username"),
        version: row.get("version"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const SELECT_TENDER: &str = r#"
    SELECT t.id, t.name, t.description, t.status, e.username AS creator_username,
           t.version, t.created_at, t.updated_at
    FROM tenders t
    LEFT JOIN employee e ON e.id = t.creator_id
"#;

pub struct TenderRepo;

impl TenderRepo {
    /// All tenders in storage order
    pub async fn list(pool: &Pool<Sqlite>) -> Result<Vec<Tender>> {
        let rows = sqlx::query(SELECT_TENDER).fetch_all(pool).await?;
        Ok(rows.iter().map(map_tender_row).collect())
    }

    pub async fn get(pool: &Pool<Sqlite>, id: &str) -> Result<Option<Tender>> {
        let row = sqlx::query(&format!("{} WHERE t.id = ?", SELECT_TENDER))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.as_ref().map(map_tender_row))
    }

    pub async fn exists(pool: &Pool<Sqlite>, id: &str) -> Result<bool> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tenders WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count.0 > 0)
    }

    pub async fn create(
        pool: &Pool<Sqlite>,
        req: &CreateTenderRequest,
        creator_id: Option<&str>,
    ) -> Result<Tender> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO tenders (id, name, description, status, creator_id, version, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 1, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.status)
        .bind(creator_id)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        Self::get(pool, &id)
            .await?
            .context("Tender not found after creation")
    }

    /// Overwrite name, description and status and bump the version.
    /// Returns `None` when the id matched no row.
    pub async fn edit(pool: &Pool<Sqlite>, id: &str, req: &EditTenderRequest) -> Result<Option<Tender>> {
        let row = sqlx::query(
            r#"
            UPDATE tenders
            SET name = ?, description = ?, status = ?, version = version + 1, updated_at = ?
            WHERE id = ?
            RETURNING id, name, description, status,
                      (SELECT e.username FROM employee e WHERE e.id = tenders.creator_id) AS creator_username,
                      version, created_at, updated_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.as_ref().map(map_tender_row))
    }

    pub async fn set_status(pool: &Pool<Sqlite>, id: &str, status: &str) -> Result<()> {
        let result = sqlx::query("UPDATE tenders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(super::NotFoundError::new("Tender", id).into());
        }
        Ok(())
    }
}
