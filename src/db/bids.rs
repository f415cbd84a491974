use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite};

use crate::models::*;

fn map_bid_row(row: &SqliteRow) -> Bid {
    Bid {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        status: row.get("status"),
        tender_id: row.get("tender_id"),
        creator_username: row.get("creator_username"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const SELECT_BID: &str = r#"
    SELECT b.id, b.name, b.description, b.status, b.tender_id,
           COALESCE(e.username, '') AS creator_username,
           b.created_at, b.updated_at
    FROM bids b
    LEFT JOIN employee e ON e.id = b.creator_id
"#;

pub struct BidRepo;

impl BidRepo {
    pub async fn get(pool: &Pool<Sqlite>, id: &str) -> Result<Option<Bid>> {
        let row = sqlx::query(&format!("{} WHERE b.id = ?", SELECT_BID))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.as_ref().map(map_bid_row))
    }

    pub async fn create(pool: &Pool<Sqlite>, req: &CreateBidRequest, creator_id: &str) -> Result<Bid> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO bids (id, name, description, status, tender_id, creator_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.status)
        .bind(&req.tender_id)
        .bind(creator_id)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        Self::get(pool, &id)
            .await?
            .context("Bid not found after creation")
    }

    pub async fn set_status(pool: &Pool<Sqlite>, id: &str, status: &str) -> Result<()> {
        let result = sqlx::query("UPDATE bids SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(super::NotFoundError::new("Bid", id).into());
        }
        Ok(())
    }

    /// Name and description only; status and relations stay as they are
    pub async fn edit(pool: &Pool<Sqlite>, id: &str, req: &EditBidRequest) -> Result<()> {
        let result = sqlx::query("UPDATE bids SET name = ?, description = ?, updated_at = ? WHERE id = ?")
            .bind(&req.name)
            .bind(&req.description)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(super::NotFoundError::new("Bid", id).into());
        }
        Ok(())
    }
}
