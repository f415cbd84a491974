mod bids;
mod employees;
mod tenders;

use anyhow::{Context, Result};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

use crate::models::*;

/// Typed error for "resource not found" — enables reliable downcast
/// in the API error handler instead of fragile string matching.
#[derive(Debug)]
pub struct NotFoundError {
    pub resource: String,
    pub id: String,
}

impl NotFoundError {
    pub fn new(resource: &str, id: &str) -> Self {
        Self {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found: {}", self.resource, self.id)
    }
}

impl std::error::Error for NotFoundError {}

/// Store handles all database operations, delegating to per-entity repo modules.
#[derive(Clone)]
pub struct Store {
    pool: Pool<Sqlite>,
}

impl Store {
    /// Create a new database store with a specific pool size
    pub async fn with_pool_size(db_path: &str, max_connections: u32) -> Result<Self> {
        let db_url = format!("sqlite:{}?mode=rwc", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&db_url)
            .await
            .context("Failed to connect to database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Run database migrations
    async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Make sure every listed username exists in the employee table
    pub async fn seed_employees(&self, usernames: &[String]) -> Result<()> {
        for username in usernames {
            self.ensure_employee(username).await?;
        }
        if !usernames.is_empty() {
            tracing::info!("Seeded {} employee(s)", usernames.len());
        }
        Ok(())
    }

    // ========== Employee Operations ==========

    /// Resolve a username to the internal employee id, `None` if unknown
    pub async fn find_employee_id(&self, username: &str) -> Result<Option<String>> {
        employees::EmployeeRepo::find_id_by_username(&self.pool, username).await
    }

    pub async fn ensure_employee(&self, username: &str) -> Result<String> {
        employees::EmployeeRepo::ensure(&self.pool, username).await
    }

    // ========== Tender Operations ==========

    pub async fn list_tenders(&self) -> Result<Vec<Tender>> {
        tenders::TenderRepo::list(&self.pool).await
    }

    pub async fn get_tender(&self, id: &str) -> Result<Option<Tender>> {
        tenders::TenderRepo::get(&self.pool, id).await
    }

    pub async fn tender_exists(&self, id: &str) -> Result<bool> {
        tenders::TenderRepo::exists(&self.pool, id).await
    }

    pub async fn create_tender(
        &self,
        req: &CreateTenderRequest,
        creator_id: Option<&str>,
    ) -> Result<Tender> {
        tenders::TenderRepo::create(&self.pool, req, creator_id).await
    }

    /// Returns `None` when no tender matched the id
    pub async fn edit_tender(&self, id: &str, req: &EditTenderRequest) -> Result<Option<Tender>> {
        tenders::TenderRepo::edit(&self.pool, id, req).await
    }

    pub async fn publish_tender(&self, id: &str) -> Result<()> {
        tenders::TenderRepo::set_status(&self.pool, id, entity_status::PUBLISHED).await
    }

    pub async fn cancel_tender(&self, id: &str) -> Result<()> {
        tenders::TenderRepo::set_status(&self.pool, id, entity_status::CANCELED).await
    }

    // ========== Bid Operations ==========

    #[cfg(test)]
    pub async fn get_bid(&self, id: &str) -> Result<Option<Bid>> {
        bids::BidRepo::get(&self.pool, id).await
    }

    pub async fn create_bid(&self, req: &CreateBidRequest, creator_id: &str) -> Result<Bid> {
        bids::BidRepo::create(&self.pool, req, creator_id).await
    }

    pub async fn update_bid_status(&self, id: &str, status: &str) -> Result<()> {
        bids::BidRepo::set_status(&self.pool, id, status).await
    }

    pub async fn publish_bid(&self, id: &str) -> Result<()> {
        bids::BidRepo::set_status(&self.pool, id, entity_status::PUBLISHED).await
    }

    pub async fn cancel_bid(&self, id: &str) -> Result<()> {
        bids::BidRepo::set_status(&self.pool, id, entity_status::CANCELED).await
    }

    pub async fn edit_bid(&self, id: &str, req: &EditBidRequest) -> Result<()> {
        bids::BidRepo::edit(&self.pool, id, req).await
    }

    // ========== Diagnostics ==========

    #[cfg(test)]
    pub async fn count_rows(&self, table: &str) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}

/// In-memory store with a single connection so every query sees the same database
#[cfg(test)]
pub(crate) async fn memory_store() -> Store {
    Store::with_pool_size(":memory:", 1)
        .await
        .expect("in-memory store")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tender_req(name: &str, creator: Option<&str>) -> CreateTenderRequest {
        CreateTenderRequest {
            name: name.to_string(),
            description: "d".to_string(),
            status: entity_status::CREATED.to_string(),
            creator_username: creator.map(str::to_string),
        }
    }

    fn bid_req(tender_id: &str, creator: &str) -> CreateBidRequest {
        CreateBidRequest {
            name: "B1".to_string(),
            description: "bid".to_string(),
            status: entity_status::CREATED.to_string(),
            tender_id: tender_id.to_string(),
            creator_username: creator.to_string(),
        }
    }

    #[tokio::test]
    async fn test_employee_lookup() {
        let store = memory_store().await;
        assert!(store.find_employee_id("alice").await.unwrap().is_none());

        let id = store.ensure_employee("alice").await.unwrap();
        assert_eq!(store.find_employee_id("alice").await.unwrap(), Some(id.clone()));

        // ensuring twice keeps the original id
        assert_eq!(store.ensure_employee("alice").await.unwrap(), id);
        assert_eq!(store.count_rows("employee").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_and_get_tender() {
        let store = memory_store().await;
        let alice = store.ensure_employee("alice").await.unwrap();

        let created = store
            .create_tender(&tender_req("T1", Some("alice")), Some(&alice))
            .await
            .unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.version, 1);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get_tender(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "T1");
        assert_eq!(fetched.description, "d");
        assert_eq!(fetched.status, "CREATED");
        assert_eq!(fetched.creator_username.as_deref(), Some("alice"));
        assert!(store.tender_exists(&created.id).await.unwrap());
        assert!(!store.tender_exists("zzz").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_tenders_includes_tenders_without_creator() {
        let store = memory_store().await;
        assert!(store.list_tenders().await.unwrap().is_empty());

        let alice = store.ensure_employee("alice").await.unwrap();
        store.create_tender(&tender_req("T1", Some("alice")), Some(&alice)).await.unwrap();
        store.create_tender(&tender_req("T2", None), None).await.unwrap();

        let tenders = store.list_tenders().await.unwrap();
        assert_eq!(tenders.len(), 2);
        let orphan = tenders.iter().find(|t| t.name == "T2").unwrap();
        assert!(orphan.creator_username.is_none());
    }

    #[tokio::test]
    async fn test_edit_tender_bumps_version() {
        let store = memory_store().await;
        let alice = store.ensure_employee("alice").await.unwrap();
        let created = store
            .create_tender(&tender_req("T1", Some("alice")), Some(&alice))
            .await
            .unwrap();

        let edit = EditTenderRequest {
            name: "T1 v2".to_string(),
            description: "new".to_string(),
            status: "ANYTHING".to_string(),
        };
        let edited = store.edit_tender(&created.id, &edit).await.unwrap().unwrap();
        assert_eq!(edited.version, created.version + 1);
        assert_eq!(edited.status, "ANYTHING");
        assert_eq!(edited.creator_username.as_deref(), Some("alice"));
        assert!(edited.updated_at >= created.updated_at);

        let fetched = store.get_tender(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.version, edited.version);
        assert_eq!(fetched.updated_at, edited.updated_at);
        assert_eq!(fetched.name, edited.name);

        let again = store.edit_tender(&created.id, &edit).await.unwrap().unwrap();
        assert_eq!(again.version, 3);

        assert!(store.edit_tender("missing", &edit).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tender_status_transitions() {
        let store = memory_store().await;
        let created = store.create_tender(&tender_req("T1", None), None).await.unwrap();

        store.cancel_tender(&created.id).await.unwrap();
        assert_eq!(store.get_tender(&created.id).await.unwrap().unwrap().status, "CANCELED");

        // No state machine: a canceled tender can be published again
        store.publish_tender(&created.id).await.unwrap();
        let tender = store.get_tender(&created.id).await.unwrap().unwrap();
        assert_eq!(tender.status, "PUBLISHED");
        assert_eq!(tender.version, 1);

        let err = store.publish_tender("missing").await.unwrap_err();
        assert!(err.downcast_ref::<NotFoundError>().is_some());
        let err = store.cancel_tender("missing").await.unwrap_err();
        assert!(err.downcast_ref::<NotFoundError>().is_some());
    }

    #[tokio::test]
    async fn test_bid_lifecycle() {
        let store = memory_store().await;
        let bob = store.ensure_employee("bob").await.unwrap();
        let tender = store.create_tender(&tender_req("T1", None), None).await.unwrap();

        let bid = store.create_bid(&bid_req(&tender.id, "bob"), &bob).await.unwrap();
        assert_eq!(bid.tender_id, tender.id);
        assert_eq!(bid.creator_username, "bob");
        assert_eq!(bid.status, "CREATED");

        store.publish_bid(&bid.id).await.unwrap();
        assert_eq!(store.get_bid(&bid.id).await.unwrap().unwrap().status, "PUBLISHED");

        store.update_bid_status(&bid.id, "CREATED").await.unwrap();
        store.cancel_bid(&bid.id).await.unwrap();

        let edit = EditBidRequest {
            name: "B1 v2".to_string(),
            description: "changed".to_string(),
        };
        store.edit_bid(&bid.id, &edit).await.unwrap();

        let stored = store.get_bid(&bid.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "B1 v2");
        assert_eq!(stored.description, "changed");
        assert_eq!(stored.status, "CANCELED");
        assert_eq!(stored.tender_id, tender.id);
        assert_eq!(stored.creator_username, "bob");
    }

    #[tokio::test]
    async fn test_bid_mutations_on_missing_row() {
        let store = memory_store().await;
        let edit = EditBidRequest {
            name: "x".to_string(),
            description: "y".to_string(),
        };

        for err in [
            store.publish_bid("missing").await.unwrap_err(),
            store.cancel_bid("missing").await.unwrap_err(),
            store.update_bid_status("missing", "CREATED").await.unwrap_err(),
            store.edit_bid("missing", &edit).await.unwrap_err(),
        ] {
            let nf = err.downcast_ref::<NotFoundError>().unwrap();
            assert_eq!(nf.resource, "Bid");
            assert_eq!(nf.id, "missing");
        }
    }

    #[tokio::test]
    async fn test_bid_requires_existing_tender() {
        let store = memory_store().await;
        let bob = store.ensure_employee("bob").await.unwrap();

        // foreign key on bids.tender_id rejects the insert
        assert!(store.create_bid(&bid_req("zzz", "bob"), &bob).await.is_err());
        assert_eq!(store.count_rows("bids").await.unwrap(), 0);
    }
}
