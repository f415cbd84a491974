use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bid is a response to a tender, placed by an employee
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub tender_id: String,
    pub creator_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "super::default_status")]
    pub status: String,
    #[serde(default)]
    pub tender_id: String,
    #[serde(default)]
    pub creator_username: String,
}

/// EditBidRequest only touches name and description
#[derive(Debug, Clone, Deserialize)]
pub struct EditBidRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}
