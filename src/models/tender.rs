use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tender is a procurement request with a lifecycle status and optional creator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub creator_username: Option<String>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenderRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "super::default_status")]
    pub status: String,
    #[serde(default, alias = "creatorid")]
    pub creator_username: Option<String>,
}

/// EditTenderRequest overwrites name, description and status.
/// Status is stored as given.
#[derive(Debug, Clone, Deserialize)]
pub struct EditTenderRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "super::default_status")]
    pub status: String,
}

/// Body returned by an edit whose id matched no stored tender
#[derive(Debug, Clone, Serialize)]
pub struct EditedTender {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
}

impl EditedTender {
    pub fn from_request(id: &str, req: EditTenderRequest) -> Self {
        Self {
            id: id.to_string(),
            name: req.name,
            description: req.description,
            status: req.status,
        }
    }
}
