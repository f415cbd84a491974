mod bid;
mod tender;

pub use bid::*;
pub use tender::*;

/// Canonical lifecycle status values shared by tenders and bids
pub mod entity_status {
    pub const CREATED: &str = "CREATED";
    pub const PUBLISHED: &str = "PUBLISHED";
    pub const CANCELED: &str = "CANCELED";

    pub const ALL: &[&str] = &[CREATED, PUBLISHED, CANCELED];

    pub fn is_valid(status: &str) -> bool {
        ALL.contains(&status)
    }
}

fn default_status() -> String {
    entity_status::CREATED.to_string()
}
