use std::env;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub db_max_connections: u32,
    pub listen_addr: String,
    /// Prefix successful response bodies with the literal `200 OK` fragment
    /// older clients expect in front of the JSON payload.
    pub legacy_status_prefix: bool,
    /// Usernames ensured in the employee table at startup
    pub seed_employees: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            db_path: get_env("DB_PATH", "/data/tenders.db"),
            db_max_connections: get_env("DB_MAX_CONNECTIONS", "5")
                .parse()
                .unwrap_or(5),
            listen_addr: get_env("LISTEN_ADDR", "0.0.0.0:8080"),
            legacy_status_prefix: parse_bool(&get_env("LEGACY_STATUS_PREFIX", "true")),
            seed_employees: parse_list(&get_env("SEED_EMPLOYEES", "")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: ":memory:".to_string(),
            db_max_connections: 1,
            listen_addr: "127.0.0.1:8080".to_string(),
            legacy_status_prefix: true,
            seed_employees: Vec::new(),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
