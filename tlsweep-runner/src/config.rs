//! Runner configuration
//!
//! Defines all configurable parameters for a run: API credentials, database
//! location, polling behaviour and the hosts to scan.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tlsweep_client::DEFAULT_API_URL;

/// Hosts scanned when `SCAN_HOSTS` is not set, in order
pub const DEFAULT_HOSTS: &[&str] = &[
    "google.com",
    "bing.com",
    "yahoo.com",
    "cricbuzz.com",
    "youtube.com",
];

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432";
pub const DEFAULT_DATABASE_NAME: &str = "ssllabs_etl";
pub const DEFAULT_COLLECTION_NAME: &str = "ssllabs_raw";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Postgres truncates identifiers beyond this length
const MAX_COLLECTION_NAME_LEN: usize = 63;

/// Runner configuration
///
/// Built once at start-up and handed to the client, repositories and
/// services. Nothing reads the environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    /// Email registered with the analyze API, sent as a header
    pub email: String,

    /// Analyze endpoint URL
    pub api_url: String,

    /// Postgres connection URL (without the database name)
    pub database_url: String,

    /// Database holding the report collection
    pub database_name: String,

    /// Table the reports are written to
    pub collection_name: String,

    /// Delay between poll requests
    pub poll_interval: Duration,

    /// Upper bound on poll requests per host; `None` polls until a terminal status
    pub max_poll_attempts: Option<u32>,

    /// Hosts to scan, in order
    pub hosts: Vec<String>,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(email: String) -> Self {
        Self {
            email,
            api_url: DEFAULT_API_URL.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_attempts: None,
            hosts: DEFAULT_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - SSL_LABS_EMAIL (required)
    /// - SSL_LABS_API_URL (optional, default: API v4 analyze endpoint)
    /// - DATABASE_URL (optional, default: postgres://localhost:5432)
    /// - DB_NAME (optional, default: ssllabs_etl)
    /// - COLLECTION_NAME (optional, default: ssllabs_raw)
    /// - POLL_INTERVAL (optional, seconds, default: 30)
    /// - MAX_POLL_ATTEMPTS (optional, default: unbounded)
    /// - SCAN_HOSTS (optional, comma separated, default: built-in list)
    ///
    /// `MONGO_URI` is rejected unless `DATABASE_URL` is also set.
    pub fn from_env() -> anyhow::Result<Self> {
        check_legacy_database_vars(
            std::env::var("MONGO_URI").ok().as_deref(),
            std::env::var("DATABASE_URL").ok().as_deref(),
        )?;

        let email = std::env::var("SSL_LABS_EMAIL")
            .map_err(|_| anyhow::anyhow!("SSL_LABS_EMAIL environment variable not set"))?;

        let mut config = Self::new(email);

        if let Ok(api_url) = std::env::var("SSL_LABS_API_URL") {
            config.api_url = api_url;
        }

        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            config.database_url = database_url;
        }

        if let Ok(database_name) = std::env::var("DB_NAME") {
            config.database_name = database_name;
        }

        if let Ok(collection_name) = std::env::var("COLLECTION_NAME") {
            config.collection_name = collection_name;
        }

        if let Ok(raw) = std::env::var("POLL_INTERVAL") {
            let secs = raw
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("POLL_INTERVAL must be a number of seconds"))?;
            config.poll_interval = Duration::from_secs(secs);
        }

        if let Ok(raw) = std::env::var("MAX_POLL_ATTEMPTS") {
            let attempts = raw
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("MAX_POLL_ATTEMPTS must be a positive integer"))?;
            config.max_poll_attempts = Some(attempts);
        }

        if let Ok(raw) = std::env::var("SCAN_HOSTS") {
            config.hosts = parse_hosts(&raw);
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.email.trim().is_empty() {
            anyhow::bail!("email cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            anyhow::bail!("database_url must start with postgres:// or postgresql://");
        }

        if self.database_name.is_empty() {
            anyhow::bail!("database_name cannot be empty");
        }

        if !is_valid_collection_name(&self.collection_name) {
            anyhow::bail!(
                "collection_name '{}' must be a plain identifier of at most {} characters",
                self.collection_name,
                MAX_COLLECTION_NAME_LEN
            );
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_poll_attempts == Some(0) {
            anyhow::bail!("max_poll_attempts must be greater than 0 when set");
        }

        if self.hosts.is_empty() {
            anyhow::bail!("host list cannot be empty");
        }

        Ok(())
    }
}

/// Loads variables from a `.env` file into the process environment
///
/// Reads `path` when given, otherwise searches the current directory and its
/// parents. Variables already set in the environment are not overridden.
/// Returns the file that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenvy::from_path(path).ok().map(|_| path.to_path_buf()),
        None => dotenvy::dotenv().ok(),
    }
}

/// Deployments configured for a document database would otherwise be
/// silently pointed at the default Postgres URL
fn check_legacy_database_vars(
    mongo_uri: Option<&str>,
    database_url: Option<&str>,
) -> anyhow::Result<()> {
    if mongo_uri.is_some() && database_url.is_none() {
        anyhow::bail!("MONGO_URI is no longer read; set DATABASE_URL to a postgres:// URL instead");
    }

    Ok(())
}

/// Splits a comma separated host list, dropping blanks
fn parse_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}

/// The collection name is interpolated into SQL, so only `[A-Za-z_][A-Za-z0-9_]*` is allowed
pub fn is_valid_collection_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }

    name.len() <= MAX_COLLECTION_NAME_LEN && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new("ops@example.com".to_string())
    }

    #[test]
    fn test_default_config() {
        let config = config();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.database_url, "postgres://localhost:5432");
        assert_eq!(config.database_name, "ssllabs_etl");
        assert_eq!(config.collection_name, "ssllabs_raw");
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.max_poll_attempts, None);
        assert_eq!(
            config.hosts,
            vec!["google.com", "bing.com", "yahoo.com", "cricbuzz.com", "youtube.com"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Empty email should fail
        config.email = "  ".to_string();
        assert!(config.validate().is_err());
        config.email = "ops@example.com".to_string();

        // Invalid URLs should fail
        config.api_url = "api.ssllabs.com".to_string();
        assert!(config.validate().is_err());
        config.api_url = DEFAULT_API_URL.to_string();

        config.database_url = "mongodb://localhost:27017".to_string();
        assert!(config.validate().is_err());
        config.database_url = "postgresql://localhost/".to_string();
        assert!(config.validate().is_ok());

        // Zero interval and zero attempts should fail
        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
        config.poll_interval = Duration::from_secs(1);

        config.max_poll_attempts = Some(0);
        assert!(config.validate().is_err());
        config.max_poll_attempts = Some(3);
        assert!(config.validate().is_ok());

        config.hosts.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_collection_name_validation() {
        assert!(is_valid_collection_name("ssllabs_raw"));
        assert!(is_valid_collection_name("_reports2"));
        assert!(!is_valid_collection_name(""));
        assert!(!is_valid_collection_name("2reports"));
        assert!(!is_valid_collection_name("reports; DROP TABLE x"));
        assert!(!is_valid_collection_name("ssl-labs"));
        assert!(!is_valid_collection_name(&"r".repeat(64)));
    }

    #[test]
    fn test_legacy_mongo_uri_requires_database_url() {
        let err = check_legacy_database_vars(Some("mongodb://localhost:27017"), None).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        assert!(
            check_legacy_database_vars(
                Some("mongodb://localhost:27017"),
                Some("postgres://localhost:5432")
            )
            .is_ok()
        );
        assert!(check_legacy_database_vars(None, None).is_ok());
    }

    #[test]
    fn test_env_file_supplies_email() {
        let path = std::env::temp_dir().join(format!("tlsweep-{}.env", std::process::id()));
        std::fs::write(&path, "SSL_LABS_EMAIL=dotenv@example.com\n").unwrap();

        // Variables already present in the environment win over the file
        let expected = std::env::var("SSL_LABS_EMAIL")
            .unwrap_or_else(|_| "dotenv@example.com".to_string());

        assert_eq!(load_env_file(Some(path.as_path())), Some(path.clone()));
        assert_eq!(std::env::var("SSL_LABS_EMAIL").unwrap(), expected);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_env_file() {
        let path = std::env::temp_dir().join("tlsweep-does-not-exist.env");
        assert_eq!(load_env_file(Some(path.as_path())), None);
    }

    #[test]
    fn test_parse_hosts() {
        assert_eq!(
            parse_hosts(" example.com, ,slow.com,bad.com "),
            vec!["example.com", "slow.com", "bad.com"]
        );
        assert!(parse_hosts(" , ").is_empty());
    }
}
