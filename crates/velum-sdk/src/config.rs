//! rollup client configuration

use serde::{Deserialize, Serialize};

/// options handed to the rollup client at startup
///
/// mirrors what the hosted client accepts; the devnet double only reads
/// what it needs and ignores the rest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RollupConfig {
    /// rollup provider endpoint
    pub server_url: String,
    /// chain poll interval in milliseconds
    pub poll_interval_ms: u64,
    /// keep client state in memory instead of persistent storage
    pub memory_db: bool,
    /// L1 block confirmations before a deposit counts
    pub min_confirmations: u32,
    /// debug namespace filter forwarded to the client, if any
    pub debug: Option<String>,
}

impl RollupConfig {
    /// local devnet
    pub fn devnet() -> Self {
        Self {
            server_url: "http://localhost:8081".into(),
            poll_interval_ms: 2000,
            memory_db: true,
            min_confirmations: 1,
            debug: None,
        }
    }

    /// hosted testnet
    pub fn testnet() -> Self {
        Self {
            server_url: "https://sdk.velum.network".into(),
            poll_interval_ms: 2000,
            memory_db: true,
            min_confirmations: 1,
            debug: None,
        }
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }
}

impl Default for RollupConfig {
    fn default() -> Self {
        Self::devnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_devnet_defaults() {
        let config = RollupConfig::devnet();
        assert!(config.memory_db);
        assert_eq!(config.poll_interval_ms, 2000);
        assert_eq!(config.min_confirmations, 1);
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = RollupConfig::testnet().with_server_url("https://example.net");
        let json = serde_json::to_string(&config).unwrap();
        let back: RollupConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.server_url, "https://example.net");
    }
}
