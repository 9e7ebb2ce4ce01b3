use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerSettings {
    /// Origin of the API server, e.g. `http://localhost:8000`
    pub url: String,
    #[serde(default)]
    pub flavor: Flavor,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            flavor: Flavor::default(),
            timeout_secs: None,
        }
    }
}

impl ServerSettings {
    /// Server origin joined with the flavor's base resource path.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), self.flavor.base_path())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Which revision of the customers API the server speaks.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    Current,
    Legacy,
}

impl Flavor {
    pub fn base_path(self) -> &'static str {
        match self {
            Flavor::Current => "/api/customers",
            Flavor::Legacy => "/customers",
        }
    }

    /// The legacy API has no password column.
    pub fn sends_password(self) -> bool {
        matches!(self, Flavor::Current)
    }
}
