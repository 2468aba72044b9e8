use std::path::PathBuf;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_SESSION_PATH: &str = ".scanportal/session.json";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PortalConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub navigation: NavigationConfig,
    pub progress: ProgressConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: format!("scanportal/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub path: PathBuf,
    pub ttl_days: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SESSION_PATH),
            ttl_days: 1,
        }
    }
}

/// Named views the flows navigate between.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub login: String,
    pub landing: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            landing: "/userhome".to_string(),
        }
    }
}

/// Cadence of the cosmetic scan-submission progress bar.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProgressConfig {
    pub tick_ms: u64,
    pub step: u8,
    pub ceiling: u8,
    pub completion_hold_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_ms: 500,
            step: 10,
            ceiling: 90,
            completion_hold_ms: 1000,
        }
    }
}
