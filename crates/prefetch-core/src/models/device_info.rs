use serde::{Deserialize, Serialize};

/// Snapshot of the client device taken when a behavior profile is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    pub user_agent: String,
    pub language: String,
    pub platform: String,
    pub cookies_enabled: bool,
    pub online: bool,
    /// Effective connection type reported by the client ("4g", "3g", ...).
    pub connection: String,
    /// Heap in use at snapshot time, 0 when the client does not report it.
    pub memory_bytes: u64,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            language: String::new(),
            platform: String::new(),
            cookies_enabled: false,
            online: true,
            connection: "unknown".to_string(),
            memory_bytes: 0,
        }
    }
}
