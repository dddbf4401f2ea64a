use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u32 = 25;

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    pub version: u32,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            version: 1,
            base_url: None,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleState {
    pub version: u32,

    /// Bearer tokens keyed by backend base url.
    #[serde(default)]
    pub tokens: std::collections::HashMap<String, String>,
}
