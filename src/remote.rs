use anyhow::{Context, Result};

use crate::model::*;
use crate::page::{Page, PageQuery};

mod http_client;

mod types;
pub use self::types::*;
mod audit;
mod businesses;
mod queues;
mod subscriptions;
mod tenant;

/// Blocking HTTP client for the platform REST API.
pub struct RemoteClient {
    base_url: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(base_url: &str, token: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("nvi-console")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}
