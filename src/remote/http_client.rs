use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

use super::*;

/// Retries transport failures of idempotent reads. HTTP error statuses,
/// undecodable bodies and local errors are final and returned as-is.
pub(super) fn with_retries<T>(label: &str, mut f: impl FnMut() -> Result<T>) -> Result<T> {
    const ATTEMPTS: usize = 3;
    let mut last: Option<anyhow::Error> = None;
    for i in 0..ATTEMPTS {
        match f() {
            Ok(v) => return Ok(v),
            Err(err) if !is_transient(&err) => return Err(err),
            Err(err) => {
                tracing::warn!(request = label, attempt = i + 1, error = %format!("{:#}", err), "request failed");
                last = Some(err);
                if i + 1 < ATTEMPTS {
                    std::thread::sleep(std::time::Duration::from_millis(200 * (1 << i)));
                }
            }
        }
    }
    Err(last
        .unwrap_or_else(|| anyhow::anyhow!("unknown error"))
        .context(label.to_string()))
}

/// A connect, timeout or body-read failure somewhere in the chain.
fn is_transient(err: &anyhow::Error) -> bool {
    err.chain()
        .find_map(|c| c.downcast_ref::<reqwest::Error>())
        .is_some_and(|e| !e.is_decode() && !e.is_status() && !e.is_builder())
}

/// Pulls `message` (or `error`) out of a JSON error body.
pub(super) fn extract_server_message(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    let pick = |key: &str| {
        v.get(key).and_then(|m| match m {
            serde_json::Value::String(s) => Some(s.clone()),
            // Validation pipes sometimes answer with a list of messages.
            serde_json::Value::Array(items) => {
                let parts: Vec<&str> = items.iter().filter_map(|i| i.as_str()).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("; "))
                }
            }
            _ => None,
        })
    };
    pick("message").or_else(|| pick("error"))
}

impl RemoteClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = match status {
            reqwest::StatusCode::UNAUTHORIZED => {
                "unauthorized (token invalid/expired; run `nvi-console login --url ... --token ...`)"
                    .to_string()
            }
            reqwest::StatusCode::FORBIDDEN => {
                "forbidden (platform admin role required)".to_string()
            }
            _ => {
                let body = resp.text().unwrap_or_default();
                extract_server_message(&body).unwrap_or_default()
            }
        };
        tracing::debug!(request = label, status = status.as_u16(), %message, "request rejected");
        Err(ApiError {
            label: label.to_string(),
            status: status.as_u16(),
            message,
        }
        .into())
    }

    pub(super) fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        label: &str,
    ) -> Result<T> {
        with_retries(label, || {
            tracing::debug!(request = label, path, "GET");
            let resp = self
                .client
                .get(self.url(path))
                .header(reqwest::header::AUTHORIZATION, self.auth())
                .query(query)
                .send()
                .with_context(|| format!("{} request", label))?;
            self.ensure_ok(resp, label)?
                .json::<T>()
                .with_context(|| format!("parse {}", label))
        })
    }

    pub(super) fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &PageQuery,
        label: &str,
    ) -> Result<Page<T>> {
        let value: serde_json::Value = self.get_json(path, &query.to_pairs(), label)?;
        // Strict first so a malformed page surfaces as an error; the
        // lenient normalizer is for callers that prefer degrading.
        serde_json::from_value(value).with_context(|| format!("parse {}", label))
    }

    pub(super) fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
        label: &str,
    ) -> Result<T> {
        tracing::debug!(request = label, path, %method, "send");
        let mut req = self
            .client
            .request(method, self.url(path))
            .header(reqwest::header::AUTHORIZATION, self.auth());
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().with_context(|| format!("{} request", label))?;
        self.ensure_ok(resp, label)?
            .json::<T>()
            .with_context(|| format!("parse {}", label))
    }

    /// Like `send_json` but ignores the response body.
    pub(super) fn send_unit<B: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
        label: &str,
    ) -> Result<()> {
        tracing::debug!(request = label, path, %method, "send");
        let mut req = self
            .client
            .request(method, self.url(path))
            .header(reqwest::header::AUTHORIZATION, self.auth());
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().with_context(|| format!("{} request", label))?;
        let _ = self.ensure_ok(resp, label)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;
