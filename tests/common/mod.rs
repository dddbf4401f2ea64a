use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use nvi_console::console::Console;
use nvi_console::remote::RemoteClient;
use nvi_console::store::MemoryKv;

pub struct ServerGuard {
    pub base_url: String,
    pub token: String,
    _data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl ServerGuard {
    #[allow(dead_code)]
    pub fn client(&self) -> RemoteClient {
        RemoteClient::new(&self.base_url, self.token.clone()).unwrap()
    }

    #[allow(dead_code)]
    pub fn console(&self, page_limit: u32) -> Console {
        Console::new(self.client(), Box::new(MemoryKv::default()), page_limit)
    }

    /// Total requests the server has seen on authenticated routes.
    #[allow(dead_code)]
    pub fn hits(&self) -> Result<u64> {
        let v: serde_json::Value = reqwest::blocking::get(format!("{}/__debug/requests", self.base_url))
            .context("debug requests")?
            .json()
            .context("parse debug requests")?;
        v["total"].as_u64().context("total missing")
    }

    /// Hits on one route, keyed as `METHOD /matched/path`.
    #[allow(dead_code)]
    pub fn route_hits(&self, route: &str) -> Result<u64> {
        let v: serde_json::Value = reqwest::blocking::get(format!("{}/__debug/requests", self.base_url))
            .context("debug requests")?
            .json()
            .context("parse debug requests")?;
        Ok(v["routes"][route].as_u64().unwrap_or(0))
    }
}

pub fn spawn_server() -> Result<ServerGuard> {
    spawn_server_with(&[])
}

pub fn spawn_server_with(extra: &[&str]) -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;

    let token = "dev".to_string();

    let addr_file = data_dir.path().join("addr.txt");

    let child = Command::new(env!("CARGO_BIN_EXE_nvi-platform-mock"))
        .args([
            "--addr",
            "127.0.0.1:0",
            "--addr-file",
            addr_file.to_str().unwrap(),
            "--dev-token",
            &token,
        ])
        .args(extra)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn nvi-platform-mock")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        token,
        _data_dir: data_dir,
        child,
    })
}

fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

#[allow(dead_code)]
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
