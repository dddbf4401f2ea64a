mod common;

use std::path::Path;
use std::process::{Command, Output};

use anyhow::{Context, Result};

fn console_cmd(data_dir: &Path, args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_nvi-console"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()
        .with_context(|| format!("run nvi-console {:?}", args))
}

fn console_ok(data_dir: &Path, args: &[&str]) -> Result<String> {
    let out = console_cmd(data_dir, args)?;
    if !out.status.success() {
        anyhow::bail!(
            "nvi-console {:?} failed\nstdout:\n{}\nstderr:\n{}",
            args,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

#[test]
fn commands_require_a_login() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let out = console_cmd(dir.path(), &["businesses", "list"])?;
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not logged in"));
    Ok(())
}

#[test]
fn login_then_list_and_pin() -> Result<()> {
    let server = common::spawn_server()?;
    let dir = tempfile::tempdir()?;

    let out = console_ok(
        dir.path(),
        &[
            "login",
            "--url",
            &server.base_url,
            "--token",
            &server.token,
            "--page-limit",
            "10",
        ],
    )?;
    assert!(out.contains("Logged in to"));

    let out = console_ok(dir.path(), &["businesses", "list", "--all", "--json"])?;
    let items: Vec<serde_json::Value> = serde_json::from_str(&out)?;
    assert_eq!(items.len(), 25);
    assert_eq!(server.route_hits("GET /platform/businesses")?, 3);

    let out = console_ok(
        dir.path(),
        &["businesses", "list", "--status", "suspended", "--json"],
    )?;
    let items: Vec<serde_json::Value> = serde_json::from_str(&out)?;
    assert!(items.iter().all(|b| b["status"] == "SUSPENDED"));

    console_ok(dir.path(), &["pin", "biz-004"])?;
    let out = console_ok(dir.path(), &["pins", "--json"])?;
    let pins: Vec<String> = serde_json::from_str(&out)?;
    assert_eq!(pins, vec!["biz-004".to_string()]);

    Ok(())
}

#[test]
fn cli_purge_without_confirmation_sends_nothing() -> Result<()> {
    let server = common::spawn_server()?;
    let dir = tempfile::tempdir()?;
    console_ok(
        dir.path(),
        &["login", "--url", &server.base_url, "--token", &server.token],
    )?;

    let before = server.hits()?;
    let out = console_cmd(
        dir.path(),
        &[
            "business",
            "purge",
            "biz-003",
            "--reason",
            "closed",
            "--confirm-id",
            "biz-003",
            "--confirm-text",
            "yes",
        ],
    )?;
    assert!(!out.status.success());
    assert_eq!(
        server.route_hits("POST /platform/businesses/:id/purge")?,
        0
    );
    assert_eq!(server.hits()?, before);

    Ok(())
}
