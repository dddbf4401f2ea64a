use std::process::Command;

use anyhow::{Context, Result};

fn run_console(args: &[&str]) -> Result<String> {
    let out = Command::new(env!("CARGO_BIN_EXE_nvi-console"))
        .args(args)
        .output()
        .with_context(|| format!("run nvi-console {:?}", args))?;

    if !out.status.success() {
        anyhow::bail!(
            "nvi-console {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

#[test]
fn cli_help_surface_is_stable() -> Result<()> {
    let help = run_console(&["--help"])?;
    assert!(help.contains("Usage: nvi-console"));
    assert!(help.contains("[COMMAND]"));
    assert!(help.contains("--data-dir"));
    assert!(help.contains("login"));
    assert!(help.contains("businesses"));
    assert!(help.contains("requests"));
    assert!(help.contains("audit"));
    assert!(help.contains("settings"));

    let business_help = run_console(&["business", "--help"])?;
    assert!(business_help.contains("Usage: nvi-console business <COMMAND>"));
    assert!(business_help.contains("read-only"));
    assert!(business_help.contains("rate-limits"));
    assert!(business_help.contains("purge"));

    let purge_help = run_console(&["business", "purge", "--help"])?;
    assert!(purge_help.contains("--confirm-id"));
    assert!(purge_help.contains("--confirm-text"));

    Ok(())
}
