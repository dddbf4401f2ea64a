use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Extension, MatchedPath, Query, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router, extract::Path};
use clap::Parser;
use tokio::sync::RwLock;

use nvi_console::console::PURGE_CONFIRM_TEXT;
use nvi_console::model::*;

#[path = "nvi_platform_mock/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "nvi_platform_mock/db.rs"]
mod db;
use self::db::*;
#[path = "nvi_platform_mock/handlers_businesses.rs"]
mod handlers_businesses;
use self::handlers_businesses::*;
#[path = "nvi_platform_mock/handlers_subscriptions.rs"]
mod handlers_subscriptions;
use self::handlers_subscriptions::*;
#[path = "nvi_platform_mock/handlers_queues.rs"]
mod handlers_queues;
use self::handlers_queues::*;
#[path = "nvi_platform_mock/handlers_tenant.rs"]
mod handlers_tenant;
use self::handlers_tenant::*;
#[path = "nvi_platform_mock/routes.rs"]
mod routes;
use self::routes::*;

#[derive(Clone, Debug)]
struct Subject {
    actor: String,
}

struct AppState {
    dev_token: String,
    dev_user: String,
    tenant_password: String,

    db: RwLock<Db>,

    // "METHOD /matched/path" -> hits, authenticated routes only.
    hits: RwLock<BTreeMap<String, u64>>,
}

#[derive(Parser)]
#[command(name = "nvi-platform-mock")]
#[command(about = "In-memory platform API for tests and demos", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8090")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Bearer token every /platform, /settings, /business and /units call must carry
    #[arg(long, default_value = "dev")]
    dev_token: String,

    /// Actor recorded in the audit trail
    #[arg(long, default_value = "ops@platform.dev")]
    dev_user: String,

    /// Number of seeded tenant businesses
    #[arg(long, default_value_t = 25)]
    seed_businesses: usize,

    /// Password the tenant-side business deletion expects
    #[arg(long, default_value = "dev-password")]
    tenant_password: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nvi_platform_mock=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let state = Arc::new(AppState {
        dev_token: args.dev_token,
        dev_user: args.dev_user,
        tenant_password: args.tenant_password,
        db: RwLock::new(Db::seeded(args.seed_businesses)),
        hits: RwLock::new(BTreeMap::new()),
    });

    let authed = authed_router(state.clone());

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/__debug/requests", get(debug_requests))
        .merge(authed)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("nvi-platform-mock listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized();
    };
    let Ok(value) = value.to_str() else {
        return unauthorized();
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized();
    };
    if token != state.dev_token {
        return unauthorized();
    }

    let mut req = req;
    req.extensions_mut().insert(Subject {
        actor: state.dev_user.clone(),
    });
    next.run(req).await
}

/// Counts every request that reached an authenticated route, rejected or not.
async fn count_hits(
    State(state): State<Arc<AppState>>,
    matched: Option<MatchedPath>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let path = matched
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let key = format!("{} {}", req.method(), path);
    tracing::debug!(route = %key, "request");
    *state.hits.write().await.entry(key).or_insert(0) += 1;
    next.run(req).await
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn debug_requests(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let hits = state.hits.read().await;
    let total: u64 = hits.values().sum();
    Json(serde_json::json!({"total": total, "routes": &*hits}))
}
