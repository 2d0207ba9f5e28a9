use std::sync::Arc;

use warp::{http::StatusCode, Rejection, Reply};

use gmail_demo::api::{FileEntry, OperationResult, VersionInfo};
use gmail_demo::demos::{self, Demo};
use gmail_demo::history::ServerEvent;

use super::errors;
use super::state::AppState;

pub async fn send_demo(demo: Demo, state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    let resp = demos::run(demo, &state.demos, state.mailer.as_ref())
        .await
        .map_err(errors::reject)?;

    Ok(warp::reply::json(&OperationResult::new(demo.operation(), resp)))
}

/// Sends the start email, waits, then sends the shutdown email.
/// Replies with both results in that order.
pub async fn simulate_server_status(state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    log::info!("[Demo] Simulating server start...");
    let start = Demo::ServerStatus(ServerEvent::Start);
    let start_resp = demos::run(start, &state.demos, state.mailer.as_ref())
        .await
        .map_err(errors::reject)?;
    log::info!("Server Start Email Send Result: {}", start_resp.sent);

    tokio::time::sleep(state.status_delay).await;

    log::info!("[Demo] Simulating server shutdown...");
    let shutdown = Demo::ServerStatus(ServerEvent::Shutdown);
    let shutdown_resp = demos::run(shutdown, &state.demos, state.mailer.as_ref())
        .await
        .map_err(errors::reject)?;
    log::info!("Server Shutdown Email Send Result: {}", shutdown_resp.sent);

    let results = vec![
        OperationResult::new(start.operation(), start_resp),
        OperationResult::new(shutdown.operation(), shutdown_resp),
    ];

    Ok(warp::reply::json(&results))
}

pub async fn package_version() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&VersionInfo {
        version: gmail_demo::VERSION.to_string(),
    }))
}

pub async fn demo_server_version() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

pub async fn npm_package_details(state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    match state.npm.package_details(&state.package_name).await {
        Ok(details) => Ok(warp::reply::with_status(warp::reply::json(&details), StatusCode::OK)),
        Err(e) => {
            log::error!("Failed to fetch package details: {}", e);
            let body = serde_json::json!({ "error": "Failed to fetch package details" });
            Ok(warp::reply::with_status(
                warp::reply::json(&body),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

/// JSON listing of the files directory
pub async fn list_files(state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    let mut dir = tokio::fs::read_dir(state.demos.files_dir())
        .await
        .map_err(|e| errors::reject(e.into()))?;

    let mut entries = Vec::new();

    while let Some(entry) = dir.next_entry().await.map_err(|e| errors::reject(e.into()))? {
        let meta = match entry.metadata().await {
            Ok(m) if m.is_file() => m,
            _ => continue,
        };

        entries.push(FileEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            size: meta.len(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(warp::reply::json(&entries))
}
