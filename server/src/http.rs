use std::sync::Arc;

use warp::{self, Filter};

use gmail_demo::demos::{self, Demo};
use gmail_demo::history::ServerEvent;

use super::config;
use super::errors;
use super::routes;
use super::state::AppState;

async fn notify(event: ServerEvent, state: &AppState) {
    match demos::run(Demo::ServerStatus(event), &state.demos, state.mailer.as_ref()).await {
        Ok(resp) => log::info!("{} Email Send Result: {}", event.label(), resp.sent),
        Err(e) => log::error!("{} Email failed: {}", event.label(), e),
    }
}

pub async fn run(arg: config::HttpArg, state: Arc<AppState>) -> Result<(), warp::Error> {
    log::info!("Starting HTTP server at 0.0.0.0:{}...", arg.port);

    let router = routes::api(state.clone(), arg.public_dir).recover(errors::handle_rejection);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for shutdown signal: {}", e);
        }
        log::info!("Shutting down...");
    };

    let (addr, server) = warp::serve(router)
        .try_bind_with_graceful_shutdown(([0, 0, 0, 0], arg.port), shutdown)?;

    let url = format!("http://localhost:{}", addr.port());
    log::info!("Server running on {}", url);

    if arg.notify_lifecycle {
        notify(ServerEvent::Start, &state).await;
    }

    if arg.open_browser {
        if let Err(e) = open::that(&url) {
            log::warn!("Could not open browser at {}: {}", url, e);
        }
    }

    server.await;

    if arg.notify_lifecycle {
        notify(ServerEvent::Shutdown, &state).await;
    }

    log::info!("Server stopped");

    Ok(())
}
