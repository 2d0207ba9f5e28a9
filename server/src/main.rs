use std::sync::Arc;

use clap::Parser;

use gmail_demo::config::load_settings;
use gmail_demo::demos::DemoContext;
use gmail_demo::mailer::{Mailer, UnavailableMailer};
use gmail_demo::npm::NpmClient;

mod config;
mod controllers;
mod errors;
mod http;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = config::Args::parse();

    let settings = match load_settings(args.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("[Mailer Initialization] Initializing Gmail client...");

    let mailer: Arc<dyn Mailer> = match gmail_demo::initialize_client(&settings).await {
        Ok(client) => {
            log::info!("[Mailer Initialization] Gmail client ready");
            Arc::new(client)
        }
        Err(e) => {
            log::error!("[Mailer Initialization] {}", e);
            log::warn!("[Mailer Initialization] Email endpoints will fail until credentials are configured");
            Arc::new(UnavailableMailer::new(e.to_string()))
        }
    };

    let npm = match NpmClient::new() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to build npm client: {}", e);
            std::process::exit(1);
        }
    };

    let support_email = settings.sender_email().unwrap_or("support@example.com");

    let state = Arc::new(state::AppState {
        mailer,
        demos: DemoContext::new(&args.files_dir, settings.base_url(), support_email),
        npm,
        package_name: settings.package_name.clone(),
        status_delay: state::STATUS_DELAY,
    });

    let arg = config::HttpArg {
        port: args.port.unwrap_or_else(|| settings.port()),
        public_dir: args.public_dir,
        open_browser: !args.no_open,
        notify_lifecycle: args.notify_lifecycle,
    };

    if let Err(e) = http::run(arg, state).await {
        log::error!("Server failed: {}", e);
        std::process::exit(1);
    }
}
