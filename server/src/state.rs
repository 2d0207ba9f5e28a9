use std::sync::Arc;
use std::time::Duration;

use gmail_demo::demos::DemoContext;
use gmail_demo::mailer::Mailer;
use gmail_demo::npm::NpmClient;

/// Pause between the start and shutdown emails of /simulate-server-status
pub const STATUS_DELAY: Duration = Duration::from_millis(500);

/// Shared, read-only state handed to every route
pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
    pub demos: DemoContext,
    pub npm: NpmClient,
    pub package_name: String,
    pub status_delay: Duration,
}
