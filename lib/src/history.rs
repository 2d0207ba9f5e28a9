use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::Error;

pub const HISTORY_FILE: &str = "ServerHistory.csv";
const HISTORY_HEADER: &str = "Date,Event,Status\n";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ServerEvent {
    Start,
    Shutdown,
}

impl ServerEvent {
    pub fn label(&self) -> &'static str {
        match *self {
            Self::Start => "Server Start",
            Self::Shutdown => "Server Shutdown",
        }
    }
}

/// Append-only CSV log of server lifecycle events
pub struct History {
    path: PathBuf,
    lock: Mutex<()>,
}

impl History {
    pub fn new(files_dir: &Path) -> Self {
        Self {
            path: files_dir.join(HISTORY_FILE),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `event` at `time`. Failures are logged and swallowed.
    pub async fn record(&self, time: &str, event: ServerEvent) {
        if let Err(e) = self.append(time, event).await {
            log::error!("Failed to write to server history file: {}", e);
        }
    }

    async fn append(&self, time: &str, event: ServerEvent) -> Result<(), Error> {
        let _guard = self.lock.lock().await;

        let exists = tokio::fs::metadata(&self.path).await.is_ok();

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        if !exists {
            file.write_all(HISTORY_HEADER.as_bytes()).await?;
        }

        // Dates contain commas, so the first column is quoted
        let line = format!("\"{}\",{},Successful\n", time, event.label());
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    pub async fn read(&self) -> Result<Vec<u8>, Error> {
        let _guard = self.lock.lock().await;
        Ok(tokio::fs::read(&self.path).await?)
    }
}
