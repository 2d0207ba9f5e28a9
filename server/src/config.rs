use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "gmail-demo-server",
    version,
    about = "Demo server for sending email through the Gmail API."
)]
pub struct Args {
    /// TOML settings file, merged under the environment
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listen port; defaults to the port of DEFAULT_URL
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory of files attached to demo emails, served at /files
    #[arg(long, default_value = "dummy_files")]
    pub files_dir: PathBuf,

    /// Directory of the static front-end
    #[arg(long, default_value = "public")]
    pub public_dir: PathBuf,

    /// Do not open a browser window on startup
    #[arg(long)]
    pub no_open: bool,

    /// Send the server status email on startup and shutdown
    #[arg(long)]
    pub notify_lifecycle: bool,
}

#[derive(Debug)]
pub struct HttpArg {
    pub port: u16,
    pub public_dir: PathBuf,
    pub open_browser: bool,
    pub notify_lifecycle: bool,
}
