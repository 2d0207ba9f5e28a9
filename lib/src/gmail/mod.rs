pub mod api;
mod auth;
mod client;
mod errors;

pub use api::ServiceAccountKey;
pub use client::{default_sender_name, looks_like_html, GmailClient};
pub use errors::Error;
