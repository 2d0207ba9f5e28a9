use chrono::{DateTime, Local};

use crate::email::{Attachment, SendEmailRequest};
use crate::history::{History, ServerEvent, HISTORY_FILE};
use crate::Error;

pub const RECIPIENT: &str = "customer@glitchgaming.us";
pub const SENDER_NAME: &str = "Somnus Labs Support";

pub fn subject(event: ServerEvent) -> String {
    match event {
        ServerEvent::Start => "🖥️ Somnus Labs - Server Start Status".to_string(),
        ServerEvent::Shutdown => "🖥️ Somnus Labs - Server Shutdown Status".to_string(),
    }
}

fn message(event: ServerEvent, time: &str) -> String {
    let (icon, headline, doing, change) = match event {
        ServerEvent::Start => ("🚀", "Starting", "currently starting up", "activation"),
        ServerEvent::Shutdown => ("🌙", "Shutting Down", "currently shutting down", "deactivation"),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body, html {{ margin: 0; padding: 0; font-family: 'Helvetica Neue', Arial, sans-serif; background-color: #f4f4f4; }}
        .container {{ background-color: #ffffff; padding: 20px; border-radius: 10px; box-shadow: 0 4px 12px rgba(0,0,0,0.15); }}
        .header {{ background-color: #E0EFFF; padding: 20px; border-radius: 8px 8px 0 0; text-align: center; }}
        h1 {{ color: #0A3E5D; font-size: 28px; margin: 0; }}
        .status-details {{ background-color: #F8F8F8; padding: 20px; border-radius: 5px; margin-top: 20px; color: #333; }}
        p {{ font-size: 16px; line-height: 1.5; margin: 10px 0; }}
        .status-update {{ font-weight: 600; }}
        footer {{ font-size: 16px; text-align: center; padding: 20px; border-top: 1px solid #ccc; margin-top: 20px; }}
        a, .support-link {{ color: #0A3E5D; text-decoration: none; font-weight: 600; }}
        .status-icon {{ font-size: 48px; vertical-align: middle; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1><span class="status-icon">{icon}</span> Server {headline}</h1>
        </div>
        <div class="status-details">
            <p>The server is {doing} as of {time}.</p>
            <p class="status-update">This email confirms the {change} of the server processes. For more details, please check the server dashboard or contact support if you notice any issues.</p>
        </div>
        <footer>
            <p>Need help? <a href="mailto:support@somnuslabs.com" class="support-link">Contact support</a> if you have any concerns or require assistance.</p>
        </footer>
    </div>
</body>
</html>
"#,
        icon = icon,
        headline = headline,
        doing = doing,
        time = time,
        change = change,
    )
}

/// Record `event` in the server history, then attach the whole history
pub async fn build(history: &History, event: ServerEvent, now: DateTime<Local>) -> Result<SendEmailRequest, Error> {
    let time = now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string();

    history.record(&time, event).await;

    let data = history.read().await?;
    let attachments = vec![Attachment::from_bytes(HISTORY_FILE, "text/csv", &data)];

    Ok(SendEmailRequest::new(RECIPIENT, message(event, &time))
        .with_subject(subject(event))
        .with_sender_name(SENDER_NAME)
        .with_attachments(attachments))
}
