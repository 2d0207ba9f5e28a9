use std::path::Path;

use chrono::{DateTime, Local};

use crate::email::{Attachment, SendEmailRequest};
use crate::Error;

pub const RECIPIENT: &str = "customer@glitchgaming.us";
pub const SUBJECT: &str = "🎥 StreamBox Subscription Renewed!";
pub const INVOICE_FILE: &str = "StreamBox-Invoice.pdf";

const USAGE_STATS: &str = "Subscription Period: 2023-04-01 to 2023-04-30\nHours Streamed: 120\nSubscription Fee: $15.99";

fn message(renewal_date: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body {{ font-family: 'Arial', sans-serif; background-color: #f4f4f4; color: #333; }}
        .container {{ max-width: 600px; margin: auto; padding: 20px; background: #fff; border-radius: 8px; }}
        h1 {{ color: #E50914; }}
        p {{ margin: 10px 0; }}
        footer {{ color: #888; font-size: 16px; text-align: center; margin-top: 20px; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>🌟 Welcome Back to StreamBox!</h1>
        <p>Hello,</p>
        <p>We're thrilled to let you know that your StreamBox subscription has been successfully renewed as of <strong>{}</strong>.</p>
        <p>Continue enjoying unlimited movies and TV shows without interruption. Attached are your detailed invoice and usage statistics for your records.</p>
        <footer>Thanks for choosing StreamBox! 🎬<br>Contact us anytime at support@streambox.com</footer>
    </div>
</body>
</html>
"#,
        renewal_date
    )
}

pub async fn build(files_dir: &Path, now: DateTime<Local>) -> Result<SendEmailRequest, Error> {
    // Unpadded month and day, e.g. 2024-4-7
    let date = now.format("%Y-%-m-%-d").to_string();

    let attachments = vec![
        Attachment::from_file(
            &format!("StreamBox-Invoice-{}.pdf", date),
            "application/pdf",
            &files_dir.join(INVOICE_FILE),
        )
        .await?,
        Attachment::from_text(&format!("StreamBox-Usage-{}.txt", date), "text/plain", USAGE_STATS),
    ];

    Ok(SendEmailRequest::new(RECIPIENT, message(&date))
        .with_subject(SUBJECT.to_string())
        .with_attachments(attachments))
}
