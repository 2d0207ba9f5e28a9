use std::path::Path;

use crate::email::{Attachment, SendEmailRequest};
use crate::Error;

pub const RECIPIENT: &str = "customer@glitchgaming.us";
pub const SUBJECT: &str = "📘 Your eBook Purchase Confirmation!";
pub const EBOOK_FILE: &str = "SampleEBook.epub";
pub const INVOICE_FILE: &str = "SampleInvoice.pdf";

/// "waleed@somnuslabs.com" -> "Waleed"
pub fn recipient_name(recipient: &str) -> String {
    let local = recipient.split('@').next().unwrap_or("");
    let mut chars = local.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn message(recipient_name: &str, support_email: &str, base_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<style>
    body {{ font-family: Arial, sans-serif; background-color: #f4f4f4; }}
    .container {{ max-width: 600px; margin: auto; background-color: #ffffff; padding: 20px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }}
    .header {{ background-color: #007bff; color: white; padding: 10px; text-align: center; }}
    .content {{ padding: 20px; text-align: left; line-height: 1.6; color: #333; }}
    .content a {{ color: #007bff; text-decoration: none; }}
    .footer {{ font-size: smaller; text-align: center; padding-top: 10px; color: #787878; }}
</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🌟 Welcome to Your New Adventure! 🌟</h1>
        </div>
        <div class="content">
            <p>Dear {name} 📖,</p>
            <p>🎉 We are delighted to confirm your purchase of the eBook <strong>"The Echoes of Time"</strong>. This thrilling adventure awaits your exploration. 🚀</p>
            <p>🔗 For immediate access to your eBook, please click <a href="{url}/files/{ebook}">here</a>. We have also attached your eBook file to this email for your convenience.</p>
            <p>🤝 Should you require any assistance or have any inquiries, feel free to contact our support team at <a href="mailto:{support}">{support}</a>.</p>
        </div>
        <div class="footer">
            Warm regards,<br>
            <strong>The Book Haven Team 📚</strong><br>
            📧 <a href="mailto:{support}">{support}</a>
        </div>
    </div>
</body>
</html>
"#,
        name = recipient_name,
        url = base_url,
        ebook = EBOOK_FILE,
        support = support_email,
    )
}

pub async fn build(files_dir: &Path, base_url: &str, support_email: &str) -> Result<SendEmailRequest, Error> {
    let attachments = vec![
        Attachment::from_file(
            "TheEchoesOfTime-eBook.epub",
            "application/epub+zip",
            &files_dir.join(EBOOK_FILE),
        )
        .await?,
        Attachment::from_file("PurchaseInvoice.pdf", "application/pdf", &files_dir.join(INVOICE_FILE)).await?,
    ];

    let body = message(&recipient_name(RECIPIENT), support_email, base_url);

    Ok(SendEmailRequest::new(RECIPIENT, body)
        .with_subject(SUBJECT.to_string())
        .with_sender_email(support_email)
        .with_attachments(attachments))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_local_part() {
        assert_eq!(recipient_name("waleed@somnuslabs.com"), "Waleed");
        assert_eq!(recipient_name("customer@glitchgaming.us"), "Customer");
        assert_eq!(recipient_name("@nobody"), "");
    }
}
