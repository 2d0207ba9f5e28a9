use crate::email::SendEmailRequest;

pub const RECIPIENT: &str = "customer@glitchgaming.us";
pub const SUBJECT: &str = "Plain Text Email Demo: Welcome Aboard!";

const MESSAGE: &str = "
Hi there!

This is a sample plain text email to demonstrate how you can send simple text-based emails using our service. Your subscription is now active, and we're excited to have you onboard!
Feel free to customize this email content to better fit your needs.
Welcome to the community!

Best,
The Team
";

pub fn build() -> SendEmailRequest {
    SendEmailRequest::new(RECIPIENT, MESSAGE.to_string()).with_subject(SUBJECT.to_string())
}
