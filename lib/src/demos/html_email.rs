use crate::email::SendEmailRequest;

pub const RECIPIENT: &str = "customer@glitchgaming.us";
pub const SUBJECT: &str = "🎉 HTML Email Demo with gmail-node-mailer!";
pub const SENDER_NAME: &str = "gmail-node-mailer";

const MESSAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body, html { margin: 0; padding: 0; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f9f9f9; }
        .container { max-width: 600px; margin: auto; background-color: #ffffff; border-radius: 10px; overflow: hidden; box-shadow: 0 6px 20px rgba(0,0,0,0.15); }
        .header { background-color: #003366; color: white; padding: 20px; text-align: center; }
        .content { padding: 30px; text-align: left; font-size: 16px; color: #333; }
        .code { background-color: #e8f0fe; padding: 15px; font-family: monospace; color: #0056b3; border-left: 5px solid #0056b3; margin-top: 20px; }
        .footer { background-color: #003366; color: white; padding: 20px; text-align: center; }
        a { color: #FFD700; text-decoration: none; font-weight: bold; }
        @media (max-width: 600px) {
            .header, .content, .footer { padding: 15px; }
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Welcome to the gmail-node-mailer Demo!</h1>
        </div>
        <div class="content">
            <p>Hello,</p>
            <p>This email shows how to send HTML formatted messages through the Gmail API. These are the fields of a send request:</p>
            <pre class="code">
SendEmailRequest {
    recipientEmail: string;      // The email address of the recipient.
    senderEmail?: string;        // Optional. The email address of the sender.
    senderName?: string;         // Optional. The name of the sender.
    subject?: string;            // Optional. The subject line of the email.
    message: string;             // Plain text or HTML content of the email.
    attachments?: Attachment[];  // Optional. Array of attachments.
}

Attachment {
    filename: string;    // Name of the file to be attached.
    mimeType: string;    // MIME type of the file.
    content: string;     // Base64 encoded content of the file.
}

SendEmailResponse {
    sent: boolean;               // Whether the email was successfully sent.
    status: number | null;       // HTTP status code of the send email attempt.
    statusText: string | null;   // Status text corresponding to the status code.
    responseUrl: string | null;  // URL of the API endpoint used to send the email.
    message: string;             // Success or error message.
    gmailResponse: any | null;   // The full response from the Gmail API.
}
            </pre>
            <p>Your account is now fully activated, and you can begin exploring all our features.</p>
        </div>
        <div class="footer">
            <p>Need assistance? Contact us at <a href="mailto:support@gmail-node-mailer-demo.com">support@gmail-node-mailer-demo.com</a></p>
        </div>
    </div>
</body>
</html>
"#;

pub fn build() -> SendEmailRequest {
    SendEmailRequest::new(RECIPIENT, MESSAGE.to_string())
        .with_subject(SUBJECT.to_string())
        .with_sender_name(SENDER_NAME)
}
