use std::path::Path;

use chrono::{DateTime, Duration, Local};

use crate::email::{Attachment, SendEmailRequest};
use crate::Error;

pub const RECIPIENT: &str = "customer@glitchgaming.us";
pub const SUBJECT: &str = "🎬 Now Streaming: Short Circuit - Your Adventure Awaits!";
pub const SENDER_NAME: &str = "StreamBox Team";
pub const POSTER_FILE: &str = "downloadableMoviePoster.png";

const POSTER_URL: &str = "https://res.cloudinary.com/dkfrhzkaf/image/upload/v1713597609/moviePoster.png";
const MOVIE_URL: &str =
    "https://archive.org/download/short.circuit.1986.2160p/Short.Circuit.1986.2160p.BluRay.Topaz.AMQ.Upscale.x265-SoF.mp4";
const TRAILER_URL: &str = "https://dn720400.ca.archive.org/0/items/short-circuit/Short%20Circuit.mp4";

const MESSAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<style>
    .container { font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; max-width: 800px; margin: 20px auto; background-color: #000; color: #fff; border-radius: 8px; overflow: hidden; box-shadow: 0 4px 8px rgba(0,0,0,0.1); }
    .header { background-color: #E50914; padding: 16px 20px; font-size: 24px; font-weight: bold; text-align: center; }
    .movie-poster { display: block; width: 100%; height: auto; }
    .movie-info { background-color: #303030; padding: 10px 20px; text-align: center; }
    .movie-title { font-size: 24px; font-weight: bold; margin-top: 0; }
    .movie-details { font-size: 16px; margin: 5px 0; }
    .movie-link, .movie-link:visited { color: #FFA500; text-decoration: none; font-size: 18px; }
    footer { background-color: #181818; font-size: 18px; text-align: center; padding: 20px; }
    footer a, footer a:visited { color: #FFA500!important; text-decoration: none; }
</style>
</head>
<body>
<p>Dear Subscriber,</p>
<p>Thank you for signing up for StreamBox! Your subscription is now active.</p>
<p>Dive into your new cinematic adventure with <strong>Short Circuit</strong>, available for streaming right now.</p>
<p>Enjoy your journey with us! Happy streaming!</p>
    <div class="container">
        <div class="header">Welcome to StreamBox!</div>
        <img src="%POSTER_URL%" alt="Short Circuit Movie Poster" class="movie-poster">
        <div class="movie-info">
            <h1 class="movie-title">Short Circuit</h1>
            <p class="movie-details">Rated: PG-13 | Duration: 1h 13min</p>
            <p class="movie-details"><a href="%MOVIE_URL%" class="movie-link">Watch Full Movie</a> | <a href="%TRAILER_URL%" class="movie-link">Watch Trailer</a></p>
        </div>
        <footer>
            <p>Need help? Contact us at <a href="mailto:support@streambox.com">support@streambox.com</a></p>
        </footer>
    </div>
</body>
</html>
"#;

fn invoice(next_billing: &str) -> String {
    format!(
        r#"<html>
<body>
    <h1>StreamBox Subscription Invoice</h1>
    <p>Thank you for subscribing to StreamBox!</p>
    <p>Plan Details:</p>
    <ul>
        <li>Plan Type: Unlimited Streaming</li>
        <li>Monthly Fee: $15.99</li>
        <li>Next Billing Date: {}</li>
    </ul>
    <p>Additional Purchases:</p>
    <ul>
        <li>Free Access to Short Circuit - $0.00</li>
    </ul>
</body>
</html>
"#,
        next_billing
    )
}

pub async fn build(files_dir: &Path, now: DateTime<Local>) -> Result<SendEmailRequest, Error> {
    let message = MESSAGE
        .replace("%POSTER_URL%", POSTER_URL)
        .replace("%MOVIE_URL%", MOVIE_URL)
        .replace("%TRAILER_URL%", TRAILER_URL);

    let next_billing = (now + Duration::days(30)).format("%Y-%m-%d").to_string();

    let attachments = vec![
        Attachment::from_text("StreamBox-Invoice.html", "text/html", &invoice(&next_billing)),
        Attachment::from_file("MovieWallpaper.jpg", "image/jpeg", &files_dir.join(POSTER_FILE)).await?,
    ];

    Ok(SendEmailRequest::new(RECIPIENT, message)
        .with_subject(SUBJECT.to_string())
        .with_sender_name(SENDER_NAME)
        .with_attachments(attachments))
}
