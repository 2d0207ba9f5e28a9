use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

use warp::{Filter, Rejection, reply::Reply};

use gmail_demo::demos::Demo;

use super::controllers;
use super::state::AppState;

fn with_state(state: Arc<AppState>) -> impl Filter<Extract = (Arc<AppState>, ), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// GET /<path> => builds and sends one demo email
pub fn demo(path: &'static str, demo: Demo, state: Arc<AppState>)
    -> impl Filter<Extract = (impl Reply, ), Error = Rejection> + Clone {
    warp::path(path)
         .and(warp::path::end())
         .and(with_state(state))
         .and_then(move |state| controllers::send_demo(demo, state))
}

/// All single-email demo routes
pub fn demos(state: Arc<AppState>) -> impl Filter<Extract = (impl Reply, ), Error = Rejection> + Clone {
    demo("send-html-email", Demo::HtmlEmail, state.clone())
        .or(demo("send-plain-text-email", Demo::PlainTextEmail, state.clone()))
        .or(demo("send-html-email-attachment", Demo::HtmlEmailWithAttachment, state.clone()))
        .or(demo("send-subscription-renewal", Demo::SubscriptionRenewal, state.clone()))
        .or(demo("send-new-purchase", Demo::NewPurchase, state))
}

/// Route for /simulate-server-status
pub fn simulate_server_status(state: Arc<AppState>)
    -> impl Filter<Extract = (impl Reply, ), Error = Rejection> + Clone {
    warp::path("simulate-server-status")
         .and(warp::path::end())
         .and(with_state(state))
         .and_then(controllers::simulate_server_status)
}

/// Routes for /package-version and /demo-server-version
pub fn versions() -> impl Filter<Extract = (impl Reply, ), Error = Rejection> + Clone {
    let package = warp::path("package-version")
         .and(warp::path::end())
         .and_then(controllers::package_version);

    let server = warp::path("demo-server-version")
         .and(warp::path::end())
         .and_then(controllers::demo_server_version);

    package.or(server)
}

/// Route for /npm-package-details
pub fn npm_package_details(state: Arc<AppState>)
    -> impl Filter<Extract = (impl Reply, ), Error = Rejection> + Clone {
    warp::path("npm-package-details")
         .and(warp::path::end())
         .and(with_state(state))
         .and_then(controllers::npm_package_details)
}

/// /files lists the files directory, /files/<name> serves a file from it
pub fn files(state: Arc<AppState>) -> impl Filter<Extract = (impl Reply, ), Error = Rejection> + Clone {
    let files_dir = state.demos.files_dir().to_path_buf();

    let listing = warp::path("files")
         .and(warp::path::end())
         .and(with_state(state))
         .and_then(controllers::list_files);

    let download = warp::path("files").and(warp::fs::dir(files_dir));

    listing.or(download)
}

/// Static front-end; / serves index.html
pub fn public(public_dir: PathBuf) -> impl Filter<Extract = (impl Reply, ), Error = Rejection> + Clone {
    let index = warp::path::end().and(warp::fs::file(public_dir.join("index.html")));

    index.or(warp::fs::dir(public_dir))
}

/// Every GET route of the demo server
pub fn api(state: Arc<AppState>, public_dir: PathBuf)
    -> impl Filter<Extract = (impl Reply, ), Error = Rejection> + Clone {
    let get = demos(state.clone())
        .or(simulate_server_status(state.clone()))
        .or(versions())
        .or(npm_package_details(state.clone()))
        .or(files(state))
        .or(public(public_dir));

    warp::get().and(get)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;
    use std::sync::Mutex;
    use std::time::Duration;

    use warp::http::StatusCode;

    use gmail_demo::demos::DemoContext;
    use gmail_demo::email::{SendEmailRequest, SendEmailResponse};
    use gmail_demo::mailer::{Mailer, MailerFuture, UnavailableMailer};
    use gmail_demo::npm::NpmClient;

    use crate::errors;

    const FILES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../dummy_files");
    const PUBLIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../public");

    const EMAIL_PATHS: &[&str] = &[
        "/send-html-email",
        "/send-plain-text-email",
        "/send-html-email-attachment",
        "/send-subscription-renewal",
        "/send-new-purchase",
    ];

    enum Outcome {
        Sent,
        Rejected,
    }

    /// Records every request and answers like Gmail would
    struct MockMailer {
        outcome: Outcome,
        requests: Mutex<Vec<SendEmailRequest>>,
    }

    impl MockMailer {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    impl Mailer for MockMailer {
        fn send_email<'a>(&'a self, request: &'a SendEmailRequest) -> MailerFuture<'a, SendEmailResponse> {
            self.requests.lock().unwrap().push(request.clone());

            let resp = match self.outcome {
                Outcome::Sent => SendEmailResponse {
                    sent: true,
                    status: Some(200),
                    status_text: Some("OK".to_string()),
                    message: "Email successfully sent.".to_string(),
                    ..Default::default()
                },
                Outcome::Rejected => SendEmailResponse {
                    sent: false,
                    status: Some(403),
                    status_text: Some("Forbidden".to_string()),
                    message: "Failed to send email: Delegation denied".to_string(),
                    ..Default::default()
                },
            };

            Box::pin(async move { Ok(resp) })
        }
    }

    fn state(mailer: Arc<dyn Mailer>, files_dir: &Path) -> Arc<AppState> {
        Arc::new(AppState {
            mailer,
            demos: DemoContext::new(files_dir, "http://localhost:6338", "no-reply@somnuslabs.com"),
            npm: NpmClient::new().unwrap(),
            package_name: "gmail-node-mailer".to_string(),
            status_delay: Duration::from_millis(0),
        })
    }

    fn router(state: Arc<AppState>) -> impl Filter<Extract = (impl Reply, ), Error = Infallible> + Clone + 'static {
        api(state, PathBuf::from(PUBLIC_DIR)).recover(errors::handle_rejection)
    }

    fn json(body: &[u8]) -> serde_json::Value {
        serde_json::from_slice(body).unwrap()
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gmail-demo-server-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn email_endpoints_report_success() {
        let mailer = MockMailer::new(Outcome::Sent);
        let filter = router(state(mailer.clone(), Path::new(FILES_DIR)));

        for path in EMAIL_PATHS {
            let resp = warp::test::request().path(path).reply(&filter).await;
            assert_eq!(resp.status(), StatusCode::OK, "{}", path);

            let body = json(resp.body());
            assert_eq!(body["sent"], true, "{}", path);
            assert_eq!(body["status"], 200, "{}", path);
            assert!(body["operation"].is_string(), "{}", path);
        }

        assert_eq!(mailer.requests.lock().unwrap().len(), EMAIL_PATHS.len());
    }

    #[tokio::test]
    async fn provider_rejection_is_passed_through() {
        let filter = router(state(MockMailer::new(Outcome::Rejected), Path::new(FILES_DIR)));

        let resp = warp::test::request().path("/send-plain-text-email").reply(&filter).await;
        let body = json(resp.body());

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body["operation"], "Send Plain Text Email");
        assert_eq!(body["sent"], false);
        assert_eq!(body["status"], 403);
    }

    #[tokio::test]
    async fn send_failure_is_a_json_500() {
        let mailer = Arc::new(UnavailableMailer::new("no credentials".to_string()));
        let filter = router(state(mailer, Path::new(FILES_DIR)));

        let resp = warp::test::request().path("/send-html-email").reply(&filter).await;
        let body = json(resp.body());

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["sent"], false);
        assert_eq!(body["status"], 500);
        assert!(body["message"].as_str().unwrap().contains("no credentials"));
    }

    #[tokio::test]
    async fn missing_attachment_is_a_json_500() {
        let filter = router(state(MockMailer::new(Outcome::Sent), Path::new("/nonexistent")));

        let resp = warp::test::request().path("/send-new-purchase").reply(&filter).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(resp.body())["sent"], false);
    }

    #[tokio::test]
    async fn attachments_match_source_files() {
        let mailer = MockMailer::new(Outcome::Sent);
        let filter = router(state(mailer.clone(), Path::new(FILES_DIR)));

        warp::test::request().path("/send-new-purchase").reply(&filter).await;

        let requests = mailer.requests.lock().unwrap();
        let attachments = &requests[0].attachments;
        let ebook = std::fs::read(Path::new(FILES_DIR).join("SampleEBook.epub")).unwrap();
        let invoice = std::fs::read(Path::new(FILES_DIR).join("SampleInvoice.pdf")).unwrap();

        assert_eq!(attachments[0].decode().unwrap(), ebook);
        assert_eq!(attachments[1].decode().unwrap(), invoice);
    }

    #[tokio::test]
    async fn simulate_server_status_returns_start_then_shutdown() {
        let dir = temp_dir();
        let mailer = MockMailer::new(Outcome::Sent);
        let filter = router(state(mailer.clone(), &dir));

        let resp = warp::test::request().path("/simulate-server-status").reply(&filter).await;
        let body = json(resp.body());
        let entries = body.as_array().unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["operation"], "Server Start");
        assert_eq!(entries[1]["operation"], "Server Shutdown");
        assert_eq!(entries[0]["sent"], true);

        let requests = mailer.requests.lock().unwrap();
        assert!(requests[0].subject.as_deref().unwrap().contains("Server Start"));
        assert!(requests[1].subject.as_deref().unwrap().contains("Server Shutdown"));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn versions_are_reported() {
        let filter = router(state(MockMailer::new(Outcome::Sent), Path::new(FILES_DIR)));

        let package = warp::test::request().path("/package-version").reply(&filter).await;
        let server = warp::test::request().path("/demo-server-version").reply(&filter).await;

        assert_eq!(json(package.body())["version"], gmail_demo::VERSION);
        assert_eq!(json(server.body())["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn files_are_listed_and_served() {
        let filter = router(state(MockMailer::new(Outcome::Sent), Path::new(FILES_DIR)));

        let listing = warp::test::request().path("/files").reply(&filter).await;
        let names: Vec<String> = json(listing.body())
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap().to_string())
            .collect();

        assert!(names.contains(&"SampleEBook.epub".to_string()));

        let guide = warp::test::request()
            .path("/files/ServiceAccountSetupGuide.md")
            .reply(&filter)
            .await;

        assert_eq!(guide.status(), StatusCode::OK);
        assert!(std::str::from_utf8(guide.body()).unwrap().contains("Service Account"));
    }

    #[tokio::test]
    async fn index_is_served() {
        let filter = router(state(MockMailer::new(Outcome::Sent), Path::new(FILES_DIR)));

        let resp = warp::test::request().path("/").reply(&filter).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let page = std::str::from_utf8(resp.body()).unwrap();
        assert!(page.contains("<table"));
        assert!(page.contains("GMAIL_MAILER_SENDER_EMAIL="));
    }

    #[tokio::test]
    async fn unknown_route_is_a_json_404() {
        let filter = router(state(MockMailer::new(Outcome::Sent), Path::new(FILES_DIR)));

        let resp = warp::test::request().path("/no-such-page").reply(&filter).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(resp.body())["sent"], false);
    }

    #[tokio::test]
    async fn npm_failure_is_a_json_500() {
        let unreachable = "http://127.0.0.1:1/";
        let state = Arc::new(AppState {
            mailer: MockMailer::new(Outcome::Sent),
            demos: DemoContext::new(Path::new(FILES_DIR), "http://localhost:6338", "no-reply@somnuslabs.com"),
            npm: NpmClient::with_urls(unreachable, unreachable).unwrap(),
            package_name: "gmail-node-mailer".to_string(),
            status_delay: Duration::from_millis(0),
        });

        let resp = warp::test::request().path("/npm-package-details").reply(&router(state)).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(resp.body()), serde_json::json!({ "error": "Failed to fetch package details" }));
    }
}
