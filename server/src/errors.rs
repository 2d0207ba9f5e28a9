use std::convert::Infallible;

use warp::{http::StatusCode, Rejection, Reply};

use gmail_demo::email::SendEmailResponse;

/// Wrap the shared library error type so Reject can be impl'd
#[derive(Debug)]
pub struct Error(pub gmail_demo::Error);

impl warp::reject::Reject for Error {}

pub fn reject(err: gmail_demo::Error) -> Rejection {
    log::error!("{}", err);
    warp::reject::custom(Error(err))
}

/// Maps rejections to the same JSON envelope the email endpoints use, so
/// the front-end can log failures like any other result.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let status_code;
    let message;

    if err.is_not_found() {
        status_code = StatusCode::NOT_FOUND;
        message = "Not found".to_string();
    } else if let Some(Error(e)) = err.find::<Error>() {
        status_code = StatusCode::INTERNAL_SERVER_ERROR;
        message = e.to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        status_code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method not allowed".to_string();
    } else {
        log::error!("Unhandled rejection: {:?}", err);
        status_code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal server error".to_string();
    }

    let resp = SendEmailResponse {
        sent: false,
        status: Some(status_code.as_u16()),
        status_text: status_code.canonical_reason().map(String::from),
        message,
        ..Default::default()
    };

    Ok(warp::reply::with_status(warp::reply::json(&resp), status_code))
}
