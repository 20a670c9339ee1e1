use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum HttpError {
    #[error("HTTP status {status}{}", excerpt_suffix(.excerpt))]
    Status { status: u16, excerpt: Option<String> },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("response decode failed: {0}")]
    Body(String),
}

fn excerpt_suffix(excerpt: &Option<String>) -> String {
    match excerpt {
        Some(text) => format!(" ({text})"),
        None => String::new(),
    }
}

/// Single GET with no retry; callers decide whether to try again.
pub(crate) fn get_text(
    url: &str,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<String, HttpError> {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(connect_timeout)
        .timeout_read(read_timeout)
        .timeout_write(read_timeout)
        .build();

    match agent.get(url).set("Accept", "application/json").call() {
        Ok(response) => response
            .into_string()
            .map_err(|err| HttpError::Body(err.to_string())),
        Err(ureq::Error::Status(status, response)) => {
            let response_body = response.into_string().ok().unwrap_or_default();
            let body = response_body.trim();
            let excerpt = (!body.is_empty()).then(|| body.chars().take(240).collect::<String>());
            Err(HttpError::Status { status, excerpt })
        }
        Err(ureq::Error::Transport(err)) => Err(HttpError::Transport(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{Behavior, TestServer};

    #[test]
    fn returns_body_on_success() {
        let server = TestServer::spawn(vec![Behavior::Respond(200, "[1,2]".to_string())]);

        let body = get_text(
            &format!("{}/", server.base_url),
            Duration::from_millis(200),
            Duration::from_millis(200),
        )
        .expect("request should succeed");

        assert_eq!(body, "[1,2]");
        assert_eq!(server.request_paths(), vec!["/".to_string()]);
    }

    #[test]
    fn server_errors_are_not_retried() {
        let server = TestServer::spawn(vec![
            Behavior::Respond(500, "server-error".to_string()),
            Behavior::Respond(200, "ok".to_string()),
        ]);

        let err = get_text(
            &format!("{}/id/42", server.base_url),
            Duration::from_millis(200),
            Duration::from_millis(200),
        )
        .expect_err("500 should surface as an error");

        assert!(
            matches!(err, HttpError::Status { status: 500, .. }),
            "unexpected error: {err:?}"
        );
        assert_eq!(err.to_string(), "HTTP status 500 (server-error)");
        assert_eq!(server.request_count(), 1);
    }

    #[test]
    fn empty_error_body_has_no_excerpt() {
        let server = TestServer::spawn(vec![Behavior::Respond(404, String::new())]);

        let err = get_text(
            &format!("{}/id/missing", server.base_url),
            Duration::from_millis(200),
            Duration::from_millis(200),
        )
        .expect_err("404 should surface as an error");

        assert_eq!(err.to_string(), "HTTP status 404");
    }

    #[test]
    fn read_timeout_is_a_transport_error() {
        let server = TestServer::spawn(vec![Behavior::DelayRespond(
            Duration::from_millis(150),
            200,
            "slow".to_string(),
        )]);

        let err = get_text(
            &server.base_url,
            Duration::from_millis(200),
            Duration::from_millis(20),
        )
        .expect_err("slow response should time out");

        assert!(
            matches!(err, HttpError::Transport(_)),
            "unexpected error: {err:?}"
        );
    }
}
