use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::http::{HttpError, get_text};
use crate::model::{Genre, Preview, Show};

/// Every way a fetch can fail. The UI treats all of them as a network failure
/// and only shows the message.
#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("invalid JSON from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid show identifier {0:?}")]
    InvalidId(String),
}

/// Read side of the podcast API, abstracted so the stateful components can be
/// driven by in-memory sources in tests.
pub(crate) trait PodcastSource: Send + Sync {
    fn fetch_previews(&self) -> Result<Vec<Preview>, FetchError>;
    fn fetch_show(&self, show_id: &str) -> Result<Show, FetchError>;
}

#[derive(Debug, Clone)]
pub(crate) struct PodcastClient {
    base_url: String,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl PodcastClient {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            connect_timeout: config.connect_timeout,
            read_timeout: config.read_timeout,
        }
    }

    pub(crate) fn fetch_genre(&self, genre_id: u32) -> Result<Genre, FetchError> {
        self.get_json(&format!("/genre/{genre_id}"))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let body = get_text(&url, self.connect_timeout, self.read_timeout)?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

impl PodcastSource for PodcastClient {
    fn fetch_previews(&self) -> Result<Vec<Preview>, FetchError> {
        self.get_json("/")
    }

    fn fetch_show(&self, show_id: &str) -> Result<Show, FetchError> {
        self.get_json(&format!("/id/{}", path_segment(show_id)?))
    }
}

/// Encodes `id` as exactly one path segment. Blank IDs and dot segments are
/// refused because the URL parser would resolve them to another path.
fn path_segment(id: &str) -> Result<String, FetchError> {
    let trimmed = id.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(FetchError::InvalidId(id.to_string()));
    }
    Ok(urlencoding::encode(trimmed).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{Behavior, TestServer};

    fn client_for(server: &TestServer) -> PodcastClient {
        PodcastClient::new(&Config {
            base_url: format!("{}/", server.base_url),
            connect_timeout: Duration::from_millis(200),
            read_timeout: Duration::from_millis(500),
        })
    }

    #[test]
    fn fetches_previews_from_root() {
        let server = TestServer::spawn(vec![Behavior::Respond(
            200,
            r#"[{"id":"1","title":"One","seasons":2,"genres":[3],"updated":"2022-01-01T00:00:00.000Z"}]"#
                .to_string(),
        )]);

        let previews = client_for(&server)
            .fetch_previews()
            .expect("previews should load");

        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].title, "One");
        assert_eq!(server.request_paths(), vec!["/".to_string()]);
    }

    #[test]
    fn fetches_show_and_genre_by_id() {
        let server = TestServer::spawn(vec![
            Behavior::Respond(200, r#"{"id":"42","title":"Answer","seasons":[]}"#.to_string()),
            Behavior::Respond(
                200,
                r#"{"id":3,"title":"History","description":"Past","shows":["42"]}"#.to_string(),
            ),
        ]);
        let client = client_for(&server);

        let show = client.fetch_show("42").expect("show should load");
        let genre = client.fetch_genre(3).expect("genre should load");

        assert_eq!(show.title, "Answer");
        assert_eq!(genre.title, "History");
        assert_eq!(
            server.request_paths(),
            vec!["/id/42".to_string(), "/genre/3".to_string()]
        );
    }

    #[test]
    fn show_id_stays_inside_the_id_path() {
        let server = TestServer::spawn(vec![
            Behavior::Respond(404, String::new()),
            Behavior::Respond(404, String::new()),
        ]);
        let client = client_for(&server);

        assert!(client.fetch_show("../genre/3").is_err());
        assert!(client.fetch_show("1?seasons=0#x").is_err());

        assert_eq!(
            server.request_paths(),
            vec![
                "/id/..%2Fgenre%2F3".to_string(),
                "/id/1%3Fseasons%3D0%23x".to_string()
            ]
        );
    }

    #[test]
    fn blank_and_dot_show_ids_are_rejected_without_a_request() {
        let server = TestServer::spawn(Vec::new());
        let client = client_for(&server);

        for id in ["", "   ", ".", ".."] {
            let err = client.fetch_show(id).expect_err("id should be refused");
            assert!(
                matches!(err, FetchError::InvalidId(_)),
                "unexpected error for {id:?}: {err:?}"
            );
        }
        assert_eq!(server.request_count(), 0);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let server = TestServer::spawn(vec![Behavior::Respond(200, "<html>".to_string())]);

        let err = client_for(&server)
            .fetch_show("7")
            .expect_err("html is not a show");

        assert!(
            matches!(err, FetchError::Decode { ref path, .. } if path == "/id/7"),
            "unexpected error: {err:?}"
        );
    }
}
