use std::sync::Arc;

use tracing::{info, warn};

use crate::api::PodcastSource;
use crate::model::{Season, Show};

use super::loading::{BackgroundFetch, LoadState};

/// Loads the full show for whatever ID the detail view is pointed at.
///
/// Pointing it at a new ID abandons the in-flight request; clearing the ID
/// drops the loaded show.
pub(crate) struct DetailLoader {
    source: Arc<dyn PodcastSource>,
    show_id: Option<String>,
    state: LoadState<Show>,
    fetch: BackgroundFetch<Show>,
}

impl DetailLoader {
    pub(crate) fn new(source: Arc<dyn PodcastSource>) -> Self {
        Self {
            source,
            show_id: None,
            state: LoadState::Idle,
            fetch: BackgroundFetch::new(),
        }
    }

    pub(crate) fn show_id(&self) -> Option<&str> {
        self.show_id.as_deref()
    }

    pub(crate) fn state(&self) -> &LoadState<Show> {
        &self.state
    }

    pub(crate) fn show(&self) -> Option<&Show> {
        self.state.loaded()
    }

    pub(crate) fn seasons(&self) -> &[Season] {
        self.show().map(|show| show.seasons.as_slice()).unwrap_or(&[])
    }

    /// Returns true when the ID changed and the state was reset.
    pub(crate) fn set_show_id(&mut self, show_id: Option<&str>) -> bool {
        let show_id = show_id.map(str::trim).filter(|id| !id.is_empty());
        if show_id == self.show_id.as_deref() {
            return false;
        }

        match show_id {
            Some(id) => {
                self.show_id = Some(id.to_string());
                self.start_fetch();
            }
            None => {
                self.show_id = None;
                self.fetch.cancel();
                self.state = LoadState::Idle;
            }
        }
        true
    }

    /// Re-runs the failed fetch for the same ID. Only valid after a failure.
    pub(crate) fn retry(&mut self) -> bool {
        if !matches!(self.state, LoadState::Failed(_)) || self.show_id.is_none() {
            return false;
        }
        self.start_fetch();
        true
    }

    /// Applies a finished fetch. Returns true when the state changed.
    pub(crate) fn poll(&mut self) -> bool {
        let Some(result) = self.fetch.try_take() else {
            return false;
        };
        let show_id = self.show_id.clone().unwrap_or_default();
        self.state = match result {
            Ok(show) => {
                info!(show_id = %show_id, seasons = show.seasons.len(), "show loaded");
                LoadState::Loaded(show)
            }
            Err(err) => {
                warn!(show_id = %show_id, error = %err, "show fetch failed");
                LoadState::Failed(format!("Failed to load show {show_id}: {err}"))
            }
        };
        true
    }

    fn start_fetch(&mut self) {
        let Some(show_id) = self.show_id.clone() else {
            return;
        };
        self.state = LoadState::Loading;
        let source = Arc::clone(&self.source);
        self.fetch.start(move || source.fetch_show(&show_id));
    }
}
