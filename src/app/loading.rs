use std::sync::mpsc;
use std::thread;

use tracing::debug;

use crate::api::FetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub(crate) fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Idle | Self::Loading | Self::Failed(_) => None,
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub(crate) fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

struct FetchResult<T> {
    generation: u64,
    result: Result<T, FetchError>,
}

/// Runs fetches on worker threads and hands results back to the UI thread.
///
/// Every `start` or `cancel` bumps the generation; results tagged with an older
/// generation are dropped on arrival, so only the latest request can land.
pub(crate) struct BackgroundFetch<T> {
    generation: u64,
    tx: mpsc::Sender<FetchResult<T>>,
    rx: mpsc::Receiver<FetchResult<T>>,
}

impl<T: Send + 'static> BackgroundFetch<T> {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            generation: 0,
            tx,
            rx,
        }
    }

    pub(crate) fn start<F>(&mut self, job: F)
    where
        F: FnOnce() -> Result<T, FetchError> + Send + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = job();
            let _ = tx.send(FetchResult { generation, result });
        });
    }

    pub(crate) fn cancel(&mut self) {
        self.generation += 1;
    }

    /// Non-blocking. Returns the newest result of the current generation, if any.
    pub(crate) fn try_take(&mut self) -> Option<Result<T, FetchError>> {
        let mut latest = None;
        while let Ok(message) = self.rx.try_recv() {
            if message.generation == self.generation {
                latest = Some(message.result);
            } else {
                debug!(
                    stale = message.generation,
                    current = self.generation,
                    "dropping superseded fetch result"
                );
            }
        }
        latest
    }
}

impl<T: Send + 'static> Default for BackgroundFetch<T> {
    fn default() -> Self {
        Self::new()
    }
}
