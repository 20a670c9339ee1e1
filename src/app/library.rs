use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use tracing::{info, warn};

use crate::api::PodcastSource;
use crate::cli::SortArg;
use crate::model::Preview;

use super::loading::{BackgroundFetch, LoadState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortOrder {
    TitleAsc,
    TitleDesc,
    Newest,
    Oldest,
}

impl SortOrder {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::TitleAsc => "A-Z",
            Self::TitleDesc => "Z-A",
            Self::Newest => "NEWEST",
            Self::Oldest => "OLDEST",
        }
    }

    pub(crate) fn cycle(self) -> Self {
        match self {
            Self::TitleAsc => Self::TitleDesc,
            Self::TitleDesc => Self::Newest,
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::TitleAsc,
        }
    }
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Title => Self::TitleAsc,
            SortArg::TitleDesc => Self::TitleDesc,
            SortArg::Newest => Self::Newest,
            SortArg::Oldest => Self::Oldest,
        }
    }
}

/// Indices into `previews` matching `filter`, ordered by `sort`.
pub(crate) fn visible_previews(previews: &[Preview], filter: &str, sort: SortOrder) -> Vec<usize> {
    let needle = filter.trim().to_lowercase();
    let mut indices: Vec<usize> = previews
        .iter()
        .enumerate()
        .filter(|(_, preview)| needle.is_empty() || preview.title.to_lowercase().contains(&needle))
        .map(|(idx, _)| idx)
        .collect();

    indices.sort_by(|&a, &b| compare_previews(&previews[a], &previews[b], sort));
    indices
}

fn compare_previews(a: &Preview, b: &Preview, sort: SortOrder) -> Ordering {
    match sort {
        SortOrder::TitleAsc => compare_titles(&a.title, &b.title),
        SortOrder::TitleDesc => compare_titles(&b.title, &a.title),
        SortOrder::Newest => compare_dates(&a.updated_at, &b.updated_at, true),
        SortOrder::Oldest => compare_dates(&a.updated_at, &b.updated_at, false),
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.trim()
        .to_lowercase()
        .cmp(&b.trim().to_lowercase())
        .then_with(|| a.cmp(b))
}

// Unparsable dates sort last in both directions.
fn compare_dates(a: &str, b: &str, newest_first: bool) -> Ordering {
    match (parse_updated(a), parse_updated(b)) {
        (Some(left), Some(right)) if newest_first => right.cmp(&left),
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn parse_updated(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw.trim()).ok()
}

pub(crate) fn format_updated(raw: &str) -> String {
    parse_updated(raw)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    let mut out = s.to_string();
    if out.chars().count() > max {
        out = out.chars().take(max.saturating_sub(3)).collect::<String>() + "...";
    }
    out
}

/// Homepage listing, fetched once in the background.
pub(crate) struct PreviewLoader {
    source: Arc<dyn PodcastSource>,
    state: LoadState<Vec<Preview>>,
    fetch: BackgroundFetch<Vec<Preview>>,
}

impl PreviewLoader {
    pub(crate) fn new(source: Arc<dyn PodcastSource>) -> Self {
        Self {
            source,
            state: LoadState::Idle,
            fetch: BackgroundFetch::new(),
        }
    }

    pub(crate) fn state(&self) -> &LoadState<Vec<Preview>> {
        &self.state
    }

    pub(crate) fn previews(&self) -> &[Preview] {
        self.state.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn load(&mut self) {
        self.state = LoadState::Loading;
        let source = Arc::clone(&self.source);
        self.fetch.start(move || source.fetch_previews());
    }

    pub(crate) fn retry(&mut self) -> bool {
        if !matches!(self.state, LoadState::Failed(_)) {
            return false;
        }
        self.load();
        true
    }

    pub(crate) fn poll(&mut self) -> bool {
        let Some(result) = self.fetch.try_take() else {
            return false;
        };
        self.state = match result {
            Ok(previews) => {
                info!(count = previews.len(), "previews loaded");
                LoadState::Loaded(previews)
            }
            Err(err) => {
                warn!(error = %err, "preview fetch failed");
                LoadState::Failed(format!("Failed to load shows: {err}"))
            }
        };
        true
    }
}
