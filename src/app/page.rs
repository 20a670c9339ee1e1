use std::collections::HashMap;

use crate::model::Show;

use super::navigator::SeasonAnchors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Text,
    SeasonHeading,
    Episode,
    Audio,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageLine {
    pub(crate) kind: LineKind,
    pub(crate) text: String,
}

impl PageLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(LineKind::Blank, "")
    }
}

/// Flattened show body with one anchored section per season.
#[derive(Debug, Clone, Default)]
pub(crate) struct ShowPage {
    lines: Vec<PageLine>,
    anchors: HashMap<String, usize>,
    scroll: usize,
}

impl ShowPage {
    pub(crate) fn from_show(show: &Show) -> Self {
        let mut lines = Vec::new();
        let mut anchors = HashMap::new();

        for text in show.description.lines().filter(|line| !line.trim().is_empty()) {
            lines.push(PageLine::new(LineKind::Text, text.trim()));
        }
        if !lines.is_empty() {
            lines.push(PageLine::blank());
        }

        for (season_idx, season) in show.seasons.iter().enumerate() {
            let number = season.display_number(season_idx);
            // First anchor wins if the API repeats a season number.
            anchors.entry(number.clone()).or_insert(lines.len());

            let heading = if season.title.trim().is_empty() {
                format!("Season {number}")
            } else {
                format!("Season {number} · {}", season.title.trim())
            };
            lines.push(PageLine::new(LineKind::SeasonHeading, heading));
            if !season.image.trim().is_empty() {
                lines.push(PageLine::new(
                    LineKind::Text,
                    format!("  Cover: {}", season.image.trim()),
                ));
            }

            if season.episodes.is_empty() {
                lines.push(PageLine::new(LineKind::Text, "  No episodes."));
            }
            for (episode_idx, episode) in season.episodes.iter().enumerate() {
                lines.push(PageLine::new(
                    LineKind::Episode,
                    format!(
                        "  E{:<4} {}",
                        episode.display_number(episode_idx),
                        episode.title.trim()
                    ),
                ));
                for text in episode
                    .description
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                {
                    lines.push(PageLine::new(
                        LineKind::Text,
                        format!("        {}", text.trim()),
                    ));
                }
                if let Some(url) = episode
                    .audio_file_url
                    .as_deref()
                    .filter(|url| !url.is_empty())
                {
                    lines.push(PageLine::new(LineKind::Audio, format!("        ▶ {url}")));
                }
            }
            lines.push(PageLine::blank());
        }

        Self {
            lines,
            anchors,
            scroll: 0,
        }
    }

    pub(crate) fn lines(&self) -> &[PageLine] {
        &self.lines
    }

    pub(crate) fn scroll(&self) -> usize {
        self.scroll
    }

    pub(crate) fn anchor(&self, display_number: &str) -> Option<usize> {
        self.anchors.get(display_number).copied()
    }

    pub(crate) fn scroll_by(&mut self, delta: isize) {
        let max = self.lines.len().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }
}

impl SeasonAnchors for ShowPage {
    fn scroll_to_anchor(&mut self, display_number: &str) -> bool {
        match self.anchor(display_number) {
            Some(line) => {
                self.scroll = line;
                true
            }
            None => false,
        }
    }
}
