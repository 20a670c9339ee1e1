//! Records returned by the podcast API.
//!
//! Field names follow the wire format (`seasons`, `updated`, `genres`, `season`,
//! `episode`, `file`) through serde renames.

use serde::{Deserialize, Deserializer};

/// Listing entry from `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct Preview {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub(crate) id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) image: String,
    #[serde(rename = "seasons", default)]
    pub(crate) seasons_count: u32,
    #[serde(rename = "updated", default)]
    pub(crate) updated_at: String,
    #[serde(rename = "genres", default)]
    pub(crate) genre_ids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct Genre {
    pub(crate) id: u32,
    pub(crate) title: String,
}

/// Full show from `GET /id/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct Show {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub(crate) id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) image: String,
    #[serde(rename = "updated", default)]
    pub(crate) updated_at: String,
    #[serde(default)]
    pub(crate) genres: Vec<String>,
    #[serde(default)]
    pub(crate) seasons: Vec<Season>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct Season {
    #[serde(rename = "season", default)]
    pub(crate) season_number: Option<u32>,
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) image: String,
    #[serde(default)]
    pub(crate) episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct Episode {
    #[serde(rename = "episode", default)]
    pub(crate) episode_number: Option<u32>,
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(rename = "file", default)]
    pub(crate) audio_file_url: Option<String>,
}

impl Season {
    /// Explicit season number, else the 1-based position in the show.
    pub(crate) fn display_number(&self, index: usize) -> String {
        display_number(self.season_number, index)
    }
}

impl Episode {
    pub(crate) fn display_number(&self, index: usize) -> String {
        display_number(self.episode_number, index)
    }
}

fn display_number(explicit: Option<u32>, index: usize) -> String {
    explicit
        .map(|number| number.to_string())
        .unwrap_or_else(|| (index + 1).to_string())
}

/// Display numbers of every season, in order.
pub(crate) fn season_display_numbers(seasons: &[Season]) -> Vec<String> {
    seasons
        .iter()
        .enumerate()
        .map(|(idx, season)| season.display_number(idx))
        .collect()
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_parses_wire_names_and_numeric_id() {
        let raw = r#"{
            "id": 10716,
            "title": "Something Was Wrong",
            "description": "An award-winning docuseries",
            "seasons": 14,
            "image": "https://example.test/cover.jpg",
            "genres": [1, 2],
            "updated": "2022-11-03T07:00:00.000Z"
        }"#;

        let preview: Preview = serde_json::from_str(raw).expect("preview should parse");
        assert_eq!(preview.id, "10716");
        assert_eq!(preview.seasons_count, 14);
        assert_eq!(preview.genre_ids, vec![1, 2]);
        assert_eq!(preview.updated_at, "2022-11-03T07:00:00.000Z");
    }

    #[test]
    fn show_parses_nested_seasons_with_missing_numbers() {
        let raw = r#"{
            "id": "42",
            "title": "Deep Dive",
            "description": "Long talks",
            "image": "",
            "updated": "2023-01-01T00:00:00.000Z",
            "genres": ["History"],
            "seasons": [
                {"season": 7, "title": "Seven", "image": "", "episodes": [
                    {"title": "Pilot", "description": "", "episode": 3, "file": "https://example.test/a.mp3"},
                    {"title": "Loose", "description": ""}
                ]},
                {"title": "Unnumbered", "episodes": []}
            ]
        }"#;

        let show: Show = serde_json::from_str(raw).expect("show should parse");
        assert_eq!(show.id, "42");
        assert_eq!(show.seasons.len(), 2);
        assert_eq!(show.seasons[0].display_number(0), "7");
        assert_eq!(show.seasons[1].display_number(1), "2");

        let episodes = &show.seasons[0].episodes;
        assert_eq!(episodes[0].display_number(0), "3");
        assert_eq!(episodes[1].display_number(1), "2");
        assert_eq!(
            episodes[0].audio_file_url.as_deref(),
            Some("https://example.test/a.mp3")
        );
        assert_eq!(episodes[1].audio_file_url, None);
    }

    #[test]
    fn season_display_numbers_fall_back_to_position() {
        let seasons = vec![
            Season {
                season_number: None,
                title: "a".to_string(),
                image: String::new(),
                episodes: Vec::new(),
            },
            Season {
                season_number: Some(5),
                title: "b".to_string(),
                image: String::new(),
                episodes: Vec::new(),
            },
            Season {
                season_number: None,
                title: "c".to_string(),
                image: String::new(),
                episodes: Vec::new(),
            },
        ];
        assert_eq!(season_display_numbers(&seasons), vec!["1", "5", "3"]);
    }
}
