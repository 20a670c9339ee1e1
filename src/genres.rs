use crate::model::Genre;

/// Genre titles known to the API, embedded so listing rows need no extra requests.
pub(crate) const GENRE_TABLE: [(u32, &str); 9] = [
    (1, "Personal Growth"),
    (2, "Investigative Journalism"),
    (3, "History"),
    (4, "Comedy"),
    (5, "Entertainment"),
    (6, "Business"),
    (7, "Fiction"),
    (8, "News"),
    (9, "Kids and Family"),
];

pub(crate) fn standard_genres() -> Vec<Genre> {
    GENRE_TABLE
        .iter()
        .map(|(id, title)| Genre {
            id: *id,
            title: (*title).to_string(),
        })
        .collect()
}

pub(crate) fn resolve_genre_titles(genre_ids: &[u32], table: &[Genre]) -> Vec<String> {
    genre_ids
        .iter()
        .map(|id| {
            table
                .iter()
                .find(|genre| genre.id == *id)
                .map(|genre| genre.title.clone())
                .unwrap_or_else(|| format!("Unknown ({id})"))
        })
        .collect()
}
