mod detail;
mod library;
mod loading;
mod navigator;
mod page;
mod tui;


use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::api::{PodcastClient, PodcastSource};
use crate::cli::{Cli, Command, SortArg};
use crate::config::Config;
use crate::genres::{GENRE_TABLE, resolve_genre_titles, standard_genres};

use self::library::{format_updated, truncate, visible_previews};
use self::page::ShowPage;

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(&cli);
    info!(base_url = %config.base_url, "starting");
    let client = PodcastClient::new(&config);

    match cli.command {
        Some(Command::List { sort, filter }) => run_list(&client, sort, filter.as_deref())?,
        Some(Command::Show { id }) => run_show(&client, &id)?,
        Some(Command::Genre { id }) => run_genre(&client, id)?,
        Some(Command::Genres) => run_genres(),
        Some(Command::Tui) | None => tui::run_tui(Arc::new(client))?,
    }

    Ok(())
}

fn run_list(client: &PodcastClient, sort: SortArg, filter: Option<&str>) -> Result<()> {
    let previews = client
        .fetch_previews()
        .context("failed to load show previews")?;
    let table = standard_genres();
    let visible = visible_previews(&previews, filter.unwrap_or(""), sort.into());
    if visible.is_empty() {
        println!("No shows match.");
        return Ok(());
    }

    println!(
        "{:<8} {:<40} {:<8} {:<12} GENRES",
        "ID", "TITLE", "SEASONS", "UPDATED"
    );
    for idx in visible {
        let preview = &previews[idx];
        println!(
            "{:<8} {:<40} {:<8} {:<12} {}",
            truncate(&preview.id, 8),
            truncate(&preview.title, 40),
            preview.seasons_count,
            format_updated(&preview.updated_at),
            resolve_genre_titles(&preview.genre_ids, &table).join(", ")
        );
    }
    Ok(())
}

fn run_show(client: &PodcastClient, show_id: &str) -> Result<()> {
    let show_id = show_id.trim();
    if show_id.is_empty() {
        bail!("no show id given");
    }
    let show = client
        .fetch_show(show_id)
        .with_context(|| format!("failed to load show {show_id}"))?;

    println!("{}", show.title);
    if !show.genres.is_empty() {
        println!("Genres: {}", show.genres.join(", "));
    }
    println!("Updated: {}", format_updated(&show.updated_at));
    println!("Seasons: {}", show.seasons.len());
    println!();
    for line in ShowPage::from_show(&show).lines() {
        println!("{}", line.text);
    }
    Ok(())
}

fn run_genre(client: &PodcastClient, genre_id: u32) -> Result<()> {
    let genre = client
        .fetch_genre(genre_id)
        .with_context(|| format!("failed to load genre {genre_id}"))?;
    println!("{:<4} {}", genre.id, genre.title);
    Ok(())
}

fn run_genres() {
    for (id, title) in GENRE_TABLE {
        println!("{id:<4} {title}");
    }
}
