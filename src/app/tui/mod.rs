mod actions;
mod render;
mod session;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::TableState;

use crate::api::PodcastSource;
use crate::genres::standard_genres;
use crate::model::Genre;

use super::detail::DetailLoader;
use super::library::{PreviewLoader, SortOrder};
use super::navigator::SeasonNavigator;
use super::page::ShowPage;

use self::actions::{KeyOutcome, apply_detail_update, apply_preview_update, handle_key};
use self::render::draw_tui;
use self::session::TerminalSession;

/// Everything the browser shows, owned by the event loop thread.
pub(super) struct TuiState {
    pub(super) genres: Vec<Genre>,
    pub(super) previews: PreviewLoader,
    pub(super) visible: Vec<usize>,
    pub(super) table_state: TableState,
    pub(super) sort: SortOrder,
    pub(super) filter: String,
    pub(super) filter_editing: bool,
    pub(super) detail: DetailLoader,
    pub(super) detail_open: bool,
    pub(super) navigator: SeasonNavigator,
    pub(super) page: ShowPage,
    /// Season picker cursor; 0 is the empty "all seasons" entry.
    pub(super) picker: Option<usize>,
    pub(super) status: String,
}

impl TuiState {
    pub(super) fn new(source: Arc<dyn PodcastSource>) -> Self {
        let navigator = SeasonNavigator::new().with_on_select(|display_number| {
            tracing::debug!(display_number, "season selected");
        });
        Self {
            genres: standard_genres(),
            previews: PreviewLoader::new(Arc::clone(&source)),
            visible: Vec::new(),
            table_state: TableState::default(),
            sort: SortOrder::TitleAsc,
            filter: String::new(),
            filter_editing: false,
            detail: DetailLoader::new(source),
            detail_open: false,
            navigator,
            page: ShowPage::default(),
            picker: None,
            status: actions::status_info("Loading shows..."),
        }
    }
}

pub(crate) fn run_tui(source: Arc<dyn PodcastSource>) -> Result<()> {
    let session = TerminalSession::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("failed to initialize terminal backend")?;
    terminal.clear()?;

    let mut state = TuiState::new(source);
    state.previews.load();

    loop {
        if state.previews.poll() {
            apply_preview_update(&mut state);
        }
        if state.detail.poll() {
            apply_detail_update(&mut state);
        }

        terminal.draw(|frame| draw_tui(frame, &mut state))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if handle_key(&mut state, key.code) == KeyOutcome::Quit {
            break;
        }
    }

    terminal.show_cursor()?;
    drop(session);
    Ok(())
}
