use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, List, ListItem, ListState, Padding, Paragraph, Row,
    Table, Wrap,
};

use crate::genres::resolve_genre_titles;
use crate::model::{Genre, Preview, Show};

use super::super::library::{format_updated, truncate};
use super::super::navigator::SeasonNavigator;
use super::super::page::{LineKind, ShowPage};
use super::TuiState;

const ACCENT: Color = Color::Rgb(110, 170, 255);
const MUTED: Color = Color::Rgb(185, 195, 210);
const TEXT: Color = Color::Rgb(230, 235, 242);

pub(super) fn draw_tui(frame: &mut Frame, state: &mut TuiState) {
    let bg = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(bg, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, state, chunks[0]);
    draw_library(frame, state, chunks[1]);

    let command_bar = Paragraph::new(controls_line(state))
        .alignment(Alignment::Center)
        .block(panel_block("Controls"));
    frame.render_widget(command_bar, chunks[2]);

    let status_widget = Paragraph::new(state.status.clone())
        .style(status_style(&state.status))
        .block(panel_block("Status"));
    frame.render_widget(status_widget, chunks[3]);

    if state.detail_open {
        draw_detail(frame, state);
    }
    if let Some(cursor) = state.picker {
        draw_season_picker(frame, &state.navigator, cursor);
    }
}

fn draw_header(frame: &mut Frame, state: &TuiState, area: Rect) {
    let filter_text = if state.filter.is_empty() {
        "-".to_string()
    } else {
        truncate(&state.filter, 24)
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "PODSHELF",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(
            format!("{} shows", state.visible.len()),
            Style::default().fg(MUTED),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(
            format!("filter {filter_text}"),
            Style::default().fg(MUTED),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(state.sort.label(), Style::default().fg(Color::Yellow)),
        Span::styled(
            if is_fetching(state) { "   fetching..." } else { "" },
            Style::default().fg(ACCENT),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(panel_block("Podcasts"));
    frame.render_widget(header, area);
}

fn draw_library(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
        .split(area);

    if let Some(message) = state.previews.state().error() {
        let failed = Paragraph::new(format!("{message}\n\nPress r to retry."))
            .style(Style::default().fg(Color::Rgb(255, 145, 120)))
            .wrap(Wrap { trim: true })
            .block(panel_block("Library"));
        frame.render_widget(failed, body_chunks[0]);
        return;
    }
    if state.previews.state().loaded().is_none() {
        let loading = Paragraph::new("Loading shows...")
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center)
            .block(panel_block("Library"));
        frame.render_widget(loading, body_chunks[0]);
        return;
    }

    let previews = state.previews.previews();
    let rows: Vec<Row> = state
        .visible
        .iter()
        .map(|&idx| {
            let preview = &previews[idx];
            Row::new(vec![
                Cell::from(preview.title.clone()),
                Cell::from(preview.seasons_count.to_string()),
                Cell::from(resolve_genre_titles(&preview.genre_ids, &state.genres).join(", ")),
                Cell::from(format_updated(&preview.updated_at)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(44),
            Constraint::Length(8),
            Constraint::Percentage(32),
            Constraint::Length(11),
        ],
    )
    .header(
        Row::new(vec!["Title", "Seasons", "Genres", "Updated"])
            .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
    )
    .block(panel_block("Library"))
    .row_highlight_style(
        Style::default()
            .bg(ACCENT)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("▸ ");
    frame.render_stateful_widget(table, body_chunks[0], &mut state.table_state);

    let selection_text = match state
        .table_state
        .selected()
        .and_then(|pos| state.visible.get(pos))
        .and_then(|&idx| previews.get(idx))
    {
        Some(preview) => preview_summary(preview, &state.genres),
        None if previews.is_empty() => "No shows available.".to_string(),
        None => "No shows match the filter.\n\nPress / to edit it.".to_string(),
    };
    let selection = Paragraph::new(selection_text)
        .style(Style::default().fg(TEXT))
        .wrap(Wrap { trim: true })
        .block(panel_block("Selected"));
    frame.render_widget(selection, body_chunks[1]);
}

fn draw_detail(frame: &mut Frame, state: &TuiState) {
    let area = centered_percent_rect(90, 86, frame.area());
    render_popup_shadow(frame, area);
    frame.render_widget(Clear, area);

    let title = match state.detail.show() {
        Some(show) => truncate(&show.title, 60),
        None => format!("Show {}", state.detail.show_id().unwrap_or("-")),
    };
    let block = modal_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(message) = state.detail.state().error() {
        let failed = Paragraph::new(format!("{message}\n\n[r] Retry   [Esc] Close"))
            .style(Style::default().fg(Color::Rgb(255, 145, 120)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(failed, inner);
        return;
    }
    let Some(show) = state.detail.show() else {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center);
        frame.render_widget(loading, inner);
        return;
    };

    let nav_height = if state.navigator.is_active() { 1 } else { 0 };
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(nav_height),
            Constraint::Min(1),
        ])
        .split(inner);

    let meta = Paragraph::new(show_meta(show)).style(Style::default().fg(MUTED));
    frame.render_widget(meta, parts[0]);

    if state.navigator.is_active() {
        frame.render_widget(Paragraph::new(season_bar(&state.navigator)), parts[1]);
    }

    frame.render_widget(page_paragraph(&state.page), parts[2]);
}

fn is_fetching(state: &TuiState) -> bool {
    state.previews.state().is_loading() || state.detail.state().is_loading()
}

fn preview_summary(preview: &Preview, genres: &[Genre]) -> String {
    let mut text = format!(
        "Title\n{}\n\nGenres\n{}\n\nSeasons\n{}\n\nUpdated\n{}",
        truncate(&preview.title, 40),
        resolve_genre_titles(&preview.genre_ids, genres).join(", "),
        preview.seasons_count,
        format_updated(&preview.updated_at),
    );
    if !preview.image.trim().is_empty() {
        text.push_str(&format!("\n\nCover\n{}", preview.image.trim()));
    }
    text.push_str(&format!("\n\n{}", truncate(preview.description.trim(), 320)));
    text
}

/// Three lines above the season bar: genres, dates and counts, then ID and cover.
fn show_meta(show: &Show) -> String {
    let genres = if show.genres.is_empty() {
        "-".to_string()
    } else {
        show.genres.join(", ")
    };
    let cover = match show.image.trim() {
        "" => "-",
        image => image,
    };
    format!(
        "Genres: {genres}\nUpdated: {}   Seasons: {}\nID: {}   Cover: {cover}",
        format_updated(&show.updated_at),
        show.seasons.len(),
        show.id,
    )
}

fn page_paragraph(page: &ShowPage) -> Paragraph<'static> {
    let lines: Vec<Line> = page
        .lines()
        .iter()
        .map(|line| {
            let style = match line.kind {
                LineKind::SeasonHeading => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                LineKind::Episode => Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
                LineKind::Audio => Style::default().fg(Color::Rgb(205, 165, 255)),
                LineKind::Text | LineKind::Blank => Style::default().fg(MUTED),
            };
            Line::styled(line.text.clone(), style)
        })
        .collect();
    let scroll = u16::try_from(page.scroll()).unwrap_or(u16::MAX);
    Paragraph::new(lines).scroll((scroll, 0))
}

fn season_bar(navigator: &SeasonNavigator) -> Line<'static> {
    let current = navigator
        .current_display_number()
        .unwrap_or("-")
        .to_string();
    Line::from(vec![
        Span::styled(
            " ◂ PREV ",
            pill_style(!navigator.is_previous_disabled()),
        ),
        Span::styled(" ", Style::default()),
        Span::styled(format!(" Season {current} "), pill_active()),
        Span::styled(" ", Style::default()),
        Span::styled(" NEXT ▸ ", pill_style(!navigator.is_next_disabled())),
        Span::styled(
            format!("   {} of {}", navigator.current_index() + 1, navigator.display_numbers().len()),
            Style::default().fg(MUTED),
        ),
    ])
}

fn draw_season_picker(frame: &mut Frame, navigator: &SeasonNavigator, cursor: usize) {
    let mut items = vec![ListItem::new("All seasons")];
    items.extend(
        navigator
            .display_numbers()
            .iter()
            .map(|number| ListItem::new(format!("Season {number}"))),
    );

    let height = u16::try_from(items.len()).unwrap_or(u16::MAX).saturating_add(4);
    let area = centered_fixed_rect(32, height.min(20), frame.area());
    render_popup_shadow(frame, area);
    frame.render_widget(Clear, area);

    let list = List::new(items)
        .block(modal_block("Jump to season".to_string()))
        .style(Style::default().fg(TEXT))
        .highlight_style(pill_active())
        .highlight_symbol("▸ ");
    let mut list_state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn controls_line(state: &TuiState) -> Line<'static> {
    let hints = if state.picker.is_some() {
        "↑/↓ choose  Enter jump  Esc cancel".to_string()
    } else if state.detail_open {
        "←/→ season  s pick season  ↑/↓ PgUp/PgDn scroll  r retry  Esc close".to_string()
    } else if state.filter_editing {
        format!("Filter: {}▏  Enter/Esc done", state.filter)
    } else {
        "↑/↓ move  Enter open  o sort  / filter  r retry  q quit".to_string()
    };
    Line::from(Span::styled(hints, Style::default().fg(MUTED)))
}

fn panel_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(125, 135, 150)))
        .title(title)
}

fn modal_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(
            Style::default()
                .fg(Color::Rgb(160, 190, 235))
                .add_modifier(Modifier::BOLD),
        )
        .title(title)
        .padding(Padding::new(2, 2, 1, 1))
}

fn pill_active() -> Style {
    Style::default()
        .bg(ACCENT)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

fn pill_style(enabled: bool) -> Style {
    if enabled {
        Style::default().bg(Color::Rgb(72, 82, 96)).fg(TEXT)
    } else {
        Style::default()
            .bg(Color::Rgb(36, 40, 48))
            .fg(Color::Rgb(90, 96, 108))
    }
}

fn status_style(status: &str) -> Style {
    if status.starts_with("ERROR:") {
        Style::default()
            .fg(Color::Rgb(255, 145, 120))
            .add_modifier(Modifier::BOLD)
    } else if status.starts_with("INFO:") {
        Style::default().fg(Color::Rgb(205, 165, 255))
    } else {
        Style::default().fg(TEXT)
    }
}

fn centered_fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width.max(1));
    let clamped_height = height.min(area.height.max(1));
    let x = area.x + area.width.saturating_sub(clamped_width) / 2;
    let y = area.y + area.height.saturating_sub(clamped_height) / 2;
    Rect::new(x, y, clamped_width, clamped_height)
}

fn centered_percent_rect(width_pct: u16, height_pct: u16, area: Rect) -> Rect {
    let width = area.width.saturating_mul(width_pct) / 100;
    let height = area.height.saturating_mul(height_pct) / 100;
    centered_fixed_rect(width.max(1), height.max(1), area)
}

fn render_popup_shadow(frame: &mut Frame, popup_area: Rect) {
    let area = frame.area();
    let shadow = Rect::new(
        (popup_area.x + 1).min(area.x + area.width.saturating_sub(1)),
        (popup_area.y + 1).min(area.y + area.height.saturating_sub(1)),
        popup_area.width.saturating_sub(1),
        popup_area.height.saturating_sub(1),
    );
    if shadow.width == 0 || shadow.height == 0 {
        return;
    }
    let shadow_block = Block::default().style(Style::default().bg(Color::Rgb(14, 16, 24)));
    frame.render_widget(shadow_block, shadow);
}
