use crossterm::event::KeyCode;

use super::super::library::visible_previews;
use super::super::loading::LoadState;
use super::super::page::ShowPage;
use super::TuiState;

const PAGE_STEP: isize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyOutcome {
    Continue,
    Quit,
}

pub(super) fn status_info(msg: &str) -> String {
    format!("INFO: {msg}")
}

pub(super) fn status_error(msg: &str) -> String {
    format!("ERROR: {msg}")
}

pub(super) fn handle_key(state: &mut TuiState, code: KeyCode) -> KeyOutcome {
    if state.picker.is_some() {
        handle_picker_key(state, code);
        return KeyOutcome::Continue;
    }
    if state.detail_open {
        handle_detail_key(state, code);
        return KeyOutcome::Continue;
    }
    if state.filter_editing {
        handle_filter_key(state, code);
        return KeyOutcome::Continue;
    }
    handle_library_key(state, code)
}

fn handle_library_key(state: &mut TuiState, code: KeyCode) -> KeyOutcome {
    match code {
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Up => {
            if let Some(selected) = state.table_state.selected() {
                state.table_state.select(Some(selected.saturating_sub(1)));
            }
        }
        KeyCode::Down => {
            if let Some(selected) = state.table_state.selected()
                && !state.visible.is_empty()
            {
                let next = (selected + 1).min(state.visible.len().saturating_sub(1));
                state.table_state.select(Some(next));
            }
        }
        KeyCode::Char('o') => {
            state.sort = state.sort.cycle();
            let keep = selected_preview_id(state);
            refresh_visible(state, keep.as_deref());
            state.status = status_info(&format!("Sorted {}.", state.sort.label()));
        }
        KeyCode::Char('/') => {
            state.filter_editing = true;
            state.status = status_info("Type to filter titles, Enter/Esc when done.");
        }
        KeyCode::Char('r') => {
            if state.previews.retry() {
                state.status = status_info("Retrying show list...");
            }
        }
        KeyCode::Enter => open_selected_show(state),
        _ => {}
    }
    KeyOutcome::Continue
}

fn handle_filter_key(state: &mut TuiState, code: KeyCode) {
    let keep = selected_preview_id(state);
    match code {
        KeyCode::Enter | KeyCode::Esc => {
            state.filter_editing = false;
            state.status = status_info(&format!("{} shows match.", state.visible.len()));
            return;
        }
        KeyCode::Backspace => {
            state.filter.pop();
        }
        KeyCode::Char(ch) => state.filter.push(ch),
        _ => return,
    }
    refresh_visible(state, keep.as_deref());
}

fn handle_detail_key(state: &mut TuiState, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => close_detail(state),
        KeyCode::Left => {
            if state.navigator.previous(&mut state.page) {
                announce_season(state);
            }
        }
        KeyCode::Right => {
            if state.navigator.next(&mut state.page) {
                announce_season(state);
            }
        }
        KeyCode::Char('s') => {
            if state.navigator.is_active() {
                state.picker = Some(state.navigator.current_index() + 1);
            }
        }
        KeyCode::Up => state.page.scroll_by(-1),
        KeyCode::Down => state.page.scroll_by(1),
        KeyCode::PageUp => state.page.scroll_by(-PAGE_STEP),
        KeyCode::PageDown => state.page.scroll_by(PAGE_STEP),
        KeyCode::Char('r') => {
            if state.detail.retry() {
                state.status = status_info("Retrying...");
            }
        }
        _ => {}
    }
}

fn handle_picker_key(state: &mut TuiState, code: KeyCode) {
    let Some(cursor) = state.picker else {
        return;
    };
    let entries = state.navigator.display_numbers().len() + 1;
    match code {
        KeyCode::Esc => state.picker = None,
        KeyCode::Up => state.picker = Some(cursor.saturating_sub(1)),
        KeyCode::Down => state.picker = Some((cursor + 1).min(entries - 1)),
        KeyCode::Enter => {
            let value = match cursor {
                0 => String::new(),
                idx => state.navigator.display_numbers()[idx - 1].clone(),
            };
            state.picker = None;
            state.navigator.select_by_label(&value, &mut state.page);
            if !value.is_empty() {
                announce_season(state);
            }
        }
        _ => {}
    }
}

fn announce_season(state: &mut TuiState) {
    let label = state.navigator.selected_label();
    state.status = status_info(&format!("Season {label}"));
}

fn open_selected_show(state: &mut TuiState) {
    let Some(id) = selected_preview_id(state) else {
        return;
    };
    state.detail.set_show_id(Some(id.as_str()));
    state.detail_open = true;
    state.page = ShowPage::default();
    state.navigator.reset(&[]);
    state.status = status_info(&format!("Loading show {id}..."));
}

fn close_detail(state: &mut TuiState) {
    state.detail.set_show_id(None);
    state.detail_open = false;
    state.picker = None;
    state.page = ShowPage::default();
    state.navigator.reset(&[]);
    state.status = status_info("Ready.");
}

pub(super) fn apply_preview_update(state: &mut TuiState) {
    let keep = selected_preview_id(state);
    refresh_visible(state, keep.as_deref());
    state.status = match state.previews.state() {
        LoadState::Loaded(previews) if previews.is_empty() => status_info("No shows available."),
        LoadState::Loaded(previews) => status_info(&format!("Loaded {} shows.", previews.len())),
        LoadState::Failed(message) => status_error(&format!("{message} (press r to retry)")),
        LoadState::Idle | LoadState::Loading => state.status.clone(),
    };
}

pub(super) fn apply_detail_update(state: &mut TuiState) {
    state.page = state
        .detail
        .show()
        .map(ShowPage::from_show)
        .unwrap_or_default();
    state.navigator.reset(state.detail.seasons());
    state.picker = None;
    state.status = match state.detail.state() {
        LoadState::Loaded(show) => status_info(&format!(
            "{}: {} seasons.",
            show.title,
            show.seasons.len()
        )),
        LoadState::Failed(message) => status_error(message),
        LoadState::Idle | LoadState::Loading => state.status.clone(),
    };
}

fn selected_preview_id(state: &TuiState) -> Option<String> {
    let selected = state.table_state.selected()?;
    let idx = *state.visible.get(selected)?;
    state.previews.previews().get(idx).map(|p| p.id.clone())
}

pub(super) fn refresh_visible(state: &mut TuiState, preferred_id: Option<&str>) {
    let previews = state.previews.previews();
    state.visible = visible_previews(previews, &state.filter, state.sort);
    if state.visible.is_empty() {
        state.table_state.select(None);
        return;
    }

    if let Some(id) = preferred_id
        && let Some(pos) = state
            .visible
            .iter()
            .position(|&idx| previews[idx].id == id)
    {
        state.table_state.select(Some(pos));
        return;
    }

    match state.table_state.selected() {
        Some(selected) => state
            .table_state
            .select(Some(selected.min(state.visible.len() - 1))),
        None => state.table_state.select(Some(0)),
    }
}
