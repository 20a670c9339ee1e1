use crate::model::{Season, season_display_numbers};

/// Something that can bring a season's section to the top of the viewport.
pub(crate) trait SeasonAnchors {
    /// Returns false when no section is keyed by `display_number`.
    fn scroll_to_anchor(&mut self, display_number: &str) -> bool;
}

type SelectCallback = Box<dyn FnMut(&str)>;

/// Previous/next/jump navigation over the seasons of one loaded show.
///
/// The owner calls [`SeasonNavigator::reset`] whenever it replaces the season
/// list; position is never carried over between lists.
pub(crate) struct SeasonNavigator {
    display_numbers: Vec<String>,
    current_index: usize,
    selected_label: String,
    on_select: Option<SelectCallback>,
}

impl SeasonNavigator {
    pub(crate) fn new() -> Self {
        Self {
            display_numbers: Vec::new(),
            current_index: 0,
            selected_label: String::new(),
            on_select: None,
        }
    }

    pub(crate) fn with_on_select(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub(crate) fn reset(&mut self, seasons: &[Season]) {
        self.display_numbers = season_display_numbers(seasons);
        self.current_index = 0;
        self.selected_label.clear();
    }

    /// Nothing is rendered and every operation is a no-op without seasons.
    pub(crate) fn is_active(&self) -> bool {
        !self.display_numbers.is_empty()
    }

    pub(crate) fn current_index(&self) -> usize {
        self.current_index
    }

    pub(crate) fn selected_label(&self) -> &str {
        &self.selected_label
    }

    pub(crate) fn display_numbers(&self) -> &[String] {
        &self.display_numbers
    }

    pub(crate) fn current_display_number(&self) -> Option<&str> {
        self.display_numbers
            .get(self.current_index)
            .map(String::as_str)
    }

    pub(crate) fn is_previous_disabled(&self) -> bool {
        self.current_index == 0
    }

    pub(crate) fn is_next_disabled(&self) -> bool {
        self.current_index + 1 >= self.display_numbers.len()
    }

    pub(crate) fn next(&mut self, anchors: &mut impl SeasonAnchors) -> bool {
        if !self.is_active() || self.is_next_disabled() {
            return false;
        }
        self.move_to(self.current_index + 1, anchors);
        true
    }

    pub(crate) fn previous(&mut self, anchors: &mut impl SeasonAnchors) -> bool {
        if !self.is_active() || self.is_previous_disabled() {
            return false;
        }
        self.move_to(self.current_index - 1, anchors);
        true
    }

    /// Jump to the season whose display number equals `value`.
    ///
    /// An empty value only clears the label. An unknown value keeps the index
    /// but still becomes the label, is scrolled to and is reported.
    pub(crate) fn select_by_label(&mut self, value: &str, anchors: &mut impl SeasonAnchors) {
        if !self.is_active() {
            return;
        }
        if value.is_empty() {
            self.selected_label.clear();
            return;
        }

        if let Some(idx) = self
            .display_numbers
            .iter()
            .position(|number| number == value)
        {
            self.current_index = idx;
        }
        self.selected_label = value.to_string();
        self.scroll_to_season(value, anchors);
        self.notify(value);
    }

    pub(crate) fn scroll_to_season(&self, display_number: &str, anchors: &mut impl SeasonAnchors) {
        if !anchors.scroll_to_anchor(display_number) {
            tracing::debug!(display_number, "no section for season");
        }
    }

    fn move_to(&mut self, index: usize, anchors: &mut impl SeasonAnchors) {
        self.current_index = index;
        let label = self.display_numbers[index].clone();
        self.selected_label.clone_from(&label);
        self.scroll_to_season(&label, anchors);
        self.notify(&label);
    }

    fn notify(&mut self, display_number: &str) {
        if let Some(callback) = self.on_select.as_mut() {
            callback(display_number);
        }
    }
}

impl Default for SeasonNavigator {
    fn default() -> Self {
        Self::new()
    }
}
