use checklist::TaskRegistry;
use ratatui::widgets::ListState;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Tasks,
    Roadmap,
}

impl Tab {
    pub fn titles() -> [&'static str; 2] {
        ["Tasks", "Roadmap"]
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Tasks => 0,
            Tab::Roadmap => 1,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Tasks => Tab::Roadmap,
            Tab::Roadmap => Tab::Tasks,
        }
    }
}

/// What the input popup is currently collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    NewTask,
    Goal,
}

/// All user-facing state, owned exclusively by the UI thread.
pub struct AppState {
    pub registry: TaskRegistry,
    pub tab: Tab,
    pub list_state: ListState,
    pub input: Option<(InputKind, String)>,
    pub roadmap_title: Option<String>,
    pub status_message: String,
    pub error_message: Option<String>,
    pub generating: bool,
    pub generate_spent: bool,
    pub generate_once: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(registry: TaskRegistry, generate_once: bool) -> Self {
        let mut list_state = ListState::default();
        if !registry.is_empty() {
            list_state.select(Some(0));
        }

        AppState {
            registry,
            tab: Tab::Tasks,
            list_state,
            input: None,
            roadmap_title: None,
            status_message: "Ready. Press 'h' for keys.".to_string(),
            error_message: None,
            generating: false,
            generate_spent: false,
            generate_once,
            should_quit: false,
        }
    }

    /// Stable id of the selected task, if there is a selection.
    pub fn selected_task_id(&self) -> Option<Uuid> {
        self.list_state
            .selected()
            .and_then(|index| self.registry.get(index))
            .map(|task| task.id)
    }

    pub fn select_next(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(index) => (index + 1).min(self.registry.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let previous = match self.list_state.selected() {
            Some(index) => index.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(previous));
    }

    /// Re-anchor the selection after the list changed length.
    pub fn clamp_selection(&mut self) {
        if self.registry.is_empty() {
            self.list_state.select(None);
            return;
        }
        let last = self.registry.len() - 1;
        match self.list_state.selected() {
            Some(index) if index > last => self.list_state.select(Some(last)),
            None => self.list_state.select(Some(last)),
            _ => {}
        }
    }

    pub fn can_generate(&self) -> bool {
        !self.generating && !(self.generate_once && self.generate_spent)
    }

    pub fn begin_input(&mut self, kind: InputKind) {
        self.input = Some((kind, String::new()));
    }

    pub fn cancel_input(&mut self) {
        self.input = None;
    }

    pub fn push_input_char(&mut self, c: char) {
        if let Some((_, buffer)) = &mut self.input {
            buffer.push(c);
        }
    }

    pub fn pop_input_char(&mut self) {
        if let Some((_, buffer)) = &mut self.input {
            buffer.pop();
        }
    }

    pub fn take_input(&mut self) -> Option<(InputKind, String)> {
        self.input.take()
    }

    /// Append generated lines to the registry; returns how many were added.
    pub fn apply_generated_checklist(&mut self, lines: &[String]) -> usize {
        let added = self
            .registry
            .append_lines(lines.iter().map(String::as_str));
        self.generating = false;
        self.clamp_selection();
        self.set_status(format!("Added {added} generated tasks"));
        added
    }

    pub fn generation_failed(&mut self, message: String) {
        self.generating = false;
        self.set_error(message);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
