use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use checklist::{TaskRegistry, TaskStore};
use common::ErrorLog;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use llm::ChecklistGenerator;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap};
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;
use tracing::info;

use crate::events::{should_quit, EventHandler, UiEvent};
use crate::state::{AppState, InputKind, Tab};

type Backend = CrosstermBackend<Stdout>;

const TICK_RATE: Duration = Duration::from_millis(100);
const HELP_LINE: &str =
    "up/down select | a add | d remove | space toggle | g generate | Tab roadmap | q quit";

pub struct TuiApp {
    terminal: Terminal<Backend>,
    events: EventHandler,
    state: AppState,
    store: TaskStore,
    error_log: ErrorLog,
    generator: Arc<ChecklistGenerator>,
    runtime: Handle,
}

impl TuiApp {
    pub fn new(
        registry: TaskRegistry,
        store: TaskStore,
        error_log: ErrorLog,
        generator: ChecklistGenerator,
        runtime: Handle,
        generate_once: bool,
    ) -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("failed to initialise terminal")?;

        let events = EventHandler::new(TICK_RATE);
        let state = AppState::new(registry, generate_once);

        Ok(TuiApp {
            terminal,
            events,
            state,
            store,
            error_log,
            generator: Arc::new(generator),
            runtime,
        })
    }

    /// Surface a startup failure (e.g. an unreadable task file) as the first
    /// dialog of the session.
    pub fn with_startup_error(mut self, message: String) -> Self {
        self.state.set_error(message);
        self
    }

    pub fn run(&mut self) -> Result<()> {
        while !self.state.should_quit {
            let state = &mut self.state;
            self.terminal.draw(|frame| render(frame, state))?;
            self.handle_event()?;
        }
        Ok(())
    }

    fn handle_event(&mut self) -> Result<()> {
        match self.events.next()? {
            UiEvent::Key(key) => self.handle_key(key),
            UiEvent::Tick => {}
            UiEvent::Resize(width, height) => {
                self.terminal.resize(Rect::new(0, 0, width, height))?;
            }
            UiEvent::ChecklistReady(lines) => {
                let added = self.state.apply_generated_checklist(&lines);
                info!(added, "appended generated tasks");
                self.persist();
            }
            UiEvent::TitleReady(title) => {
                self.state.roadmap_title = Some(title);
                self.state.set_status("Roadmap title updated");
            }
            UiEvent::GenerationFailed(message) => {
                self.state.generation_failed(message);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // The error dialog is modal: nothing else reacts until dismissed.
        if self.state.error_message.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.dismiss_error();
            }
            return;
        }

        if self.state.input.is_some() {
            self.handle_input_key(key);
            return;
        }

        if should_quit(&key) {
            self.state.quit();
            return;
        }

        match key.code {
            KeyCode::Tab => self.state.tab = self.state.tab.next(),
            KeyCode::Up | KeyCode::Char('k') => self.state.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.state.select_next(),
            KeyCode::Char('a') => self.state.begin_input(InputKind::NewTask),
            KeyCode::Char('g') => {
                if self.state.can_generate() {
                    self.state.begin_input(InputKind::Goal);
                } else if self.state.generating {
                    self.state.set_status("Generation already running");
                } else {
                    self.state
                        .set_status("Generate has already been used this session");
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('h') => self.state.set_status(HELP_LINE),
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.cancel_input(),
            KeyCode::Enter => {
                if let Some((kind, text)) = self.state.take_input() {
                    match kind {
                        InputKind::NewTask => self.add_task(&text),
                        InputKind::Goal => self.start_generation(text),
                    }
                }
            }
            KeyCode::Backspace => self.state.pop_input_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.push_input_char(c)
            }
            _ => {}
        }
    }

    fn add_task(&mut self, text: &str) {
        if self.state.registry.add(text).is_some() {
            self.state.clamp_selection();
            self.state.set_status("Task added");
            self.persist();
        } else {
            self.state.set_status("Empty task ignored");
        }
    }

    fn remove_selected(&mut self) {
        // No selection is a silent no-op, not an error.
        let Some(id) = self.state.selected_task_id() else {
            return;
        };
        if self.state.registry.remove(id) {
            self.state.clamp_selection();
            self.state.set_status("Task removed");
            self.persist();
        }
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.state.selected_task_id() else {
            return;
        };
        if self.state.registry.toggle(id).is_some() {
            self.persist();
        }
    }

    fn start_generation(&mut self, goal: String) {
        let goal = goal.trim().to_string();
        if goal.is_empty() {
            self.state.set_status("Empty goal ignored");
            return;
        }

        self.state.generating = true;
        self.state.generate_spent = true;
        self.state.set_status("Generating checklist...");
        info!(%goal, "starting checklist generation");

        let generator = Arc::clone(&self.generator);
        let sender = self.events.sender();
        let error_log = self.error_log.clone();
        self.runtime.spawn(async move {
            match generator.checklist(&goal).await {
                Ok(lines) => {
                    let _ = sender.send(UiEvent::ChecklistReady(lines));
                }
                Err(err) => {
                    error_log.record("generate checklist", &err);
                    let _ = sender.send(UiEvent::GenerationFailed(
                        error_log.dialog_message("Failed to generate tasks"),
                    ));
                    return;
                }
            }

            match generator.roadmap_title(&goal).await {
                Ok(title) => {
                    let _ = sender.send(UiEvent::TitleReady(title));
                }
                Err(err) => {
                    error_log.record("generate roadmap title", &err);
                    let _ = sender.send(UiEvent::GenerationFailed(
                        error_log.dialog_message("Failed to generate roadmap title"),
                    ));
                }
            }
        });
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(self.state.registry.tasks()) {
            let err = anyhow::Error::new(err);
            self.error_log.record("save tasks", &err);
            self.state
                .set_error(self.error_log.dialog_message("Failed to save tasks"));
        }
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn render(frame: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_tabs(frame, chunks[0], state);
    match state.tab {
        Tab::Tasks => render_task_list(frame, chunks[1], state),
        Tab::Roadmap => render_roadmap(frame, chunks[1], state),
    }
    render_status_bar(frame, chunks[2], state);

    if state.input.is_some() {
        render_input_popup(frame, state);
    }
    if state.error_message.is_some() {
        render_error_popup(frame, state);
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, state: &AppState) {
    let tabs = Tabs::new(Tab::titles().to_vec())
        .select(state.tab.index())
        .block(Block::default().borders(Borders::ALL).title("ticklist"))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_task_list(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let items: Vec<ListItem> = state
        .registry
        .render_lines()
        .into_iter()
        .map(ListItem::new)
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Tasks"))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state.list_state);
}

fn render_roadmap(frame: &mut Frame, area: Rect, state: &AppState) {
    let body = match (&state.roadmap_title, state.generating) {
        (Some(title), _) => Line::from(Span::styled(
            title.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        (None, true) => Line::from("Generating..."),
        (None, false) => Line::from("No roadmap yet. Press 'g' to generate one."),
    };

    let paragraph = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title("Roadmap"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![
        Span::styled("Status: ", Style::default().fg(Color::Cyan)),
        Span::raw(state.status_message.clone()),
    ];
    if state.generating {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "generating",
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        "'h' for keys",
        Style::default().fg(Color::DarkGray),
    ));

    let status = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn render_input_popup(frame: &mut Frame, state: &AppState) {
    let Some((kind, buffer)) = &state.input else {
        return;
    };
    let title = match kind {
        InputKind::NewTask => "New task",
        InputKind::Goal => "What is your goal?",
    };

    let area = centered_rect(60, 3, frame.area());
    frame.render_widget(Clear, area);
    let input = Paragraph::new(format!("{buffer}_"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(title),
        );
    frame.render_widget(input, area);
}

fn render_error_popup(frame: &mut Frame, state: &AppState) {
    let Some(message) = &state.error_message else {
        return;
    };

    let area = centered_rect(60, 5, frame.area());
    frame.render_widget(Clear, area);
    let dialog = Paragraph::new(vec![
        Line::from(message.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Error"),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(dialog, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, popup_width, height.min(area.height))
}
