use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use engine::{Controller, EngineError, FormField, HttpClient, PendingDelete, lookup::Named};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{self, AppAction},
    },
};

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Field(FormField),
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Table => Self::Field(FormField::Member),
            Self::Field(field) => field.next().map(Self::Field).unwrap_or(Self::Table),
        }
    }

    fn prev(self) -> Self {
        let mut prev = Self::Table;
        for field in FormField::ALL {
            if self == Self::Field(field) {
                return prev;
            }
            prev = Self::Field(field);
        }
        prev
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    shown_at: Instant,
}

#[derive(Debug)]
pub struct AppState {
    pub controller: Controller<HttpClient>,
    pub focus: Focus,
    pub selected: usize,
    pub pending_delete: Option<PendingDelete>,
    pub toast: Option<ToastState>,
    pub refresh_requested: bool,
    pub base_url: String,
}

impl AppState {
    pub fn new(controller: Controller<HttpClient>, base_url: String) -> Self {
        Self {
            controller,
            focus: Focus::Table,
            selected: 0,
            pending_delete: None,
            toast: None,
            refresh_requested: true,
            base_url,
        }
    }

    /// True while the table should show the loading placeholder.
    pub fn is_loading(&self) -> bool {
        self.refresh_requested || self.controller.cache().is_loading()
    }

    fn notify(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            shown_at: Instant::now(),
        });
    }

    fn selected_id(&self) -> Option<i64> {
        self.controller
            .cache()
            .transactions()
            .get(self.selected)
            .map(|tx| tx.transaction_id)
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.cache().transactions().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn select_next(&mut self) {
        let len = self.controller.cache().transactions().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

pub struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = HttpClient::new(&config.base_url)?;
        let controller = Controller::builder(client)
            .timezone(&config.timezone)?
            .build();
        tracing::info!("using backend {}", config.base_url);

        Ok(Self {
            state: AppState::new(controller, config.base_url),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if self.state.refresh_requested {
                self.refresh().await;
                continue;
            }

            if self
                .state
                .toast
                .as_ref()
                .is_some_and(|toast| toast.shown_at.elapsed() > TOAST_TTL)
            {
                self.state.toast = None;
            }

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key).await;
                }
            }
        }

        Ok(())
    }

    async fn refresh(&mut self) {
        self.state.refresh_requested = false;
        if let Err(err) = self.state.controller.refresh().await {
            self.state.notify(ToastLevel::Error, err.to_string());
        }
        self.state.clamp_selection();
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let action = keymap::map_key(key);

        if self.state.pending_delete.is_some() {
            self.handle_confirm(action).await;
            return;
        }

        match (self.state.focus, action) {
            (_, AppAction::Quit) => self.should_quit = true,
            (focus, AppAction::NextField) => self.state.focus = focus.next(),
            (focus, AppAction::PrevField) => self.state.focus = focus.prev(),
            (Focus::Table, action) => self.handle_table(action),
            (Focus::Field(field), action) => self.handle_field(field, action).await,
        }
    }

    fn handle_table(&mut self, action: AppAction) {
        let state = &mut self.state;
        match action {
            AppAction::Up => state.select_prev(),
            AppAction::Down => state.select_next(),
            AppAction::Submit | AppAction::Input('e') => {
                if let Some(id) = state.selected_id() {
                    if state.controller.edit_cached(id) {
                        state.focus = Focus::Field(FormField::Member);
                    }
                }
            }
            AppAction::Input('d') => {
                if let Some(id) = state.selected_id() {
                    state.pending_delete = Some(state.controller.request_delete(id));
                }
            }
            AppAction::Input('n') => {
                state.controller.start_create();
                state.focus = Focus::Field(FormField::Member);
            }
            AppAction::Input('r') => state.refresh_requested = true,
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Cancel => state.controller.start_create(),
            _ => {}
        }
    }

    async fn handle_field(&mut self, field: FormField, action: AppAction) {
        let state = &mut self.state;
        match action {
            AppAction::Input(ch) => state.controller.field_mut(field).push(ch),
            AppAction::Backspace => {
                state.controller.field_mut(field).pop();
            }
            AppAction::Up | AppAction::Down => {
                let forward = action == AppAction::Down;
                let cache = state.controller.cache();
                let ids = match field {
                    FormField::Member => option_ids(cache.members()),
                    FormField::Game => option_ids(cache.games()),
                    _ => return,
                };
                let current = state.controller.form().field(field);
                if let Some(id) = cycle_option(&ids, current, forward) {
                    state.controller.set_field(field, id.to_string());
                }
            }
            AppAction::Cancel => {
                state.controller.start_create();
                state.focus = Focus::Table;
            }
            AppAction::Submit => self.submit().await,
            _ => {}
        }
    }

    async fn submit(&mut self) {
        let state = &mut self.state;
        match state.controller.submit().await {
            Ok(outcome) => {
                let (level, message) =
                    write_toast(outcome.saved.message(), &outcome.refresh);
                state.notify(level, message);
                state.focus = Focus::Table;
                state.clamp_selection();
            }
            Err(err) => state.notify(ToastLevel::Error, err.to_string()),
        }
    }

    async fn handle_confirm(&mut self, action: AppAction) {
        let state = &mut self.state;
        match action {
            AppAction::Input('y' | 'Y') | AppAction::Submit => {
                let Some(pending) = state.pending_delete.take() else {
                    return;
                };
                match state.controller.confirm_delete(pending).await {
                    Ok(outcome) => {
                        let done = format!("Transaction {} deleted.", outcome.id);
                        let (level, message) = write_toast(&done, &outcome.refresh);
                        state.notify(level, message);
                        state.clamp_selection();
                    }
                    Err(err) => state.notify(ToastLevel::Error, err.to_string()),
                }
            }
            AppAction::Input('n' | 'N') | AppAction::Cancel => {
                state.pending_delete = None;
            }
            _ => {}
        }
    }
}

/// One toast for a write that went through: the refresh error, if any, is
/// appended so the confirmation is never lost.
fn write_toast(
    done: &str,
    refresh: &std::result::Result<(), EngineError>,
) -> (ToastLevel, String) {
    match refresh {
        Ok(()) => (ToastLevel::Success, done.to_string()),
        Err(err) => (ToastLevel::Error, format!("{done} {err}")),
    }
}

fn option_ids<T: Named>(items: &[T]) -> Vec<i64> {
    items.iter().map(Named::id).collect()
}

/// Next (or previous) option after `current`, wrapping around.
///
/// An empty or unknown `current` starts from the first (or last) option.
fn cycle_option(ids: &[i64], current: &str, forward: bool) -> Option<i64> {
    if ids.is_empty() {
        return None;
    }
    let position = current
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|id| ids.iter().position(|candidate| *candidate == id));

    let idx = match (position, forward) {
        (None, true) => 0,
        (None, false) => ids.len() - 1,
        (Some(idx), true) => (idx + 1) % ids.len(),
        (Some(idx), false) => (idx + ids.len() - 1) % ids.len(),
    };
    ids.get(idx).copied()
}
