//! Application shell: screens, key routing, and the event loop.
//!
//! One cooperative loop `select!`s over terminal events and the tracking
//! ticker. Operations are awaited inline, so at most one request is in
//! flight at a time and responses apply in the order the user issued them.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::warn;

use traq_api::ApiClient;
use traq_auth::{clear_session, load_session, save_session, session_file_path, SessionStorage};
use traq_core::TaskStatus;
use traq_settings::TraqSettings;

use crate::auth_view::{SignInForm, SignUpForm};
use crate::ui;
use crate::view::TaskListView;

/// Which screen the shell is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Token entry.
    SignIn,
    /// Registration form.
    SignUp,
    /// The task list.
    Tasks,
}

/// Keyboard focus within the task screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    /// The task list itself.
    #[default]
    List,
    /// The title-search input.
    Search,
    /// The draft title input.
    DraftTitle,
    /// The draft status selector.
    DraftStatus,
}

/// Top-level application state.
pub struct App {
    settings: TraqSettings,
    data_dir: PathBuf,
    /// Active screen.
    pub screen: Screen,
    /// Focus within the task screen.
    pub focus: Focus,
    /// Task list view-model.
    pub view: TaskListView,
    /// Sign-up form state.
    pub sign_up: SignUpForm,
    /// Sign-in form state.
    pub sign_in: SignInForm,
    /// Short label for the signed-in user, shown in the top bar.
    pub user_label: String,
    /// Set when the user asked to quit.
    pub should_quit: bool,
    sign_up_succeeded: bool,
    ticker_reset_pending: bool,
}

impl App {
    /// Build the shell, routing straight to the task screen when a stored
    /// session exists.
    pub fn new(settings: TraqSettings, data_dir: PathBuf) -> Self {
        let session = load_session(&session_file_path(&data_dir));
        let (screen, api, user_label) = match session {
            Some(session) => {
                let api = base_client(&settings).with_access_token(session.access_token.clone());
                (Screen::Tasks, api, session.display_name().to_string())
            }
            None => (Screen::SignIn, base_client(&settings), String::new()),
        };
        Self {
            settings,
            data_dir,
            screen,
            focus: Focus::default(),
            view: TaskListView::new(api),
            sign_up: SignUpForm::default(),
            sign_in: SignInForm::default(),
            user_label,
            should_quit: false,
            sign_up_succeeded: false,
            ticker_reset_pending: false,
        }
    }

    /// Ticker period from settings.
    pub fn tick_ms(&self) -> u64 {
        self.settings.ui.tick_ms
    }

    /// Consume the pending ticker reset, set when tracking just started.
    pub fn take_ticker_reset(&mut self) -> bool {
        std::mem::take(&mut self.ticker_reset_pending)
    }

    /// Route a key press to the active screen.
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.screen {
            Screen::SignIn => self.handle_sign_in_key(key).await,
            Screen::SignUp => self.handle_sign_up_key(key).await,
            Screen::Tasks => self.handle_tasks_key(key).await,
        }
    }

    // ── Sign-in ─────────────────────────────────────────────────────────────

    async fn handle_sign_in_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.screen = Screen::SignUp,
            KeyCode::Backspace => self.sign_in.backspace(),
            KeyCode::Enter => {
                if let Some(token) = self.sign_in.take_token() {
                    self.sign_in_with(token).await;
                }
            }
            KeyCode::Char(c) => self.sign_in.type_char(c),
            _ => {}
        }
    }

    /// Persist the session and enter the task screen.
    async fn sign_in_with(&mut self, token: String) {
        let mut session = SessionStorage::new(token.clone());
        let path = session_file_path(&self.data_dir);
        if let Err(e) = save_session(&path, &mut session) {
            warn!(error = %e, "failed to persist session");
        }
        self.user_label = session.display_name().to_string();
        self.view = TaskListView::new(base_client(&self.settings).with_access_token(token));
        self.screen = Screen::Tasks;
        self.focus = Focus::List;
        self.view.fetch_tasks().await;
    }

    /// Drop the stored session and return to sign-in.
    fn sign_out(&mut self) {
        if let Err(e) = clear_session(&session_file_path(&self.data_dir)) {
            warn!(error = %e, "failed to clear session");
        }
        self.user_label.clear();
        self.view = TaskListView::new(base_client(&self.settings));
        self.screen = Screen::SignIn;
    }

    // ── Sign-up ─────────────────────────────────────────────────────────────

    async fn handle_sign_up_key(&mut self, key: KeyEvent) {
        // A notice blocks the form until dismissed.
        if self.sign_up.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.sign_up.dismiss_notice();
                if std::mem::take(&mut self.sign_up_succeeded) {
                    self.screen = Screen::SignIn;
                }
            }
            return;
        }
        match key.code {
            KeyCode::Esc => self.screen = Screen::SignIn,
            KeyCode::Tab => self.sign_up.focus_next(),
            KeyCode::Backspace => self.sign_up.backspace(),
            KeyCode::Enter => {
                let api = base_client(&self.settings);
                self.sign_up_succeeded = self.sign_up.submit(&api).await;
            }
            KeyCode::Char(c) => self.sign_up.type_char(c),
            _ => {}
        }
    }

    // ── Task screen ─────────────────────────────────────────────────────────

    async fn handle_tasks_key(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::List => self.handle_list_key(key).await,
            Focus::Search => self.handle_search_key(key).await,
            Focus::DraftTitle | Focus::DraftStatus => self.handle_draft_key(key).await,
        }
    }

    async fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.view.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.view.select_previous(),
            KeyCode::Char('r') => self.view.fetch_tasks().await,
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('n') => {
                self.view.cancel_edit();
                self.focus = Focus::DraftTitle;
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.view.selected_task().cloned() {
                    self.view.edit_task(task);
                    self.focus = Focus::DraftTitle;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.view.selected_task().map(|t| t.id) {
                    self.view.delete_task(id).await;
                }
            }
            KeyCode::Char('t') | KeyCode::Char(' ') => self.toggle_tracking().await,
            KeyCode::Char('o') => self.sign_out(),
            _ => {}
        }
    }

    async fn toggle_tracking(&mut self) {
        if let Some(id) = self.view.tracking_task_id() {
            self.view.stop_tracking(id).await;
        } else if let Some(id) = self.view.selected_task().map(|t| t.id) {
            self.view.start_tracking(id).await;
            if self.view.is_tracking() {
                // The next tick should land a full period from now.
                self.ticker_reset_pending = true;
            }
        }
    }

    async fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Backspace => {
                let _ = self.view.search_title.pop();
            }
            KeyCode::Enter => {
                self.view.search_tasks().await;
                self.focus = Focus::List;
            }
            KeyCode::Char(c) => self.view.search_title.push(c),
            _ => {}
        }
    }

    async fn handle_draft_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.view.cancel_edit();
                self.focus = Focus::List;
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::DraftStatus => Focus::DraftTitle,
                    _ => Focus::DraftStatus,
                };
            }
            KeyCode::Enter => {
                self.view.submit_draft().await;
                self.focus = Focus::List;
            }
            KeyCode::Backspace if self.focus == Focus::DraftTitle => {
                let _ = self.view.draft.title.pop();
            }
            KeyCode::Char(c) if self.focus == Focus::DraftTitle => {
                self.view.draft.title.push(c);
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Char(' ')
                if self.focus == Focus::DraftStatus =>
            {
                self.cycle_draft_status(key.code == KeyCode::Up);
            }
            _ => {}
        }
    }

    /// Step the draft's status through the known values. A stale or empty
    /// status lands on the first value.
    fn cycle_draft_status(&mut self, backwards: bool) {
        let all = TaskStatus::ALL;
        let current = all
            .iter()
            .position(|s| s.as_str() == self.view.draft.status);
        let next = match (current, backwards) {
            (Some(i), false) => (i + 1) % all.len(),
            (Some(i), true) => (i + all.len() - 1) % all.len(),
            (None, _) => 0,
        };
        self.view.draft.status = all[next].as_str().to_string();
    }
}

fn base_client(settings: &TraqSettings) -> ApiClient {
    ApiClient::new(
        settings.backend.base_url.clone(),
        settings.backend.timeout_ms,
    )
}

// ── Event loop ───────────────────────────────────────────────────────────────

/// Run the TUI until the user quits.
pub async fn run(settings: TraqSettings, data_dir: PathBuf) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings, data_dir);
    if app.screen == Screen::Tasks {
        app.view.fetch_tasks().await;
    }

    let result = event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(app.tick_ms()));

    loop {
        let _ = terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key).await;
                        if app.take_ticker_reset() {
                            ticker.reset();
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(error = %e, "terminal event error");
                    }
                    None => break,
                }
            }
            // Polled only while a clock is running; leaving `Tracking`
            // stops the counter without tearing anything down.
            _ = ticker.tick(), if app.view.is_tracking() => {
                app.view.tick();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
