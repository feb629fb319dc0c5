use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;
use tracing::warn;

use crate::action::Action;
use crate::client::SubscriptionClient;
use crate::error::{Result, UnwatchError};
use crate::event::Event;
use crate::fetch::fetch_subscriptions;
use crate::spinner::Spinner;
use crate::table::SubscriptionTable;
use crate::types::Subscription;
use crate::unwatch::unwatch_and_refresh;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Loaded,
    Unwatching,
    Error,
}

pub struct App {
    pub state: SessionState,
    pub table: SubscriptionTable,
    pub spinner: Spinner,
    pub error: Option<UnwatchError>,
    pub should_quit: bool,
    client: Arc<dyn SubscriptionClient>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(client: Arc<dyn SubscriptionClient>, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            state: SessionState::Loading,
            table: SubscriptionTable::default(),
            spinner: Spinner::default(),
            error: None,
            should_quit: false,
            client,
            action_tx,
        }
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::Load,
            Event::Tick => Action::Tick,
            Event::Resize(width, height) => Action::Resize { width, height },
            Event::Key(key) => self.handle_key(key),
            Event::Render => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C is caught by the main loop before it gets here.
        if key.code == KeyCode::Char('q') {
            return Action::Quit;
        }

        // Everything else only applies to the table.
        if self.state != SessionState::Loaded {
            return Action::None;
        }

        match key.code {
            KeyCode::Char(' ') => Action::ToggleMark,
            KeyCode::Char('x') => Action::Execute,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => Action::PageDown,
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Action::PageUp,
            KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
            KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Load => {
                self.state = SessionState::Loading;
                self.spawn_load();
            }
            Action::Tick => {
                self.spinner.tick();
            }
            Action::Resize { width, height } => {
                self.table.set_viewport(width, height);
            }

            Action::ScrollUp if self.is_loaded() => self.table.scroll_up(),
            Action::ScrollDown if self.is_loaded() => self.table.scroll_down(),
            Action::PageUp if self.is_loaded() => self.table.page_up(),
            Action::PageDown if self.is_loaded() => self.table.page_down(),
            Action::GoToTop if self.is_loaded() => self.table.go_to_top(),
            Action::GoToBottom if self.is_loaded() => self.table.go_to_bottom(),
            Action::ToggleMark if self.is_loaded() => self.table.toggle_mark(),
            Action::Execute if self.is_loaded() => {
                let targets = self.table.marked();
                self.state = SessionState::Unwatching;
                self.spawn_unwatch(targets);
            }

            Action::SubscriptionsLoaded(result) | Action::UnwatchCompleted(result) => {
                self.apply_snapshot(result);
            }

            Action::ScrollUp
            | Action::ScrollDown
            | Action::PageUp
            | Action::PageDown
            | Action::GoToTop
            | Action::GoToBottom
            | Action::ToggleMark
            | Action::Execute
            | Action::None => {}
        }
    }

    fn is_loaded(&self) -> bool {
        self.state == SessionState::Loaded
    }

    fn apply_snapshot(&mut self, result: Result<Vec<Subscription>>) {
        match result {
            Ok(subs) => {
                self.table.set_rows(subs);
                self.error = None;
                self.state = SessionState::Loaded;
            }
            Err(err) => {
                warn!(error = %err, "operation failed");
                self.error = Some(err);
                self.state = SessionState::Error;
            }
        }
    }

    fn spawn_load(&self) {
        let tx = self.action_tx.clone();
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let result = fetch_subscriptions(client.as_ref()).await;
            tx.send(Action::SubscriptionsLoaded(result)).ok();
        });
    }

    fn spawn_unwatch(&self, targets: Vec<Subscription>) {
        let tx = self.action_tx.clone();
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let result = unwatch_and_refresh(client.as_ref(), &targets).await;
            tx.send(Action::UnwatchCompleted(result)).ok();
        });
    }
}
