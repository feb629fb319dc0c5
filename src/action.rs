use crate::error::Result;
use crate::types::Subscription;

/// Everything the session reacts to. Background tasks post exactly one
/// completion variant each.
#[derive(Debug)]
pub enum Action {
    Quit,
    Load,
    Tick,
    Resize { width: u16, height: u16 },

    // Table
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    ToggleMark,
    Execute,

    // Completions
    SubscriptionsLoaded(Result<Vec<Subscription>>),
    UnwatchCompleted(Result<Vec<Subscription>>),

    None,
}
