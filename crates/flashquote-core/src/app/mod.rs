//! Session state machine for fetching quotes and pacing words.

use log::{debug, warn};

use crate::{
    content::{QuoteSource, RequestToken, split_words},
    input::{InputEvent, InputProvider},
    render::{FocusedWord, QUOTE_ERROR_TEXT, Screen},
    settings::{PersistedSettings, WPM_DEFAULT, WPM_MAX, WPM_MIN, WPM_STEP, resolve_wpm},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReaderConfig {
    pub wpm: u16,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { wpm: WPM_DEFAULT }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum UiState {
    /// No session. Nothing in flight, nothing displayed.
    Idle,
    /// Session running, waiting on the quote request identified by `token`.
    Fetching { token: RequestToken },
    /// Session running, stepping through the current word list.
    Reading { next_word_ms: u64 },
    /// A fetch failed. The session is over until the user starts a new one.
    Errored,
}

/// Owned snapshot of the word on screen. Kept separate from the word list so
/// the display survives the list being replaced by the next quote.
#[derive(Clone, Debug, Eq, PartialEq)]
struct ShownWord {
    index: usize,
    text: String,
}

pub struct ReaderApp<QS, IN>
where
    QS: QuoteSource,
    IN: InputProvider,
{
    source: QS,
    input: IN,
    config: ReaderConfig,
    ui: UiState,
    words: Vec<String>,
    cursor: usize,
    shown: Option<ShownWord>,
    tick_period_ms: u64,
    generation: u64,
    pending_redraw: bool,
    settings_dirty: bool,
}

/// Milliseconds between word advances at the given rate.
pub fn tick_period_ms(wpm: u16) -> u64 {
    60_000 / u64::from(wpm.max(1))
}

include!("view.rs");
include!("input.rs");
include!("runtime.rs");

#[cfg(test)]
mod tests;
