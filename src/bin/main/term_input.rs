use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use flashquote_core::input::{InputEvent, InputProvider};

const ENTRY_MAX_DIGITS: usize = 4;

/// Keyboard frontend. Translates terminal key events into reader input
/// events and accumulates typed digits for direct rate entry.
pub struct TermInput {
    pending: VecDeque<InputEvent>,
    entry: String,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PumpOutcome {
    pub quit: bool,
    pub redraw: bool,
}

enum Action {
    None,
    Emit(InputEvent),
    Quit,
}

impl TermInput {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            entry: String::new(),
        }
    }

    /// The digits typed so far, when a rate entry is in progress.
    pub fn entry(&self) -> Option<&str> {
        (!self.entry.is_empty()).then_some(self.entry.as_str())
    }

    /// Drain all ready terminal events, blocking up to `timeout` for the
    /// first one.
    pub fn pump(&mut self, timeout: Duration) -> io::Result<PumpOutcome> {
        let mut outcome = PumpOutcome::default();
        let mut wait = timeout;

        while event::poll(wait)? {
            wait = Duration::ZERO;

            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }

                    let entry_before = self.entry.len();
                    match self.translate(key) {
                        Action::None => {}
                        Action::Emit(event) => self.pending.push_back(event),
                        Action::Quit => outcome.quit = true,
                    }
                    if self.entry.len() != entry_before {
                        outcome.redraw = true;
                    }
                }
                Event::Resize(_, _) => outcome.redraw = true,
                _ => {}
            }
        }

        Ok(outcome)
    }

    fn translate(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char(' ') => Action::Emit(InputEvent::ToggleSession),
            KeyCode::Up | KeyCode::Char('k') => Action::Emit(InputEvent::RaiseWpm),
            KeyCode::Down | KeyCode::Char('j') => Action::Emit(InputEvent::LowerWpm),
            KeyCode::Char(digit @ '0'..='9') => {
                if self.entry.len() < ENTRY_MAX_DIGITS {
                    self.entry.push(digit);
                }
                Action::None
            }
            KeyCode::Backspace => {
                self.entry.pop();
                Action::None
            }
            KeyCode::Esc => {
                self.entry.clear();
                Action::None
            }
            KeyCode::Enter => {
                let Ok(value) = self.entry.parse::<i64>() else {
                    self.entry.clear();
                    return Action::None;
                };
                self.entry.clear();
                Action::Emit(InputEvent::SubmitWpm(value))
            }
            _ => Action::None,
        }
    }
}

impl InputProvider for TermInput {
    type Error = std::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.pending.pop_front())
    }
}
