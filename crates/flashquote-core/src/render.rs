//! View models handed to the host renderer.
//!
//! The state machine never draws. It describes the current frame through
//! [`Screen`], and the host decides how to put that on its display.

/// Column (in characters) at which the focal letter of every word sits.
/// Padding plus prefix always add up to this, so the focal letter never
/// moves between frames.
pub const FOCAL_COLUMN: usize = 4;

/// Message shown when a quote could not be retrieved.
pub const QUOTE_ERROR_TEXT: &str = "Error retrieving quote";

/// A word split around its focal letter, ready for fixed-column layout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FocusedWord<'a> {
    /// Blank columns before the first character.
    pub padding: usize,
    /// Characters before the focal letter.
    pub prefix: &'a str,
    /// The focal letter itself. Empty only for an empty word.
    pub focal: &'a str,
    /// Characters after the focal letter.
    pub suffix: &'a str,
}

impl<'a> FocusedWord<'a> {
    /// Pick the focal letter by word length and compute the padding that
    /// lines it up with [`FOCAL_COLUMN`].
    ///
    /// Longer words focus further in: one character for up to five, two for
    /// up to nine, three for up to thirteen, four beyond that.
    pub fn split(word: &'a str) -> Self {
        let len = word.chars().count();

        let focal_index = match len {
            0 | 1 => 0,
            2..=5 => 1,
            6..=9 => 2,
            10..=13 => 3,
            _ => 4,
        };

        if len == 0 {
            return Self {
                padding: FOCAL_COLUMN,
                prefix: "",
                focal: "",
                suffix: "",
            };
        }

        let focal_start = char_offset(word, focal_index);
        let focal_end = char_offset(&word[focal_start..], 1) + focal_start;

        Self {
            padding: FOCAL_COLUMN - focal_index,
            prefix: &word[..focal_start],
            focal: &word[focal_start..focal_end],
            suffix: &word[focal_end..],
        }
    }
}

fn char_offset(s: &str, nth: usize) -> usize {
    s.char_indices().nth(nth).map_or(s.len(), |(idx, _)| idx)
}

/// What the host should draw this frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Screen<'a> {
    /// No session. Waiting for the user to start one.
    Idle { wpm: u16 },
    /// Session running, first quote still in flight.
    Fetching { wpm: u16 },
    /// Session running, showing a word.
    Reading {
        wpm: u16,
        word: FocusedWord<'a>,
        word_index: usize,
        word_total: usize,
    },
    /// A fetch failed and the session ended.
    Errored { wpm: u16, message: &'a str },
}

impl Screen<'_> {
    /// Label for the start/stop affordance.
    pub fn button_label(&self) -> &'static str {
        match self {
            Screen::Fetching { .. } | Screen::Reading { .. } => "Stop",
            Screen::Idle { .. } | Screen::Errored { .. } => "Start",
        }
    }
}
