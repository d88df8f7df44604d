use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::*;
use crate::content::{FetchError, QuoteResult, StaticQuoteSource};
use crate::input::MockInput;
use crate::render::FOCAL_COLUMN;

#[derive(Clone, Default)]
struct SharedInput(Rc<RefCell<VecDeque<InputEvent>>>);

impl SharedInput {
    fn push(&self, event: InputEvent) {
        self.0.borrow_mut().push_back(event);
    }
}

impl InputProvider for SharedInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.0.borrow_mut().pop_front())
    }
}

/// Source whose replies are injected by the test. Records every request and
/// cancellation so ordering can be asserted.
#[derive(Default)]
struct ScriptedSource {
    ready: VecDeque<QuoteResult>,
    requests: Vec<RequestToken>,
    cancels: usize,
}

impl QuoteSource for ScriptedSource {
    type Error = core::convert::Infallible;

    fn request(&mut self, token: RequestToken) -> Result<(), Self::Error> {
        self.requests.push(token);
        Ok(())
    }

    fn poll(&mut self) -> Option<QuoteResult> {
        self.ready.pop_front()
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

fn make_app(wpm: u16) -> (ReaderApp<ScriptedSource, SharedInput>, SharedInput) {
    let input = SharedInput::default();
    let app = ReaderApp::new(
        ScriptedSource::default(),
        input.clone(),
        ReaderConfig { wpm },
    );
    (app, input)
}

fn deliver(app: &mut ReaderApp<ScriptedSource, SharedInput>, outcome: Result<&str, FetchError>) {
    app.with_source_mut(|source| {
        let token = *source.requests.last().expect("no request issued");
        source.ready.push_back(QuoteResult {
            token,
            outcome: outcome.map(str::to_owned),
        });
    });
}

fn shown_word(app: &ReaderApp<ScriptedSource, SharedInput>) -> Option<(String, usize, usize)> {
    let mut out = None;
    app.with_screen(|screen| {
        if let Screen::Reading {
            word,
            word_index,
            word_total,
            ..
        } = screen
        {
            out = Some((
                format!("{}{}{}", word.prefix, word.focal, word.suffix),
                word_index,
                word_total,
            ));
        }
    });
    out
}

#[test]
fn a_session_paces_words_and_chains_into_the_next_fetch() {
    let (mut app, input) = make_app(300);

    input.push(InputEvent::ToggleSession);
    assert_eq!(app.tick(0), TickResult::RenderRequested);
    assert_eq!(app.with_source_mut(|s| s.requests.len()), 1);

    deliver(&mut app, Ok("Treat yo self"));
    assert_eq!(app.tick(10), TickResult::RenderRequested);
    assert_eq!(shown_word(&app), None);

    // 300 wpm means one word every 200 ms, anchored at delivery.
    assert_eq!(app.tick(100), TickResult::NoRender);
    assert_eq!(app.tick(210), TickResult::RenderRequested);
    assert_eq!(shown_word(&app), Some(("Treat".to_owned(), 0, 3)));

    app.with_screen(|screen| {
        let Screen::Reading { word, .. } = screen else {
            panic!("expected a reading screen");
        };
        assert_eq!(word.padding + word.prefix.chars().count(), FOCAL_COLUMN);
        assert_eq!(word.focal, "r");
        assert_eq!(screen.button_label(), "Stop");
    });

    assert_eq!(app.tick(410), TickResult::RenderRequested);
    assert_eq!(shown_word(&app), Some(("yo".to_owned(), 1, 3)));

    assert_eq!(app.tick(610), TickResult::RenderRequested);
    assert_eq!(shown_word(&app), Some(("self".to_owned(), 2, 3)));

    // The quote is exhausted, so a second fetch is already in flight while
    // the last word stays on screen.
    assert_eq!(app.with_source_mut(|s| s.requests.len()), 2);
    assert!(app.is_running());
    assert_eq!(shown_word(&app), Some(("self".to_owned(), 2, 3)));
}

#[test]
fn stopping_cancels_the_fetch_and_a_late_result_is_ignored() {
    let (mut app, input) = make_app(300);

    input.push(InputEvent::ToggleSession);
    app.tick(0);
    input.push(InputEvent::ToggleSession);
    app.tick(5);

    assert!(!app.is_running());
    assert_eq!(app.with_source_mut(|s| s.cancels), 1);

    // The first request's response arrives after the restart.
    app.with_source_mut(|source| {
        source.ready.push_back(QuoteResult {
            token: RequestToken(1),
            outcome: Ok("stale quote".to_owned()),
        });
    });

    input.push(InputEvent::ToggleSession);
    app.tick(10);
    assert_eq!(app.with_source_mut(|s| s.requests.len()), 2);

    // The stale result must not start a reading sequence.
    app.tick(20);
    assert_eq!(shown_word(&app), None);
    assert!(app.is_running());

    deliver(&mut app, Ok("fresh"));
    app.tick(30);
    app.tick(30 + 200);
    assert_eq!(shown_word(&app), Some(("fresh".to_owned(), 0, 1)));
}

#[test]
fn toggling_twice_in_one_tick_returns_to_idle() {
    let (mut app, input) = make_app(100);

    // Drain the initial redraw.
    assert_eq!(app.tick(0), TickResult::RenderRequested);
    assert_eq!(app.tick(1), TickResult::NoRender);

    input.push(InputEvent::ToggleSession);
    input.push(InputEvent::ToggleSession);
    assert_eq!(app.tick(2), TickResult::RenderRequested);

    assert!(!app.is_running());
    assert_eq!(app.with_source_mut(|s| s.requests.len()), 1);
    assert_eq!(app.with_source_mut(|s| s.cancels), 1);
    assert_eq!(app.tick(3), TickResult::NoRender);
}

#[test]
fn a_failed_fetch_ends_the_session_with_an_error_screen() {
    let (mut app, input) = make_app(100);

    input.push(InputEvent::ToggleSession);
    app.tick(0);
    deliver(&mut app, Err(FetchError::Status(500)));
    assert_eq!(app.tick(10), TickResult::RenderRequested);

    assert!(!app.is_running());
    app.with_screen(|screen| {
        let Screen::Errored { message, .. } = screen else {
            panic!("expected an error screen");
        };
        assert_eq!(message, QUOTE_ERROR_TEXT);
        assert_eq!(screen.button_label(), "Start");
    });

    // Starting again from the error screen issues a new request.
    input.push(InputEvent::ToggleSession);
    app.tick(20);
    assert!(app.is_running());
    assert_eq!(app.with_source_mut(|s| s.requests.len()), 2);
}

#[test]
fn rate_changes_apply_when_the_next_quote_starts() {
    let (mut app, input) = make_app(100);

    input.push(InputEvent::ToggleSession);
    app.tick(0);
    deliver(&mut app, Ok("one two"));
    app.tick(0);

    // 100 wpm paces at 600 ms.
    assert_eq!(app.tick(600), TickResult::RenderRequested);
    assert_eq!(shown_word(&app), Some(("one".to_owned(), 0, 2)));

    input.push(InputEvent::RaiseWpm);
    assert_eq!(app.tick(700), TickResult::RenderRequested);
    assert_eq!(app.wpm(), 150);
    assert!(app.take_settings_dirty());

    // The running quote keeps the old spacing.
    assert_eq!(app.tick(1100), TickResult::NoRender);
    assert_eq!(app.tick(1200), TickResult::RenderRequested);
    assert_eq!(shown_word(&app), Some(("two".to_owned(), 1, 2)));

    // The chained quote paces at the new 400 ms spacing.
    deliver(&mut app, Ok("three four"));
    app.tick(1300);
    assert_eq!(app.tick(1650), TickResult::NoRender);
    assert_eq!(app.tick(1700), TickResult::RenderRequested);
    assert_eq!(shown_word(&app), Some(("three".to_owned(), 0, 2)));
}

#[test]
fn stepping_clamps_to_the_rate_bounds() {
    let (mut app, input) = make_app(1000);

    input.push(InputEvent::RaiseWpm);
    app.tick(0);
    assert_eq!(app.wpm(), 1000);
    assert!(!app.take_settings_dirty());

    input.push(InputEvent::LowerWpm);
    app.tick(1);
    assert_eq!(app.wpm(), 950);
    assert!(app.take_settings_dirty());

    let (mut app, input) = make_app(50);
    input.push(InputEvent::LowerWpm);
    app.tick(0);
    assert_eq!(app.wpm(), 50);
    assert!(!app.take_settings_dirty());
}

#[test]
fn submitted_rates_are_validated_with_fallback() {
    let (mut app, input) = make_app(100);

    input.push(InputEvent::SubmitWpm(150));
    app.tick(0);
    assert_eq!(app.wpm(), 150);
    assert!(app.take_settings_dirty());

    for rejected in [53, 0, 1001, -50] {
        input.push(InputEvent::SubmitWpm(rejected));
        app.tick(1);
        assert_eq!(app.wpm(), 150);
        // Resolution always persists, even when it falls back.
        assert!(app.take_settings_dirty());
    }
}

#[test]
fn persisted_settings_apply_through_validation() {
    let (mut app, _input) = make_app(100);
    app.tick(0);

    app.apply_persisted_settings(&PersistedSettings::new(250));
    assert_eq!(app.wpm(), 250);
    assert_eq!(app.tick(1), TickResult::RenderRequested);

    app.apply_persisted_settings(&PersistedSettings::new(53));
    assert_eq!(app.wpm(), 250);
    assert_eq!(app.persisted_settings(), PersistedSettings::new(250));
}

#[test]
fn an_eventless_provider_leaves_the_session_idle() {
    let mut app = ReaderApp::new(
        StaticQuoteSource::builtin(),
        MockInput::new(),
        ReaderConfig::default(),
    );

    assert_eq!(app.tick(0), TickResult::RenderRequested);
    assert_eq!(app.tick(1), TickResult::NoRender);
    assert!(!app.is_running());
}

#[test]
fn empty_words_from_repeated_spaces_become_blank_frames() {
    let (mut app, input) = make_app(300);

    input.push(InputEvent::ToggleSession);
    app.tick(0);
    deliver(&mut app, Ok("a  b"));
    app.tick(0);

    app.tick(200);
    assert_eq!(shown_word(&app), Some(("a".to_owned(), 0, 3)));
    app.tick(400);
    assert_eq!(shown_word(&app), Some((String::new(), 1, 3)));
    app.tick(600);
    assert_eq!(shown_word(&app), Some(("b".to_owned(), 2, 3)));
}
