//! Input abstraction layer.

mod mock;

pub use mock::MockInput;

/// Logical actions consumed by the reader app.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    /// Toggle between the stopped and running session states.
    ToggleSession,
    /// Step the rate up by one increment.
    RaiseWpm,
    /// Step the rate down by one increment.
    LowerWpm,
    /// Direct rate entry; goes through validation with fallback.
    SubmitWpm(i64),
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
