use super::{InputEvent, InputProvider};

/// Provider that never produces an event, for running the reader
/// unattended against a scripted or built-in quote source.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockInput;

impl MockInput {
    pub const fn new() -> Self {
        Self
    }
}

impl InputProvider for MockInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(None)
    }
}
