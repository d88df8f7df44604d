use super::{FetchError, QuoteResult, QuoteSource, RequestToken};

/// Bundled quotes used when running without a network source.
pub const BUILTIN_QUOTES: [&str; 6] = [
    "The early bird catches the worm.",
    "Fortune favors the bold.",
    "A journey of a thousand miles begins with a single step.",
    "Measure twice, cut once.",
    "Still waters run deep.",
    "He who hesitates is lost.",
];

/// In-memory quote source that answers every request immediately, cycling
/// through a fixed list.
#[derive(Debug, Clone)]
pub struct StaticQuoteSource<'a> {
    quotes: &'a [&'a str],
    cursor: usize,
    pending: Option<RequestToken>,
}

impl<'a> StaticQuoteSource<'a> {
    pub fn new(quotes: &'a [&'a str]) -> Self {
        Self {
            quotes,
            cursor: 0,
            pending: None,
        }
    }

    pub fn builtin() -> StaticQuoteSource<'static> {
        StaticQuoteSource::new(&BUILTIN_QUOTES)
    }
}

impl QuoteSource for StaticQuoteSource<'_> {
    type Error = core::convert::Infallible;

    fn request(&mut self, token: RequestToken) -> Result<(), Self::Error> {
        self.pending = Some(token);
        Ok(())
    }

    fn poll(&mut self) -> Option<QuoteResult> {
        let token = self.pending.take()?;

        if self.quotes.is_empty() {
            return Some(QuoteResult {
                token,
                outcome: Err(FetchError::MalformedBody),
            });
        }

        let quote = self.quotes[self.cursor % self.quotes.len()].to_owned();
        self.cursor += 1;

        Some(QuoteResult {
            token,
            outcome: Ok(quote),
        })
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}
