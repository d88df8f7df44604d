//! Quote retrieval seam and word segmentation.

mod static_source;

pub use static_source::{BUILTIN_QUOTES, StaticQuoteSource};

/// Identifier tying a fetch response back to the request that started it.
///
/// Tokens are issued by the session state machine, one per fetch. A source
/// tags every result with the request's token so that responses from
/// superseded or cancelled requests can be recognised and dropped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RequestToken(pub u64);

/// Why a quote retrieval failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchError {
    /// The endpoint answered with a non-success status code.
    Status(u16),
    /// Transport-level failure before a response arrived.
    Transport,
    /// The body was not a non-empty list of quote strings.
    MalformedBody,
}

/// A completed fetch, tagged with the request it answers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuoteResult {
    pub token: RequestToken,
    pub outcome: Result<String, FetchError>,
}

/// Polled, cancellable source of quotes.
pub trait QuoteSource {
    type Error;

    /// Start retrieving the next quote. A new request supersedes any
    /// in-flight one.
    fn request(&mut self, token: RequestToken) -> Result<(), Self::Error>;

    /// Poll for a completed retrieval. Sources may still surface results
    /// from superseded requests; callers match on the token.
    fn poll(&mut self) -> Option<QuoteResult>;

    /// Invalidate any in-flight request. The underlying transfer may still
    /// run to completion, but its result must no longer take effect.
    fn cancel(&mut self);
}

/// Split a quote into display words on single ASCII spaces.
///
/// Runs of spaces are not collapsed: they yield empty words, which the
/// scheduler shows as blank frames. Punctuation and case are untouched.
pub fn split_words(quote: &str) -> Vec<String> {
    quote.split(' ').map(str::to_owned).collect()
}
