use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::Duration;

use flashquote_core::content::{FetchError, QuoteResult, QuoteSource, RequestToken};
use tracing::debug;

/// Default quote endpoint. Answers with a JSON array of quote strings.
pub const QUOTES_ENDPOINT: &str = "https://ron-swanson-quotes.herokuapp.com/v2/quotes";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Quote source backed by an HTTP endpoint.
///
/// Each request runs on its own thread. The active token gates delivery on
/// both sides of the channel, so a cancelled or superseded request cannot
/// surface its result even if the transfer completes.
pub struct HttpQuoteSource {
    agent: ureq::Agent,
    endpoint: Arc<str>,
    active: Arc<AtomicU64>,
    tx: Sender<QuoteResult>,
    rx: Receiver<QuoteResult>,
}

impl HttpQuoteSource {
    pub fn new(endpoint: &str) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(FETCH_TIMEOUT).build();
        let (tx, rx) = channel();

        Self {
            agent,
            endpoint: Arc::from(endpoint),
            active: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
        }
    }
}

impl QuoteSource for HttpQuoteSource {
    type Error = std::convert::Infallible;

    fn request(&mut self, token: RequestToken) -> Result<(), Self::Error> {
        self.active.store(token.0, Ordering::SeqCst);

        let agent = self.agent.clone();
        let endpoint = Arc::clone(&self.endpoint);
        let active = Arc::clone(&self.active);
        let tx = self.tx.clone();

        thread::spawn(move || {
            let outcome = fetch_quote(&agent, &endpoint);

            if active.load(Ordering::SeqCst) == token.0 {
                let _ = tx.send(QuoteResult { token, outcome });
            } else {
                debug!("discarding response for inactive request {:?}", token);
            }
        });

        Ok(())
    }

    fn poll(&mut self) -> Option<QuoteResult> {
        while let Ok(result) = self.rx.try_recv() {
            if result.token.0 == self.active.load(Ordering::SeqCst) {
                return Some(result);
            }
            debug!("dropping queued response for stale request {:?}", result.token);
        }

        None
    }

    fn cancel(&mut self) {
        // Token 0 is never issued, so nothing in flight can match it.
        self.active.store(0, Ordering::SeqCst);
    }
}

fn fetch_quote(agent: &ureq::Agent, endpoint: &str) -> Result<String, FetchError> {
    let response = agent.get(endpoint).call().map_err(|error| match error {
        ureq::Error::Status(code, _) => FetchError::Status(code),
        ureq::Error::Transport(_) => FetchError::Transport,
    })?;

    let quotes: Vec<String> = response
        .into_json()
        .map_err(|_| FetchError::MalformedBody)?;

    quotes.into_iter().next().ok_or(FetchError::MalformedBody)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_skips_results_from_superseded_requests() {
        let mut source = HttpQuoteSource::new("http://localhost/unused");
        source.active.store(2, Ordering::SeqCst);

        source
            .tx
            .send(QuoteResult {
                token: RequestToken(1),
                outcome: Ok("old".to_owned()),
            })
            .unwrap();
        source
            .tx
            .send(QuoteResult {
                token: RequestToken(2),
                outcome: Ok("new".to_owned()),
            })
            .unwrap();

        let result = source.poll().unwrap();
        assert_eq!(result.token, RequestToken(2));
        assert_eq!(result.outcome.as_deref(), Ok("new"));
        assert!(source.poll().is_none());
    }

    #[test]
    fn cancel_suppresses_pending_results() {
        let mut source = HttpQuoteSource::new("http://localhost/unused");
        source.active.store(1, Ordering::SeqCst);
        source
            .tx
            .send(QuoteResult {
                token: RequestToken(1),
                outcome: Ok("quote".to_owned()),
            })
            .unwrap();

        source.cancel();
        assert!(source.poll().is_none());
    }
}
