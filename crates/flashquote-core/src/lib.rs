//! Platform-agnostic core of the flashquote RSVP reader.
//!
//! The state machine in [`app`] owns the session lifecycle: it asks a
//! [`content::QuoteSource`] for a quote, segments it into words, and paces
//! the words out one per tick period. Input, quote retrieval, and settings
//! persistence are trait seams; the binary supplies the terminal, HTTP, and
//! filesystem implementations.

pub mod app;
pub mod content;
pub mod input;
pub mod render;
pub mod settings;
