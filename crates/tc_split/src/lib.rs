//! Incremental splitting of a generated text stream into a visible answer and
//! the reasoning wrapped in marker pairs (e.g. `<think>` / `</think>`).
//!
//! See [`StreamSplitter`].

mod delimiters;
pub mod error;
mod splitter;

pub use delimiters::{DEFAULT_CLOSE, DEFAULT_OPEN, DEFAULT_SEPARATOR, Delimiters};
pub use error::Error;
pub use splitter::{Snapshot, Split, StreamSplitter, split_complete};
