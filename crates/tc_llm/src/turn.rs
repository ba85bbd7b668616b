//! Drives a single streamed response through a [`StreamSplitter`].

use futures::StreamExt as _;
use tc_split::{Snapshot, Split, StreamSplitter};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::{Error, provider::FragmentStream};

/// Why a turn stopped.
#[derive(Debug)]
pub enum TurnEnd {
    /// The stream ended normally.
    Completed,

    /// The turn was cancelled before the stream ended.
    Cancelled,

    /// The stream failed.
    Failed(Error),
}

/// The result of a turn.
///
/// The split is always finalized, and holds everything received before the
/// turn ended.
#[derive(Debug)]
pub struct TurnOutcome {
    pub split: Split,
    pub end: TurnEnd,

    /// Whether the last reasoning span was never closed.
    pub reasoning_truncated: bool,
}

impl TurnOutcome {
    /// Whether the response was cut short.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        !matches!(self.end, TurnEnd::Completed)
    }
}

/// Feed every fragment of `stream` into `splitter`, in order.
///
/// `on_snapshot` is called after every fragment. The turn stops when the
/// stream ends, when it yields an error, or when `cancel` fires.
pub async fn run_turn(
    mut stream: FragmentStream,
    mut splitter: StreamSplitter,
    cancel: CancellationToken,
    mut on_snapshot: impl FnMut(&Snapshot<'_>),
) -> TurnOutcome {
    let mut fragments = 0_usize;

    let end = loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            next = stream.next() => Some(next),
        };

        let Some(next) = next else {
            debug!(fragments, "Turn cancelled.");
            break TurnEnd::Cancelled;
        };

        match next {
            None => {
                trace!(fragments, "Stream completed.");
                break TurnEnd::Completed;
            }
            Some(Err(error)) => {
                warn!(fragments, %error, "Stream failed.");
                break TurnEnd::Failed(error);
            }
            Some(Ok(fragment)) => {
                fragments += 1;
                match splitter.feed(&fragment) {
                    Ok(snapshot) => on_snapshot(&snapshot),
                    Err(error) => break TurnEnd::Failed(error.into()),
                }
            }
        }
    };

    let reasoning_truncated = splitter.is_inside_reasoning();

    TurnOutcome {
        split: splitter.finalize(),
        end,
        reasoning_truncated,
    }
}

#[cfg(test)]
#[path = "turn_tests.rs"]
mod tests;
