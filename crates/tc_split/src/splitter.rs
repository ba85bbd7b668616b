use tracing::trace;

use crate::{
    delimiters::Delimiters,
    error::{Error, Result},
};

/// A parser that segments a stream of text fragments into a 'visible' and a
/// 'reasoning' channel.
///
/// Reasoning is any text between an open and a close marker. Markers may be
/// split across fragments, may repeat, and the last one may never be closed.
///
/// The splitter keeps a resume cursor into the accumulated text, so each call
/// to [`StreamSplitter::feed`] only scans the newly arrived text plus the few
/// bytes that were held back because they could still turn into a marker.
#[derive(Debug, Default)]
pub struct StreamSplitter {
    delimiters: Delimiters,

    /// All text fed so far.
    raw: String,

    /// Byte offset into `raw` of the first byte not yet assigned to a channel.
    cursor: usize,

    visible: String,
    reasoning: String,
    state: State,

    /// Number of open markers seen.
    sections: usize,

    finalized: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Processing visible text, looking for the open marker.
    #[default]
    Visible,

    /// Processing reasoning text, looking for the close marker.
    Reasoning,
}

/// The live view of a [`StreamSplitter`] after a call to
/// [`StreamSplitter::feed`].
///
/// Text that might still turn out to be part of a marker is never part of a
/// snapshot, so every snapshot is a prefix of all later ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot<'a> {
    pub visible: &'a str,
    pub reasoning: &'a str,
    pub inside_reasoning: bool,
}

/// The final result of a [`StreamSplitter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    /// All text outside of reasoning spans.
    pub visible: String,

    /// The content of all reasoning spans, in order, joined with the
    /// configured separator. Not trimmed.
    pub reasoning: String,

    /// Whether at least one open marker was seen, closed or not.
    pub had_reasoning: bool,
}

impl StreamSplitter {
    #[must_use]
    pub fn new(delimiters: Delimiters) -> Self {
        Self {
            delimiters,
            ..Default::default()
        }
    }

    /// Processes a fragment of the incoming text stream.
    ///
    /// Empty fragments are allowed, they leave the state unchanged.
    pub fn feed(&mut self, fragment: &str) -> Result<Snapshot<'_>> {
        if self.finalized {
            return Err(Error::Finalized);
        }

        if !fragment.is_empty() {
            self.raw.push_str(fragment);
            self.scan();
        }

        Ok(self.snapshot())
    }

    /// Flushes any held back text into the current channel, and returns the
    /// final split.
    ///
    /// An unclosed reasoning span keeps its content as reasoning. Calling this
    /// more than once returns the same result.
    pub fn finalize(&mut self) -> Split {
        if !self.finalized {
            self.commit(self.raw.len());
            self.finalized = true;
            trace!(
                visible = self.visible.len(),
                reasoning = self.reasoning.len(),
                sections = self.sections,
                "Finalized stream splitter."
            );
        }

        Split {
            visible: self.visible.clone(),
            reasoning: self.reasoning.clone(),
            had_reasoning: self.sections > 0,
        }
    }

    /// The current live view.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            visible: &self.visible,
            reasoning: &self.reasoning,
            inside_reasoning: self.is_inside_reasoning(),
        }
    }

    /// Whether an open marker was seen, and its close marker was not (yet).
    #[must_use]
    pub fn is_inside_reasoning(&self) -> bool {
        self.state == State::Reasoning
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// All text fed so far, markers included.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    fn scan(&mut self) {
        loop {
            let (found, held) = {
                let marker = self.marker();
                let pending = &self.raw[self.cursor..];

                match pending.find(marker) {
                    Some(index) => (Some((index, marker.len())), 0),
                    None => (None, held_back(pending, marker)),
                }
            };

            let Some((index, marker_len)) = found else {
                // Keep a tail that might still complete the marker once more
                // text arrives.
                self.commit(self.raw.len() - held);
                return;
            };

            self.commit(self.cursor + index);
            self.cursor += marker_len;
            self.transition();
        }
    }

    /// Assign `raw[cursor..end]` to the current channel.
    fn commit(&mut self, end: usize) {
        let text = &self.raw[self.cursor..end];
        match self.state {
            State::Visible => self.visible.push_str(text),
            State::Reasoning => self.reasoning.push_str(text),
        }

        self.cursor = end;
    }

    fn transition(&mut self) {
        self.state = match self.state {
            State::Visible => {
                self.sections += 1;
                if self.sections > 1 {
                    self.reasoning.push_str(self.delimiters.separator());
                }

                trace!(section = self.sections, "Entered reasoning span.");
                State::Reasoning
            }
            State::Reasoning => {
                trace!(section = self.sections, "Left reasoning span.");
                State::Visible
            }
        };
    }

    fn marker(&self) -> &str {
        match self.state {
            State::Visible => self.delimiters.open(),
            State::Reasoning => self.delimiters.close(),
        }
    }
}

/// Splits a complete text in one go.
#[must_use]
pub fn split_complete(text: &str, delimiters: Delimiters) -> Split {
    let mut splitter = StreamSplitter::new(delimiters);

    // A fresh splitter is never finalized.
    let _snapshot = splitter.feed(text);
    splitter.finalize()
}

/// Returns the length of the longest suffix of `pending` that is a proper
/// prefix of `marker`.
///
/// The suffix always starts at a char boundary, because the first byte of a
/// marker is never a UTF-8 continuation byte.
fn held_back(pending: &str, marker: &str) -> usize {
    let pending = pending.as_bytes();
    let marker = marker.as_bytes();

    (1..marker.len())
        .rev()
        .find(|&n| pending.ends_with(&marker[..n]))
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "splitter_tests.rs"]
mod tests;
