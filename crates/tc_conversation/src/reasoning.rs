//! Presentation policy for reasoning text.

/// Reasoning shorter than this (after trimming) is not worth showing.
pub const DEFAULT_MIN_CHARS: usize = 10;

/// Decides whether, and which, reasoning text is shown to the user.
///
/// The stream splitter always returns the raw reasoning; this policy is
/// applied by whoever renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReasoningPolicy {
    /// Whether reasoning is shown at all.
    pub show: bool,

    /// The minimum number of characters of trimmed reasoning.
    pub min_chars: usize,
}

impl Default for ReasoningPolicy {
    fn default() -> Self {
        Self {
            show: true,
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

impl ReasoningPolicy {
    /// A policy that never shows reasoning.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            show: false,
            ..Self::default()
        }
    }

    /// Returns the trimmed reasoning, if it should be shown.
    #[must_use]
    pub fn apply<'a>(&self, reasoning: &'a str) -> Option<&'a str> {
        if !self.show {
            return None;
        }

        let reasoning = reasoning.trim();
        (!reasoning.is_empty() && reasoning.chars().count() >= self.min_chars).then_some(reasoning)
    }
}
