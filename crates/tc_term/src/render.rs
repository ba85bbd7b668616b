//! Terminal output for streamed and stored messages.

use std::io::{self, Write};

use crossterm::style::Stylize as _;
use tc_conversation::{Message, ReasoningPolicy, Role};
use tc_split::Snapshot;

use crate::error::Result;

pub const THINKING_HEADER: &str = "Thinking";
pub const REASONING_TRUNCATED: &str = "(reasoning truncated)";

/// Displays the response of a turn.
pub trait Renderer {
    /// Show the latest state of the response.
    ///
    /// Rendering the same snapshot twice has no further effect.
    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<()>;

    /// Complete the response, once the turn has ended.
    ///
    /// `truncated` marks reasoning that was never closed.
    fn finish(&mut self, message: &Message, truncated: bool) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Reasoning,
    Visible,
}

/// Renders a response live, as it streams in.
///
/// Only the newly grown part of each channel is written. Reasoning is dimmed
/// and printed under a [`THINKING_HEADER`].
///
/// Reasoning always precedes the answer, as in [`format_message`]. Once the
/// answer has started, later reasoning spans are kept in the message but not
/// printed.
#[derive(Debug)]
pub struct TerminalRenderer<W = io::Stdout> {
    out: W,
    policy: ReasoningPolicy,

    /// Bytes of visible text written so far.
    visible: usize,

    /// Bytes of reasoning handled so far, including skipped leading
    /// whitespace.
    reasoning: usize,

    section: Section,
}

impl TerminalRenderer {
    #[must_use]
    pub fn stdout(policy: ReasoningPolicy) -> Self {
        Self::new(io::stdout(), policy)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, policy: ReasoningPolicy) -> Self {
        Self {
            out,
            policy,
            visible: 0,
            reasoning: 0,
            section: Section::None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn enter(&mut self, section: Section) -> io::Result<()> {
        if self.section == section {
            return Ok(());
        }

        if self.section != Section::None {
            write!(self.out, "\n\n")?;
        }

        if section == Section::Reasoning {
            writeln!(self.out, "{}", THINKING_HEADER.bold().dim())?;
        }

        self.section = section;
        Ok(())
    }

    fn render_reasoning(&mut self, reasoning: &str) -> io::Result<()> {
        if !self.policy.show || reasoning.len() <= self.reasoning {
            return Ok(());
        }

        if self.section == Section::Visible {
            return Ok(());
        }

        // Nothing is shown until the reasoning is long enough to be worth it.
        if self.reasoning == 0 {
            if self.policy.apply(reasoning).is_none() {
                return Ok(());
            }

            self.reasoning = reasoning.len() - reasoning.trim_start().len();
        }

        let grown = &reasoning[self.reasoning..];
        if grown.is_empty() {
            return Ok(());
        }

        self.enter(Section::Reasoning)?;
        write!(self.out, "{}", grown.dim())?;
        self.reasoning = reasoning.len();

        Ok(())
    }

    fn render_visible(&mut self, visible: &str) -> io::Result<()> {
        if visible.len() <= self.visible {
            return Ok(());
        }

        let grown = &visible[self.visible..];

        // Skip leading whitespace of the answer, it usually follows the close
        // marker.
        let grown = if self.visible == 0 {
            let trimmed = grown.trim_start();
            if trimmed.is_empty() {
                return Ok(());
            }

            self.visible = visible.len() - trimmed.len();
            trimmed
        } else {
            grown
        };

        self.enter(Section::Visible)?;
        write!(self.out, "{grown}")?;
        self.visible = visible.len();

        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        self.render_reasoning(snapshot.reasoning)?;
        self.render_visible(snapshot.visible)?;
        self.out.flush()?;

        Ok(())
    }

    fn finish(&mut self, message: &Message, truncated: bool) -> Result<()> {
        // Anything held back until the end of the stream.
        self.render_reasoning(message.reasoning.as_deref().unwrap_or_default())?;

        if truncated && self.section == Section::Reasoning {
            write!(self.out, " {}", REASONING_TRUNCATED.italic().dim())?;
        }

        self.render_visible(&message.content)?;

        if self.section != Section::None {
            writeln!(self.out)?;
        }

        self.out.flush()?;
        Ok(())
    }
}

/// Renders only the final message, for output that is not a terminal.
#[derive(Debug)]
pub struct BufferedRenderer<W = io::Stdout> {
    out: W,
    policy: ReasoningPolicy,
}

impl BufferedRenderer {
    #[must_use]
    pub fn stdout(policy: ReasoningPolicy) -> Self {
        Self::new(io::stdout(), policy)
    }
}

impl<W: Write> BufferedRenderer<W> {
    pub fn new(out: W, policy: ReasoningPolicy) -> Self {
        Self { out, policy }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for BufferedRenderer<W> {
    fn render(&mut self, _snapshot: &Snapshot<'_>) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self, message: &Message, truncated: bool) -> Result<()> {
        let body = format_body(message, &self.policy, truncated, false);
        if !body.is_empty() {
            writeln!(self.out, "{body}")?;
        }

        self.out.flush()?;
        Ok(())
    }
}

/// Format a stored message for display, with a role header.
///
/// Reasoning is shown according to `policy`, followed by a
/// [`REASONING_TRUNCATED`] label if `truncated` is set.
#[must_use]
pub fn format_message(message: &Message, policy: &ReasoningPolicy, truncated: bool) -> String {
    let header = match message.role {
        Role::User => "You".bold().cyan(),
        Role::Assistant => "Assistant".bold().green(),
        Role::System => "System".bold().magenta(),
    };

    let body = format_body(message, policy, truncated, true);
    format!("{header}\n{body}")
}

fn format_body(message: &Message, policy: &ReasoningPolicy, truncated: bool, styled: bool) -> String {
    let mut buf = String::new();

    if let Some(reasoning) = message.reasoning.as_deref().and_then(|v| policy.apply(v)) {
        if styled {
            buf.push_str(&format!("{}\n{}", THINKING_HEADER.bold().dim(), reasoning.dim()));
        } else {
            buf.push_str(&format!("{THINKING_HEADER}\n{reasoning}"));
        }

        if truncated {
            buf.push(' ');
            buf.push_str(REASONING_TRUNCATED);
        }

        buf.push_str("\n\n");
    }

    buf.push_str(message.content.trim());
    buf.trim_end().to_owned()
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
