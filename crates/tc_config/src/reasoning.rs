use schematic::Config;
use tc_conversation::ReasoningPolicy;
use tc_split::Delimiters;

use crate::error::Result;

/// How reasoning is displayed.
#[derive(Debug, Clone, PartialEq, Config)]
#[config(rename_all = "snake_case")]
pub struct ReasoningConfig {
    /// Whether to show the model's reasoning.
    #[setting(default = true, env = "THINKCHAT_SHOW_REASONING")]
    pub show: bool,

    /// Reasoning shorter than this, after trimming, is not shown.
    #[setting(default = 10)]
    pub min_chars: usize,
}

impl ReasoningConfig {
    #[must_use]
    pub fn policy(&self) -> ReasoningPolicy {
        ReasoningPolicy {
            show: self.show,
            min_chars: self.min_chars,
        }
    }
}

/// The markers that delimit reasoning in the model output.
#[derive(Debug, Clone, PartialEq, Config)]
#[config(rename_all = "snake_case")]
pub struct DelimitersConfig {
    #[setting(default = "<think>")]
    pub open: String,

    #[setting(default = "</think>")]
    pub close: String,

    /// Inserted between consecutive reasoning sections.
    #[setting(default = "\n")]
    pub separator: String,
}

impl DelimitersConfig {
    pub fn delimiters(&self) -> Result<Delimiters> {
        Ok(Delimiters::new(&self.open, &self.close)?.with_separator(&self.separator))
    }
}
