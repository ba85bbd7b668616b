//! Model selection and sampling parameters.

use std::ops::RangeInclusive;

use schematic::Config;

use crate::error::{Error, Result};

pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=2.0;

#[derive(Debug, Clone, PartialEq, Config)]
#[config(rename_all = "snake_case")]
pub struct ModelConfig {
    /// The name of the model to chat with.
    #[setting(default = "deepseek-r1:14b", env = "THINKCHAT_MODEL")]
    pub name: String,

    /// The sampling temperature.
    #[setting(default = 0.7, env = "THINKCHAT_TEMPERATURE")]
    pub temperature: f32,
}

impl ModelConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        validate_temperature(self.temperature)
    }
}

/// Ensure the temperature is within [`TEMPERATURE_RANGE`].
pub fn validate_temperature(temperature: f32) -> Result<()> {
    if TEMPERATURE_RANGE.contains(&temperature) {
        return Ok(());
    }

    Err(Error::InvalidConfigValue {
        key: "model.temperature".to_owned(),
        value: temperature.to_string(),
        need: format!(
            "a value between {} and {}",
            TEMPERATURE_RANGE.start(),
            TEMPERATURE_RANGE.end()
        ),
    })
}
