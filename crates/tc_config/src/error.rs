pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Schematic error: {0}")]
    Schematic(#[from] schematic::ConfigError),

    #[error("Delimiter error: {0}")]
    Delimiters(#[from] tc_split::Error),

    #[error("Invalid config value \"{value}\" for key {key}. Expected {need}.")]
    InvalidConfigValue {
        key: String,
        value: String,
        need: String,
    },

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        if std::mem::discriminant(self) != std::mem::discriminant(other) {
            return false;
        }

        // Good enough for testing purposes
        format!("{self:?}") == format!("{other:?}")
    }
}
