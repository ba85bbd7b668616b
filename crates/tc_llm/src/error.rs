pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Ollama error: {0}")]
    Ollama(#[from] ollama_rs::error::OllamaError),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Splitter error: {0}")]
    Split(#[from] tc_split::Error),

    /// The backend failed while a response was being streamed.
    #[error("{0}")]
    Stream(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
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
