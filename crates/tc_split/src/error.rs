pub type Result<T> = std::result::Result<T, Error>;

/// Usage errors.
///
/// The splitter has no data errors: any text is valid input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("open and close markers must not be empty")]
    EmptyMarker,

    #[error("open and close markers must differ, both are {0:?}")]
    IdenticalMarkers(String),

    #[error("splitter was already finalized, cannot feed more text")]
    Finalized,
}
