use thiserror::Error;

/// Failure conditions of the scoring and suggestion engine.
///
/// Marketplace and text-mining failures arrive as [`ohno::AppError`] and are carried
/// through untouched in [`Error::Upstream`].
#[derive(Debug, Error)]
pub enum Error {
    /// The requested suggestion strategy tag is not known.
    #[error("invalid suggestion strategy '{0}'")]
    InvalidStrategy(String),

    /// The seed does not have the shape the strategy needs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A marketplace or keyword extraction call failed.
    #[error("upstream call failed: {0:#}")]
    Upstream(ohno::AppError),

    /// An average was requested over an empty set of apps.
    #[error("no data available to compute {0}")]
    NoData(&'static str),
}

impl From<ohno::AppError> for Error {
    fn from(error: ohno::AppError) -> Self {
        Self::Upstream(error)
    }
}
