use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown statistic '{0}' (expected one of: {1})")]
    UnknownStatistic(String, String),

    #[error("Invalid analytics parameters: {0}")]
    InvalidParameters(String),
}
