use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Nothing to chart: no price observations for '{0}'")]
    EmptySeries(String),

    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}
