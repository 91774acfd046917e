use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sweep length mismatch: axis has {expected} bins, sweep has {actual}")]
    SweepLength { expected: usize, actual: usize },

    #[error("Recording error: {0}")]
    Recording(String),
}

pub type Result<T> = std::result::Result<T, DetectorError>;
