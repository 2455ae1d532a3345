use thiserror::Error;

#[derive(Error, Debug)]
pub enum WindError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sample on line {line}: {value:?}")]
    InvalidSample { line: usize, value: String },

    #[error("Raw sample {raw} exceeds ADC maximum {max}")]
    SampleOutOfRange { raw: u16, max: u16 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report decode failed: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, WindError>;
