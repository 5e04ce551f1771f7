use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("Failed to decode input: {0}")]
    Decode(String),

    #[error("Failed to encode output: {0}")]
    Encode(String),

    #[error("Failed to render PDF page: {0}")]
    Render(String),

    #[error("Compression cancelled")]
    Cancelled,

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid size budget: {0}")]
    InvalidBudget(String),

    #[error("Invalid ladder: {0}")]
    InvalidLadder(String),

    #[error("Invalid maximum dimension: {0}")]
    InvalidDimension(u32),

    #[error("Invalid render scale: {0}")]
    InvalidScale(f32),
}
