use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApogeeError>;

#[derive(Debug, Error)]
pub enum ApogeeError {
    #[error("config error: {0}")]
    Config(String),

    #[error("link error: {0}")]
    Link(String),
}
