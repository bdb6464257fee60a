use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before a request reaches the wire.
///
/// Transport failures and HTTP error statuses are not represented here:
/// the former surface as an absent response, the latter as a normal one.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Client configuration error: {0}")]
    Config(String),
}
