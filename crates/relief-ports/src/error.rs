use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("not found")]
    NotFound,
    /// Failure reported by the scheduling service, message kept as sent.
    #[error("{0}")]
    Remote(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}
