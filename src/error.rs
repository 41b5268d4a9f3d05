//! Infrastructure error type.

use thiserror::Error;

/// The error type returned by the service's fallible startup and serving
/// operations.
///
/// Request-level failures (400, 404, 500) are expressed as HTTP
/// [`Response`](crate::Response) values through [`ApiError`](crate::ApiError),
/// not as `Error`s. This type surfaces infrastructure failures: binding to a
/// port, accepting a connection, or a configuration that cannot be used.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(String),
}
