use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Typed media-fetch errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// A redirect response without a usable `Location` header.
    #[error("redirect ({status}) without location header")]
    RedirectWithoutLocation { status: u16 },

    /// The final response was not a success.
    #[error("media request returned status {status}")]
    Status { status: u16 },
}
