//! Retrieval of remote media referenced by inbound channel messages.

pub mod error;
pub mod fetch;

pub use {
    error::{Error, Result},
    fetch::MediaFetcher,
};
