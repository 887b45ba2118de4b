mod client;
mod error;

pub use client::{RemoteRetrievalClient, SERVER_ENV_VAR};
pub use error::RemoteRetrievalError;
