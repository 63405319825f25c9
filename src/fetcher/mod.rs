pub mod client;
pub mod decode;
pub mod errors;
pub mod types;

pub use client::fetch_with_retries;
pub use errors::FetchError;
pub use types::{DEFAULT_USER_AGENT, FetchPolicy, RawDocument};
