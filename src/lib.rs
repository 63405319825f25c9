pub mod api;
pub mod app_state;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod result;
pub mod scrape;
pub mod urls;

pub use fetcher::{FetchError, FetchPolicy};
pub use result::ExtractionResult;
pub use scrape::scrape_website;
pub use urls::{is_valid_url, normalize_url};
