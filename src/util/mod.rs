//! Small helpers shared by the facade and the fetcher.
//!
//! - **URL validation**: SSRF-aware checks on feed URLs before fetching
//! - **Text cleanup**: control characters and whitespace in display strings

mod text;
mod url_validator;

pub use text::{collapse_whitespace, strip_control_chars};
pub use url_validator::{validate_feed_url, UrlValidationError};
