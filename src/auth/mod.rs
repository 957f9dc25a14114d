//! Authentication module
//!
//! The LMS API authenticates every request with an access token carried as a
//! query parameter. A [`Credential`] is an explicit value handed to whoever
//! issues requests; there is no process-wide token state.

mod loader;
mod types;

pub use loader::{default_token_path, load_token_file};
pub use types::{Credential, DEFAULT_TOKEN_PARAM};
