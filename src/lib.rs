//! # grade-audit
//!
//! Export grade-change audit events of an LMS course to CSV.
//!
//! The interesting part is the fetch layer: list endpoints are paginated
//! with `Link: <url>; rel="next"` headers, and every page must be requested
//! with the same query-string credential. The pager follows the cursor until
//! it runs out and merges each page into one result.
//!
//! ## Features
//!
//! - **Link-header pagination**: follow `rel="next"` until the last page
//! - **Credential propagation**: the token is re-attached to every follow-up URL
//! - **Page merging**: list pages concatenate, envelope pages merge their lists
//! - **CSV export**: one headerless row per grade change, named by grader
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use grade_audit::{Credential, HttpClient, Pager, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let http = HttpClient::new()?;
//!     let pager = Pager::new(&http, Credential::new("secret"));
//!
//!     let start = url::Url::parse("https://lms.example.com/api/v1/courses")?;
//!     let courses = pager.fetch_all(start).await?.into_sequence()?;
//!     println!("{} courses", courses.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  cli: load courses → select → staff → grade changes → CSV    │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────┬─────────────────┴──────────┬──────────┬─────────┐
//! │  canvas   │        pagination          │  report  │ progress│
//! ├───────────┼────────────────────────────┼──────────┼─────────┤
//! │ Endpoints │ Link cursor  Page  merge   │ CSV rows │ Bar     │
//! │ Courses   │ Pager (PageSource)         │          │         │
//! └───────────┴──────────────┬─────────────┴──────────┴─────────┘
//!                  ┌─────────┴──────────┐
//!                  │ http (retry, rate) │ auth (Credential)
//!                  └────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Query-string credential and token file loading
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Link-header pagination and page merging
pub mod pagination;

/// Progress reporting for long fetches
pub mod progress;

/// LMS endpoints and resource types
pub mod canvas;

/// CSV report output
pub mod report;

/// Layered runtime settings
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use auth::Credential;
pub use canvas::CanvasClient;
pub use config::Settings;
pub use http::HttpClient;
pub use pagination::{merge, Accumulator, Page, PageSource, Pager};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
