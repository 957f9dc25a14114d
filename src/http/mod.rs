//! HTTP client module
//!
//! Async GET client used by the pager and the LMS endpoints.
//!
//! # Features
//!
//! - **Timeouts**: one transport timeout shared by every request
//! - **Opt-in Retries**: constant, linear, or exponential backoff (off by default)
//! - **Rate Limiting**: token bucket limiter using governor

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
