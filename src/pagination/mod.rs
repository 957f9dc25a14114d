//! Pagination module
//!
//! Follows `Link: <...>; rel="next"` cursors until the API stops handing
//! them out, merging every page into one [`Accumulator`].
//!
//! # Overview
//!
//! - [`Pager`] drives one fetch sequence: request, decode, merge, follow.
//! - [`merge`] folds a freshly decoded [`Page`] into the accumulator. Plain
//!   list responses concatenate; envelope responses (audit endpoints) extend
//!   their sequence fields and keep nested objects from the first page only.
//! - [`PaginationCursor`] is the `next` URL pulled out of a response's
//!   Link header, resolved against the URL that produced it.
//!
//! The accumulator's shape is fixed by the first page of a sequence. A later
//! page of the other shape fails the sequence with a decode error instead of
//! producing a silently truncated result.

mod link;
mod merge;
mod pager;
mod types;

pub use link::{find_link, PaginationCursor, NEXT_REL};
pub use merge::merge;
pub use pager::{FetchedPage, PageSource, Pager};
pub use types::{Accumulator, Page, Shape};
