//! Link header cursor extraction
//!
//! Format: `<https://host/api/v1/x?page=2>; rel="next", <...>; rel="last"`

use crate::auth::Credential;
use crate::error::{Error, Result};
use url::Url;

/// Relation that continues a paginated sequence
pub const NEXT_REL: &str = "next";

/// Where the next page of a sequence lives.
///
/// Derived fresh from each response and consumed to build the next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    next: Url,
}

impl PaginationCursor {
    /// Read the cursor out of a response's Link header.
    ///
    /// `base` is the URL of the response the header came from; relative
    /// targets are resolved against it. A missing header, or one without a
    /// `next` relation, ends pagination (`Ok(None)`). A `next` entry whose
    /// target cannot be read is an error.
    pub fn from_link_header(header: Option<&str>, base: &Url) -> Result<Option<Self>> {
        let Some(header) = header else {
            return Ok(None);
        };
        let Some(target) = find_link(header, NEXT_REL)? else {
            return Ok(None);
        };
        let next = base
            .join(target)
            .map_err(|e| Error::malformed_link(format!("{header} ({e})")))?;
        Ok(Some(Self { next }))
    }

    /// Next page URL as the server sent it
    pub fn url(&self) -> &Url {
        &self.next
    }

    /// Consume the cursor into a request URL carrying `credential`
    pub fn into_request_url(self, credential: &Credential) -> Url {
        credential.attached(self.next)
    }
}

/// Find the target of the entry whose `rel` includes `rel`.
///
/// `rel` values may be quoted or bare and may list several space-separated
/// relations. An entry naming `rel` without a `<target>` is an error.
pub fn find_link<'h>(header: &'h str, rel: &str) -> Result<Option<&'h str>> {
    for entry in split_entries(header) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let segments: Vec<&str> = entry.split(';').map(str::trim).collect();
        if !segments.iter().any(|param| param_has_rel(param, rel)) {
            continue;
        }

        let target = segments[0];
        return match target.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            Some(url) if !url.trim().is_empty() => Ok(Some(url.trim())),
            _ => Err(Error::malformed_link(header)),
        };
    }
    Ok(None)
}

fn param_has_rel(param: &str, rel: &str) -> bool {
    let Some((name, value)) = param.split_once('=') else {
        return false;
    };
    if !name.trim().eq_ignore_ascii_case("rel") {
        return false;
    }
    value
        .trim()
        .trim_matches('"')
        .trim_matches('\'')
        .split_ascii_whitespace()
        .any(|r| r.eq_ignore_ascii_case(rel))
}

/// Split on commas that sit outside `<...>` targets
fn split_entries(header: &str) -> impl Iterator<Item = &str> {
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut parts = Vec::new();
    for (i, c) in header.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&header[start..]);
    parts.into_iter()
}
