//! Fetch-sequence driver

use super::link::PaginationCursor;
use super::merge::merge;
use super::types::{Accumulator, Page};
use crate::auth::Credential;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::progress::{NoProgress, ProgressReporter};
use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

/// Raw result of one GET: the body and its Link header, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// Response body text
    pub body: String,
    /// Value of the `Link` header
    pub link: Option<String>,
}

impl FetchedPage {
    /// Page with no Link header
    pub fn last(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            link: None,
        }
    }

    /// Page with a Link header
    pub fn with_link(body: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            link: Some(link.into()),
        }
    }
}

/// Something that can GET a URL for the pager
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch `url`. Transport failures and non-success statuses are errors.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let response = self.get(url).await?;
        let link = match response.headers().get(reqwest::header::LINK) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| Error::malformed_link("<non-UTF-8 header value>"))?
                    .to_string(),
            ),
            None => None,
        };
        let body = response.text().await?;
        Ok(FetchedPage { body, link })
    }
}

/// Drives one paginated fetch sequence to completion.
///
/// Every request, including follow-ups built from `next` links, carries the
/// credential. Pages are fetched strictly one after another.
pub struct Pager<'a, S: PageSource + ?Sized> {
    source: &'a S,
    credential: Credential,
    max_pages: Option<usize>,
}

impl<'a, S: PageSource + ?Sized> Pager<'a, S> {
    /// Create a pager without a page ceiling
    pub fn new(source: &'a S, credential: Credential) -> Self {
        Self {
            source,
            credential,
            max_pages: None,
        }
    }

    /// Fail with [`Error::PaginationLimitExceeded`] instead of fetching more
    /// than `max_pages` pages in one sequence. `None` keeps it unbounded.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Credential attached to every request
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Fetch every page reachable from `start` and merge them
    pub async fn fetch_all(&self, start: Url) -> Result<Accumulator> {
        self.fetch_all_with_progress(start, &mut NoProgress).await
    }

    /// [`Pager::fetch_all`], reporting each follow-up page to `progress`
    pub async fn fetch_all_with_progress(
        &self,
        start: Url,
        progress: &mut dyn ProgressReporter,
    ) -> Result<Accumulator> {
        let result = self.drive(start, progress).await;
        progress.finish();
        result
    }

    async fn drive(&self, start: Url, progress: &mut dyn ProgressReporter) -> Result<Accumulator> {
        let mut url = self.credential.attached(start);
        let fetched = self.source.fetch(&url).await?;
        let mut acc = Accumulator::new(Page::decode(&fetched.body)?);
        let mut link = fetched.link;

        while let Some(cursor) = PaginationCursor::from_link_header(link.as_deref(), &url)? {
            if let Some(limit) = self.max_pages {
                if acc.pages() >= limit {
                    return Err(Error::PaginationLimitExceeded { limit });
                }
            }

            url = cursor.into_request_url(&self.credential);
            let fetched = self.source.fetch(&url).await?;
            let page = Page::decode(&fetched.body)?;
            if page.shape() != acc.shape() {
                return Err(Error::decode(format!(
                    "page {} has {} shape but the first page has {} shape",
                    acc.pages() + 1,
                    page.shape(),
                    acc.shape()
                )));
            }

            acc = merge(acc, page);
            debug!("Merged page {}", acc.pages());
            progress.tick();
            link = fetched.link;
        }

        if acc.pages() > 1 {
            info!("Loaded {} pages", acc.pages());
        }
        Ok(acc)
    }
}

impl<S: PageSource + ?Sized> std::fmt::Debug for Pager<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("credential", &self.credential)
            .field("max_pages", &self.max_pages)
            .finish_non_exhaustive()
    }
}
