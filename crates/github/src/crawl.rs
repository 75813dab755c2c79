//! Paginated listing.
//!
//! GitHub lists issues and labels in pages linked through the `Link`
//! header. [`GitHubClient::crawl`] follows `rel="next"` until the listing
//! ends or the page budget of the [`CrawlSettings`](gitcms_config::CrawlSettings)
//! runs out, handing every decoded record to the caller as it goes.

use octocrab::Page;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::client::GitHubClient;
use crate::error::Result;

/// What a finished crawl went through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Pages fetched.
    pub pages: u32,
    /// Records handed to the handler.
    pub items: usize,
    /// Whether the page budget stopped the crawl before the last page.
    pub truncated: bool,
}

impl GitHubClient {
    /// Walks every page of a listing, calling `handle` on each record.
    ///
    /// The first page is requested from `route` with `params`; following
    /// pages come from the `next` link of the previous one. Any failed
    /// page fails the whole crawl, so callers must discard what `handle`
    /// collected when this returns an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`](crate::Error::Upstream) on an error
    /// status and [`Error::Api`](crate::Error::Api) on transport or decoding
    /// failures.
    #[instrument(skip(self, params, handle), fields(route = %route))]
    pub async fn crawl<T, P, F>(&self, route: &str, params: &P, mut handle: F) -> Result<CrawlSummary>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
        F: FnMut(T),
    {
        let mut summary = CrawlSummary::default();
        let mut page: Page<T> = self.inner().get(route, Some(params)).await?;

        loop {
            summary.pages += 1;
            let next = page.next.take();
            for item in page.items {
                summary.items += 1;
                handle(item);
            }
            debug!(page = summary.pages, items = summary.items, "fetched page");

            if next.is_none() {
                return Ok(summary);
            }
            if self.crawl_settings().page_budget_exhausted(summary.pages) {
                warn!(pages = summary.pages, "page budget exhausted, listing truncated");
                summary.truncated = true;
                return Ok(summary);
            }

            match self.inner().get_page::<T>(&next).await? {
                Some(next_page) => page = next_page,
                None => return Ok(summary),
            }
        }
    }
}
