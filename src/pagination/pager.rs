//! Pager implementation
//!
//! Drives fetch → page → callback cycles against a listing endpoint.

use super::types::{AllPages, Page, PageResult, PageStrategy};
use crate::codec::QueryOptions;
use crate::error::{Error, Result};
use crate::http::{Request, Transport};
use crate::response::ApiResult;
use crate::types::{Method, StringMap};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

/// Lazy iterator over the pages of one listing call.
///
/// Nothing is fetched until [`each_page`](Pager::each_page) or
/// [`all_pages`](Pager::all_pages) runs. Pages are fetched strictly one
/// after another; each call starts again from the initial target.
pub struct Pager<S> {
    transport: Arc<dyn Transport>,
    initial: Result<Url>,
    strategy: Arc<S>,
    headers: StringMap,
    ok_codes: Vec<u16>,
    cancel: Option<CancellationToken>,
}

impl<S: PageStrategy> Pager<S> {
    /// Create a pager starting at `url`.
    ///
    /// An unparseable URL is kept as a setup error and reported by the
    /// first iteration, before any request.
    pub fn new(transport: Arc<dyn Transport>, url: &str, strategy: S) -> Self {
        Self::with_initial(transport, Url::parse(url).map_err(Error::from), strategy)
    }

    /// Create a pager whose target is `base_url` with the parameters of `opts` appended.
    ///
    /// Parameters already present in `base_url` are kept.
    pub fn from_query<O: QueryOptions + ?Sized>(
        transport: Arc<dyn Transport>,
        base_url: &str,
        opts: &O,
        strategy: S,
    ) -> Self {
        let initial = Url::parse(base_url)
            .map_err(Error::from)
            .and_then(|mut url| {
                let pairs = opts.query_fields().into_pairs()?;
                if !pairs.is_empty() {
                    url.query_pairs_mut().extend_pairs(pairs);
                }
                Ok(url)
            });
        Self::with_initial(transport, initial, strategy)
    }

    /// Create a pager that fails with `err` as soon as it is iterated
    pub fn from_error(transport: Arc<dyn Transport>, err: Error, strategy: S) -> Self {
        Self::with_initial(transport, Err(err), strategy)
    }

    fn with_initial(transport: Arc<dyn Transport>, initial: Result<Url>, strategy: S) -> Self {
        Self {
            transport,
            initial,
            strategy: Arc::new(strategy),
            headers: StringMap::new(),
            ok_codes: Method::PAGE_OK_CODES.to_vec(),
            cancel: None,
        }
    }

    /// Observe a cancellation token before and during every page request
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Add a header to every page request
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add headers to every page request
    #[must_use]
    pub fn with_headers(mut self, headers: StringMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Override the accepted status codes (default: [`Method::PAGE_OK_CODES`])
    #[must_use]
    pub fn with_ok_codes(mut self, codes: &[u16]) -> Self {
        self.ok_codes = codes.to_vec();
        self
    }

    /// The first target, or the setup error
    pub fn initial_url(&self) -> Result<&Url> {
        self.initial.as_ref().map_err(Clone::clone)
    }

    /// The bound page strategy
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Fetch pages in order, handing each one to `callback`.
    ///
    /// Iteration stops successfully when the callback returns `Ok(false)`,
    /// when a page holds no records, when there is no next target, or when
    /// the next target was already fetched during this call. An error from
    /// the callback is returned unchanged.
    pub async fn each_page<F>(&self, mut callback: F) -> Result<()>
    where
        F: FnMut(&Page<S>) -> Result<bool>,
    {
        let mut target = self.initial.clone()?;
        let mut visited = HashSet::new();
        let mut fetched = 0usize;

        loop {
            visited.insert(target.to_string());
            let page = self.fetch(target).await?;
            fetched += 1;
            debug!("Fetched page {} from {}", fetched, page.url());

            if !callback(&page)? {
                debug!("Pagination stopped by caller after {} page(s)", fetched);
                return Ok(());
            }

            if page.is_empty()? {
                debug!("Page {} is empty, stopping", fetched);
                return Ok(());
            }

            match page.next_target()? {
                None => return Ok(()),
                Some(next) if visited.contains(next.as_str()) => {
                    warn!("Next page {} was already fetched, stopping", next);
                    return Ok(());
                }
                Some(next) => target = next,
            }
        }
    }

    /// Fetch every page and merge their records.
    ///
    /// If iteration fails after at least one page arrived, the error is
    /// [`Error::Incomplete`] carrying the records gathered so far.
    pub async fn all_pages(&self) -> Result<AllPages> {
        let mut results: Vec<PageResult> = Vec::new();
        let outcome = self
            .each_page(|page| {
                results.push(page.result().clone());
                Ok(true)
            })
            .await;

        // A page that failed to decode ends the merge; earlier pages are kept
        let mut failure = outcome.err();
        let mut records: Vec<Value> = Vec::new();
        let mut merged = 0usize;
        for result in &results {
            match self.strategy.records(result) {
                Ok(page_records) => {
                    records.extend(page_records);
                    merged += 1;
                }
                Err(err) => {
                    failure.get_or_insert(err);
                    break;
                }
            }
        }

        match failure {
            None => Ok(AllPages::new(records, merged)),
            Some(err) if merged == 0 => Err(err),
            Some(err) => Err(Error::Incomplete {
                pages: merged,
                records,
                source: Box::new(err),
            }),
        }
    }

    async fn fetch(&self, url: Url) -> Result<Page<S>> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(Error::Cancelled);
        }

        let request = Request::new(Method::GET, url.clone()).headers(&self.headers);
        let outcome = match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => Err(Error::Cancelled),
                    outcome = self.transport.execute(request) => outcome,
                }
            }
            None => self.transport.execute(request).await,
        };

        let raw = ApiResult::<Value>::from_outcome(outcome, &self.ok_codes).into_raw()?;
        Ok(Page::new(
            PageResult::new(url, raw),
            Arc::clone(&self.strategy),
        ))
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for Pager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("initial", &self.initial)
            .field("strategy", &self.strategy)
            .field("ok_codes", &self.ok_codes)
            .finish_non_exhaustive()
    }
}
