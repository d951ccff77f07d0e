use crate::account::AccountRecord;
use crate::source::{AccountSource, SourceError, normalize_reply};
use crate::trace::DiagnosticTrace;
use tracing::{debug, warn};

pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// One page of a paginated listing
#[derive(Debug, Clone)]
pub struct FetchPage {
    pub offset: usize,
    pub limit: usize,
    pub records: Vec<AccountRecord>,
    pub reported_total: Option<u64>,
}

/// Walks one instance's account listing page by page
#[derive(Debug, Clone, Copy)]
pub struct PageFetcher {
    page_size: usize,
    max_pages: usize,
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl PageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page size; clamped to at least one record
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Upper bound on requests per instance; clamped to at least one
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn page_limit(&self) -> usize {
        self.page_size
    }

    /// Fetch one page and normalize its envelope.
    ///
    /// A reply with an unexpected shape becomes an empty page.
    pub fn fetch_page(
        &self,
        source: &dyn AccountSource,
        instance_id: &str,
        offset: usize,
        trace: &mut DiagnosticTrace,
    ) -> Result<FetchPage, SourceError> {
        let raw = source.fetch_page(instance_id, offset, self.page_size)?;

        let page = match normalize_reply(&raw) {
            Ok(body) => FetchPage {
                offset,
                limit: self.page_size,
                records: body.records,
                reported_total: body.reported_total,
            },
            Err(e) => {
                warn!(instance_id, offset, error = %e, "unexpected get_accounts reply shape");
                trace.push(format!(
                    "Unexpected reply shape at offset {offset}: {e}; treating page as empty"
                ));
                FetchPage {
                    offset,
                    limit: self.page_size,
                    records: Vec::new(),
                    reported_total: None,
                }
            }
        };

        debug!(
            instance_id,
            offset,
            records = page.records.len(),
            total = ?page.reported_total,
            "fetched page"
        );
        Ok(page)
    }

    /// Fetch every account of one instance.
    ///
    /// Stops on a short page, once the reported total is reached, or after
    /// `max_pages` requests. A short page always ends the listing; the total
    /// is only trusted when it is positive.
    pub fn fetch_all(
        &self,
        source: &dyn AccountSource,
        instance_id: &str,
        trace: &mut DiagnosticTrace,
    ) -> Result<Vec<AccountRecord>, SourceError> {
        let mut accounts = Vec::new();
        let mut offset = 0;
        let mut pages = 0;

        loop {
            if pages == self.max_pages {
                warn!(instance_id, pages, "page limit reached, stopping pagination");
                trace.push(format!(
                    "Stopped after {pages} page(s): page limit reached with {} accounts",
                    accounts.len()
                ));
                break;
            }

            trace.push(format!(
                "Fetching accounts {offset} to {}",
                offset + self.page_size
            ));
            let page = self.fetch_page(source, instance_id, offset, trace)?;
            pages += 1;

            if offset == 0 {
                let total = page
                    .reported_total
                    .map_or_else(|| "unknown".to_string(), |t| t.to_string());
                trace.push(format!("Total accounts in instance: {total}"));
            }

            let short_page = page.records.len() < page.limit;
            accounts.extend(page.records);

            let total_reached = page
                .reported_total
                .is_some_and(|total| total > 0 && accounts.len() as u64 >= total);

            if short_page || total_reached {
                break;
            }

            offset += self.page_size;
        }

        trace.push(format!(
            "Pagination complete: fetched {} accounts in {pages} page(s)",
            accounts.len()
        ));
        Ok(accounts)
    }
}
