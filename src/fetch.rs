mod instances;
mod pager;

pub use instances::{InstanceOutcome, MergedAccounts, fetch_all_instances};
pub use pager::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, FetchPage, PageFetcher};
