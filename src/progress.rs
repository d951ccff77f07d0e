use crate::source::{AccountSource, SourceError};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::time::Duration;

/// Wraps a source and shows a spinner with the page being fetched
pub struct ProgressSource<'a> {
    inner: &'a dyn AccountSource,
    bar: ProgressBar,
}

impl<'a> ProgressSource<'a> {
    pub fn new(inner: &'a dyn AccountSource, visible: bool) -> Self {
        let bar = if visible {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                bar.set_style(style);
            }
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { inner, bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl AccountSource for ProgressSource<'_> {
    fn fetch_page(
        &self,
        instance_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Value, SourceError> {
        self.bar.set_message(format!(
            "{instance_id}: accounts {offset}..{}",
            offset + limit
        ));
        self.inner.fetch_page(instance_id, offset, limit)
    }
}
