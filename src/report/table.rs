use super::AggregateResult;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use std::fmt::Write;

/// Matching accounts as a table, one row per account
pub fn format_table(result: &AggregateResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Account ID", "Account Name"]);

    for (idx, account) in result.matched.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(account.cloud_account_id().as_deref().unwrap_or("-")),
            Cell::new(account.account_name().as_deref().unwrap_or("-")),
        ]);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{table}");
    let _ = writeln!(
        out,
        "{} of {} accounts matched across {} instance(s)",
        result.matched_count,
        result.fetched_count,
        result.instance_ids.len()
    );
    out
}
