use super::AggregateResult;
use std::fmt::Write;

/// Human-readable summary of a result.
///
/// Debug results also list the names and ids and end with the trace.
pub fn format_markdown(result: &AggregateResult) -> String {
    let mut out = String::new();

    let case_mode = if result.case_sensitive {
        "case-sensitive"
    } else {
        "case-insensitive"
    };
    let filter_display = match result.filter_keyword.as_deref() {
        Some(keyword) if !keyword.is_empty() => format!("`{keyword}` ({case_mode})"),
        _ => "(none - returning all)".to_string(),
    };
    let instance_display = result
        .instance_ids
        .iter()
        .map(|id| format!("`{id}`"))
        .collect::<Vec<_>>()
        .join(", ");

    let _ = writeln!(out, "**Instance IDs:** {instance_display}");
    let _ = writeln!(out, "**Filter:** {filter_display}");
    let _ = writeln!(out, "**Results:** {}", result.results_count);

    let Some(trace) = &result.debug_trace else {
        return out;
    };

    if !result.account_names.is_empty() {
        let _ = writeln!(out, "\n### Account Names\n\n```");
        for name in &result.account_names {
            let _ = writeln!(out, "{name}");
        }
        let _ = writeln!(out, "```\n\n### Account IDs\n\n```");
        for id in &result.values {
            let _ = writeln!(out, "{id}");
        }
        let _ = writeln!(out, "```");
    }

    let _ = write!(out, "\n### Debug Info\n\n```\n{}```\n", trace.render());
    out
}
