use super::{AggregateResult, OutputFormat, format_markdown, format_table};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Outbound port for finished results
pub trait ResultSink {
    fn emit(&mut self, result: &AggregateResult) -> io::Result<()>;
}

/// Render a result in the requested format
pub fn render(result: &AggregateResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Markdown => format_markdown(result),
        OutputFormat::Table => format_table(result),
        OutputFormat::Json => match serde_json::to_string_pretty(result) {
            Ok(json) => format!("{json}\n"),
            Err(e) => format!("{{\"error\": \"failed to serialize result: {e}\"}}\n"),
        },
    }
}

/// Prints results to stdout and optionally mirrors them into a file
pub struct StdoutSink {
    format: OutputFormat,
    output: Option<PathBuf>,
}

impl StdoutSink {
    pub fn new(format: OutputFormat, output: Option<PathBuf>) -> Self {
        Self { format, output }
    }
}

impl ResultSink for StdoutSink {
    fn emit(&mut self, result: &AggregateResult) -> io::Result<()> {
        let text = render(result, self.format);
        print!("{text}");

        if let Some(path) = &self.output {
            fs::write(path, &text).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("Failed to write output file '{}': {}", path.display(), e),
                )
            })?;
        }
        Ok(())
    }
}
