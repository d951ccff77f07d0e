use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write;

/// One step recorded in the diagnostic trace
#[derive(Debug, Clone, Serialize)]
pub struct TraceLine {
    pub at: DateTime<Local>,
    pub message: String,
}

/// Human-readable log of what one invocation did.
///
/// Always collected; only shown to the user in debug mode.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DiagnosticTrace {
    lines: Vec<TraceLine>,
}

impl DiagnosticTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.lines.push(TraceLine {
            at: Local::now(),
            message: message.into(),
        });
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.message.as_str())
    }

    /// Check whether any recorded message contains `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        self.messages().any(|m| m.contains(needle))
    }

    /// Render as `HH:MM:SS.mmm message` lines
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let _ = writeln!(out, "{} {}", line.at.format("%H:%M:%S%.3f"), line.message);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_order() {
        let mut trace = DiagnosticTrace::new();
        trace.push("first");
        trace.push(format!("second {}", 2));

        let rendered = trace.render();
        let first = rendered.find("first").unwrap();
        let second = rendered.find("second 2").unwrap();
        assert!(first < second);
        assert_eq!(rendered.lines().count(), 2);
        assert!(trace.mentions("second"));
    }
}
