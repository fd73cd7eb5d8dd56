use std::fmt;

use serde::{Deserialize, Serialize};

/// Calculation phase, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Enumerated compositions and their translations.
    Plan,
    Apply,
    Resolve,
    Maximal,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Plan => "plan",
            Phase::Apply => "apply",
            Phase::Resolve => "resolve",
            Phase::Maximal => "maximal",
        };
        write!(f, "{name}")
    }
}

/// A single line of the symbolic trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub phase: Phase,
    /// Monotonic within one log.
    pub step_number: u64,
    pub line: String,
}

/// Ordered trace lines accumulated across the phases of one calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationLog {
    entries: Vec<LogEntry>,
    next_step: u64,
}

impl CalculationLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_step: 0,
        }
    }

    pub fn record(&mut self, phase: Phase, line: impl Into<String>) {
        self.entries.push(LogEntry {
            phase,
            step_number: self.next_step,
            line: line.into(),
        });
        self.next_step += 1;
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.line.as_str())
    }

    pub fn phase_lines(&self, phase: Phase) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.phase == phase)
            .map(|e| e.line.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All lines joined by newlines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_numbers_steps() {
        let mut log = CalculationLog::new();
        log.record(Phase::Apply, "a");
        log.record(Phase::Resolve, String::from("b"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[1].step_number, 1);
        assert_eq!(log.phase_lines(Phase::Resolve).collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(log.render(), "a\nb\n");
    }
}
