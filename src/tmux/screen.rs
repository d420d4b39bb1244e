//! Captured screen content

use std::fmt;
use std::ops::Deref;

const RULE: &str = "==========";

/// Visible lines of a window, top to bottom, without trailing blank lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    lines: Vec<String>,
}

impl Screen {
    /// Parse the raw output of `capture-pane`.
    ///
    /// `capture-pane` without `-S` writes the visible pane top-down, so the
    /// first `max_lines` lines are the screen. Trailing blank lines are the
    /// unused bottom of the pane and are dropped.
    pub fn from_capture(raw: &str, max_lines: usize) -> Self {
        let mut lines: Vec<String> = raw.lines().take(max_lines).map(str::to_string).collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Bottom line, or `""` for an empty screen.
    pub fn last(&self) -> &str {
        self.from_end(1)
    }

    /// `n`-th line counted from the bottom (1 = last), or `""` when out of range.
    pub fn from_end(&self, n: usize) -> &str {
        if n == 0 || n > self.lines.len() {
            return "";
        }
        &self.lines[self.lines.len() - n]
    }

    pub fn contains_line(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }

    pub fn any_line_contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl Deref for Screen {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

/// Numbered dump used for diagnostics.
impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        for (idx, line) in self.lines.iter().enumerate() {
            writeln!(f, "{:>2}: {}", idx, line)?;
        }
        write!(f, "{}", RULE)
    }
}
