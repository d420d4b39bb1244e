//! Command lines typed into a harness shell to start the program under test
//!
//! Environment for the program is spelled out in the command line itself so
//! that nothing depends on whatever the tmux server inherited.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchCommand {
    program: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
    unset: Vec<String>,
    input: Option<String>,
    output: Option<PathBuf>,
}

impl LaunchCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a variable for the program, overriding an earlier `unset` of it.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.unset.retain(|k| *k != key);
        self.env.push((key, value.into()));
        self
    }

    /// Remove a variable from the program's environment.
    pub fn unset(mut self, key: impl Into<String>) -> Self {
        self.unset.push(key.into());
        self
    }

    /// Shell pipeline whose stdout feeds the program. Not quoted.
    pub fn input(mut self, pipeline: impl Into<String>) -> Self {
        self.input = Some(pipeline.into());
        self
    }

    /// Redirect the program's stdout to `path`.
    pub fn output(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn render(&self) -> String {
        let mut parts = Vec::new();

        if let Some(input) = &self.input {
            parts.push(input.clone());
            parts.push("|".to_string());
        }

        if !self.unset.is_empty() {
            parts.push("env".to_string());
            for key in &self.unset {
                parts.push("-u".to_string());
                parts.push(shell_quote(key));
            }
        }
        for (key, value) in &self.env {
            parts.push(format!("{}={}", key, shell_quote(value)));
        }

        parts.push(shell_quote(&self.program));
        parts.extend(self.args.iter().map(|a| shell_quote(a)));

        if let Some(output) = &self.output {
            parts.push(">".to_string());
            parts.push(shell_quote(&output.to_string_lossy()));
        }

        parts.join(" ")
    }
}

pub(crate) fn shell_quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if s.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | ',' | ':' | '=' | '+')
    }) {
        return s.to_string();
    }
    // Single-quote everything else, escaping existing single quotes
    format!("'{}'", s.replace('\'', "'\\''"))
}
