//! Command serializer: steps to a literal shell pipeline.

use crate::commands::{self, is_tab};
use crate::config::Settings;
use crate::step::Step;

/// ANSI-C quoted tab, the form `cut -d` and `awk -F` get for a tab delimiter.
pub const ANSI_TAB: &str = "$'\\t'";

/// Single-quote `value` for the shell; an embedded `'` becomes `'\''`.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Quote a delimiter, writing a tab as [`ANSI_TAB`].
pub fn quote_delimiter(value: &str) -> String {
    if is_tab(value) {
        ANSI_TAB.to_string()
    } else {
        quote(value)
    }
}

/// Renders step sequences after a fixed source stage.
#[derive(Debug, Clone)]
pub struct Serializer {
    /// First stage, the command that reads the input file.
    source: String,
    /// Indent of continuation lines in formatted output.
    indent: String,
}

impl Default for Serializer {
    fn default() -> Self {
        Self {
            source: "cat YOUR_FILE.csv".into(),
            indent: "  ".into(),
        }
    }
}

impl Serializer {
    pub fn from_config(settings: &Settings) -> Self {
        Self {
            source: settings.source.clone(),
            indent: settings.indent.clone(),
        }
    }

    /// The source stage followed by one invocation per step.
    ///
    /// Formatted output puts each stage on its own line, continued with a
    /// trailing backslash. Never fails: degenerate options still render.
    pub fn serialize(&self, steps: &[Step], formatted: bool) -> String {
        let joiner = if formatted {
            format!(" | \\\n{}", self.indent)
        } else {
            " | ".to_string()
        };
        steps.iter().fold(self.source.clone(), |mut cmd, step| {
            cmd.push_str(&joiner);
            cmd.push_str(&commands::render(&step.kind));
            cmd
        })
    }
}
