//! pipesmith: build Unix text pipelines one step at a time.
//!
//! A pipeline is an ordered list of [`step::Step`]s, each one of nine tools
//! (`cut`, `grep`, `sort`, `uniq`, `head`, `tail`, `tr`, `wc`, `awk`). The crate
//! previews a pipeline against sample text, writes the equivalent shell
//! command, and parses such a command back into steps.
//!
//! # Architecture
//!
//! - **[`step`]**: Step model: ids, types, per-tool options, the editable [`step::Pipeline`].
//! - **[`commands`]**: Per-tool preview semantics, command templates and argument mapping.
//! - **[`eval`]**: Pipeline evaluator: runs the steps in order over the input lines.
//! - **[`render`]**: Command serializer and shell quoting.
//! - **[`parse`]**: Command parser: stage splitting, flag scanning, typed parse errors.
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: Terminal logging and the request history file.

/// Per-tool preview, rendering and argument mapping.
pub mod commands;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Pipeline evaluation and preview errors.
pub mod eval;
/// Logger setup and request history.
pub mod logging;
/// Shell command parsing back into steps.
pub mod parse;
/// Shell command synthesis.
pub mod render;
/// Steps, options and the editable pipeline.
pub mod step;

pub use eval::{PREVIEW_ERROR_MARKER, PreviewError};
pub use parse::{ParseError, ParseErrorKind};
pub use step::{Pipeline, Step, StepId, StepKind, StepType};

/// Preview `raw` through `steps`. On failure the result is an error text
/// starting with [`PREVIEW_ERROR_MARKER`].
pub fn evaluate(raw: &str, steps: &[Step]) -> String {
    eval::evaluate(raw, steps)
}

/// The shell command for `steps` with the default source stage.
pub fn serialize(steps: &[Step], formatted: bool) -> String {
    render::Serializer::default().serialize(steps, formatted)
}

/// Parse a shell command back into steps, skipping its first stage.
pub fn parse(command: &str) -> Result<Vec<Step>, ParseError> {
    parse::parse(command)
}
