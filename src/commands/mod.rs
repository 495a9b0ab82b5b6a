//! Per-tool behaviour: preview semantics, command template, argument mapping.
//!
//! Each tool has a unit type implementing [`Command`]. The free functions at
//! the bottom of this module dispatch on [`StepKind`]/[`StepType`] with
//! exhaustive matches, so a new tool must be wired into all three.

/// Simplified `awk`: a single `{ print $a, $b }` clause.
pub mod awk;
/// Field projection by delimiter.
pub mod cut;
/// Regex or literal line filter.
pub mod grep;
/// First `n` lines.
pub mod head;
/// Code-point line sort.
pub mod sort;
/// Last `n` lines.
pub mod tail;
/// Character translate, delete and squeeze.
pub mod tr;
/// Collapse consecutive duplicate lines.
pub mod uniq;
/// Line, word and character counts.
pub mod wc;

use thiserror::Error;

use crate::parse::Args;
use crate::step::{StepKind, StepType};

/// The two-character escape that stands for a tab in delimiter fields.
pub const TAB_ESCAPE: &str = "\\t";

/// True for the tab character or its `\t` escape.
pub fn is_tab(s: &str) -> bool {
    s == "\t" || s == TAB_ESCAPE
}

/// What a step sees: the current lines and the text they were split from.
#[derive(Debug, Clone, Copy)]
pub struct Input<'a> {
    pub lines: &'a [String],
    pub text: &'a str,
}

/// Why a single step produced no output.
#[derive(Debug, Error)]
pub enum StepError {
    /// The step is valid shell but too complex to simulate.
    #[error("preview not available for this program")]
    PreviewUnavailable,
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// One tool's preview semantics, command template and argument mapping.
pub trait Command {
    type Options;

    /// Short flags that never take a value.
    const SWITCHES: &'static [char];

    /// Transform the input lines. Must not modify the input.
    fn apply(options: &Self::Options, input: &Input<'_>) -> Result<Vec<String>, StepError>;

    /// The literal tool invocation, e.g. `head -n 10`.
    fn render(options: &Self::Options) -> String;

    /// Options from a scanned argument list.
    fn build(args: &Args) -> Self::Options;
}

/// Run one step against `input`.
pub fn apply(kind: &StepKind, input: &Input<'_>) -> Result<Vec<String>, StepError> {
    match kind {
        StepKind::Cut(o) => cut::Cut::apply(o, input),
        StepKind::Grep(o) => grep::Grep::apply(o, input),
        StepKind::Sort(o) => sort::Sort::apply(o, input),
        StepKind::Uniq => uniq::Uniq::apply(&(), input),
        StepKind::Head(o) => head::Head::apply(o, input),
        StepKind::Tail(o) => tail::Tail::apply(o, input),
        StepKind::Tr(o) => tr::Tr::apply(o, input),
        StepKind::Wc(o) => wc::Wc::apply(o, input),
        StepKind::Awk(o) => awk::Awk::apply(o, input),
    }
}

/// The shell invocation for one step.
pub fn render(kind: &StepKind) -> String {
    match kind {
        StepKind::Cut(o) => cut::Cut::render(o),
        StepKind::Grep(o) => grep::Grep::render(o),
        StepKind::Sort(o) => sort::Sort::render(o),
        StepKind::Uniq => uniq::Uniq::render(&()),
        StepKind::Head(o) => head::Head::render(o),
        StepKind::Tail(o) => tail::Tail::render(o),
        StepKind::Tr(o) => tr::Tr::render(o),
        StepKind::Wc(o) => wc::Wc::render(o),
        StepKind::Awk(o) => awk::Awk::render(o),
    }
}

/// Boolean flags of a tool; every other short flag takes a value.
pub fn switches(step_type: StepType) -> &'static [char] {
    match step_type {
        StepType::Cut => cut::Cut::SWITCHES,
        StepType::Grep => grep::Grep::SWITCHES,
        StepType::Sort => sort::Sort::SWITCHES,
        StepType::Uniq => uniq::Uniq::SWITCHES,
        StepType::Head => head::Head::SWITCHES,
        StepType::Tail => tail::Tail::SWITCHES,
        StepType::Tr => tr::Tr::SWITCHES,
        StepType::Wc => wc::Wc::SWITCHES,
        StepType::Awk => awk::Awk::SWITCHES,
    }
}

/// Build a step's options from its scanned arguments.
pub fn build(step_type: StepType, args: &Args) -> StepKind {
    match step_type {
        StepType::Cut => StepKind::Cut(cut::Cut::build(args)),
        StepType::Grep => StepKind::Grep(grep::Grep::build(args)),
        StepType::Sort => StepKind::Sort(sort::Sort::build(args)),
        StepType::Uniq => {
            uniq::Uniq::build(args);
            StepKind::Uniq
        }
        StepType::Head => StepKind::Head(head::Head::build(args)),
        StepType::Tail => StepKind::Tail(tail::Tail::build(args)),
        StepType::Tr => StepKind::Tr(tr::Tr::build(args)),
        StepType::Wc => StepKind::Wc(wc::Wc::build(args)),
        StepType::Awk => StepKind::Awk(awk::Awk::build(args)),
    }
}
