use super::{Command, Input, StepError};
use crate::parse::Args;
use crate::step::CountOptions;

/// `tail -n N`.
pub struct Tail;

impl Command for Tail {
    type Options = CountOptions;

    const SWITCHES: &'static [char] = &[];

    fn apply(options: &CountOptions, input: &Input<'_>) -> Result<Vec<String>, StepError> {
        let skip = input.lines.len().saturating_sub(options.count());
        Ok(input.lines[skip..].to_vec())
    }

    fn render(options: &CountOptions) -> String {
        format!("tail -n {}", options.count())
    }

    fn build(args: &Args) -> CountOptions {
        super::head::count_options(args)
    }
}
