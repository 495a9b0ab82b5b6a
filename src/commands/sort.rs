use super::{Command, Input, StepError};
use crate::parse::Args;
use crate::step::SortOptions;

/// `sort [-r]`: code-point order, reversed afterwards with `-r`.
pub struct Sort;

impl Command for Sort {
    type Options = SortOptions;

    const SWITCHES: &'static [char] = &['r'];

    fn apply(options: &SortOptions, input: &Input<'_>) -> Result<Vec<String>, StepError> {
        let mut lines = input.lines.to_vec();
        lines.sort();
        if options.reverse {
            lines.reverse();
        }
        Ok(lines)
    }

    fn render(options: &SortOptions) -> String {
        if options.reverse {
            "sort -r".into()
        } else {
            "sort".into()
        }
    }

    fn build(args: &Args) -> SortOptions {
        SortOptions {
            reverse: args.is_set('r'),
        }
    }
}
