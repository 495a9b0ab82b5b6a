use super::{Command, Input, StepError};
use crate::parse::Args;

/// `uniq`: adjacent duplicates only, no sorting.
pub struct Uniq;

impl Command for Uniq {
    type Options = ();

    const SWITCHES: &'static [char] = &[];

    fn apply(_: &(), input: &Input<'_>) -> Result<Vec<String>, StepError> {
        let mut lines = input.lines.to_vec();
        lines.dedup();
        Ok(lines)
    }

    fn render(_: &()) -> String {
        "uniq".into()
    }

    fn build(args: &Args) {
        if !args.is_empty() {
            log::debug!("uniq takes no options; ignoring arguments");
        }
    }
}
