use regex::RegexBuilder;

use super::{Command, Input, StepError};
use crate::parse::Args;
use crate::render::quote;
use crate::step::{GrepOptions, PatternSource};

/// `grep [-i] [-v] [-F] PATTERN`.
///
/// The pattern is a regex unless `-F`, in which case it is escaped and
/// matched as a literal substring. A pattern starting with `-` is written
/// after `-e` so grep does not read it as an option.
pub struct Grep;

impl Command for Grep {
    type Options = GrepOptions;

    const SWITCHES: &'static [char] = &['i', 'v', 'F'];

    fn apply(options: &GrepOptions, input: &Input<'_>) -> Result<Vec<String>, StepError> {
        let text = options.pattern.text();
        let source = if options.fixed {
            regex::escape(text)
        } else {
            text.to_string()
        };
        let re = RegexBuilder::new(&source)
            .case_insensitive(options.ignore_case)
            .build()?;
        let invert = options.pattern.is_inverted();

        Ok(input
            .lines
            .iter()
            .filter(|line| re.is_match(line) != invert)
            .cloned()
            .collect())
    }

    fn render(options: &GrepOptions) -> String {
        let mut words = vec!["grep".to_string()];
        if options.ignore_case {
            words.push("-i".into());
        }
        if options.pattern.is_inverted() {
            words.push("-v".into());
        }
        if options.fixed {
            words.push("-F".into());
        }
        let text = options.pattern.text();
        if text.starts_with('-') {
            words.push("-e".into());
        }
        words.push(quote(text));
        words.join(" ")
    }

    fn build(args: &Args) -> GrepOptions {
        let text = args
            .positionals()
            .iter()
            .map(|p| p.value.as_str())
            .find(|v| !v.is_empty())
            .or_else(|| args.value('e'))
            .unwrap_or_default()
            .to_string();

        GrepOptions {
            pattern: if args.is_set('v') {
                PatternSource::Invert(text)
            } else {
                PatternSource::Match(text)
            },
            ignore_case: args.is_set('i'),
            fixed: args.is_set('F'),
        }
    }
}
