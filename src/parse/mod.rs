//! Command parser: a shell pipeline string back into steps.
//!
//! The first stage (the file read, e.g. `cat data.csv`) is discarded; every
//! following stage becomes one step with freshly generated id.

pub mod args;
pub mod shell;
pub mod tokenize;
pub mod types;

pub use args::Args;
pub use shell::{normalize, split_stages};
pub use tokenize::{command_name, split_words, unquote, unquote_value};
pub use types::{FlagArg, ParseError, ParseErrorKind, Positional};

use crate::commands;
use crate::step::{Step, StepType};

/// Parse a full command string into steps.
///
/// Fails on the first stage that cannot be interpreted; nothing is returned
/// for the stages before it.
pub fn parse(command: &str) -> Result<Vec<Step>, ParseError> {
    let line = normalize(command);
    split_stages(&line)
        .into_iter()
        .skip(1)
        .map(|stage| parse_stage(&stage).map_err(|kind| ParseError { stage, kind }))
        .collect()
}

/// Parse one stage, e.g. `grep -i 'error'`.
pub fn parse_stage(stage: &str) -> Result<Step, ParseErrorKind> {
    let words = split_words(stage)?;
    let Some((first, rest)) = words.split_first() else {
        return Err(ParseErrorKind::EmptyStage);
    };
    let name = command_name(first);
    let step_type: StepType = name.parse().map_err(ParseErrorKind::UnknownCommand)?;
    let args = Args::scan(rest, commands::switches(step_type))?;
    log::debug!("stage '{stage}' -> {step_type} {args:?}");
    Ok(Step::new(commands::build(step_type, &args)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{
        AwkOptions, CountOptions, CutOptions, GrepOptions, PatternSource, SortOptions, StepKind,
        TrOptions, WcOptions,
    };

    fn kinds(command: &str) -> Vec<StepKind> {
        parse(command).unwrap().into_iter().map(|s| s.kind).collect()
    }

    fn grep(pattern: PatternSource, ignore_case: bool, fixed: bool) -> StepKind {
        StepKind::Grep(GrepOptions {
            pattern,
            ignore_case,
            fixed,
        })
    }

    #[test]
    fn source_only() {
        assert!(parse("cat f.csv").unwrap().is_empty());
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn grep_case_insensitive() {
        assert_eq!(
            kinds("cat f.csv | grep -i 'Error'"),
            vec![grep(PatternSource::Match("Error".into()), true, false)]
        );
    }

    #[test]
    fn grep_invert_with_pattern_after() {
        assert_eq!(
            kinds("cat f | grep -v foo"),
            vec![grep(PatternSource::Invert("foo".into()), false, false)]
        );
    }

    #[test]
    fn grep_flags_after_pattern() {
        assert_eq!(
            kinds("cat f | grep 'a b' -F -i"),
            vec![grep(PatternSource::Match("a b".into()), true, true)]
        );
    }

    #[test]
    fn grep_first_pattern_wins() {
        assert_eq!(
            kinds("cat f | grep one two"),
            vec![grep(PatternSource::Match("one".into()), false, false)]
        );
    }

    #[test]
    fn grep_e_pattern() {
        assert_eq!(
            kinds("cat f | grep -e '-x' -v"),
            vec![grep(PatternSource::Invert("-x".into()), false, false)]
        );
    }

    #[test]
    fn cut_with_tab() {
        assert_eq!(
            kinds(r"cat f | cut -d $'\t' -f '1,3'"),
            vec![StepKind::Cut(CutOptions {
                delimiter: "\t".into(),
                fields: "1,3".into(),
            })]
        );
    }

    #[test]
    fn cut_missing_values_keep_defaults() {
        assert_eq!(kinds("cat f | cut -f"), vec![StepKind::Cut(CutOptions::default())]);
    }

    #[test]
    fn full_pipeline() {
        assert_eq!(
            kinds("cat f | sort -r | uniq | head -n 5 | tail -n 2 | wc -l -w"),
            vec![
                StepKind::Sort(SortOptions { reverse: true }),
                StepKind::Uniq,
                StepKind::Head(CountOptions { n: "5".into() }),
                StepKind::Tail(CountOptions { n: "2".into() }),
                StepKind::Wc(WcOptions {
                    lines: true,
                    words: true,
                    chars: false,
                }),
            ]
        );
    }

    #[test]
    fn tr_sets() {
        assert_eq!(
            kinds("cat f | tr 'a-c' 'x'"),
            vec![StepKind::Tr(TrOptions {
                set1: "a-c".into(),
                set2: "x".into(),
                delete: false,
                squeeze: false,
            })]
        );
        assert_eq!(
            kinds("cat f | tr -ds ' ' ''"),
            vec![StepKind::Tr(TrOptions {
                set1: " ".into(),
                set2: String::new(),
                delete: true,
                squeeze: true,
            })]
        );
    }

    #[test]
    fn awk_program_and_separator() {
        assert_eq!(
            kinds("cat f | awk -F ':' '{ print $1, $3 }'"),
            vec![StepKind::Awk(AwkOptions {
                separator: ":".into(),
                program: "{ print $1, $3 }".into(),
            })]
        );
    }

    #[test]
    fn awk_unquoted_program_ignored() {
        assert_eq!(
            kinds("cat f | awk -F , x"),
            vec![StepKind::Awk(AwkOptions {
                separator: ",".into(),
                program: "{ print $0 }".into(),
            })]
        );
    }

    #[test]
    fn multi_line_command() {
        assert_eq!(
            kinds("cat f | \\\n  sort | \\\n  uniq"),
            vec![StepKind::Sort(SortOptions::default()), StepKind::Uniq]
        );
    }

    #[test]
    fn command_path_is_reduced_to_name() {
        assert_eq!(kinds("cat f | /usr/bin/uniq"), vec![StepKind::Uniq]);
    }

    #[test]
    fn ids_are_fresh() {
        let steps = parse("cat f | uniq | uniq").unwrap();
        assert_ne!(steps[0].id, steps[1].id);
    }

    #[test]
    fn unknown_command() {
        let err = parse("cat f | sort | sed 's/a/b/'").unwrap_err();
        assert_eq!(err.stage, "sed 's/a/b/'");
        assert_eq!(err.kind, ParseErrorKind::UnknownCommand("sed".into()));
        assert_eq!(
            err.to_string(),
            "Error parsing 'sed 's/a/b/'': unsupported command 'sed'"
        );
    }

    #[test]
    fn empty_stage() {
        let err = parse("cat f | | sort").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyStage);
    }

    #[test]
    fn unterminated_quote() {
        let err = parse("cat f | grep 'abc").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedQuote);
        assert_eq!(err.stage, "grep 'abc");
    }

    #[test]
    fn long_option() {
        let err = parse("cat f | sort --reverse").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::LongOption("--reverse".into()));
    }
}
