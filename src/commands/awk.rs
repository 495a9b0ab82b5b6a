use std::sync::LazyLock;

use regex::Regex;

use super::{Command, Input, StepError, is_tab};
use crate::parse::Args;
use crate::render::{quote, quote_delimiter};
use crate::step::AwkOptions;

/// `awk [-F SEP] 'PROGRAM'`.
///
/// The preview understands exactly one program shape, `{ print $a, $b, ... }`.
/// Anything else is rendered faithfully but reported as
/// [`StepError::PreviewUnavailable`].
pub struct Awk;

static PRINT_FIELDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\{\s*print\s+(\$\d+(?:\s*,\s*\$\d+)*)\s*\}\s*$")
        .expect("print-clause pattern must compile")
});

/// Field indices of a `{ print $a, $b }` program, or `None` for any other
/// program. An index too large to represent is kept as `None` and prints empty.
fn print_fields(program: &str) -> Option<Vec<Option<usize>>> {
    let caps = PRINT_FIELDS.captures(program)?;
    Some(
        caps[1]
            .split(',')
            .map(|f| f.trim().trim_start_matches('$').parse().ok())
            .collect(),
    )
}

/// Split a record the way awk does for the given `-F`.
fn split_record<'a>(line: &'a str, separator: &str) -> Vec<&'a str> {
    if is_tab(separator) {
        line.split('\t').collect()
    } else if separator.is_empty() {
        line.split_whitespace().collect()
    } else {
        line.split(separator).collect()
    }
}

impl Command for Awk {
    type Options = AwkOptions;

    const SWITCHES: &'static [char] = &[];

    fn apply(options: &AwkOptions, input: &Input<'_>) -> Result<Vec<String>, StepError> {
        let fields = print_fields(options.program()).ok_or(StepError::PreviewUnavailable)?;

        Ok(input
            .lines
            .iter()
            .map(|line| {
                let parts = split_record(line, &options.separator);
                fields
                    .iter()
                    .map(|f| match *f {
                        Some(0) => line.as_str(),
                        Some(n) => parts.get(n - 1).copied().unwrap_or(""),
                        None => "",
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect())
    }

    fn render(options: &AwkOptions) -> String {
        if options.separator.is_empty() {
            format!("awk {}", quote(options.program()))
        } else {
            format!(
                "awk -F {} {}",
                quote_delimiter(&options.separator),
                quote(options.program())
            )
        }
    }

    fn build(args: &Args) -> AwkOptions {
        let mut options = AwkOptions::default();
        if let Some(sep) = args.value('F') {
            options.separator = sep.to_string();
        }
        if let Some(program) = args
            .positionals()
            .iter()
            .find(|p| p.raw.len() >= 2 && p.raw.starts_with('\'') && p.raw.ends_with('\''))
        {
            options.program = program.value.clone();
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::run;

    fn awk(separator: &str, program: &str) -> AwkOptions {
        AwkOptions {
            separator: separator.into(),
            program: program.into(),
        }
    }

    #[test]
    fn recognizes_print_clauses() {
        assert_eq!(print_fields("{ print $1 }"), Some(vec![Some(1)]));
        assert_eq!(print_fields("{print $3,$1}"), Some(vec![Some(3), Some(1)]));
        assert_eq!(
            print_fields("  {  print $2 ,  $10  }  "),
            Some(vec![Some(2), Some(10)])
        );
    }

    #[test]
    fn rejects_other_programs() {
        for program in [
            "{ $3 = $1 + $2 }",
            "{ print $1 $2 }",
            "{ print NF }",
            "/x/ { print $1 }",
            "{ print $1 } END { print }",
            "{ print }",
        ] {
            assert!(print_fields(program).is_none(), "{program}");
        }
    }

    #[test]
    fn whitespace_fields() {
        let o = awk("", "{ print $2, $1 }");
        assert_eq!(run::<Awk>(&o, &["  a   b c", "x"]).unwrap(), ["b a", " x"]);
    }

    #[test]
    fn separator_fields() {
        let o = awk(",", "{ print $3, $1 }");
        assert_eq!(run::<Awk>(&o, &["a,b,c"]).unwrap(), ["c a"]);
        let o = awk("\\t", "{ print $2 }");
        assert_eq!(run::<Awk>(&o, &["a b\tc"]).unwrap(), ["c"]);
    }

    #[test]
    fn dollar_zero_is_whole_line() {
        let o = AwkOptions::default();
        assert_eq!(run::<Awk>(&o, &["a b", "c"]).unwrap(), ["a b", "c"]);
    }

    #[test]
    fn complex_program_is_unavailable() {
        let o = awk("", "{ $3 = $1 + $2 }");
        assert!(matches!(
            run::<Awk>(&o, &["1 2"]),
            Err(StepError::PreviewUnavailable)
        ));
    }

    #[test]
    fn render_forms() {
        assert_eq!(Awk::render(&awk("", "{ print $1 }")), "awk '{ print $1 }'");
        assert_eq!(Awk::render(&awk(",", "{ print $1 }")), "awk -F ',' '{ print $1 }'");
        assert_eq!(Awk::render(&awk("\t", "{ print $1 }")), "awk -F $'\\t' '{ print $1 }'");
        assert_eq!(
            Awk::render(&awk("", "{ $3 = $1 + $2 }")),
            "awk '{ $3 = $1 + $2 }'"
        );
        assert_eq!(Awk::render(&awk("", "")), "awk '{ print $0 }'");
    }
}
