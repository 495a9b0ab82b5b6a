use super::{Command, Input, StepError, is_tab};
use crate::parse::Args;
use crate::render::{quote, quote_delimiter};
use crate::step::CutOptions;

/// `cut -d D -f LIST`.
///
/// Fields come out in list order, not sorted, and are rejoined with the input
/// delimiter. Indices past the end of a line, zero, or non-numeric entries
/// yield an empty field.
pub struct Cut;

/// The delimiter a cut step splits on: tab forms become a tab, empty means `,`.
fn delimiter(options: &CutOptions) -> &str {
    if is_tab(&options.delimiter) {
        "\t"
    } else if options.delimiter.is_empty() {
        ","
    } else {
        &options.delimiter
    }
}

impl Command for Cut {
    type Options = CutOptions;

    const SWITCHES: &'static [char] = &[];

    fn apply(options: &CutOptions, input: &Input<'_>) -> Result<Vec<String>, StepError> {
        let delim = delimiter(options);
        let fields: Vec<Option<usize>> = options
            .fields
            .split(',')
            .map(|f| f.trim().parse::<usize>().ok().filter(|&n| n > 0))
            .collect();

        Ok(input
            .lines
            .iter()
            .map(|line| {
                let parts: Vec<&str> = line.split(delim).collect();
                fields
                    .iter()
                    .map(|f| f.and_then(|n| parts.get(n - 1).copied()).unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join(delim)
            })
            .collect())
    }

    fn render(options: &CutOptions) -> String {
        format!(
            "cut -d {} -f {}",
            quote_delimiter(delimiter(options)),
            quote(&options.fields)
        )
    }

    fn build(args: &Args) -> CutOptions {
        let mut options = CutOptions::default();
        if let Some(d) = args.value('d') {
            options.delimiter = d.to_string();
        }
        if let Some(f) = args.value('f') {
            options.fields = f.to_string();
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::run;

    fn cut(d: &str, f: &str) -> CutOptions {
        CutOptions {
            delimiter: d.into(),
            fields: f.into(),
        }
    }

    #[test]
    fn single_field() {
        assert_eq!(run::<Cut>(&cut(",", "2"), &["1,2,3", "4,5,6"]).unwrap(), ["2", "5"]);
    }

    #[test]
    fn fields_keep_list_order() {
        assert_eq!(run::<Cut>(&cut(",", "3,1"), &["a,b,c"]).unwrap(), ["c,a"]);
    }

    #[test]
    fn missing_fields_are_empty() {
        assert_eq!(run::<Cut>(&cut(",", "1,4"), &["a,b"]).unwrap(), ["a,"]);
        assert_eq!(run::<Cut>(&cut(",", "x"), &["a,b"]).unwrap(), [""]);
        assert_eq!(run::<Cut>(&cut(",", "0"), &["a,b"]).unwrap(), [""]);
    }

    #[test]
    fn empty_field_list() {
        assert_eq!(run::<Cut>(&cut(",", ""), &["a,b", "c"]).unwrap(), ["", ""]);
    }

    #[test]
    fn tab_delimiter_both_forms() {
        for d in ["\t", "\\t"] {
            assert_eq!(
                run::<Cut>(&cut(d, "2,1"), &["a\tb\tc"]).unwrap(),
                ["b\ta"],
                "d = {d:?}"
            );
        }
    }

    #[test]
    fn empty_delimiter_means_comma() {
        assert_eq!(run::<Cut>(&cut("", "2"), &["a,b"]).unwrap(), ["b"]);
    }

    #[test]
    fn multi_char_delimiter() {
        assert_eq!(run::<Cut>(&cut("::", "2"), &["a::b::c"]).unwrap(), ["b"]);
    }

    #[test]
    fn render_forms() {
        assert_eq!(Cut::render(&cut(",", "2")), "cut -d ',' -f '2'");
        assert_eq!(Cut::render(&cut("\t", "1,3")), "cut -d $'\\t' -f '1,3'");
        assert_eq!(Cut::render(&cut("", "")), "cut -d ',' -f ''");
    }
}
