use super::{Command, Input, StepError};
use crate::parse::Args;
use crate::step::WcOptions;

/// `wc [-l] [-w] [-c]`, producing one tab-separated line.
pub struct Wc;

impl Command for Wc {
    type Options = WcOptions;

    const SWITCHES: &'static [char] = &['l', 'w', 'c'];

    fn apply(options: &WcOptions, input: &Input<'_>) -> Result<Vec<String>, StepError> {
        let lines = input.lines.len();
        let words = input
            .lines
            .iter()
            .flat_map(|l| l.split_whitespace())
            .count();
        let chars = input.text.chars().count();

        let all = !(options.lines || options.words || options.chars);
        let counts: Vec<String> = [
            (options.lines, lines),
            (options.words, words),
            (options.chars, chars),
        ]
        .into_iter()
        .filter(|&(wanted, _)| all || wanted)
        .map(|(_, n)| n.to_string())
        .collect();

        Ok(vec![counts.join("\t")])
    }

    fn render(options: &WcOptions) -> String {
        let mut words = vec!["wc"];
        for (set, flag) in [
            (options.lines, "-l"),
            (options.words, "-w"),
            (options.chars, "-c"),
        ] {
            if set {
                words.push(flag);
            }
        }
        words.join(" ")
    }

    fn build(args: &Args) -> WcOptions {
        WcOptions {
            lines: args.is_set('l'),
            words: args.is_set('w'),
            chars: args.is_set('c'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::run;

    const TEXT: &[&str] = &["one two", "  three  ", "four five six"];

    fn wc(lines: bool, words: bool, chars: bool) -> WcOptions {
        WcOptions {
            lines,
            words,
            chars,
        }
    }

    #[test]
    fn all_counts_by_default() {
        // 7 + 1 + 9 + 1 + 13
        assert_eq!(run::<Wc>(&WcOptions::default(), TEXT).unwrap(), ["3\t6\t31"]);
    }

    #[test]
    fn selected_counts_keep_order() {
        assert_eq!(run::<Wc>(&wc(true, false, false), TEXT).unwrap(), ["3"]);
        assert_eq!(run::<Wc>(&wc(false, true, true), TEXT).unwrap(), ["6\t31"]);
        assert_eq!(run::<Wc>(&wc(true, false, true), TEXT).unwrap(), ["3\t31"]);
    }

    #[test]
    fn chars_are_scalar_values() {
        assert_eq!(run::<Wc>(&wc(false, false, true), &["héllo"]).unwrap(), ["5"]);
    }

    #[test]
    fn render_forms() {
        assert_eq!(Wc::render(&WcOptions::default()), "wc");
        assert_eq!(Wc::render(&wc(true, false, true)), "wc -l -c");
    }
}
