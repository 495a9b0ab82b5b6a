use super::{Command, Input, StepError};
use crate::parse::Args;
use crate::render::quote;
use crate::step::TrOptions;

/// `tr SET1 SET2`, `tr -d SET1`, `tr -s SET1`.
///
/// Sets are literal character lists; ranges and classes are not expanded.
/// The preview picks one mode, in priority order delete, squeeze, translate.
pub struct Tr;

fn delete(line: &str, set1: &[char]) -> String {
    line.chars().filter(|c| !set1.contains(c)).collect()
}

/// Collapse runs of one repeated character from `set1` to a single one.
fn squeeze(line: &str, set1: &[char]) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev = None;
    for c in line.chars() {
        if prev == Some(c) && set1.contains(&c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Map the k-th character of `set1` to the k-th of `set2`, dropping it when
/// `set2` is too short.
fn translate(line: &str, set1: &[char], set2: &[char]) -> String {
    line.chars()
        .filter_map(|c| match set1.iter().position(|&s| s == c) {
            Some(k) => set2.get(k).copied(),
            None => Some(c),
        })
        .collect()
}

impl Command for Tr {
    type Options = TrOptions;

    const SWITCHES: &'static [char] = &['d', 's'];

    fn apply(options: &TrOptions, input: &Input<'_>) -> Result<Vec<String>, StepError> {
        let set1: Vec<char> = options.set1.chars().collect();
        let set2: Vec<char> = options.set2.chars().collect();
        let lines = input.lines.iter();

        Ok(if options.delete {
            lines.map(|l| delete(l, &set1)).collect()
        } else if options.squeeze {
            lines.map(|l| squeeze(l, &set1)).collect()
        } else {
            lines.map(|l| translate(l, &set1, &set2)).collect()
        })
    }

    fn render(options: &TrOptions) -> String {
        let mut words = vec!["tr".to_string()];
        if options.delete {
            words.push("-d".into());
        }
        if options.squeeze {
            words.push("-s".into());
        }
        words.push(quote(&options.set1));
        // `tr -d` takes a second set only when it also squeezes.
        let with_set2 = match (options.delete, options.squeeze) {
            (true, false) => false,
            (false, true) => !options.set2.is_empty(),
            _ => true,
        };
        if with_set2 {
            words.push(quote(&options.set2));
        }
        words.join(" ")
    }

    fn build(args: &Args) -> TrOptions {
        let mut sets = args.positionals().iter().map(|p| p.value.clone());
        TrOptions {
            set1: sets.next().unwrap_or_default(),
            set2: sets.next().unwrap_or_default(),
            delete: args.is_set('d'),
            squeeze: args.is_set('s'),
        }
    }
}
