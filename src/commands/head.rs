use super::{Command, Input, StepError};
use crate::parse::Args;
use crate::step::CountOptions;

/// `head -n N`.
pub struct Head;

/// Count options from `-n`, or the default when it is missing.
pub(super) fn count_options(args: &Args) -> CountOptions {
    args.value('n')
        .map(|n| CountOptions { n: n.to_string() })
        .unwrap_or_default()
}

impl Command for Head {
    type Options = CountOptions;

    const SWITCHES: &'static [char] = &[];

    fn apply(options: &CountOptions, input: &Input<'_>) -> Result<Vec<String>, StepError> {
        Ok(input.lines.iter().take(options.count()).cloned().collect())
    }

    fn render(options: &CountOptions) -> String {
        format!("head -n {}", options.count())
    }

    fn build(args: &Args) -> CountOptions {
        count_options(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::run;

    fn n(n: &str) -> CountOptions {
        CountOptions { n: n.into() }
    }

    #[test]
    fn first_lines() {
        assert_eq!(run::<Head>(&n("2"), &["a", "b", "c"]).unwrap(), ["a", "b"]);
        assert_eq!(run::<Head>(&n("9"), &["a", "b"]).unwrap(), ["a", "b"]);
        assert!(run::<Head>(&n("0"), &["a"]).unwrap().is_empty());
    }

    #[test]
    fn malformed_count_defaults_to_ten() {
        let items: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        let items: Vec<&str> = items.iter().map(String::as_str).collect();
        assert_eq!(run::<Head>(&n("lots"), &items).unwrap().len(), 10);
        assert_eq!(Head::render(&n("lots")), "head -n 10");
    }
}
