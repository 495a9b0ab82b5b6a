use super::tokenize::{unquote, unquote_value};
use super::types::{FlagArg, ParseErrorKind, Positional};

/// The arguments of one stage, sorted into positionals and flags.
///
/// Flags keep their order of appearance; when a flag repeats, the last one
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    positionals: Vec<Positional>,
    flags: Vec<(char, FlagArg)>,
}

impl Args {
    /// Scan raw words left to right.
    ///
    /// A word starting with `-` is a cluster of short flags. Flags listed in
    /// `switches` are booleans. Any other flag takes the next word as its
    /// value if that word does not start with `-`; that ends the cluster. A
    /// value flag with nothing to take is dropped. Values glued to their
    /// flag (`-f1`) are not recognised. After `--` every word is positional.
    pub fn scan(words: &[String], switches: &[char]) -> Result<Self, ParseErrorKind> {
        let mut args = Args::default();
        let mut options_done = false;
        let mut i = 0;

        while i < words.len() {
            let word = &words[i];
            i += 1;

            if options_done || !word.starts_with('-') {
                args.positionals.push(Positional {
                    raw: word.clone(),
                    value: unquote(word),
                });
                continue;
            }
            if word == "--" {
                options_done = true;
                continue;
            }
            if word.starts_with("--") {
                return Err(ParseErrorKind::LongOption(word.clone()));
            }

            for name in word.chars().skip(1) {
                if switches.contains(&name) {
                    args.flags.push((name, FlagArg::Switch));
                    continue;
                }
                match words.get(i) {
                    Some(next) if !next.starts_with('-') => {
                        args.flags.push((name, FlagArg::Value(unquote_value(next))));
                        i += 1;
                        break;
                    }
                    _ => log::debug!("dropping -{name}: no value follows"),
                }
            }
        }

        Ok(args)
    }

    pub fn positionals(&self) -> &[Positional] {
        &self.positionals
    }

    /// The last occurrence of a flag.
    pub fn flag(&self, name: char) -> Option<&FlagArg> {
        self.flags
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|(_, arg)| arg)
    }

    /// Whether a flag appeared at all.
    pub fn is_set(&self, name: char) -> bool {
        self.flag(name).is_some()
    }

    /// The value of a value-taking flag.
    pub fn value(&self, name: char) -> Option<&str> {
        match self.flag(name)? {
            FlagArg::Value(v) => Some(v),
            FlagArg::Switch => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positionals.is_empty() && self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(line: &str, switches: &[char]) -> Args {
        let words = super::super::tokenize::split_words(line).unwrap();
        Args::scan(&words, switches).unwrap()
    }

    #[test]
    fn switch_cluster() {
        let a = scan("-iv foo", &['i', 'v', 'F']);
        assert!(a.is_set('i'));
        assert!(a.is_set('v'));
        assert!(!a.is_set('F'));
        assert_eq!(a.positionals()[0].value, "foo");
    }

    #[test]
    fn value_flags_consume_next_word() {
        let a = scan("-d ',' -f 2", &[]);
        assert_eq!(a.value('d'), Some(","));
        assert_eq!(a.value('f'), Some("2"));
        assert!(a.positionals().is_empty());
    }

    #[test]
    fn value_flag_without_value_is_dropped() {
        let a = scan("-n", &[]);
        assert!(!a.is_set('n'));
        let a = scan("-f -d x", &[]);
        assert!(!a.is_set('f'));
        assert_eq!(a.value('d'), Some("x"));
    }

    #[test]
    fn glued_value_is_not_recognised() {
        let a = scan("-n5", &[]);
        assert!(!a.is_set('n'));
        assert!(!a.is_set('5'));
    }

    #[test]
    fn value_ends_cluster() {
        let a = scan("-nr 5", &['r']);
        assert_eq!(a.value('n'), Some("5"));
        assert!(!a.is_set('r'));
    }

    #[test]
    fn switch_then_value_in_cluster() {
        let a = scan("-rk 2", &['r']);
        assert!(a.is_set('r'));
        assert_eq!(a.value('k'), Some("2"));
    }

    #[test]
    fn last_flag_wins() {
        let a = scan("-n 3 -n 7", &[]);
        assert_eq!(a.value('n'), Some("7"));
    }

    #[test]
    fn tab_value() {
        let a = scan(r"-d $'\t'", &[]);
        assert_eq!(a.value('d'), Some("\t"));
    }

    #[test]
    fn quoted_dash_is_positional() {
        let a = scan("-v '-x'", &['v']);
        assert!(a.is_set('v'));
        assert_eq!(a.positionals()[0].value, "-x");
        assert_eq!(a.positionals()[0].raw, "'-x'");
    }

    #[test]
    fn double_dash_ends_options() {
        let a = scan("-i -- -x", &['i']);
        assert!(a.is_set('i'));
        assert_eq!(a.positionals()[0].value, "-x");
    }

    #[test]
    fn long_option_rejected() {
        let words = vec!["--ignore-case".to_string()];
        assert_eq!(
            Args::scan(&words, &['i']),
            Err(ParseErrorKind::LongOption("--ignore-case".into()))
        );
    }
}
