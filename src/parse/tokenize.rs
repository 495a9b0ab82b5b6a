use super::types::ParseErrorKind;
use crate::commands::TAB_ESCAPE;

/// Split a stage into words at unquoted whitespace.
///
/// Quotes and backslashes are kept in the words; only the splitting respects
/// them, so `'{ print $1 }'` stays a single word.
pub fn split_words(stage: &str) -> Result<Vec<String>, ParseErrorKind> {
    let mut words = Vec::new();
    let mut buf = String::new();
    let (mut sq, mut dq, mut esc) = (false, false, false);

    for c in stage.chars() {
        if esc {
            buf.push(c);
            esc = false;
            continue;
        }
        if c == '\\' && !sq {
            esc = true;
            buf.push(c);
            continue;
        }
        if c == '\'' && !dq {
            sq = !sq;
            buf.push(c);
            continue;
        }
        if c == '"' && !sq {
            dq = !dq;
            buf.push(c);
            continue;
        }
        if c.is_whitespace() && !sq && !dq {
            if !buf.is_empty() {
                words.push(std::mem::take(&mut buf));
            }
            continue;
        }
        buf.push(c);
    }

    if sq || dq {
        return Err(ParseErrorKind::UnterminatedQuote);
    }
    if !buf.is_empty() {
        words.push(buf);
    }
    Ok(words)
}

/// Remove shell quoting from one word using shlex (POSIX rules).
///
/// Falls back to dropping quote characters when shlex does not yield exactly
/// one word (malformed quoting, a leading `#`, an empty `''`).
pub fn unquote(raw: &str) -> String {
    match shlex::split(raw) {
        Some(mut words) if words.len() == 1 => words.remove(0),
        _ => raw.chars().filter(|c| !matches!(c, '\'' | '"')).collect(),
    }
}

/// Unquote a flag value, turning the tab spellings `$'\t'` and `\t` into a
/// tab character.
pub fn unquote_value(raw: &str) -> String {
    if raw == TAB_ESCAPE {
        return "\t".into();
    }
    if let Some(inner) = raw.strip_prefix("$'").and_then(|r| r.strip_suffix('\'')) {
        return inner.replace(TAB_ESCAPE, "\t");
    }
    unquote(raw)
}

/// The tool name of a stage's first word: unquoted, without a directory.
pub fn command_name(word: &str) -> String {
    let word = unquote(word);
    match word.rsplit_once('/') {
        Some((_, name)) if !name.is_empty() => name.to_string(),
        _ => word,
    }
}
