use std::sync::LazyLock;

use regex::Regex;

static CONTINUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\\r?\n\s*").expect("line continuation pattern must compile")
});

/// Join a possibly multi-line command into one line: backslash-newline
/// continuations (with the following indentation) and bare newlines become
/// single spaces.
pub fn normalize(command: &str) -> String {
    CONTINUATION
        .replace_all(command, " ")
        .replace("\r\n", " ")
        .replace('\n', " ")
        .trim()
        .to_string()
}

/// Split a command into pipe stages, respecting single/double quotes and
/// backslash escapes. Stages are trimmed; empty ones are kept so the caller
/// can reject them.
pub fn split_stages(command: &str) -> Vec<String> {
    let mut stages = Vec::new();
    let mut buf = String::new();
    let (mut sq, mut dq, mut esc) = (false, false, false);

    for c in command.chars() {
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
        if c == '|' && !sq && !dq {
            stages.push(buf.trim().to_string());
            buf.clear();
            continue;
        }
        buf.push(c);
    }

    stages.push(buf.trim().to_string());
    stages
}
