//! Per-tool option records.
//!
//! Field names are descriptive; the serde names are the short keys the editor
//! uses (`d`, `f`, `pattern`, `i`, `v`, `F`, ...). Every record defaults
//! missing keys and ignores unknown ones.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::{StepId, StepType};

/// Awk program a new step starts with.
pub const DEFAULT_AWK_PROGRAM: &str = "{ print $0 }";

/// Line count used by `head`/`tail` when `n` is missing or malformed.
pub const DEFAULT_COUNT: usize = 10;

/// A value coming from a form control: checkbox or text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
}

impl OptionValue {
    fn flag(self) -> Result<bool, KeyError> {
        match self {
            OptionValue::Flag(b) => Ok(b),
            OptionValue::Text(_) => Err(KeyError::Expected("a flag")),
        }
    }

    fn text(self) -> Result<String, KeyError> {
        match self {
            OptionValue::Text(s) => Ok(s),
            OptionValue::Flag(_) => Err(KeyError::Expected("text")),
        }
    }
}

/// Rejected option edit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("no step with id {0}")]
    UnknownStep(StepId),
    #[error("{step} has no option '{key}'")]
    UnknownKey { step: StepType, key: String },
    #[error("option '{key}' of {step} expects {expected}")]
    WrongType {
        step: StepType,
        key: String,
        expected: &'static str,
    },
}

/// Key-level failure, before the step type is known.
#[derive(Debug)]
pub(crate) enum KeyError {
    Unknown,
    Expected(&'static str),
}

impl KeyError {
    pub(crate) fn into_option_error(self, step: StepType, key: &str) -> OptionError {
        let key = key.to_string();
        match self {
            KeyError::Unknown => OptionError::UnknownKey { step, key },
            KeyError::Expected(expected) => OptionError::WrongType {
                step,
                key,
                expected,
            },
        }
    }
}

// ── cut ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutOptions {
    /// Field delimiter; a tab may be given as the tab character or as `\t`.
    #[serde(rename = "d")]
    pub delimiter: String,
    /// Comma-separated 1-based field list, e.g. `"1,3"`.
    #[serde(rename = "f")]
    pub fields: String,
}

impl Default for CutOptions {
    fn default() -> Self {
        Self {
            delimiter: ",".into(),
            fields: String::new(),
        }
    }
}

impl CutOptions {
    pub(crate) fn set(&mut self, key: &str, value: OptionValue) -> Result<(), KeyError> {
        match key {
            "d" => self.delimiter = value.text()?,
            "f" => self.fields = value.text()?,
            _ => return Err(KeyError::Unknown),
        }
        Ok(())
    }
}

// ── grep ──

/// The grep search text together with the direction of the match.
///
/// Holding the invert flag here means a pattern can never be stored in the
/// flag slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSource {
    /// Keep lines that match.
    Match(String),
    /// Keep lines that do not match (`-v`).
    Invert(String),
}

impl Default for PatternSource {
    fn default() -> Self {
        PatternSource::Match(String::new())
    }
}

impl PatternSource {
    pub fn text(&self) -> &str {
        match self {
            PatternSource::Match(t) | PatternSource::Invert(t) => t,
        }
    }

    pub fn is_inverted(&self) -> bool {
        matches!(self, PatternSource::Invert(_))
    }

    pub fn set_text(&mut self, text: String) {
        match self {
            PatternSource::Match(t) | PatternSource::Invert(t) => *t = text,
        }
    }

    pub fn set_inverted(&mut self, inverted: bool) {
        let text = match self {
            PatternSource::Match(t) | PatternSource::Invert(t) => std::mem::take(t),
        };
        *self = if inverted {
            PatternSource::Invert(text)
        } else {
            PatternSource::Match(text)
        };
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GrepFields", into = "GrepFields")]
pub struct GrepOptions {
    pub pattern: PatternSource,
    pub ignore_case: bool,
    /// Match the pattern as a literal string (`-F`).
    pub fixed: bool,
}

impl GrepOptions {
    /// Apply a `v` value that may still carry the pattern text.
    fn set_invert(&mut self, value: OptionValue) {
        match value {
            OptionValue::Flag(b) => self.pattern.set_inverted(b),
            // A non-empty string in the flag slot is the pattern, inverted.
            OptionValue::Text(text) if text.is_empty() => self.pattern.set_inverted(false),
            OptionValue::Text(text) => self.pattern = PatternSource::Invert(text),
        }
    }

    pub(crate) fn set(&mut self, key: &str, value: OptionValue) -> Result<(), KeyError> {
        match key {
            "pattern" => self.pattern.set_text(value.text()?),
            "i" => self.ignore_case = value.flag()?,
            "F" => self.fixed = value.flag()?,
            "v" => self.set_invert(value),
            _ => return Err(KeyError::Unknown),
        }
        Ok(())
    }
}

/// Wire form of grep options, where `v` may hold the pattern itself.
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct GrepFields {
    pattern: String,
    i: bool,
    v: InvertField,
    #[serde(rename = "F")]
    fixed: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum InvertField {
    Flag(bool),
    Pattern(String),
}

impl Default for InvertField {
    fn default() -> Self {
        InvertField::Flag(false)
    }
}

impl From<GrepFields> for GrepOptions {
    fn from(fields: GrepFields) -> Self {
        let mut options = GrepOptions {
            pattern: PatternSource::Match(fields.pattern),
            ignore_case: fields.i,
            fixed: fields.fixed,
        };
        let v = match fields.v {
            InvertField::Flag(b) => OptionValue::Flag(b),
            InvertField::Pattern(p) => OptionValue::Text(p),
        };
        options.set_invert(v);
        options
    }
}

impl From<GrepOptions> for GrepFields {
    fn from(options: GrepOptions) -> Self {
        let v = InvertField::Flag(options.pattern.is_inverted());
        let pattern = match options.pattern {
            PatternSource::Match(t) | PatternSource::Invert(t) => t,
        };
        GrepFields {
            pattern,
            i: options.ignore_case,
            v,
            fixed: options.fixed,
        }
    }
}

// ── sort ──

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    #[serde(rename = "r")]
    pub reverse: bool,
}

impl SortOptions {
    pub(crate) fn set(&mut self, key: &str, value: OptionValue) -> Result<(), KeyError> {
        match key {
            "r" => self.reverse = value.flag()?,
            _ => return Err(KeyError::Unknown),
        }
        Ok(())
    }
}

// ── head / tail ──

/// Line count for `head` and `tail`, kept as typed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountOptions {
    #[serde(deserialize_with = "count_text")]
    pub n: String,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            n: DEFAULT_COUNT.to_string(),
        }
    }
}

impl CountOptions {
    /// The effective count; anything that is not a non-negative integer
    /// falls back to [`DEFAULT_COUNT`].
    pub fn count(&self) -> usize {
        self.n.trim().parse().unwrap_or(DEFAULT_COUNT)
    }

    pub(crate) fn set(&mut self, key: &str, value: OptionValue) -> Result<(), KeyError> {
        match key {
            "n" => self.n = value.text()?,
            _ => return Err(KeyError::Unknown),
        }
        Ok(())
    }
}

fn count_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Count::deserialize(deserializer)? {
        Count::Text(s) => s,
        Count::Number(n) => n.to_string(),
    })
}

// ── tr ──

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrOptions {
    pub set1: String,
    pub set2: String,
    #[serde(rename = "d")]
    pub delete: bool,
    #[serde(rename = "s")]
    pub squeeze: bool,
}

impl TrOptions {
    pub(crate) fn set(&mut self, key: &str, value: OptionValue) -> Result<(), KeyError> {
        match key {
            "set1" => self.set1 = value.text()?,
            "set2" => self.set2 = value.text()?,
            "d" => self.delete = value.flag()?,
            "s" => self.squeeze = value.flag()?,
            _ => return Err(KeyError::Unknown),
        }
        Ok(())
    }
}

// ── wc ──

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WcOptions {
    #[serde(rename = "l")]
    pub lines: bool,
    #[serde(rename = "w")]
    pub words: bool,
    #[serde(rename = "c")]
    pub chars: bool,
}

impl WcOptions {
    pub(crate) fn set(&mut self, key: &str, value: OptionValue) -> Result<(), KeyError> {
        match key {
            "l" => self.lines = value.flag()?,
            "w" => self.words = value.flag()?,
            "c" => self.chars = value.flag()?,
            _ => return Err(KeyError::Unknown),
        }
        Ok(())
    }
}

// ── awk ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwkOptions {
    /// Field separator (`-F`); empty means runs of whitespace.
    #[serde(rename = "F")]
    pub separator: String,
    pub program: String,
}

impl Default for AwkOptions {
    fn default() -> Self {
        Self {
            separator: String::new(),
            program: DEFAULT_AWK_PROGRAM.into(),
        }
    }
}

impl AwkOptions {
    /// The program to run; a blank program means the default.
    pub fn program(&self) -> &str {
        if self.program.trim().is_empty() {
            DEFAULT_AWK_PROGRAM
        } else {
            &self.program
        }
    }

    pub(crate) fn set(&mut self, key: &str, value: OptionValue) -> Result<(), KeyError> {
        match key {
            "F" => self.separator = value.text()?,
            "program" => self.program = value.text()?,
            _ => return Err(KeyError::Unknown),
        }
        Ok(())
    }
}
