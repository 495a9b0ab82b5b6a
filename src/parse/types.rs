//! Types produced by the command parser.

use thiserror::Error;

/// A stage of a shell command that could not be turned into a step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error parsing '{stage}': {kind}")]
pub struct ParseError {
    /// The stage text, trimmed, as it appeared between pipes.
    pub stage: String,
    #[source]
    pub kind: ParseErrorKind,
}

/// Why a stage was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("empty pipeline stage")]
    EmptyStage,
    #[error("unsupported command '{0}'")]
    UnknownCommand(String),
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("long option '{0}' is not supported")]
    LongOption(String),
}

/// A flag seen in a stage's arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagArg {
    /// Boolean flag, present.
    Switch,
    /// Value-taking flag with the (unquoted) following word.
    Value(String),
}

/// A non-flag argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positional {
    /// The word as written, quotes included.
    pub raw: String,
    /// The word with shell quoting removed.
    pub value: String,
}
