//! Interpreter configuration.
//!
//! The two behaviours that vary between Brainf**k dialects (what to do with bytes
//! that aren't commands, and what `,` does once input runs dry) are policies here
//! rather than fixed rules.

use clap::ValueEnum;

/// What the lexer does with bytes that aren't one of the eight commands
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CommentPolicy {
    /// Treat them as comments and drop them
    #[default]
    Ignore,
    /// Fail with a parse error (whitespace is still allowed)
    Reject,
}

/// What `,` does when the input source has no more bytes
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EofPolicy {
    /// Stop with `InputExhausted`
    #[default]
    Error,
    /// Leave the current cell as it is and carry on
    Unchanged,
    /// Store zero in the current cell and carry on
    Zero,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub comments: CommentPolicy,
    pub eof: EofPolicy,
    /// Upper bound on instructions executed by a single run, unlimited if `None`
    pub max_steps: Option<u64>,
}

impl Config {
    pub fn with_comments(mut self, comments: CommentPolicy) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_eof(mut self, eof: EofPolicy) -> Self {
        self.eof = eof;
        self
    }

    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }
}
