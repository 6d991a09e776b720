use std::fmt;

use thiserror::Error;

use crate::lexer::{Command, LexerError};

pub mod parser;

pub use parser::{parse, Parser};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Can't find `[` for `]` at index {index:}")]
    UnmatchedClose { index: usize },

    #[error("Can't find `]` for `[` at index {index:}")]
    UnclosedOpen { index: usize },

    #[error(transparent)]
    Lexer(#[from] LexerError),
}

/// Where the parser is in matching brackets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Every `[` has its `]`, so all instructions can run
    Ready,
    /// `depth` loops are still open, execution has to wait
    AwaitingClose { depth: usize },
}

impl ParserState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ParserState::Ready)
    }
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserState::Ready => write!(f, "ready"),
            ParserState::AwaitingClose { depth } => write!(f, "awaiting {depth} `]`"),
        }
    }
}

/// Bidirectional bracket mapping, one slot per instruction.
///
/// Slots that don't belong to a matched bracket point at themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpTable {
    targets: Vec<usize>,
}

impl JumpTable {
    fn push_slot(&mut self) {
        self.targets.push(self.targets.len());
    }

    fn link(&mut self, open: usize, close: usize) {
        self.targets[open] = close;
        self.targets[close] = open;
    }

    /// Index of the partner bracket, `None` for anything that isn't a matched bracket
    pub fn target(&self, index: usize) -> Option<usize> {
        match self.targets.get(index) {
            Some(&target) if target != index => Some(target),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// The instructions fed so far along with their jump table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    commands: Vec<Command>,
    jumps: JumpTable,
    /// Indices of `[` still waiting for their `]`, innermost last
    pending: Vec<usize>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command, matching brackets as they arrive.
    ///
    /// A `]` with nothing to close is refused and the program is left untouched.
    pub fn push(&mut self, command: Command) -> Result<ParserState, ParseError> {
        let index = self.commands.len();
        let open = match command {
            Command::JumpEnd => Some(
                self.pending
                    .pop()
                    .ok_or(ParseError::UnmatchedClose { index })?,
            ),
            Command::JumpStart => {
                self.pending.push(index);
                None
            }
            _ => None,
        };

        self.jumps.push_slot();
        self.commands.push(command);
        if let Some(open) = open {
            self.jumps.link(open, index);
        }
        Ok(self.state())
    }

    pub fn state(&self) -> ParserState {
        match self.pending.len() {
            0 => ParserState::Ready,
            depth => ParserState::AwaitingClose { depth },
        }
    }

    /// Check that no loop was left open
    pub fn finish(&self) -> Result<(), ParseError> {
        match self.pending.first() {
            Some(&index) => Err(ParseError::UnclosedOpen { index }),
            None => Ok(()),
        }
    }

    pub fn get(&self, index: usize) -> Option<Command> {
        self.commands.get(index).copied()
    }

    pub fn jump_target(&self, index: usize) -> Option<usize> {
        self.jumps.target(index)
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn jumps(&self) -> &JumpTable {
        &self.jumps
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.commands.iter().map(|command| command.as_byte()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in self.commands.iter() {
            write!(f, "{command}")?;
        }
        Ok(())
    }
}
