use crate::config::CommentPolicy;

use super::{Command, LexerError};

/// Classify a single source byte.
///
/// Whitespace is never a command and never an error, so programs can be laid out
/// over several lines even when every other byte is rejected.
pub fn classify(byte: u8, offset: usize, policy: CommentPolicy) -> Result<Option<Command>, LexerError> {
    if let Some(command) = Command::from_byte(byte) {
        return Ok(Some(command));
    }
    if byte.is_ascii_whitespace() {
        return Ok(None);
    }

    match policy {
        CommentPolicy::Ignore => Ok(None),
        CommentPolicy::Reject => Err(LexerError::UnrecognizedByte { byte, offset }),
    }
}

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /** 'raw' offset within the source (in bytes) */
    pub offset: usize,

    bytes: std::slice::Iter<'a, u8>,
    policy: CommentPolicy,
}

impl<'a> Lexer<'a> {
    pub fn new(bytes: &'a [u8], policy: CommentPolicy) -> Lexer<'a> {
        Lexer {
            offset: 0,
            bytes: bytes.iter(),
            policy,
        }
    }

    fn consume_byte(&mut self) -> Option<u8> {
        let byte = self.bytes.next().copied()?;
        self.offset += 1;
        Some(byte)
    }

    /// Next command in the source, `None` once the source is exhausted
    pub fn next_command(&mut self) -> Result<Option<Command>, LexerError> {
        while let Some(byte) = self.consume_byte() {
            if let Some(command) = classify(byte, self.offset - 1, self.policy)? {
                return Ok(Some(command));
            }
        }
        Ok(None)
    }

    pub fn collect_results(&mut self) -> Result<Vec<Command>, LexerError> {
        let mut v = vec![];
        while let Some(command) = self.next_command()? {
            v.push(command);
        }
        Ok(v)
    }
}
