use tracing::debug;

use crate::{config::CommentPolicy, lexer::lexer::Lexer};

use super::{ParseError, Program};

/// Batch parser: reads a whole source before anything is allowed to run
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a [u8], comments: CommentPolicy) -> Parser<'a> {
        Parser {
            lexer: Lexer::new(source, comments),
        }
    }

    /// Parse the entire source into a program with a complete jump table.
    ///
    /// Fails on the first `]` without a `[`, or on any `[` still open at the end.
    /// Nothing partial is returned on failure.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();
        while let Some(command) = self.lexer.next_command()? {
            program.push(command)?;
        }
        program.finish()?;

        debug!(
            commands = program.len(),
            source_bytes = self.lexer.offset,
            "parsed program"
        );
        Ok(program)
    }
}

pub fn parse(source: &[u8], comments: CommentPolicy) -> Result<Program, ParseError> {
    Parser::new(source, comments).parse_program()
}
