//! A small Brainf**k virtual machine.
//!
//! Programs run on a circular tape of [`TAPE_LEN`] byte cells. Loops are matched
//! once, when the program is parsed, into a jump table so a jump never rescans the
//! program. The [`Interpreter`] can either take a whole program up front or be fed
//! one byte at a time, running each command as soon as it is no longer inside an
//! unfinished loop.

extern crate clap;
extern crate thiserror;

pub mod config;
pub mod interpreter;
pub mod lexer;
pub mod parser;

use std::io::{self, Cursor};

use thiserror::Error;

pub use crate::{
    config::{CommentPolicy, Config, EofPolicy},
    interpreter::{
        interpreter::{Dump, Interpreter},
        tape::{Tape, TAPE_LEN},
        RuntimeError,
    },
    lexer::{Command, LexerError},
    parser::{ParseError, ParserState, Program},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<LexerError> for Error {
    fn from(e: LexerError) -> Self {
        Error::Parse(e.into())
    }
}

impl Error {
    /// `,` ran out of input, which callers often treat as a normal stop
    pub fn is_input_exhausted(&self) -> bool {
        matches!(self, Error::Runtime(RuntimeError::InputExhausted { .. }))
    }
}

/// Parse and run `program` against `input`, returning everything it wrote
pub fn run(program: &[u8], input: &[u8]) -> Result<Vec<u8>, Error> {
    run_with(program, input, Config::default())
}

pub fn run_with(program: &[u8], input: &[u8], config: Config) -> Result<Vec<u8>, Error> {
    let mut interpreter = Interpreter::with_program(
        program,
        Box::new(Cursor::new(input.to_vec())),
        Box::new(io::sink()),
        config,
    )?;
    Ok(interpreter.run()?.to_vec())
}
