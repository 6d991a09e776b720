//! The externally visible machine.
//!
//! [`Interpreter`] ties the program store, the evaluator and the runtime together.
//! It can be built empty and fed one byte at a time ([`Interpreter::eval`]), in which
//! case commands run as soon as every open loop is closed, or built from a whole
//! source ([`Interpreter::with_program`]) and then [`Interpreter::run`].

use std::io::{Read, Write};

use tracing::{debug, trace, warn};

use crate::{
    config::Config,
    lexer::lexer::classify,
    parser::{parse, ParseError, ParserState, Program},
    Error,
};

use super::{evaluator::Evaluator, tape::Tape, Runtime, RuntimeError};

/// Read-only view of the machine, for REPLs and loggers
#[derive(Debug, Clone, Copy)]
pub struct Dump<'a> {
    pub data_pointer: usize,
    pub cells: &'a [u8],
    pub ip: usize,
    pub program: &'a Program,
    pub output: &'a [u8],
    pub state: ParserState,
}

pub struct Interpreter {
    config: Config,
    program: Program,
    evaluator: Evaluator,
    runtime: Runtime,
    /// Bytes fed through `eval` since the last reset, for error offsets
    fed: usize,
}

impl Interpreter {
    /// An interpreter with an empty program, ready to be fed commands
    pub fn new(input: Box<dyn Read>, output: Box<dyn Write>, config: Config) -> Self {
        Self {
            config,
            program: Program::new(),
            evaluator: Evaluator::new(config.max_steps),
            runtime: Runtime::new(input, output, config.eof),
            fed: 0,
        }
    }

    /// Parse `source` up front; nothing is executed until [`Interpreter::run`]
    pub fn with_program(
        source: &[u8],
        input: Box<dyn Read>,
        output: Box<dyn Write>,
        config: Config,
    ) -> Result<Self, ParseError> {
        let program = parse(source, config.comments)?;
        let mut interpreter = Self::new(input, output, config);
        interpreter.program = program;
        interpreter.fed = source.len();
        Ok(interpreter)
    }

    /// Run every remaining instruction and return all output produced so far
    pub fn run(&mut self) -> Result<&[u8], Error> {
        self.program.finish()?;
        self.execute()?;
        Ok(self.runtime.output())
    }

    /// Feed a single source byte.
    ///
    /// Comments are dropped (or rejected, depending on the policy). A command is
    /// appended to the program and, unless a loop is still open, everything not yet
    /// executed runs immediately.
    pub fn eval(&mut self, byte: u8) -> Result<(), Error> {
        // rejected bytes still occupy an offset in the fed stream
        let offset = self.fed;
        self.fed += 1;
        let Some(command) = classify(byte, offset, self.config.comments)? else {
            return Ok(());
        };

        match self.program.push(command)? {
            ParserState::Ready => self.execute()?,
            ParserState::AwaitingClose { depth } => {
                trace!(%command, depth, "deferring until loop is closed");
            }
        }
        Ok(())
    }

    /// Feed every byte of `source`, stopping at the first error
    pub fn eval_all(&mut self, source: &[u8]) -> Result<(), Error> {
        for &byte in source {
            self.eval(byte)?;
        }
        Ok(())
    }

    fn execute(&mut self) -> Result<(), RuntimeError> {
        let result = self
            .evaluator
            .run(&mut self.runtime, &self.program)
            .and_then(|steps| {
                self.runtime.flush(self.evaluator.ip())?;
                Ok(steps)
            });

        match result {
            Ok(steps) => {
                debug!(steps, ip = self.evaluator.ip(), "execution caught up with program");
                Ok(())
            }
            Err(e) => {
                warn!(
                    ip = e.ip(),
                    data_pointer = self.runtime.tape().data_pointer(),
                    "execution stopped: {e}"
                );
                Err(e)
            }
        }
    }

    pub fn dump(&self) -> Dump<'_> {
        let tape = self.runtime.tape();
        Dump {
            data_pointer: tape.data_pointer(),
            cells: tape.cells(),
            ip: self.evaluator.ip(),
            program: &self.program,
            output: self.runtime.output(),
            state: self.program.state(),
        }
    }

    /// Back to a zeroed tape and an empty program, keeping the devices and config
    pub fn reset(&mut self) {
        self.runtime.reset();
        self.evaluator.reset();
        self.program.clear();
        self.fed = 0;
        debug!("interpreter reset");
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        self.runtime.tape()
    }

    pub fn ip(&self) -> usize {
        self.evaluator.ip()
    }

    pub fn output(&self) -> &[u8] {
        self.runtime.output()
    }

    pub fn state(&self) -> ParserState {
        self.program.state()
    }
}
