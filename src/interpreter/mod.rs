pub mod evaluator;
pub mod interpreter;
pub mod tape;

use std::io::{self, ErrorKind, Read, Write};

use thiserror::Error;

use crate::config::EofPolicy;

use self::tape::Tape;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Program expects more input (`,` at instruction {ip:})")]
    InputExhausted { ip: usize },

    #[error("Failed to read input at instruction {ip:}")]
    InputFailure {
        ip: usize,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output at instruction {ip:}")]
    OutputFailure {
        ip: usize,
        #[source]
        source: io::Error,
    },

    #[error("Gave up after {limit:} steps at instruction {ip:}")]
    StepLimitExceeded { limit: u64, ip: usize },
}

impl RuntimeError {
    /// Instruction that was about to run (or running) when execution stopped
    pub fn ip(&self) -> usize {
        match self {
            RuntimeError::InputExhausted { ip }
            | RuntimeError::InputFailure { ip, .. }
            | RuntimeError::OutputFailure { ip, .. }
            | RuntimeError::StepLimitExceeded { ip, .. } => *ip,
        }
    }
}

/// Tape plus the devices `,` and `.` talk to
pub struct Runtime {
    tape: Tape,

    in_stream: Box<dyn Read>,
    out_stream: Box<dyn Write>,

    /// Every byte written so far, kept for dumps even when `out_stream` is a sink
    output: Vec<u8>,

    eof: EofPolicy,
}

impl Runtime {
    pub fn new(in_stream: Box<dyn Read>, out_stream: Box<dyn Write>, eof: EofPolicy) -> Self {
        Self {
            tape: Tape::new(),
            in_stream,
            out_stream,
            output: vec![],
            eof,
        }
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn tape_mut(&mut self) -> &mut Tape {
        &mut self.tape
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Zero the tape and forget the output; the input stream is never rewound
    pub fn reset(&mut self) {
        self.tape.reset();
        self.output.clear();
    }

    /// Read one byte from the input stream into the cell at the data pointer
    pub fn read(&mut self, ip: usize) -> Result<(), RuntimeError> {
        let mut byte = [0; 1];
        match self.in_stream.read_exact(&mut byte) {
            Ok(()) => self.tape.set(byte[0]),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => match self.eof {
                EofPolicy::Error => return Err(RuntimeError::InputExhausted { ip }),
                EofPolicy::Unchanged => {}
                EofPolicy::Zero => self.tape.set(0),
            },
            Err(source) => return Err(RuntimeError::InputFailure { ip, source }),
        }
        Ok(())
    }

    /// Write the cell at the data pointer to the output stream
    pub fn write(&mut self, ip: usize) -> Result<(), RuntimeError> {
        let byte = self.tape.get();
        self.out_stream
            .write_all(&[byte])
            .map_err(|source| RuntimeError::OutputFailure { ip, source })?;
        self.output.push(byte);
        Ok(())
    }

    pub fn flush(&mut self, ip: usize) -> Result<(), RuntimeError> {
        self.out_stream
            .flush()
            .map_err(|source| RuntimeError::OutputFailure { ip, source })
    }
}
