use std::fmt;

use thiserror::Error;

pub mod lexer;

/// One of the eight commands the machine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // `>`: Increment the `data pointer` by one (wrapping at the end of the tape)
    Increment,
    // `<`: Decrement the `data pointer` by one (wrapping at the start of the tape)
    Decrement,

    // `+`: Increment the byte at the `data pointer` by one
    DerefIncrement,
    // `-`: Decrement the byte at the `data pointer` by one
    DerefDecrement,

    // `.`: Write the byte at the `data pointer` to the `output device`
    Write,
    // `,`: Read the next byte from the `input device` and write it to the `data pointer`
    Read,

    // `[`: If the byte at the `data pointer` is zero, then jump the `instruction pointer` forward to the instruction after the matching `]`
    JumpStart,
    // `]`: If the byte at the `data pointer` is non-zero then jump the `instruction pointer` back to the instruction after the matching `[`
    JumpEnd,
}

impl Command {
    pub fn from_byte(byte: u8) -> Option<Command> {
        match byte {
            b'>' => Some(Command::Increment),
            b'<' => Some(Command::Decrement),
            b'+' => Some(Command::DerefIncrement),
            b'-' => Some(Command::DerefDecrement),
            b'.' => Some(Command::Write),
            b',' => Some(Command::Read),
            b'[' => Some(Command::JumpStart),
            b']' => Some(Command::JumpEnd),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Command::Increment => b'>',
            Command::Decrement => b'<',
            Command::DerefIncrement => b'+',
            Command::DerefDecrement => b'-',
            Command::Write => b'.',
            Command::Read => b',',
            Command::JumpStart => b'[',
            Command::JumpEnd => b']',
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("Unrecognized byte {byte:#04x} at offset {offset:}")]
    UnrecognizedByte { byte: u8, offset: usize },
}
