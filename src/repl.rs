use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
};

use brainstep::{Dump, Interpreter};
use colored::Colorize;

const WELCOME: &str = "brainstep REPL
 :q[uit] to exit
 :d[ump] to dump interpreter state
 :r[eset] to reset interpreter state";

const PROMPT: &str = "brainstep> ";

/// A line typed at the prompt
#[derive(Debug, PartialEq)]
enum Line<'a> {
    Quit,
    Dump,
    Reset,
    Unknown(&'a str),
    Commands(&'a [u8]),
}

impl<'a> Line<'a> {
    fn parse(line: &'a [u8]) -> Line<'a> {
        let Some(directive) = line.strip_prefix(b":") else {
            return Line::Commands(line);
        };

        let directive = std::str::from_utf8(directive).unwrap_or("").trim();
        match directive {
            "q" | "quit" => Line::Quit,
            "d" | "dump" => Line::Dump,
            // `:f` is kept for muscle memory
            "r" | "reset" | "f" => Line::Reset,
            other => Line::Unknown(other),
        }
    }
}

pub fn format_dump(dump: &Dump) -> String {
    let last = match dump.ip.checked_sub(1).and_then(|i| dump.program.get(i)) {
        Some(command) => format!("{:?}", command.to_string()),
        None => "none".to_string(),
    };

    format!(
        "Cells: d: {}, current cell value: {:#04x}\nCmds: i: {}, last command: {}, {} ({} commands)\nOut: {:?}",
        dump.data_pointer,
        dump.cells[dump.data_pointer],
        dump.ip,
        last,
        dump.state,
        dump.program.len(),
        dump.output,
    )
}

/// Read lines until `:q` or end of input, feeding everything else to `interpreter`.
///
/// Errors from the program are reported and the loop carries on; only I/O errors on
/// the terminal itself end the REPL early.
pub fn repl(interpreter: &mut Interpreter, use_tty: bool) -> io::Result<()> {
    let mut lines: Box<dyn BufRead> = if use_tty {
        Box::new(BufReader::new(File::open("/dev/tty")?))
    } else {
        Box::new(io::stdin().lock())
    };

    println!("{}", WELCOME);
    let mut line = vec![];
    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        line.clear();
        if lines.read_until(b'\n', &mut line)? == 0 {
            println!();
            break;
        }

        match Line::parse(&line) {
            Line::Quit => break,
            Line::Dump => println!("{}", format_dump(&interpreter.dump())),
            Line::Reset => {
                interpreter.reset();
                println!("{}", "Reset interpreter!".green());
            }
            Line::Unknown(directive) => {
                println!("{} :{}", "Unknown directive".yellow(), directive)
            }
            Line::Commands(commands) => {
                let before = interpreter.output().len();
                let result = interpreter.eval_all(commands);

                let new_output = &interpreter.output()[before..];
                if !new_output.is_empty() {
                    println!("{}", String::from_utf8_lossy(new_output));
                }
                if let Err(e) = result {
                    println!("{}: {}", "Error".red(), e);
                }
            }
        }
    }

    Ok(())
}
