mod repl;

use std::{
    fs,
    io::{self, Cursor, IsTerminal, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use brainstep::{CommentPolicy, Config, EofPolicy, Interpreter};
use clap::Parser;
use colored::Colorize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Brainf**k virtual machine with an interactive REPL
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Program to run, read from stdin when omitted and stdin is piped
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// File whose bytes are fed to `,`
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Start the REPL once the program has run
    #[arg(short, long)]
    interactive: bool,

    /// Reject bytes that are neither commands nor whitespace
    #[arg(long)]
    strict: bool,

    /// What `,` does once the input is exhausted
    #[arg(long, value_enum, default_value_t = EofPolicy::Error)]
    eof: EofPolicy,

    /// Stop a run after this many instructions
    #[arg(long)]
    max_steps: Option<u64>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Failed to read {}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read program from stdin")]
    ReadStdin(#[source] io::Error),

    #[error("Execution failed: {0}")]
    Interpreter(#[from] brainstep::Error),

    #[error("REPL failed: {0}")]
    Repl(#[source] io::Error),
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Feed `program` to `interpreter`, reporting progress and output on `out`
fn evaluate(
    interpreter: &mut Interpreter,
    program: &[u8],
    out: &mut impl Write,
) -> Result<(), CliError> {
    let _ = writeln!(out, "{}", "Starting evaluation".blue());
    let now = Instant::now();
    let result = interpreter.eval_all(program);
    if result.is_ok() {
        let _ = writeln!(out, "{} {:.2?}", "Finished evaluation in".green(), now.elapsed());
    }

    let output = interpreter.output();
    let _ = writeln!(out, "{} {:?}", "Output bytes:".blue(), output);
    let _ = writeln!(out, "{} {}", "Output text:".blue(), String::from_utf8_lossy(output));
    result.map_err(CliError::from)
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::default()
        .with_comments(if args.strict {
            CommentPolicy::Reject
        } else {
            CommentPolicy::Ignore
        })
        .with_eof(args.eof)
        .with_max_steps(args.max_steps);

    let input = match &args.data {
        Some(path) => read_file(path)?,
        None => vec![],
    };

    // the REPL needs the terminal, so a piped program means reading it from /dev/tty
    let stdin_is_terminal = io::stdin().is_terminal();
    let program = match &args.file {
        Some(path) => Some(read_file(path)?),
        None if !stdin_is_terminal => {
            let mut program = vec![];
            io::stdin()
                .read_to_end(&mut program)
                .map_err(CliError::ReadStdin)?;
            Some(program)
        }
        None => None,
    };

    let mut interpreter = Interpreter::new(Box::new(Cursor::new(input)), Box::new(io::sink()), config);

    if let Some(program) = program {
        evaluate(&mut interpreter, &program, &mut io::stdout())?;

        if !args.interactive {
            // catches a program that ends inside a loop
            interpreter.run()?;
        }
    }

    if args.interactive {
        repl::repl(&mut interpreter, !stdin_is_terminal).map_err(CliError::Repl)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            ExitCode::FAILURE
        }
    }
}
