use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use thiserror::Error;
use tracing::{debug, error, info_span, trace};
use tracing_subscriber::EnvFilter;

use brainleaf::{
    execute, generate_c, parse_source_with, print_source,
    settings::{BracketPolicy, CodegenSettings, EofBehaviour, ParseSettings},
    tape::FixedTape,
    ExecuteCallbackData, ExecuteCallbackResult, ExecutionError, ParseError, TapeAddr,
};
use clap::{Parser, ValueEnum};

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Parsing error: {0}")]
    ParserError(#[from] ParseError),
    #[error("Execution error: {0}")]
    ExecutionError(#[from] ExecutionError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Mode {
    /// Interpret the program
    Interpret,
    /// Print the normalised program source
    Print,
    /// Generate C code for the program
    GenC,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Eof {
    /// Store 0 in the cell
    Zero,
    /// Leave the cell unchanged
    Unchanged,
}

impl From<Eof> for EofBehaviour {
    fn from(value: Eof) -> Self {
        match value {
            Eof::Zero => EofBehaviour::SetZero,
            Eof::Unchanged => EofBehaviour::Unchanged,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input Brainfuck source files
    input_files: Vec<PathBuf>,

    /// Select program mode
    #[arg(short, long, value_name = "MODE")]
    mode: Option<Mode>,

    /// Accept unbalanced brackets: a stray ] ends the program, open loops
    /// are closed at the end of the file
    #[arg(long, default_value_t = false)]
    lenient: bool,

    /// Disable run folding and zero loop rewriting
    #[arg(long, default_value_t = false)]
    no_optimise: bool,

    /// What , does at end of input
    #[arg(long, value_enum, default_value_t = Eof::Zero)]
    eof: Eof,

    /// Log the parsed AST
    #[arg(long, default_value_t = false)]
    debug_ast: bool,

    /// Log every executed step of the interpreter
    #[arg(long, default_value_t = false)]
    trace: bool,
}

impl Args {
    fn parse_settings(&self) -> ParseSettings {
        ParseSettings {
            brackets: if self.lenient {
                BracketPolicy::Lenient
            } else {
                BracketPolicy::Strict
            },
            optimise: !self.no_optimise,
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over the level implied by the flags.
fn init_logging(args: &Args) {
    let default_level = if args.trace {
        "trace"
    } else if args.debug_ast {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_file(path: &Path, args: &Args) -> Result<(), ProgramError> {
    let buf = std::fs::read(path)?;
    let program = parse_source_with(buf.as_slice(), &args.parse_settings())?;

    if args.debug_ast {
        debug!("AST: {program:#?}");
    }

    let eof = EofBehaviour::from(args.eof);
    let trace = args.trace;

    match args.mode.unwrap_or(Mode::Interpret) {
        Mode::Interpret => {
            let mut tape = FixedTape::new();
            let mut tape_ptr = TapeAddr::default();
            execute(
                &program,
                &mut tape,
                &mut tape_ptr,
                &mut io::stdin().lock(),
                &mut io::stdout().lock(),
                eof,
                &mut |data, _, tp| {
                    if trace {
                        match data {
                            ExecuteCallbackData::Leaf(leaf) => {
                                trace!(ptr = %tp, command = ?leaf.command, count = leaf.count);
                            }
                            ExecuteCallbackData::InLoop => trace!(ptr = %tp, "loop iteration"),
                        }
                    }
                    ExecuteCallbackResult::Continue
                },
            )?;
        }
        Mode::Print => {
            io::stdout().lock().write_all(print_source(&program).as_bytes())?;
        }
        Mode::GenC => {
            let c = generate_c(&program, &CodegenSettings { eof });
            io::stdout().lock().write_all(c.as_bytes())?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    if args.input_files.is_empty() {
        let name = std::env::args().next().unwrap_or_else(|| "brainleaf".into());
        eprintln!("{name}: No input files.");
        return ExitCode::SUCCESS;
    }

    let mut failed = false;
    for path in &args.input_files {
        let _span = info_span!("file", path = %path.display()).entered();
        // Every file gets its own run, a failure does not stop the others.
        if let Err(err) = run_file(path, &args) {
            error!("{err}");
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
