use clap::{Args, Parser};
use mforth::{
    CodeManagement, DEFAULT_MAX_CALL_DEPTH, ForthInterpreter, Interpreter, InterpreterConfig,
    ScriptError, StdoutSink, runtime::data_structures::memory::DEFAULT_MEMORY_SIZE,
};
use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
    thread,
};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Run Forth programs, then optionally read more from the keyboard.
#[derive(Debug, Parser)]
#[clap(about, version)]
struct App {
    /// Source files to run, in order, before anything else.
    files: Vec<String>,

    /// Run the interactive loop even when files are given.
    #[clap(short, long)]
    interactive: bool,

    /// Number of cells of addressable memory.
    #[clap(long, env = "MFORTH_MEMORY_SIZE", default_value_t = DEFAULT_MEMORY_SIZE)]
    memory_size: usize,

    /// How deeply words may call each other before the program is stopped.
    #[clap(long, env = "MFORTH_MAX_CALL_DEPTH", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    #[clap(flatten)]
    output: OutputOptions,
}

#[derive(Clone, Debug, Args)]
#[command(next_help_heading = "Output Options")]
struct OutputOptions {
    /// Trace every word as it's dispatched.  RUST_LOG, if set, takes precedence.
    #[clap(short, long)]
    verbose: bool,

    /// Print the word call stack along with each error.
    #[clap(short, long)]
    error_stack: bool,
}

/// Log to stderr so the program's own output stays clean.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::prelude::*;

    let default_level = if verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::INFO
    };

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

/// Native stack reserved for the interpreter thread, on top of what each nested word needs.
const BASE_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Generous native stack for one level of word calls, unoptimized builds included.
const STACK_PER_CALL: usize = 16 * 1024;

fn report(error: &ScriptError, show_stack: bool) {
    eprintln!("*** ERROR *** {}", error);

    if show_stack {
        eprint!("{}", error.call_stack_report());
    }
}

/// Read and run a line at a time until the input runs out.  A failing line is reported and the
/// stacks cleared, everything it defined before failing stays defined.
fn repl(interpreter: &mut ForthInterpreter, show_stack: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        io::stdout().flush()?;
        eprint!("\n ok ");
        io::stderr().flush()?;

        line.clear();

        if stdin.lock().read_line(&mut line)? == 0 {
            eprintln!();
            return Ok(());
        }

        if let Err(error) = interpreter.process_source("<repl>", &line) {
            report(&error, show_stack);
            interpreter.reset();
        }
    }
}

fn main() -> ExitCode {
    let app = App::parse();

    init_tracing(app.output.verbose);

    // Scripted words recurse on the native stack, size it for the deepest allowed call chain.
    let stack_size = app
        .max_call_depth
        .saturating_mul(STACK_PER_CALL)
        .saturating_add(BASE_STACK_SIZE);

    let interpreter_thread = thread::Builder::new()
        .name("interpreter".to_string())
        .stack_size(stack_size)
        .spawn(move || run(app));

    match interpreter_thread {
        Ok(handle) => handle.join().unwrap_or(ExitCode::FAILURE),
        Err(error) => {
            tracing::error!(%error, stack_size, "could not start the interpreter thread");
            ExitCode::FAILURE
        }
    }
}

/// Run the files, then the interactive loop if wanted.
fn run(app: App) -> ExitCode {
    let App {
        files,
        interactive,
        memory_size,
        max_call_depth,
        output,
    } = app;

    let config = InterpreterConfig {
        memory_size,
        max_call_depth,
    };
    let mut interpreter = ForthInterpreter::with_config(Box::new(StdoutSink::new()), config);

    for path in &files {
        if let Err(error) = interpreter.process_source_file(path) {
            // Failing to read the file leaves no location behind, name the file instead.
            if error.location().is_none() {
                eprintln!("*** ERROR *** {}: {}", path, error);
            } else {
                report(&error, output.error_stack);
            }

            return ExitCode::FAILURE;
        }
    }

    if (files.is_empty() || interactive)
        && let Err(error) = repl(&mut interpreter, output.error_stack)
    {
        tracing::error!(%error, "interactive loop failed");
        return ExitCode::FAILURE;
    }

    let _ = io::stdout().flush();

    ExitCode::SUCCESS
}
