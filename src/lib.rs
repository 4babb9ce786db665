//! A small threaded Forth-like interpreter.
//!
//! Programs are read a word at a time and run against a data stack, a return stack and a flat
//! integer memory.  Control structures, comments and string literals are all immediate words that
//! compile new, hidden, words while the program is being read.
//!
//! ```
//! use mforth::run_forth;
//!
//! let output = run_forth(": square dup * ; 7 square .").unwrap();
//! assert_eq!(output, "49 ");
//! ```

/// Module for reading the program text and compiling it into step lists.
#[macro_use]
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
#[macro_use]
pub mod runtime;

pub use runtime::{
    error::{ErrorKind, Result, ScriptError},
    interpreter::{
        CodeManagement, Interpreter, InterpreterStack, MemoryManagement, Output, WordManagement,
        forth_interpreter::{
            DEFAULT_MAX_CALL_DEPTH, ForthInterpreter, InterpreterConfig, run_forth,
        },
    },
    sink::{OutputBuffer, Sink, StdoutSink},
};
