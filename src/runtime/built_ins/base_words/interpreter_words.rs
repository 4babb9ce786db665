use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

/// Print the dictionary listing through the interpreter's output.
///
/// Signature: ` -- `
fn word_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let listing = interpreter.dictionary().to_string();

    interpreter.emit_str(&listing)
}

/// Log the state of the interpreter, both stacks along with the deepest they've been and every
/// memory cell that isn't zero.
///
/// Signature: ` -- `
fn word_dump(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let cells: Vec<String> = interpreter
        .memory()
        .non_zero_cells()
        .map(|(address, value)| format!("[{}]={}", address, value))
        .collect();

    tracing::info!(
        data_stack = %interpreter.data_stack(),
        data_max_depth = interpreter.data_stack().max_depth(),
        return_stack = %interpreter.return_stack(),
        return_max_depth = interpreter.return_stack().max_depth(),
        here = interpreter.here(),
        memory_size = interpreter.memory().size(),
        memory = %cells.join(" "),
        "interpreter state"
    );

    Ok(())
}

pub fn register_interpreter_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "nop",
        |_: &mut dyn Interpreter| Ok(()),
        "Do nothing.",
        "--"
    );
    add_native_word!(
        interpreter,
        "words",
        word_words,
        "Print the list of defined words.",
        "--"
    );
    add_native_word!(
        interpreter,
        "???",
        word_dump,
        "Log the stacks and the memory in use.",
        "--"
    );
}
