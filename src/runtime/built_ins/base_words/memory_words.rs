use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

/// Write a value to a memory cell.
///
/// Signature: `value address -- `
fn word_store(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let address = interpreter.pop()?;
    let value = interpreter.pop()?;

    interpreter.store(address, value)
}

/// Read the value of a memory cell.
///
/// Signature: `address -- value`
fn word_fetch(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let address = interpreter.pop()?;
    let value = interpreter.fetch(address)?;

    interpreter.push(value);

    Ok(())
}

/// Reserve cells of memory past `here`.
///
/// Signature: `count -- `
fn word_allot(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let count = interpreter.pop()?;
    let _ = interpreter.allot(count)?;

    Ok(())
}

pub fn register_memory_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(interpreter, "!", word_store, "Write a value to memory.", "value address --");
    add_native_word!(interpreter, "@", word_fetch, "Read a value from memory.", "address -- value");

    // Every address holds a whole cell, there's no byte addressing.
    add_native_word!(
        interpreter,
        "c@",
        word_fetch,
        "Read a value from memory, same as @.",
        "address -- value"
    );
    add_native_word!(
        interpreter,
        "cells",
        |_: &mut dyn Interpreter| Ok(()),
        "Convert a cell count to an address offset, which is the same number.",
        "count -- count"
    );

    add_native_word!(
        interpreter,
        "allot",
        word_allot,
        "Reserve a number of memory cells, moving here forward.",
        "count --"
    );
}

#[cfg(test)]
mod tests {
    use crate::runtime::{
        error::ErrorKind,
        interpreter::{
            CodeManagement, InterpreterStack, MemoryManagement, forth_interpreter::ForthInterpreter,
        },
        sink::OutputBuffer,
    };

    fn interpreter() -> ForthInterpreter {
        ForthInterpreter::new(Box::new(OutputBuffer::new()))
    }

    #[test]
    fn store_then_fetch() {
        let mut interpreter = interpreter();

        interpreter.run_program("42 10 ! 10 @ 10 c@").unwrap();

        assert_eq!(interpreter.data_stack().items(), &[42, 42]);
        assert_eq!(interpreter.memory().read(10), Some(42));
    }

    #[test]
    fn access_outside_memory_fails() {
        let mut interpreter = interpreter();

        let error = interpreter.run_program("-1 @").unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::MemoryOutOfRange(-1));

        let error = interpreter.run_program("1 100000 !").unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::MemoryOutOfRange(100000));
    }

    #[test]
    fn allot_moves_here_forward_only() {
        let mut interpreter = interpreter();

        interpreter.run_program("5 cells allot").unwrap();
        assert_eq!(interpreter.here(), 5);

        let error = interpreter.run_program("-2 allot").unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::InvalidAllot(-2));
        assert_eq!(interpreter.here(), 5);
    }
}
