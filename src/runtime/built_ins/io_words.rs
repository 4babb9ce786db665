use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

/// Send the low byte of the value to the output.
///
/// Signature: `value -- `
fn word_emit(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.emit(value as u8)
}

/// Print the value in decimal followed by a space.
///
/// Signature: `value -- `
fn word_print(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.emit_str(&format!("{} ", value))
}

/// Print a run of memory cells as bytes.  The length is on top, the address under it.
///
/// Signature: `address length -- `
fn word_print_memory(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let length = interpreter.pop()?;
    let address = interpreter.pop()?;

    for offset in 0..length.max(0) {
        let value = interpreter.fetch(address.wrapping_add(offset))?;
        interpreter.emit(value as u8)?;
    }

    Ok(())
}

pub fn register_io_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "emit",
        word_emit,
        "Print a character given its code.",
        "value --"
    );
    add_native_word!(
        interpreter,
        ".",
        word_print,
        "Print a number followed by a space.",
        "value --"
    );
    add_native_word!(
        interpreter,
        "cr",
        |interp: &mut dyn Interpreter| interp.emit(b'\n'),
        "Print a newline.",
        "--"
    );
    add_native_word!(
        interpreter,
        "bl",
        |interp: &mut dyn Interpreter| {
            interp.push(b' ' as i64);
            Ok(())
        },
        "Push the code of the space character.",
        "-- 32"
    );
    add_native_word!(
        interpreter,
        ".s",
        word_print_memory,
        "Print a string stored in memory.",
        "address length --"
    );
}

#[cfg(test)]
mod tests {
    use crate::runtime::{
        error::ErrorKind,
        interpreter::{CodeManagement, forth_interpreter::ForthInterpreter},
        sink::OutputBuffer,
    };

    fn run(program: &str) -> String {
        let output = OutputBuffer::new();
        let mut interpreter = ForthInterpreter::new(Box::new(output.clone()));

        interpreter.run_program(program).unwrap();
        output.contents()
    }

    #[test]
    fn emit_sends_the_low_byte() {
        assert_eq!(run("321 emit bl emit 72 emit"), "A H");
    }

    #[test]
    fn numbers_print_with_a_trailing_space() {
        assert_eq!(run("-5 . 0 . cr"), "-5 0 \n");
    }

    #[test]
    fn print_memory_reads_cells() {
        assert_eq!(run("79 0 ! 75 1 ! 0 2 .s 0 0 .s"), "OK");
    }

    #[test]
    fn print_memory_is_bounds_checked() {
        let mut interpreter = ForthInterpreter::new(Box::new(OutputBuffer::new()));

        let error = interpreter.run_program("99999 2 .s").unwrap_err();

        assert_eq!(error.kind(), &ErrorKind::MemoryOutOfRange(100000));
    }
}
