use crate::{
    add_native_immediate_word,
    lang::compilation::CompiledStep,
    runtime::{
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};
use std::rc::Rc;

/// Skip characters up to and including the first one the predicate accepts, or to the end of the
/// source.
fn skip_until(interpreter: &mut dyn Interpreter, is_end: fn(char) -> bool) {
    while let Some(next) = interpreter.next_char() {
        if is_end(next) {
            break;
        }
    }
}

/// Read the text of a string literal, up to the closing quote.  The quote is consumed but not
/// included.  Case is preserved.
fn read_literal(interpreter: &mut dyn Interpreter) -> error::Result<String> {
    let mut text = String::new();

    loop {
        match interpreter.next_char() {
            Some('"') => return Ok(text),
            Some(next) => text.push(next),
            None => {
                return script_error(
                    interpreter,
                    ErrorKind::UnterminatedDefinition(vec!["\"".to_string()]),
                );
            }
        }
    }
}

/// A comment that runs to the closing parenthesis.
///
/// Signature: ` -- `
fn word_paren_comment(interpreter: &mut dyn Interpreter) -> error::Result<CompiledStep> {
    skip_until(interpreter, |next| next == ')');
    Ok(CompiledStep::Word("nop".to_string()))
}

/// A comment that runs to the end of the line.
///
/// The reader has already consumed the whitespace that ended the `\` itself.  So a `\` that is
/// the very last thing on its line finds the newline gone, and the comment swallows the whole of
/// the following line too.  Follow it with a space, or any text, to keep the next line.
///
/// Signature: ` -- `
fn word_line_comment(interpreter: &mut dyn Interpreter) -> error::Result<CompiledStep> {
    skip_until(interpreter, |next| next == '\n' || next == '\r');
    Ok(CompiledStep::Word("nop".to_string()))
}

/// Compile a word that prints the literal text.
///
/// Signature: ` -- `
fn word_print_literal(interpreter: &mut dyn Interpreter) -> error::Result<CompiledStep> {
    let text = read_literal(interpreter)?;
    let name = interpreter.synthetic_name(".\"");

    interpreter.add_generated_word(
        name.clone(),
        Rc::new(move |interpreter: &mut dyn Interpreter| interpreter.emit_str(&text)),
        "Print a string literal.".to_string(),
    );

    Ok(CompiledStep::Word(name))
}

/// Copy the literal text's bytes into memory, one per cell and followed by a zero cell, and compile
/// a word that pushes the start address and the length.
///
/// Signature: ` -- address length`
fn word_string_literal(interpreter: &mut dyn Interpreter) -> error::Result<CompiledStep> {
    let text = read_literal(interpreter)?;
    let bytes = text.as_bytes();

    let start = interpreter.allot(bytes.len() as i64 + 1)?;

    for (offset, byte) in bytes.iter().enumerate() {
        interpreter.store((start + offset) as i64, *byte as i64)?;
    }

    interpreter.store((start + bytes.len()) as i64, 0)?;

    let address = start as i64;
    let length = bytes.len() as i64;
    let name = interpreter.synthetic_name("s\"");

    interpreter.add_generated_word(
        name.clone(),
        Rc::new(move |interpreter: &mut dyn Interpreter| -> error::Result<()> {
            interpreter.push(address);
            interpreter.push(length);
            Ok(())
        }),
        "Push a string literal's address and length.".to_string(),
    );

    Ok(CompiledStep::Word(name))
}

pub fn register_string_words(interpreter: &mut dyn Interpreter) {
    add_native_immediate_word!(
        interpreter,
        "(",
        word_paren_comment,
        "A comment, ending at the next ).",
        " -- "
    );
    add_native_immediate_word!(
        interpreter,
        "\\",
        word_line_comment,
        "A comment, ending at the end of the line.",
        " -- "
    );
    add_native_immediate_word!(
        interpreter,
        ".\"",
        word_print_literal,
        "Print the text up to the next \".",
        " -- "
    );
    add_native_immediate_word!(
        interpreter,
        "s\"",
        word_string_literal,
        "Store the text up to the next \" in memory.",
        " -- address length"
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

    fn interpreter() -> (ForthInterpreter, OutputBuffer) {
        let output = OutputBuffer::new();
        let interpreter = ForthInterpreter::new(Box::new(output.clone()));

        (interpreter, output)
    }

    #[test]
    fn comments_are_skipped() {
        let (mut interpreter, _) = interpreter();

        interpreter.run_program("1 ( 2 3 ) 4 \\ 5 6\n7").unwrap();

        assert_eq!(interpreter.data_stack().items(), &[1, 4, 7]);
    }

    #[test]
    fn a_bare_line_comment_also_skips_the_next_line() {
        let (mut interpreter, _) = interpreter();

        interpreter.run_program("1 \\\n2\n3 \\ \n4").unwrap();

        assert_eq!(interpreter.data_stack().items(), &[1, 3, 4]);
    }

    #[test]
    fn comments_may_run_to_the_end_of_the_source() {
        let (mut interpreter, _) = interpreter();

        interpreter.run_program("1 ( never closed").unwrap();
        interpreter.run_program("2 \\ no newline").unwrap();

        assert_eq!(interpreter.data_stack().items(), &[1, 2]);
    }

    #[test]
    fn print_literal_keeps_its_case() {
        let (mut interpreter, output) = interpreter();

        interpreter.run_program(": greet .\" Hello, World!\" cr ; greet greet").unwrap();

        assert_eq!(output.contents(), "Hello, World!\nHello, World!\n");
    }

    #[test]
    fn string_literals_live_in_memory() {
        let (mut interpreter, output) = interpreter();

        interpreter.run_program(": msg s\" Hi\" ; msg 2dup .s").unwrap();

        assert_eq!(output.contents(), "Hi");
        assert_eq!(interpreter.data_stack().items(), &[0, 2]);
        assert_eq!(interpreter.memory().read(2), Some(0));
        assert_eq!(interpreter.here(), 3);
    }

    #[test]
    fn string_length_is_fixed_when_compiled() {
        let (mut interpreter, _) = interpreter();

        interpreter.run_program(": msg s\" abc\" ; 10 allot msg").unwrap();

        assert_eq!(interpreter.data_stack().items(), &[0, 3]);
    }

    #[test]
    fn unterminated_literals_are_reported() {
        let (mut interpreter, _) = interpreter();

        let error = interpreter.run_program(".\" no end").unwrap_err();

        assert_eq!(error.kind(), &ErrorKind::UnterminatedDefinition(vec!["\"".to_string()]));
    }
}
