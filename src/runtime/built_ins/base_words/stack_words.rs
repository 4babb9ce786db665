use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push(value);
    interpreter.push(value);

    Ok(())
}

/// Duplicate the top two values on the data stack.
///
/// Signature: `a b -- a b a b`
fn word_2dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(a);
    interpreter.push(b);
    interpreter.push(a);
    interpreter.push(b);

    Ok(())
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.pop()?;

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.pop()?;
    let b = interpreter.pop()?;

    interpreter.push(a);
    interpreter.push(b);

    Ok(())
}

/// Move the top of the data stack over to the return stack.
///
/// Signature: `value -- ` (R: ` -- value`)
fn word_to_return(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push_return(value);

    Ok(())
}

/// Move the top of the return stack back to the data stack.
///
/// Signature: ` -- value` (R: `value -- `)
fn word_from_return(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop_return()?;

    interpreter.push(value);

    Ok(())
}

/// The index of the innermost running loop, the top of the return stack.
///
/// Signature: ` -- index`
fn word_loop_index(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let index = interpreter.peek_return(0)?;

    interpreter.push(index);

    Ok(())
}

/// The limit of the innermost running loop, the cell under its index on the return stack.
///
/// Signature: ` -- limit`
fn word_loop_limit(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let limit = interpreter.peek_return(1)?;

    interpreter.push(limit);

    Ok(())
}

pub fn register_stack_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(interpreter, "dup", word_dup, "Duplicate the top value.", "value -- value value");
    add_native_word!(
        interpreter,
        "2dup",
        word_2dup,
        "Duplicate the top two values.",
        "a b -- a b a b"
    );
    add_native_word!(interpreter, "drop", word_drop, "Discard the top value.", "value --");
    add_native_word!(interpreter, "swap", word_swap, "Swap the top two values.", "a b -- b a");

    add_native_word!(
        interpreter,
        ">r",
        word_to_return,
        "Move a value from the data stack to the return stack.",
        "value --"
    );
    add_native_word!(
        interpreter,
        "r>",
        word_from_return,
        "Move a value from the return stack to the data stack.",
        "-- value"
    );
    add_native_word!(
        interpreter,
        "i",
        word_loop_index,
        "The index of the innermost loop.",
        "-- index"
    );
    add_native_word!(
        interpreter,
        "j",
        word_loop_limit,
        "The limit of the innermost loop.",
        "-- limit"
    );
}
