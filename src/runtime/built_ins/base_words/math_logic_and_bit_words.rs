use crate::{
    add_native_word,
    runtime::{
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// Helper function to handle the binary operations.  The top of the stack is the right hand
/// operand, the value under it the left hand one.  The result replaces both.
pub(crate) fn binary_op(
    interpreter: &mut dyn Interpreter,
    op: fn(i64, i64) -> i64,
) -> error::Result<()> {
    let y = interpreter.pop()?;
    let x = interpreter.pop()?;

    interpreter.push(op(x, y));

    Ok(())
}

/// Helper function for division like operations, which refuse a zero right hand operand.
pub(crate) fn checked_binary_op(
    interpreter: &mut dyn Interpreter,
    op: fn(i64, i64) -> i64,
) -> error::Result<()> {
    let y = interpreter.pop()?;
    let x = interpreter.pop()?;

    if y == 0 {
        return script_error(interpreter, ErrorKind::DivisionByZero);
    }

    interpreter.push(op(x, y));

    Ok(())
}

/// Comparisons leave 1 for true and 0 for false.
fn compare_op(interpreter: &mut dyn Interpreter, op: fn(&i64, &i64) -> bool) -> error::Result<()> {
    let y = interpreter.pop()?;
    let x = interpreter.pop()?;

    interpreter.push(op(&x, &y) as i64);

    Ok(())
}

/// Bitwise and of the top two values.
///
/// Signature: `a b -- a&b`
fn word_bit_and(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_op(interpreter, |a, b| a & b)
}

/// Bitwise or of the top two values.
///
/// Signature: `a b -- a|b`
fn word_bit_or(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_op(interpreter, |a, b| a | b)
}

/// Bitwise exclusive or of the top two values.
///
/// Signature: `a b -- a^b`
fn word_bit_xor(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_op(interpreter, |a, b| a ^ b)
}

/// Logical not, 1 if the value is zero, 0 otherwise.
///
/// Signature: `value -- flag`
fn word_logic_not(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push((value == 0) as i64);

    Ok(())
}

fn word_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare_op(interpreter, i64::eq)
}

fn word_not_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare_op(interpreter, i64::ne)
}

fn word_less(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare_op(interpreter, i64::lt)
}

fn word_less_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare_op(interpreter, i64::le)
}

fn word_greater_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare_op(interpreter, i64::ge)
}

fn word_greater(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare_op(interpreter, i64::gt)
}

pub fn register_math_logic_and_bit_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(interpreter, "and", word_bit_and, "Bitwise and two numbers.", "a b -- result");
    add_native_word!(interpreter, "or", word_bit_or, "Bitwise or two numbers.", "a b -- result");
    add_native_word!(interpreter, "xor", word_bit_xor, "Bitwise xor two numbers.", "a b -- result");

    add_native_word!(
        interpreter,
        "not",
        word_logic_not,
        "Logically invert a value, zero becomes 1 and everything else 0.",
        "value -- flag"
    );
    add_native_word!(interpreter, "0=", word_logic_not, "Is the value zero?", "value -- flag");

    // Equality has a few spellings.
    for name in ["=", "=="] {
        add_native_word!(interpreter, name, word_equal, "Are two values equal?", "a b -- flag");
    }

    for name in ["!=", "/=", "<>"] {
        add_native_word!(
            interpreter,
            name,
            word_not_equal,
            "Are two values different?",
            "a b -- flag"
        );
    }

    add_native_word!(interpreter, "<", word_less, "Is a less than b?", "a b -- flag");
    add_native_word!(
        interpreter,
        "<=",
        word_less_equal,
        "Is a less than or equal to b?",
        "a b -- flag"
    );
    add_native_word!(
        interpreter,
        ">=",
        word_greater_equal,
        "Is a greater than or equal to b?",
        "a b -- flag"
    );
    add_native_word!(interpreter, ">", word_greater, "Is a greater than b?", "a b -- flag");
}
