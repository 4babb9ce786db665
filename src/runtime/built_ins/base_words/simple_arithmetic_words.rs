use crate::{
    add_native_word,
    runtime::{
        built_ins::base_words::math_logic_and_bit_words::{binary_op, checked_binary_op},
        interpreter::Interpreter,
    },
};

/// Integer arithmetic.  Overflow wraps around rather than failing.
pub fn register_simple_arithmetic_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "+",
        |interp: &mut dyn Interpreter| binary_op(interp, i64::wrapping_add),
        "Add two numbers.",
        "a b -- sum"
    );
    add_native_word!(
        interpreter,
        "-",
        |interp: &mut dyn Interpreter| binary_op(interp, i64::wrapping_sub),
        "Subtract the top number from the one under it.",
        "a b -- difference"
    );
    add_native_word!(
        interpreter,
        "*",
        |interp: &mut dyn Interpreter| binary_op(interp, i64::wrapping_mul),
        "Multiply two numbers.",
        "a b -- product"
    );
    add_native_word!(
        interpreter,
        "/",
        |interp: &mut dyn Interpreter| checked_binary_op(interp, i64::wrapping_div),
        "Divide a by b, truncating towards zero.",
        "a b -- quotient"
    );
    add_native_word!(
        interpreter,
        "%",
        |interp: &mut dyn Interpreter| checked_binary_op(interp, i64::wrapping_rem),
        "Remainder of a divided by b.  The sign follows a.",
        "a b -- remainder"
    );

    add_native_word!(
        interpreter,
        "1+",
        |interp: &mut dyn Interpreter| {
            let a = interp.pop()?;
            interp.push(a.wrapping_add(1));
            Ok(())
        },
        "( n -- n+1 ) Adds 1 to the top of the stack.",
        "n -- n+1"
    );
    add_native_word!(
        interpreter,
        "1-",
        |interp: &mut dyn Interpreter| {
            let a = interp.pop()?;
            interp.push(a.wrapping_sub(1));
            Ok(())
        },
        "( n -- n-1 ) Subtracts 1 from the top of the stack.",
        "n -- n-1"
    );
    add_native_word!(
        interpreter,
        "negate",
        |interp: &mut dyn Interpreter| {
            let a = interp.pop()?;
            interp.push(a.wrapping_neg());
            Ok(())
        },
        "( n -- -n ) Negates the top of the stack.",
        "n -- -n"
    );
}
