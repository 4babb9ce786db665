/// Mostly words that are used to change or read the state of the interpreter.
mod interpreter_words;

/// Words that manipulate the data and return stacks.
mod stack_words;

/// Integer arithmetic.
mod simple_arithmetic_words;

/// Words that work with math, logic, bit manipulation and comparisons.
mod math_logic_and_bit_words;

/// Words that read and write memory.
mod memory_words;

/// Words that create new words.
mod word_creation_words;

/// Words that compile the control structures.
mod control_words;

/// Comments and string literals.
mod string_words;

use crate::runtime::{
    built_ins::base_words::{
        control_words::register_control_words, interpreter_words::register_interpreter_words,
        math_logic_and_bit_words::register_math_logic_and_bit_words,
        memory_words::register_memory_words,
        simple_arithmetic_words::register_simple_arithmetic_words,
        stack_words::register_stack_words, string_words::register_string_words,
        word_creation_words::register_word_creation_words,
    },
    interpreter::Interpreter,
};

/// Called to register all of the core words of the language.
pub fn register_base_words(interpreter: &mut dyn Interpreter) {
    register_interpreter_words(interpreter);
    register_stack_words(interpreter);
    register_simple_arithmetic_words(interpreter);
    register_math_logic_and_bit_words(interpreter);
    register_memory_words(interpreter);
    register_word_creation_words(interpreter);
    register_control_words(interpreter);
    register_string_words(interpreter);
}
