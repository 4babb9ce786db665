use crate::{
    add_native_word,
    lang::compilation::{CompiledStep, compile_steps_until},
    runtime::{
        data_structures::dictionary::{WordBody, WordType, WordVisibility},
        error::{self, ErrorKind, script_error},
        interpreter::{Interpreter, WordHandler},
    },
};
use std::rc::Rc;

/// Register a word defined by the running program, at the reader's current location, and make it
/// the target of `immediate`.
fn define_word(
    interpreter: &mut dyn Interpreter,
    name: String,
    handler: Rc<WordHandler>,
    description: &str,
) {
    let location = interpreter.current_location().clone();

    interpreter.add_word(
        location.path().to_string(),
        location.line(),
        location.column(),
        name.clone(),
        WordBody::Normal(handler),
        description.to_string(),
        String::new(),
        WordVisibility::Visible,
        WordType::Scripted,
    );

    interpreter.set_recent_definition(name);
}

/// A word that pushes a fixed value.
fn constant_handler(value: i64) -> Rc<WordHandler> {
    Rc::new(move |interpreter: &mut dyn Interpreter| -> error::Result<()> {
        interpreter.push(value);
        Ok(())
    })
}

/// Read a name then compile everything up to the `;` into a new word.  The step list is only
/// resolved when the word runs, so a word may call itself or words that don't exist yet.
///
/// Signature: ` -- `
fn word_start_word(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let name = interpreter.next_operand(":")?;
    let (_, steps) = compile_steps_until(interpreter, &[";"])?;
    let steps: Rc<[String]> = steps.into();

    let handler = Rc::new(move |interpreter: &mut dyn Interpreter| interpreter.run_words(&steps));

    define_word(interpreter, name, handler, "User defined word.");

    Ok(())
}

/// Reserve a cell of memory and define a word that pushes its address.
///
/// Signature: ` -- `
fn word_variable(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let name = interpreter.next_operand("variable")?;
    let address = interpreter.allot(1)?;

    define_word(interpreter, name, constant_handler(address as i64), "Variable.");

    Ok(())
}

/// Define a word that pushes the current value of `here`.  Nothing is reserved, that's left to
/// `allot`.
///
/// Signature: ` -- `
fn word_create(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let name = interpreter.next_operand("create")?;
    let address = interpreter.here();

    define_word(interpreter, name, constant_handler(address as i64), "Created memory region.");

    Ok(())
}

/// Define a word that pushes the value taken from the stack.
///
/// Signature: `value -- `
fn word_constant(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;
    let name = interpreter.next_operand("constant")?;

    define_word(interpreter, name, constant_handler(value), "Constant.");

    Ok(())
}

/// Turn the most recently defined word into an immediate word.  When compiled it runs right away
/// and leaves a `nop` behind.
///
/// Signature: ` -- `
fn word_immediate(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let Some(name) = interpreter.recent_definition().cloned() else {
        return script_error(interpreter, ErrorKind::UndefinedOperand("immediate".to_string()));
    };

    let found = interpreter
        .find_word_mut(&name)
        .map(|info| {
            // Already immediate words are left alone.
            if let WordBody::Normal(handler) = info.body.clone() {
                info.body = WordBody::Immediate(Rc::new(
                    move |interpreter: &mut dyn Interpreter| -> error::Result<CompiledStep> {
                        (*handler)(interpreter)?;
                        Ok(CompiledStep::Word("nop".to_string()))
                    },
                ));
            }
        })
        .is_some();

    if !found {
        return script_error(interpreter, ErrorKind::UndefinedOperand("immediate".to_string()));
    }

    tracing::debug!(word = %name, "marked immediate");

    Ok(())
}

pub fn register_word_creation_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        ":",
        word_start_word,
        "Start a new word definition, ending at ;.",
        "-- "
    );
    add_native_word!(
        interpreter,
        "variable",
        word_variable,
        "Define a new variable with a cell of memory.",
        "-- "
    );
    add_native_word!(
        interpreter,
        "create",
        word_create,
        "Define a word that pushes the current here.",
        "-- "
    );
    add_native_word!(
        interpreter,
        "constant",
        word_constant,
        "Define a word that pushes a constant value.",
        "value -- "
    );
    add_native_word!(
        interpreter,
        "immediate",
        word_immediate,
        "Mark the most recently defined word as immediate.",
        "-- "
    );
}
