use crate::{
    add_native_immediate_word,
    lang::compilation::{CompiledStep, compile_steps_until},
    runtime::{
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};
use std::rc::Rc;

/// Compile an `if ... [else ...] then` block into a new word.  At runtime the top of the stack
/// picks the branch, anything but zero runs the first one.
///
/// Signature: `flag -- `
fn word_if(interpreter: &mut dyn Interpreter) -> error::Result<CompiledStep> {
    let name = interpreter.synthetic_name("if");
    let (ender, then_steps) = compile_steps_until(interpreter, &["else", "then"])?;

    let else_steps = if ender == "else" {
        compile_steps_until(interpreter, &["then"])?.1
    } else {
        Vec::new()
    };

    let then_steps: Rc<[String]> = then_steps.into();
    let else_steps: Rc<[String]> = else_steps.into();

    interpreter.add_generated_word(
        name.clone(),
        Rc::new(move |interpreter: &mut dyn Interpreter| {
            if interpreter.pop()? != 0 {
                interpreter.run_words(&then_steps)
            } else {
                interpreter.run_words(&else_steps)
            }
        }),
        "Conditional block.".to_string(),
    );

    Ok(CompiledStep::Word(name))
}

/// Compile a `do ... loop` or `do ... +loop` block into a new word.
///
/// At runtime the index is popped, then the limit.  The body runs while the index is less than the
/// limit, with the limit and then the index pushed on the return stack so that `i` and `j` can see
/// them.  `loop` steps the index by one, `+loop` by a value popped off of the data stack.
///
/// Signature: `limit index -- `
fn word_do(interpreter: &mut dyn Interpreter) -> error::Result<CompiledStep> {
    let name = interpreter.synthetic_name("do");
    let (ender, steps) = compile_steps_until(interpreter, &["loop", "+loop"])?;

    let plus_loop = ender == "+loop";
    let steps: Rc<[String]> = steps.into();

    interpreter.add_generated_word(
        name.clone(),
        Rc::new(move |interpreter: &mut dyn Interpreter| -> error::Result<()> {
            let mut index = interpreter.pop()?;
            let mut limit = interpreter.pop()?;

            while index < limit {
                interpreter.push_return(limit);
                interpreter.push_return(index);

                interpreter.run_words(&steps)?;

                // The body may have changed them.
                index = interpreter.pop_return()?;
                limit = interpreter.pop_return()?;

                let step = if plus_loop { interpreter.pop()? } else { 1 };
                index = index.wrapping_add(step);
            }

            Ok(())
        }),
        "Counted loop.".to_string(),
    );

    Ok(CompiledStep::Word(name))
}

/// Compile a `begin ... [while ...] repeat` block into a new word.  Without a `while` the loop only
/// ends if a word in it fails.
///
/// Signature: ` -- `
fn word_begin(interpreter: &mut dyn Interpreter) -> error::Result<CompiledStep> {
    let name = interpreter.synthetic_name("begin");
    let (ender, first_steps) = compile_steps_until(interpreter, &["while", "repeat"])?;

    let has_while = ender == "while";
    let later_steps = if has_while {
        compile_steps_until(interpreter, &["repeat"])?.1
    } else {
        Vec::new()
    };

    let first_steps: Rc<[String]> = first_steps.into();
    let later_steps: Rc<[String]> = later_steps.into();

    interpreter.add_generated_word(
        name.clone(),
        Rc::new(move |interpreter: &mut dyn Interpreter| -> error::Result<()> {
            loop {
                interpreter.run_words(&first_steps)?;

                if has_while {
                    if interpreter.pop()? == 0 {
                        return Ok(());
                    }

                    interpreter.run_words(&later_steps)?;
                }
            }
        }),
        "Conditional loop.".to_string(),
    );

    Ok(CompiledStep::Word(name))
}

/// Read the next word and arrange for it to take effect in the definition being compiled.
///
/// An immediate word is run right away and a `nop` is compiled in its place.  A normal word is
/// handed back as postponed, which only a definition can accept.
///
/// Signature: ` -- `
fn word_postpone(interpreter: &mut dyn Interpreter) -> error::Result<CompiledStep> {
    let name = interpreter.next_operand("postpone")?;

    if let Some(handler) = interpreter.dictionary().immediate_handler(&name) {
        return match (*handler)(interpreter)? {
            CompiledStep::Postponed(inner) => Ok(CompiledStep::Postponed(inner)),
            CompiledStep::Word(_) => Ok(CompiledStep::Word("nop".to_string())),
        };
    }

    if interpreter.dictionary().normal_handler(&name).is_some() {
        return Ok(CompiledStep::Postponed(name));
    }

    script_error(interpreter, ErrorKind::UndefinedOperand("postpone".to_string()))
}

pub fn register_control_words(interpreter: &mut dyn Interpreter) {
    add_native_immediate_word!(
        interpreter,
        "if",
        word_if,
        "Run a block if the top of the stack is non-zero, with an optional else block.",
        "flag -- "
    );
    add_native_immediate_word!(
        interpreter,
        "do",
        word_do,
        "Loop from an index up to a limit, ending with loop or +loop.",
        "limit index -- "
    );
    add_native_immediate_word!(
        interpreter,
        "?do",
        word_do,
        "Same as do, the limit is always checked before the first pass.",
        "limit index -- "
    );
    add_native_immediate_word!(
        interpreter,
        "begin",
        word_begin,
        "Loop until the value checked by while is zero, ending with repeat.",
        " -- "
    );
    add_native_immediate_word!(
        interpreter,
        "postpone",
        word_postpone,
        "Compile the next word into the definition being built.",
        " -- "
    );
}

#[cfg(test)]
mod tests {
    use crate::runtime::{
        data_structures::stack::StackKind,
        error::ErrorKind,
        interpreter::{CodeManagement, InterpreterStack, forth_interpreter::ForthInterpreter},
        sink::OutputBuffer,
    };

    fn interpreter() -> (ForthInterpreter, OutputBuffer) {
        let output = OutputBuffer::new();
        let interpreter = ForthInterpreter::new(Box::new(output.clone()));

        (interpreter, output)
    }

    #[test]
    fn loops_leave_the_return_stack_as_they_found_it() {
        let (mut interpreter, output) = interpreter();

        interpreter.run_program("3 0 do i . loop").unwrap();

        assert_eq!(output.contents(), "0 1 2 ");
        assert_eq!(interpreter.return_stack().depth(), 0);
        assert_eq!(interpreter.data_stack().depth(), 0);
    }

    #[test]
    fn the_limit_is_checked_before_the_first_pass() {
        let (mut interpreter, output) = interpreter();

        interpreter.run_program("0 5 ?do i . loop 5 5 do i . loop").unwrap();

        assert_eq!(output.contents(), "");
    }

    #[test]
    fn plus_loop_steps_by_the_popped_value() {
        let (mut interpreter, output) = interpreter();

        interpreter.run_program("10 0 do i . 3 +loop").unwrap();

        assert_eq!(output.contents(), "0 3 6 9 ");
    }

    #[test]
    fn nested_loops_see_the_innermost_limit_and_index() {
        let (mut interpreter, output) = interpreter();

        interpreter.run_program(": grid 2 0 do 3 0 do j . i . loop loop ; grid").unwrap();

        assert_eq!(output.contents(), "3 0 3 1 3 2 3 0 3 1 3 2 ");
    }

    #[test]
    fn begin_while_repeat_counts_down() {
        let (mut interpreter, output) = interpreter();

        interpreter.run_program("3 begin dup while dup . 1- repeat drop").unwrap();

        assert_eq!(output.contents(), "3 2 1 ");
        assert_eq!(interpreter.data_stack().depth(), 0);
    }

    #[test]
    fn begin_without_while_stops_on_error() {
        let (mut interpreter, _) = interpreter();

        let error = interpreter.run_program("3 begin drop repeat").unwrap_err();

        assert_eq!(error.kind(), &ErrorKind::StackUnderflow(StackKind::Data));
    }

    #[test]
    fn postpone_outside_a_definition_fails() {
        let (mut interpreter, _) = interpreter();

        let error = interpreter.run_program("postpone dup").unwrap_err();

        assert_eq!(error.kind(), &ErrorKind::PostponeOutsideDefinition("dup".to_string()));
    }

    #[test]
    fn postpone_needs_a_known_word() {
        let (mut interpreter, _) = interpreter();

        let error = interpreter.run_program(": x postpone nothing-here ;").unwrap_err();

        assert_eq!(error.kind(), &ErrorKind::UndefinedOperand("postpone".to_string()));
    }

    #[test]
    fn postpone_compiles_a_normal_word() {
        let (mut interpreter, output) = interpreter();

        interpreter.run_program(": twice postpone dup ; 4 twice + .").unwrap();

        assert_eq!(output.contents(), "8 ");
    }

    #[test]
    fn unterminated_blocks_are_reported() {
        let (mut interpreter, _) = interpreter();

        let error = interpreter.run_program("1 if 2").unwrap_err();

        assert_eq!(
            error.kind(),
            &ErrorKind::UnterminatedDefinition(vec!["else".to_string(), "then".to_string()])
        );
    }
}
