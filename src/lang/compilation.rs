use crate::runtime::{
    error::{self, ErrorKind, script_error},
    interpreter::Interpreter,
};

/// What an immediate word hands back to the compiler, the name of the word to compile in its
/// place.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CompiledStep {
    /// A word that can be run right away when the immediate word was met outside of a
    /// definition.  Usually a freshly generated word or `nop`.
    Word(String),

    /// A word that is only meaningful inside of a definition, `postpone` hands these back.  Running
    /// one at the top level is an error.
    Postponed(String),
}

impl CompiledStep {
    /// The name of the word that ends up in the step list.
    pub fn into_name(self) -> String {
        match self {
            CompiledStep::Word(name) | CompiledStep::Postponed(name) => name,
        }
    }
}

/// Read words from the interpreter's source until one of the terminators is found, building up a
/// step list as we go.
///
/// Terminators are checked before anything else so they can never be shadowed by a word of the
/// same name.  Immediate words are executed as soon as they're read, and the name they hand back
/// is compiled in their place.  Everything else is compiled as is, it's resolved when the step
/// list is run.
///
/// Returns the terminator that was found along with the step list.  Running out of source is an
/// unterminated definition error.
pub fn compile_steps_until(
    interpreter: &mut dyn Interpreter,
    terminators: &[&str],
) -> error::Result<(String, Vec<String>)> {
    let mut steps = Vec::new();

    loop {
        let Some(word) = interpreter.next_word() else {
            let wanted = terminators.iter().map(|ender| ender.to_string()).collect();
            return script_error(interpreter, ErrorKind::UnterminatedDefinition(wanted));
        };

        if let Some(ender) = terminators.iter().find(|ender| **ender == word) {
            return Ok((ender.to_string(), steps));
        }

        match interpreter.dictionary().immediate_handler(&word) {
            Some(handler) => {
                let step = (*handler)(interpreter)?;
                steps.push(step.into_name());
            }

            None => steps.push(word),
        }
    }
}

/// The top level driver.  Run every word of the interpreter's current source, in order, until the
/// source is exhausted or a word fails.
pub fn process_source_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    while let Some(word) = interpreter.next_word() {
        tracing::debug!(word = %word, location = %interpreter.current_location(), "top level word");
        interpreter.run_word(&word)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{
        interpreter::forth_interpreter::ForthInterpreter, sink::OutputBuffer,
    };

    fn interpreter_reading(source: &str) -> ForthInterpreter {
        let mut interpreter = ForthInterpreter::new(Box::new(OutputBuffer::new()));

        interpreter.load_source("<test>", source);
        interpreter
    }

    #[test]
    fn collects_words_until_a_terminator() {
        let mut interpreter = interpreter_reading("dup swap ; drop");

        let (ender, steps) = compile_steps_until(&mut interpreter, &[";"]).unwrap();

        assert_eq!(ender, ";");
        assert_eq!(steps, vec!["dup".to_string(), "swap".to_string()]);
    }

    #[test]
    fn reports_which_terminator_was_found() {
        let mut interpreter = interpreter_reading("1 else 2 then");

        let (ender, steps) = compile_steps_until(&mut interpreter, &["else", "then"]).unwrap();

        assert_eq!(ender, "else");
        assert_eq!(steps, vec!["1".to_string()]);
    }

    #[test]
    fn unknown_words_are_left_for_later() {
        let mut interpreter = interpreter_reading("not-yet-defined ;");

        let (_, steps) = compile_steps_until(&mut interpreter, &[";"]).unwrap();

        assert_eq!(steps, vec!["not-yet-defined".to_string()]);
    }

    #[test]
    fn immediate_words_compile_what_they_hand_back() {
        let mut interpreter = interpreter_reading("( a comment ) 1 ;");

        let (_, steps) = compile_steps_until(&mut interpreter, &[";"]).unwrap();

        assert_eq!(steps, vec!["nop".to_string(), "1".to_string()]);
    }

    #[test]
    fn running_out_of_source_is_an_error() {
        let mut interpreter = interpreter_reading("1 2 3");

        let error = compile_steps_until(&mut interpreter, &["loop", "+loop"]).unwrap_err();

        assert_eq!(
            error.kind(),
            &ErrorKind::UnterminatedDefinition(vec!["loop".to_string(), "+loop".to_string()])
        );
    }
}
