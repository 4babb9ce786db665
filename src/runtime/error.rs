use std::{ error::Error,
           process::Termination,
           fmt::{ self, Debug, Display, Formatter }, process::ExitCode };
use crate::{ runtime::{ data_structures::stack::StackKind,
                        interpreter::CallStack },
             lang::source_buffer::SourceLocation };

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// The ways a program can fail.  All of them abort the program, or interactive line, currently
/// being run.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind
{
    /// The word is neither a number, a normal word nor an immediate word.
    UnknownWord(String),

    /// A pop was attempted on an empty stack.
    StackUnderflow(StackKind),

    /// A memory access, or allocation, fell outside of the memory array.
    MemoryOutOfRange(i64),

    /// The program text ran out while waiting for one of these terminators.
    UnterminatedDefinition(Vec<String>),

    /// The named word needed an operand that was missing or that names no word.
    UndefinedOperand(String),

    /// `postpone` handed back a word to splice, but there was no definition being compiled to
    /// receive it.
    PostponeOutsideDefinition(String),

    /// Integer division or remainder by zero.
    DivisionByZero,

    /// `allot` was asked to move the allocation cursor backwards.
    InvalidAllot(i64),

    /// Words nested deeper than the interpreter's configured call depth.
    CallDepthExceeded(usize),

    /// The output sink failed.
    Io(String)
}


/// Describe the failure in plain words.
impl Display for ErrorKind
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            ErrorKind::UnknownWord(name) => write!(f, "Word {} not found.", name),

            ErrorKind::StackUnderflow(stack) => write!(f, "{} stack underflow.", stack),

            ErrorKind::MemoryOutOfRange(address) =>
                write!(f, "Memory address {} out of range.", address),

            ErrorKind::UnterminatedDefinition(enders) =>
                write!(f, "Reached the end of the input, wanted one of: {}.", enders.join(" ")),

            ErrorKind::UndefinedOperand(word) =>
                write!(f, "Missing or unknown operand for {}.", word),

            ErrorKind::PostponeOutsideDefinition(name) =>
                write!(f, "Can not postpone {} outside of a definition.", name),

            ErrorKind::DivisionByZero => write!(f, "Division by zero."),

            ErrorKind::InvalidAllot(amount) =>
                write!(f, "Can not allot a negative amount {}.", amount),

            ErrorKind::CallDepthExceeded(limit) =>
                write!(f, "Call depth limit of {} words exceeded.", limit),

            ErrorKind::Io(message) => write!(f, "I/O error: {}", message)
        }
    }
}



/// Any error that occurs during the execution of a program.
#[derive(Clone)]
pub struct ScriptError
{
    /// The location in the source text the reader was at when the error occurred, if available.
    location: Option<SourceLocation>,

    /// What went wrong.
    kind: ErrorKind,

    /// The program's word call stack at the time of the error, if available.
    call_stack: Option<CallStack>
}


impl Error for ScriptError
{
}


/// When returned from main, convert the error result to an operating system exit code.
impl Termination for ScriptError
{
    /// Because this type represents an error, the exit code is always FAILURE.
    fn report(self) -> ExitCode
    {
        eprintln!("Error: {}", self);
        ExitCode::FAILURE
    }
}


/// Print the location and description of the error.  The call stack is left out, use
/// `call_stack_report` to get it.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}", location, self.kind),
            None => write!(f, "{}", self.kind)
        }
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)?;

        if !self.call_stack_report().is_empty()
        {
            write!(f, "\n\n{}", self.call_stack_report())?;
        }

        Ok(())
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(location: Option<SourceLocation>,
               kind: ErrorKind,
               call_stack: Option<CallStack>) -> ScriptError
    {
        ScriptError
            {
                location,
                kind,
                call_stack
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(location: Option<SourceLocation>,
                            kind: ErrorKind,
                            call_stack: Option<CallStack>) -> Result<T>
    {
        Err(ScriptError::new(location, kind, call_stack))
    }

    /// If available, the location in the source text the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// What went wrong.
    pub fn kind(&self) -> &ErrorKind
    {
        &self.kind
    }

    /// If available, the program's word call stack at the time of the error.
    pub fn call_stack(&self) -> &Option<CallStack>
    {
        &self.call_stack
    }

    /// The call stack formatted innermost word first, or an empty string if there was none.
    pub fn call_stack_report(&self) -> String
    {
        let mut report = String::new();

        if let Some(call_stack) = &self.call_stack
            && !call_stack.is_empty()
        {
            report.push_str("Call stack\n");

            for item in call_stack.iter().rev()
            {
                report.push_str(&format!("  {}\n", item));
            }
        }

        report
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(None, ErrorKind::Io(error.to_string()), None)
    }
}



/// A convenience function for creating a ScriptError and wrapping in in a Result::Err using the
/// interpreter's current location and call stack.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind) -> Result<T>
{
    let location = interpreter.current_location().clone();
    let call_stack = interpreter.call_stack().clone();

    ScriptError::new_as_result(Some(location), kind, Some(call_stack))
}
