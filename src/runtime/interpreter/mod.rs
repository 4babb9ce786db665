use crate::{
    lang::{compilation::CompiledStep, source_buffer::SourceLocation},
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordBody, WordInfo, WordType, WordVisibility},
            memory::Memory,
            stack::Stack,
        },
        error,
    },
};
use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

pub mod forth_interpreter;

/// A call stack item is a record of the executing word's name and the location the reader was at
/// when it was called.  These items are read-only and the fields are accessed by member functions.
#[derive(Clone, Debug)]
pub struct CallItem {
    location: SourceLocation,
    word: String,
}

impl CallItem {
    /// Create a new call stack item.
    pub fn new(word: String, location: SourceLocation) -> CallItem {
        CallItem { location, word }
    }

    /// Where the reader was when this word was called.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    // The name of the word being executed.
    pub fn word(&self) -> &String {
        &self.word
    }
}

/// Make sure that this word can be nicely displayed to the user in event of an error.
impl Display for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.word)
    }
}

/// Type to represent a call stack.  This is a stack of call items currently being executed by the
/// interpreter.  This is used to help track errors and provide a stack trace to the user.
pub type CallStack = Vec<CallItem>;

/// Definition of a normal word handler.  This is the function that is called when a word is
/// executed.  Can be a lambda, a closure over a compiled step list or a Rust function.
pub type WordHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<()>;

/// Definition of an immediate word handler.  It runs while a definition is being compiled, may read
/// further words from the source, and returns what to compile in its place.
pub type ImmediateHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<CompiledStep>;

/// Simplify registering a native regular word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The word function handler to execute for the word.  A simple description of the word.
/// As well as the word's stack signature.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        // Import the necessary items for the macro to work.
        use std::rc::Rc;
        use $crate::runtime::data_structures::dictionary::{WordBody, WordType, WordVisibility};

        // Register the word while recording where in the source code the word was registered
        // from.
        $interpreter.add_word(
            file!().to_string(), // Original source location that this
            line!() as usize,    //  word was registered from.
            column!() as usize,
            $name.to_string(),                      // Name.
            WordBody::Normal(Rc::new($function)),   // Function handler.
            $description.to_string(),               // Word description.
            $signature.to_string(),                 // Word signature.
            WordVisibility::Visible,                // The word is visible in the index.
            WordType::Native,
        ); // This is a native word.
    }};
}

/// Simplify registering a native immediate word with the interpreter.  That is, this word is
/// intended to be executed at compile time.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The word function handler to execute for the word.  A simple description of the word.
/// As well as the word's stack signature.
#[macro_export]
macro_rules! add_native_immediate_word {
    (
        $interpreter:expr ,
        $name:literal ,
        $function:expr ,
        $description:literal ,
        $signature:literal
    ) => {{
        // Import the necessary items for the macro to work.
        use std::rc::Rc;
        use $crate::runtime::data_structures::dictionary::{WordBody, WordType, WordVisibility};

        // Register the word while recording where in the source code the word was registered
        // from.
        $interpreter.add_word(
            file!().to_string(), // Original source location that this
            line!() as usize,    //  word was registered from.
            column!() as usize,
            $name.to_string(),                        // Name.
            WordBody::Immediate(Rc::new($function)),  // Function handler.
            $description.to_string(),                 // Word description.
            $signature.to_string(),                   // Word signature.
            WordVisibility::Visible,                  // The word is visible in the index.
            WordType::Native,
        ); // This is a native word.
    }};
}

/// Trait for managing the interpreter's data and return stacks.  Intended to be called by
/// immediate/normal words, both native and scripted.
pub trait InterpreterStack {
    /// The data stack, for inspection.
    fn data_stack(&self) -> &Stack;

    /// The return stack, for inspection.
    fn return_stack(&self) -> &Stack;

    /// Push a value onto the data stack.  This is the primary way of sending values to words.
    fn push(&mut self, value: i64);

    /// Pop a value from the data stack.  If the stack is empty a stack underflow error is
    /// returned.
    fn pop(&mut self) -> error::Result<i64>;

    /// Push a value onto the return stack.
    fn push_return(&mut self, value: i64);

    /// Pop a value from the return stack, failing with a stack underflow if it is empty.
    fn pop_return(&mut self) -> error::Result<i64>;

    /// Copy a value out of the return stack without removing it.  Depth 0 is the top.
    fn peek_return(&self, depth: usize) -> error::Result<i64>;

    /// Empty both stacks.
    fn clear_stacks(&mut self);
}

/// Trait for the interpreter's flat memory and its `here` allocation cursor.
pub trait MemoryManagement {
    /// The memory array, for inspection.
    fn memory(&self) -> &Memory;

    /// The next free memory cell.
    fn here(&self) -> usize;

    /// Advance `here` by the given number of cells and return the address of the first one.
    /// Negative counts are refused, `here` never moves backwards.
    fn allot(&mut self, count: i64) -> error::Result<usize>;

    /// Read a cell, failing if the address is outside of memory.
    fn fetch(&self, address: i64) -> error::Result<i64>;

    /// Write a cell, failing if the address is outside of memory.
    fn store(&mut self, address: i64, value: i64) -> error::Result<()>;
}

/// Trait for reading the source of the program being run, and for running programs.
///
/// The reading functions are only meaningful while a program is running.  Thus they should only
/// be called from words, usually immediate ones.
pub trait CodeManagement {
    /// Get the next raw character of the source.  None at the end of the source.
    fn next_char(&mut self) -> Option<char>;

    /// Get the next whitespace delimited, lower cased, word of the source.  None at the end of the
    /// source.
    fn next_word(&mut self) -> Option<String>;

    /// Read the word that the named defining word operates on, failing with an undefined operand
    /// error at the end of the source.
    fn next_operand(&mut self, for_word: &str) -> error::Result<String>;

    /// Come up with a new, never before used, name for a generated word.  The name contains a space
    /// so it can never be read from the source.
    fn synthetic_name(&mut self, kind: &str) -> String;

    /// Run program text.  The path parameter is used to represent the source in error reporting.
    /// For example, the interactive loop uses a path of "\<repl\>" for the lines entered by the
    /// user.
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>;

    /// Read a file and run its contents as one program.
    fn process_source_file(&mut self, path: &str) -> error::Result<()>;

    /// Run program text with no particular path.
    fn run_program(&mut self, source: &str) -> error::Result<()> {
        self.process_source("<program>", source)
    }
}

/// Trait for managing and executing words known to the interpreter.
pub trait WordManagement {
    /// The current location of the reader in the program text.
    fn current_location(&self) -> &SourceLocation;

    /// Add a new word to the interpreter's dictionary.  This can be a native word or a scripted
    /// word.  A word of the same name is replaced.
    #[allow(clippy::too_many_arguments)]
    fn add_word(
        &mut self,
        file: String,
        line: usize,
        column: usize,
        name: String,
        body: WordBody,
        description: String,
        signature: String,
        visibility: WordVisibility,
        word_type: WordType,
    );

    /// Register a hidden word generated while compiling, at the current source location.
    fn add_generated_word(&mut self, name: String, handler: Rc<WordHandler>, description: String) {
        let location = self.current_location().clone();

        self.add_word(
            location.path().to_string(),
            location.line(),
            location.column(),
            name,
            WordBody::Normal(handler),
            description,
            String::new(),
            WordVisibility::Hidden,
            WordType::Scripted,
        );
    }

    /// The current word dictionary.
    fn dictionary(&self) -> &Dictionary;

    /// Find a word in the interpreter's dictionary by name.
    fn find_word(&self, word: &str) -> Option<&WordInfo>;

    /// Find a word in the interpreter's dictionary by name, for modification.
    fn find_word_mut(&mut self, word: &str) -> Option<&mut WordInfo>;

    /// The most recently defined word, if any.
    fn recent_definition(&self) -> Option<&String>;

    /// Remember the most recently defined word.
    fn set_recent_definition(&mut self, name: String);

    /// Resolve and run a single word.  Numbers are pushed, normal words are executed and
    /// immediate words are executed and the word they generate is run in turn.
    ///
    /// If the word resolves to nothing an unknown word error is returned.
    fn run_word(&mut self, word: &str) -> error::Result<()>;

    /// Run a compiled step list in order, stopping at the first error.
    fn run_words(&mut self, words: &[String]) -> error::Result<()> {
        for word in words {
            self.run_word(word)?;
        }

        Ok(())
    }

    /// The current word call stack.
    fn call_stack(&self) -> &CallStack;
}

/// Trait for sending bytes to the interpreter's output sink.
pub trait Output {
    /// Send one byte.
    fn emit(&mut self, byte: u8) -> error::Result<()>;

    /// Send every byte of the text.
    fn emit_str(&mut self, text: &str) -> error::Result<()> {
        for byte in text.bytes() {
            self.emit(byte)?;
        }

        Ok(())
    }
}

/// Core interpreter trait.
///
/// This trait brings together the traits that define the functionality of the interpreter:
/// managing the stacks and memory, reading and running source, managing and executing words, and
/// output.
pub trait Interpreter:
    InterpreterStack + MemoryManagement + CodeManagement + WordManagement + Output
{
    /// Bring the interpreter back to a usable state after an error by clearing both stacks.  The
    /// dictionary and memory are left as they are.
    fn reset(&mut self);
}
