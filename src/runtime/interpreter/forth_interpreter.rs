use crate::{
    lang::{
        compilation::{CompiledStep, process_source_words},
        source_buffer::{SourceBuffer, SourceLocation},
        tokenizing::{next_word, parse_number},
    },
    runtime::{
        built_ins::register_builtin_words,
        data_structures::{
            dictionary::{Dictionary, WordBody, WordInfo, WordType, WordVisibility},
            memory::{DEFAULT_MEMORY_SIZE, Memory},
            stack::{Stack, StackKind},
        },
        error::{self, ErrorKind, script_error},
        interpreter::{
            CallItem, CallStack, CodeManagement, Interpreter, InterpreterStack, MemoryManagement,
            Output, WordHandler, WordManagement,
        },
        sink::{OutputBuffer, Sink},
    },
};
use std::{borrow::Cow, fs::read_to_string, rc::Rc};



/// How many words may be running inside each other before a call fails.  Every level costs a few
/// native stack frames, this keeps the default within an 8 MiB main thread.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1_000;



/// Settings used when creating a new interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterpreterConfig
{
    /// The number of cells of addressable memory.
    pub memory_size: usize,

    /// The deepest the call stack may grow, runaway recursion fails with `CallDepthExceeded` once
    /// it's reached.
    pub max_call_depth: usize
}


impl Default for InterpreterConfig
{
    fn default() -> Self
    {
        InterpreterConfig
            {
                memory_size: DEFAULT_MEMORY_SIZE,
                max_call_depth: DEFAULT_MAX_CALL_DEPTH
            }
    }
}



/// The core interpreter implementation.  Each instance is fully independent of any other, they
/// share no dictionary, stacks or memory.
pub struct ForthInterpreter
{
    /// The data stack, where words take their operands from and leave their results.
    data_stack: Stack,

    /// The return stack, used for loop bookkeeping and temporaries.
    return_stack: Stack,

    /// The flat memory used by variables, `create`, `allot` and string literals.
    memory: Memory,

    /// The dictionary of words known by the interpreter.
    dictionary: Dictionary,

    /// The most recently defined word, the target of `immediate`.
    recent_definition: Option<String>,

    /// Counter used to build names for generated words.
    synthetic_count: usize,

    /// The program text currently being read.
    source: SourceBuffer,

    /// The call stack used to keep track of the current execution context.
    call_stack: CallStack,

    /// Limit on the depth of the call stack.
    max_call_depth: usize,

    /// Where all output goes.
    sink: Box<dyn Sink>
}


impl ForthInterpreter
{
    /// Create a new interpreter with the default settings and all of the built-in words
    /// registered.
    pub fn new(sink: Box<dyn Sink>) -> ForthInterpreter
    {
        ForthInterpreter::with_config(sink, InterpreterConfig::default())
    }

    /// Create a new interpreter with the given settings and all of the built-in words registered.
    pub fn with_config(sink: Box<dyn Sink>, config: InterpreterConfig) -> ForthInterpreter
    {
        let mut interpreter = ForthInterpreter
            {
                data_stack: Stack::new(StackKind::Data),
                return_stack: Stack::new(StackKind::Return),
                memory: Memory::new(config.memory_size),
                dictionary: Dictionary::new(),
                recent_definition: None,
                synthetic_count: 0,
                source: SourceBuffer::default(),
                call_stack: CallStack::new(),
                max_call_depth: config.max_call_depth,
                sink
            };

        register_builtin_words(&mut interpreter);
        tracing::debug!(words = interpreter.dictionary.word_count(),
                        memory = config.memory_size,
                        max_call_depth = config.max_call_depth,
                        "interpreter ready");

        interpreter
    }

    /// Make the given text the source the interpreter reads from, without running it.
    pub fn load_source(&mut self, path: &str, source: &str)
    {
        self.source = SourceBuffer::new(path, source);
    }

    /// Run a normal word handler while keeping the call stack up to date.
    fn execute_handler(&mut self, name: &str, handler: &Rc<WordHandler>) -> error::Result<()>
    {
        if self.call_stack.len() >= self.max_call_depth
        {
            return script_error(self, ErrorKind::CallDepthExceeded(self.max_call_depth));
        }

        self.call_stack.push(CallItem::new(name.to_string(), self.source.location().clone()));

        let result = (**handler)(self);

        let _ = self.call_stack.pop();

        result
    }

    fn underflow<T>(&self, kind: StackKind) -> error::Result<T>
    {
        script_error(self, ErrorKind::StackUnderflow(kind))
    }
}


impl Interpreter for ForthInterpreter
{
    fn reset(&mut self)
    {
        self.clear_stacks();
        self.call_stack.clear();
    }
}


impl InterpreterStack for ForthInterpreter
{
    fn data_stack(&self) -> &Stack
    {
        &self.data_stack
    }

    fn return_stack(&self) -> &Stack
    {
        &self.return_stack
    }

    fn push(&mut self, value: i64)
    {
        self.data_stack.push(value);
    }

    fn pop(&mut self) -> error::Result<i64>
    {
        match self.data_stack.pop()
        {
            Some(value) => Ok(value),
            None => self.underflow(self.data_stack.kind())
        }
    }

    fn push_return(&mut self, value: i64)
    {
        self.return_stack.push(value);
    }

    fn pop_return(&mut self) -> error::Result<i64>
    {
        match self.return_stack.pop()
        {
            Some(value) => Ok(value),
            None => self.underflow(self.return_stack.kind())
        }
    }

    fn peek_return(&self, depth: usize) -> error::Result<i64>
    {
        match self.return_stack.peek(depth)
        {
            Some(value) => Ok(value),
            None => self.underflow(self.return_stack.kind())
        }
    }

    fn clear_stacks(&mut self)
    {
        self.data_stack.clear();
        self.return_stack.clear();
    }
}


impl MemoryManagement for ForthInterpreter
{
    fn memory(&self) -> &Memory
    {
        &self.memory
    }

    fn here(&self) -> usize
    {
        self.memory.here()
    }

    fn allot(&mut self, count: i64) -> error::Result<usize>
    {
        let Ok(cells) = usize::try_from(count)
        else
        {
            return script_error(self, ErrorKind::InvalidAllot(count));
        };

        match self.memory.allot(cells)
        {
            Some(start) => Ok(start),
            None =>
            {
                let end = (self.memory.here() as i64).saturating_add(count);
                script_error(self, ErrorKind::MemoryOutOfRange(end))
            }
        }
    }

    fn fetch(&self, address: i64) -> error::Result<i64>
    {
        match self.memory.read(address)
        {
            Some(value) => Ok(value),
            None => script_error(self, ErrorKind::MemoryOutOfRange(address))
        }
    }

    fn store(&mut self, address: i64, value: i64) -> error::Result<()>
    {
        match self.memory.write(address, value)
        {
            Some(()) => Ok(()),
            None => script_error(self, ErrorKind::MemoryOutOfRange(address))
        }
    }
}


impl CodeManagement for ForthInterpreter
{
    fn next_char(&mut self) -> Option<char>
    {
        self.source.next_char()
    }

    fn next_word(&mut self) -> Option<String>
    {
        next_word(&mut self.source)
    }

    fn next_operand(&mut self, for_word: &str) -> error::Result<String>
    {
        match next_word(&mut self.source)
        {
            Some(word) => Ok(word),
            None => script_error(self, ErrorKind::UndefinedOperand(for_word.to_string()))
        }
    }

    fn synthetic_name(&mut self, kind: &str) -> String
    {
        let name = format!("{} #{}", kind, self.synthetic_count);

        self.synthetic_count += 1;
        name
    }

    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>
    {
        let previous = std::mem::replace(&mut self.source, SourceBuffer::new(path, source));
        let result = process_source_words(self);

        self.source = previous;
        result
    }

    fn process_source_file(&mut self, path: &str) -> error::Result<()>
    {
        let source = read_to_string(path)?;

        tracing::debug!(path, bytes = source.len(), "processing source file");
        self.process_source(path, &source)
    }
}


impl WordManagement for ForthInterpreter
{
    fn current_location(&self) -> &SourceLocation
    {
        self.source.location()
    }

    fn add_word(&mut self,
                file: String,
                line: usize,
                column: usize,
                name: String,
                body: WordBody,
                description: String,
                signature: String,
                visibility: WordVisibility,
                word_type: WordType)
    {
        let location = SourceLocation::new_from_info(&file, line, column);
        let mut info = WordInfo::new(location, name, body);

        info.description = description;
        info.signature = signature;
        info.visibility = visibility;
        info.word_type = word_type;

        if word_type == WordType::Scripted
        {
            tracing::debug!(word = %info.name, runtime = ?info.runtime(), "defined word");
        }

        self.dictionary.insert(info);
    }

    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    fn find_word(&self, word: &str) -> Option<&WordInfo>
    {
        self.dictionary.try_get(word)
    }

    fn find_word_mut(&mut self, word: &str) -> Option<&mut WordInfo>
    {
        self.dictionary.try_get_mut(word)
    }

    fn recent_definition(&self) -> Option<&String>
    {
        self.recent_definition.as_ref()
    }

    fn set_recent_definition(&mut self, name: String)
    {
        self.recent_definition = Some(name);
    }

    fn run_word(&mut self, word: &str) -> error::Result<()>
    {
        let word: Cow<str> = if word.chars().any(char::is_uppercase)
            {
                Cow::Owned(word.to_lowercase())
            }
            else
            {
                Cow::Borrowed(word)
            };

        tracing::trace!(word = %word, "run word");

        if let Some(value) = parse_number(&word)
        {
            self.push(value);
            return Ok(());
        }

        if let Some(handler) = self.dictionary.normal_handler(&word)
        {
            return self.execute_handler(&word, &handler);
        }

        if let Some(handler) = self.dictionary.immediate_handler(&word)
        {
            return match (*handler)(self)?
                {
                    CompiledStep::Word(generated) =>
                        match self.dictionary.normal_handler(&generated)
                        {
                            Some(handler) => self.execute_handler(&generated, &handler),
                            None => script_error(self, ErrorKind::UnknownWord(generated))
                        },

                    CompiledStep::Postponed(name) =>
                        script_error(self, ErrorKind::PostponeOutsideDefinition(name))
                };
        }

        script_error(self, ErrorKind::UnknownWord(word.into_owned()))
    }

    fn call_stack(&self) -> &CallStack
    {
        &self.call_stack
    }
}


impl Output for ForthInterpreter
{
    fn emit(&mut self, byte: u8) -> error::Result<()>
    {
        if let Err(error) = self.sink.emit(byte)
        {
            return script_error(self, ErrorKind::Io(error.to_string()));
        }

        Ok(())
    }
}



/// Run a program in a fresh interpreter and hand back everything it printed.
pub fn run_forth(source: &str) -> error::Result<String>
{
    let output = OutputBuffer::new();
    let mut interpreter = ForthInterpreter::new(Box::new(output.clone()));

    interpreter.run_program(source)?;

    Ok(output.contents())
}



#[cfg(test)]
mod tests
{
    use super::*;

    fn interpreter() -> (ForthInterpreter, OutputBuffer)
    {
        let output = OutputBuffer::new();
        let interpreter = ForthInterpreter::new(Box::new(output.clone()));

        (interpreter, output)
    }

    #[test]
    fn numbers_are_pushed()
    {
        let (mut interpreter, _) = interpreter();

        interpreter.run_program("1 -2 30").unwrap();

        assert_eq!(interpreter.data_stack().items(), &[1, -2, 30]);
    }

    #[test]
    fn words_are_case_insensitive()
    {
        let (mut interpreter, output) = interpreter();

        interpreter.run_program("3 DUP + .").unwrap();
        interpreter.run_word("DROP").unwrap_err();

        assert_eq!(output.contents(), "6 ");
    }

    #[test]
    fn unknown_words_are_reported_with_their_location()
    {
        let (mut interpreter, _) = interpreter();

        let error = interpreter.process_source("test.f", "1 2\nfrob").unwrap_err();

        assert_eq!(error.kind(), &ErrorKind::UnknownWord("frob".to_string()));
        assert_eq!(error.location().as_ref().map(|location| location.line()), Some(2));
    }

    #[test]
    fn synthetic_names_never_repeat()
    {
        let (mut interpreter, _) = interpreter();

        let first = interpreter.synthetic_name("if");
        let second = interpreter.synthetic_name("if");

        assert_ne!(first, second);
        assert!(first.contains(' '));
    }

    #[test]
    fn allot_refuses_negative_counts_and_overruns()
    {
        let output = OutputBuffer::new();
        let config = InterpreterConfig { memory_size: 4, ..InterpreterConfig::default() };
        let mut interpreter = ForthInterpreter::with_config(Box::new(output), config);

        assert_eq!(interpreter.allot(-1).unwrap_err().kind(), &ErrorKind::InvalidAllot(-1));
        assert_eq!(interpreter.allot(3).unwrap(), 0);
        assert!(matches!(interpreter.allot(2).unwrap_err().kind(),
                         ErrorKind::MemoryOutOfRange(_)));
        assert_eq!(interpreter.here(), 3);
    }

    #[test]
    fn the_call_stack_is_unwound_after_an_error()
    {
        let (mut interpreter, _) = interpreter();

        let error = interpreter.run_program(": inner drop ; : outer inner ; outer").unwrap_err();

        assert_eq!(error.kind(), &ErrorKind::StackUnderflow(StackKind::Data));
        assert_eq!(error.call_stack().as_ref().map(|stack| stack.len()), Some(3));
        assert!(interpreter.call_stack().is_empty());
    }

    fn limited_interpreter(max_call_depth: usize) -> (ForthInterpreter, OutputBuffer)
    {
        let output = OutputBuffer::new();
        let config = InterpreterConfig { max_call_depth, ..InterpreterConfig::default() };
        let interpreter = ForthInterpreter::with_config(Box::new(output.clone()), config);

        (interpreter, output)
    }

    #[test]
    fn recursion_within_the_call_depth_runs()
    {
        let (mut interpreter, output) = limited_interpreter(200);

        // Each level is `down` plus the word generated for its `if`.
        interpreter.run_program(": down dup if 1- down then ; 50 down .").unwrap();

        assert_eq!(output.contents(), "0 ");
        assert!(interpreter.call_stack().is_empty());
    }

    #[test]
    fn runaway_recursion_is_an_error()
    {
        let (mut interpreter, _) = limited_interpreter(200);

        let error = interpreter.run_program(": down dup if 1- down then ; 5000 down").unwrap_err();

        assert_eq!(error.kind(), &ErrorKind::CallDepthExceeded(200));
        assert_eq!(error.call_stack().as_ref().map(|stack| stack.len()), Some(200));
        assert!(interpreter.call_stack().is_empty());

        interpreter.reset();
        interpreter.run_program("3 down").unwrap();
        assert_eq!(interpreter.data_stack().items(), &[0]);
    }

    #[test]
    fn run_forth_collects_the_output()
    {
        assert_eq!(run_forth("65 emit 66 emit cr").unwrap(), "AB\n");
    }
}
