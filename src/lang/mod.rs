/// Module for reading the program text one character at a time.
pub mod source_buffer;

/// Module for splitting the program text into words.
pub mod tokenizing;

/// Module for compiling a run of words into a step list.  Immediate words found along the way are
/// executed while the list is being built, which is why this phase requires an active interpreter.
///
/// That is, the code being compiled may help in the compiling of the code.
pub mod compilation;
