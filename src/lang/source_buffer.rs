use std::{ fmt::{ self,
                  Display,
                  Formatter },
           hash::{ Hash,
                   Hasher },
           rc::Rc };



/// The location in the source text where the reader currently is.  Errors raised while a program
/// runs are tagged with this so the user can find the offending word.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, PartialEq, PartialOrd, Eq, Debug)]
pub struct SourceLocation
{
    /// Either the path to the file or a description of the source text.  For example lines entered
    /// in the interactive loop have a tag of "\<repl\>".  Shared, so copying a location for every
    /// call stack entry never copies the text.
    path: Rc<str>,

    /// The 1 based line number in the source text.
    line: usize,

    /// The 1 based column number in the source text.
    column: usize
}


impl Hash for SourceLocation
{
    fn hash<H: Hasher>(&self, state: &mut H)
    {
        self.path.hash(state);
        self.line.hash(state);
        self.column.hash(state);
    }
}


/// Used for error reporting to show where in the source text an error originated.
impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl Default for SourceLocation
{
    fn default() -> Self
    {
        Self::new()
    }
}


impl SourceLocation
{
    /// Crate a new SourceLocation with default values.
    pub fn new() -> SourceLocation
    {
        SourceLocation { path: Rc::from("unspecified"), line: 1, column: 1 }
    }

    /// Create a new SourceLocation at the start of the given source.
    pub fn new_from_path(path: &str) -> Self
    {
        SourceLocation { path: Rc::from(path), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.  Native words use this to
    /// record where in the Rust code they were registered from.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: Rc::from(path), line, column }
    }

    /// The path to the source text or a meaningful description of it.
    pub fn path(&self) -> &str
    {
        &self.path
    }

    /// The 1 based line number in the source text.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// The 1 based column number in the source text.
    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// A forward only reader over one program's text.  The interpreter owns one of these for the
/// program currently being run and both the tokenizer and the literal reading immediate words (`(`,
/// `\`, `."` and `s"`) pull characters from it.
///
/// Unlike a borrowing iterator the text is owned, because immediate words invoked from deep inside
/// a word body need to keep reading from it through the interpreter.
#[derive(Clone, Default)]
pub struct SourceBuffer
{
    /// The program text.
    chars: Vec<char>,

    /// Index of the next character to hand out.
    position: usize,

    /// The logical location of the cursor in the source text.
    location: SourceLocation
}


impl SourceBuffer
{
    /// Create a new SourceBuffer with the path to, or meaningful tag for the source text and the
    /// text itself.
    pub fn new(path: &str, source: &str) -> Self
    {
        SourceBuffer
            {
                chars: source.chars().collect(),
                position: 0,
                location: SourceLocation::new_from_path(path)
            }
    }

    /// The location the cursor is at in the source text being processed.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Is there any text left to read?
    pub fn is_exhausted(&self) -> bool
    {
        self.position >= self.chars.len()
    }

    /// Take a peek at the next character without consuming it.
    pub fn peek_next(&self) -> Option<char>
    {
        self.chars.get(self.position).copied()
    }

    /// Get and consume the next character.  Running out of text is not an error, it just returns
    /// None.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = self.peek_next();

        if let Some(next_char) = next
        {
            self.position += 1;
            self.increment_location(next_char);
        }

        next
    }

    /// Advance one column for regular characters.  Reset the colum to 1 and increment the line for
    /// new line characters.
    fn increment_location(&mut self, next: char)
    {
        if next == '\n'
        {
            self.location.line += 1;
            self.location.column = 1;
        }
        else
        {
            self.location.column += 1;
        }
    }
}



#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn reads_every_character_then_stops()
    {
        let mut buffer = SourceBuffer::new("<test>", "ab");

        assert_eq!(buffer.next_char(), Some('a'));
        assert_eq!(buffer.next_char(), Some('b'));
        assert_eq!(buffer.next_char(), None);
        assert_eq!(buffer.next_char(), None);
        assert!(buffer.is_exhausted());
    }

    #[test]
    fn tracks_lines_and_columns()
    {
        let mut buffer = SourceBuffer::new("<test>", "1 2\n3");

        for _ in 0..4
        {
            let _ = buffer.next_char();
        }

        assert_eq!(buffer.location().line(), 2);
        assert_eq!(buffer.location().column(), 1);

        let _ = buffer.next_char();
        assert_eq!(buffer.location().column(), 2);
        assert_eq!(buffer.location().to_string(), "<test> (2, 2)");
    }

    #[test]
    fn copied_locations_share_the_path()
    {
        let mut buffer = SourceBuffer::new("some/file.f", "a b");
        let first = buffer.location().clone();

        let _ = buffer.next_char();
        let second = buffer.location().clone();

        assert!(Rc::ptr_eq(&first.path, &second.path));
        assert_eq!(second.path(), "some/file.f");
        assert_eq!(second.column(), 2);
    }

    #[test]
    fn peek_does_not_consume()
    {
        let buffer = SourceBuffer::new("<test>", "x");

        assert_eq!(buffer.peek_next(), Some('x'));
        assert_eq!(buffer.peek_next(), Some('x'));
        assert!(!buffer.is_exhausted());
    }
}
