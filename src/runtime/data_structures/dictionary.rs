use crate::{
    lang::source_buffer::SourceLocation,
    runtime::interpreter::{ImmediateHandler, WordHandler},
};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// The runtime of a word in the dictionary.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Debug)]
pub enum WordRuntime {
    /// The word is executed as soon as the compiler reads it, and hands back the name of the word
    /// to compile in its place.
    Immediate,

    /// The word is executed when the word holding it runs.
    Normal,
}

/// The type of a word in the dictionary.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Debug)]
pub enum WordType {
    /// The word is a native word written in Rust.
    Native,

    /// The word was compiled from program text, either by `:` or by one of the control structure
    /// words.
    Scripted,
}

/// The visibility of a word in the `words` listing.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Debug)]
pub enum WordVisibility {
    /// The word is visible within the listing.
    Visible,

    /// The word is hidden from the listing.  Generated words are hidden.
    Hidden,
}

/// The executable part of a word.  Which variant is held decides which partition of the
/// dictionary the word lives in, so a name is never both normal and immediate.
#[derive(Clone)]
pub enum WordBody {
    /// Runs when the word is executed.
    Normal(Rc<WordHandler>),

    /// Runs when the word is compiled.
    Immediate(Rc<ImmediateHandler>),
}

/// The information stored in the dictionary for each word.
#[derive(Clone)]
pub struct WordInfo {
    /// The location in the source where the word was defined.
    pub location: SourceLocation,

    /// The name of the word.
    pub name: String,

    /// What kind of word is it?
    pub word_type: WordType,

    /// Is the word visible in the listing?
    pub visibility: WordVisibility,

    /// A simple description of the word.
    pub description: String,

    /// The stack signature of the word.
    pub signature: String,

    /// The handler for the word.
    pub body: WordBody,
}

impl WordInfo {
    /// Create a new visible, native WordInfo with no description.
    pub fn new(location: SourceLocation, name: String, body: WordBody) -> WordInfo {
        WordInfo {
            location,
            name,
            word_type: WordType::Native,
            visibility: WordVisibility::Visible,
            description: String::new(),
            signature: String::new(),
            body,
        }
    }

    /// When should the word be executed?
    pub fn runtime(&self) -> WordRuntime {
        match self.body {
            WordBody::Normal(_) => WordRuntime::Normal,
            WordBody::Immediate(_) => WordRuntime::Immediate,
        }
    }
}

/// The dictionary used by the interpreter.  We use this to keep track of all of the words defined
/// within the interpreter.  It only ever grows, redefining a word replaces the older entry.
#[derive(Default)]
pub struct Dictionary {
    words: HashMap<String, WordInfo>,
}

/// Print the visible words in name order.  Immediate words are flagged as such.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let mut visible: Vec<&WordInfo> = self
            .words
            .values()
            .filter(|info| info.visibility == WordVisibility::Visible)
            .collect();

        visible.sort_by(|a, b| a.name.cmp(&b.name));

        let max_size = visible.iter().map(|info| info.name.len()).max().unwrap_or(0);

        writeln!(formatter, "{} words defined.", visible.len())?;
        writeln!(formatter)?;

        for info in visible {
            let runtime = if let WordRuntime::Immediate = info.runtime() {
                "immediate"
            } else {
                "         "
            };

            writeln!(
                formatter,
                "{:width$}  {}  --  {}",
                info.name,
                runtime,
                info.description,
                width = max_size
            )?;
        }

        Ok(())
    }
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            words: HashMap::new(),
        }
    }

    /// Insert a new word and it's info into the dictionary, replacing any word of the same name.
    pub fn insert(&mut self, info: WordInfo) {
        let _ = self.words.insert(info.name.clone(), info);
    }

    /// Try to get a word from the dictionary.
    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.words.get(name)
    }

    /// Try to get a word from the dictionary for modification.
    pub fn try_get_mut(&mut self, name: &str) -> Option<&mut WordInfo> {
        self.words.get_mut(name)
    }

    /// Look the name up among the normal words only.
    pub fn normal_handler(&self, name: &str) -> Option<Rc<WordHandler>> {
        match self.words.get(name).map(|info| &info.body) {
            Some(WordBody::Normal(handler)) => Some(handler.clone()),
            _ => None,
        }
    }

    /// Look the name up among the immediate words only.
    pub fn immediate_handler(&self, name: &str) -> Option<Rc<ImmediateHandler>> {
        match self.words.get(name).map(|info| &info.body) {
            Some(WordBody::Immediate(handler)) => Some(handler.clone()),
            _ => None,
        }
    }

    /// Number of words, hidden ones included.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lang::compilation::CompiledStep, runtime::interpreter::Interpreter};

    fn normal(name: &str) -> WordInfo {
        WordInfo::new(
            SourceLocation::new(),
            name.to_string(),
            WordBody::Normal(Rc::new(|_: &mut dyn Interpreter| Ok(()))),
        )
    }

    fn immediate(name: &str) -> WordInfo {
        WordInfo::new(
            SourceLocation::new(),
            name.to_string(),
            WordBody::Immediate(Rc::new(|_: &mut dyn Interpreter| {
                Ok(CompiledStep::Word("nop".to_string()))
            })),
        )
    }

    #[test]
    fn a_name_lives_in_one_partition() {
        let mut dictionary = Dictionary::new();

        dictionary.insert(normal("dup"));
        assert!(dictionary.normal_handler("dup").is_some());
        assert!(dictionary.immediate_handler("dup").is_none());

        dictionary.insert(immediate("dup"));
        assert!(dictionary.normal_handler("dup").is_none());
        assert!(dictionary.immediate_handler("dup").is_some());
        assert_eq!(dictionary.word_count(), 1);
    }

    #[test]
    fn listing_skips_hidden_words_and_flags_immediate_ones() {
        let mut dictionary = Dictionary::new();
        let mut hidden = normal("if 0");

        hidden.visibility = WordVisibility::Hidden;

        dictionary.insert(normal("swap"));
        dictionary.insert(immediate("if"));
        dictionary.insert(hidden);

        let listing = dictionary.to_string();

        assert!(listing.starts_with("2 words defined."));
        assert!(listing.contains("if    immediate"));
        assert!(listing.contains("swap"));
        assert!(!listing.contains("if 0"));
    }
}
