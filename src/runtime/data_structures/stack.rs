use std::fmt::{self, Display, Formatter};

/// Which of the interpreter's two stacks is being talked about.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StackKind {
    /// The primary operand stack.
    Data,

    /// The stack used for loop bookkeeping and `>r`/`r>` temporaries.
    Return,
}

impl Display for StackKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            StackKind::Data => write!(f, "Data"),
            StackKind::Return => write!(f, "Return"),
        }
    }
}

/// A growable stack of integer cells.
#[derive(Clone, Debug)]
pub struct Stack {
    kind: StackKind,
    items: Vec<i64>,
    max_depth: usize,
}

impl Stack {
    /// Create a new empty stack.
    pub fn new(kind: StackKind) -> Stack {
        Stack {
            kind,
            items: Vec::with_capacity(20),
            max_depth: 0,
        }
    }

    pub fn kind(&self) -> StackKind {
        self.kind
    }

    pub fn push(&mut self, value: i64) {
        self.items.push(value);

        if self.items.len() > self.max_depth {
            self.max_depth = self.items.len();
        }
    }

    /// Take the top value off of the stack, None if the stack is empty.
    pub fn pop(&mut self) -> Option<i64> {
        self.items.pop()
    }

    /// Read a value counting down from the top, 0 being the top of the stack.
    pub fn peek(&self, depth: usize) -> Option<i64> {
        if depth >= self.items.len() {
            return None;
        }

        Some(self.items[self.items.len() - 1 - depth])
    }

    pub fn depth(&self) -> usize {
        self.items.len()
    }

    /// The deepest the stack has been so far.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The stack contents, bottom first.
    pub fn items(&self) -> &[i64] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl Display for Stack {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", self.items)
    }
}
