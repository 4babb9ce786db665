/// The word dictionary, split between normal and immediate words.
pub mod dictionary;

/// The integer stacks used for data and for loop bookkeeping.
pub mod stack;

/// The flat integer memory and its allocation cursor.
pub mod memory;
