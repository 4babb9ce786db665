use crate::lang::source_buffer::SourceBuffer;

/// Every control character, including space, separates words.
pub fn is_whitespace(next: char) -> bool {
    (next as u32) <= 32
}

/// Skip over whitespace in the text.  Stopping only at either the end of the buffer or the next
/// non-whitespace character.
fn skip_whitespace(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if !is_whitespace(next) {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Pull the next word out of the buffer.  Leading whitespace is discarded, then characters are
/// gathered up to the next whitespace character, which is consumed as well.  Words are folded to
/// lower case.
///
/// Returns None once only whitespace, or nothing, remains.
pub fn next_word(buffer: &mut SourceBuffer) -> Option<String> {
    skip_whitespace(buffer);

    let mut text = String::new();

    while let Some(next) = buffer.next_char() {
        if is_whitespace(next) {
            break;
        }

        text.push(next);
    }

    if text.is_empty() {
        None
    } else {
        Some(text.to_lowercase())
    }
}

/// Try to read the word as a base 10 signed integer literal.
pub fn parse_number(word: &str) -> Option<i64> {
    word.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_words(source: &str) -> Vec<String> {
        let mut buffer = SourceBuffer::new("<test>", source);
        let mut words = Vec::new();

        while let Some(word) = next_word(&mut buffer) {
            words.push(word);
        }

        words
    }

    #[test]
    fn splits_on_any_control_character() {
        assert_eq!(
            all_words("  3\t8\r\n+\x0b.\x00"),
            vec!["3", "8", "+", "."]
        );
    }

    #[test]
    fn folds_words_to_lower_case() {
        assert_eq!(all_words("DUP Swap ."), vec!["dup", "swap", "."]);
    }

    #[test]
    fn blank_input_has_no_words() {
        assert!(all_words("").is_empty());
        assert!(all_words(" \n\t ").is_empty());
    }

    #[test]
    fn consumes_the_delimiter_after_a_word() {
        let mut buffer = SourceBuffer::new("<test>", ".\" hi\"");

        assert_eq!(next_word(&mut buffer), Some(".\"".to_string()));
        assert_eq!(buffer.next_char(), Some('h'));
    }

    #[test]
    fn parses_signed_decimal_numbers() {
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number("-7"), Some(-7));
        assert_eq!(parse_number("+7"), Some(7));
        assert_eq!(parse_number("0x10"), None);
        assert_eq!(parse_number("1+"), None);
        assert_eq!(parse_number("99999999999999999999"), None);
    }
}
