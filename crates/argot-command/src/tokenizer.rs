//! Quote-aware splitting of a raw command line into argument tokens.
//!
//! The escaping rules are part of the input contract:
//!
//! - the line is trimmed, then split on every space that sits outside a
//!   matched pair of double quotes
//! - each token loses one surrounding pair of double quotes
//! - inside a token, `''` becomes a literal `"`
//!
//! Consecutive spaces produce empty tokens; they are kept.

use crate::error::{CommandError, Result};

/// Parse a line into argument tokens
///
/// ```
/// use argot_command::parse_arguments;
///
/// let args = parse_arguments(r#"say "hello world" 5''"#).unwrap();
/// assert_eq!(args, vec!["say", "hello world", "5\""]);
/// ```
///
/// # Errors
///
/// Returns [`CommandError::InvalidInput`] if the line is empty or blank.
pub fn parse_arguments(input: &str) -> Result<Vec<String>> {
    if input.trim().is_empty() {
        let reason = if input.is_empty() {
            "Input can not be empty!"
        } else {
            "Input can not be blank!"
        };
        return Err(CommandError::invalid_input(reason));
    }

    Ok(split_outside_quotes(input.trim())
        .into_iter()
        .map(unescape)
        .collect())
}

/// Split on spaces followed by an even number of quotes up to the end of the line.
fn split_outside_quotes(line: &str) -> Vec<&str> {
    let mut quotes_after = line.matches('"').count();
    let mut tokens = Vec::new();
    let mut start = 0;

    for (index, c) in line.char_indices() {
        match c {
            '"' => quotes_after -= 1,
            ' ' if quotes_after % 2 == 0 => {
                tokens.push(&line[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }

    tokens.push(&line[start..]);
    tokens
}

fn unescape(token: &str) -> String {
    token
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(token)
        .replace("''", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    #[test]
    fn test_quoted_token_and_escape() {
        let args = parse_arguments(r#"foo "a b" c''d"#).unwrap();
        assert_eq!(args, vec!["foo", "a b", "c\"d"]);
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let args = parse_arguments("  set volume 5  ").unwrap();
        assert_eq!(args, vec!["set", "volume", "5"]);
    }

    #[test]
    fn test_double_space_yields_empty_token() {
        let args = parse_arguments("a  b").unwrap();
        assert_eq!(args, vec!["a", "", "b"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_matches!(
            parse_arguments(""),
            Err(CommandError::InvalidInput { reason }) if reason == "Input can not be empty!"
        );
        assert_matches!(
            parse_arguments("   "),
            Err(CommandError::InvalidInput { reason }) if reason == "Input can not be blank!"
        );
    }

    #[test]
    fn test_unbalanced_quote_counts_from_the_right() {
        // The lone quote makes the first space look quoted.
        let args = parse_arguments(r#"a "b c"#).unwrap();
        assert_eq!(args, vec![r#"a "b"#, "c"]);
    }

    #[test]
    fn test_only_one_layer_of_quotes_is_stripped() {
        let args = parse_arguments(r#"x """""#).unwrap();
        assert_eq!(args, vec!["x", r#""""#]);

        // A lone quote is too short to have a surrounding pair.
        let args = parse_arguments("\"").unwrap();
        assert_eq!(args, vec!["\""]);
    }

    #[test]
    fn test_escape_inside_quotes() {
        let args = parse_arguments(r#"say "she said ''hi''""#).unwrap();
        assert_eq!(args, vec!["say", "she said \"hi\""]);
    }

    #[test]
    fn test_tabs_do_not_split() {
        let args = parse_arguments("a\tb c").unwrap();
        assert_eq!(args, vec!["a\tb", "c"]);
    }

    proptest! {
        /// Without quote characters the tokenizer is a plain split on single spaces.
        #[test]
        fn unquoted_lines_split_on_spaces(line in "[a-z ]{0,40}") {
            prop_assume!(!line.trim().is_empty());
            let expected: Vec<String> = line.trim().split(' ').map(String::from).collect();
            prop_assert_eq!(parse_arguments(&line).unwrap(), expected);
        }

        /// A quoted run of words always comes back as a single token.
        #[test]
        fn quoted_words_stay_together(words in proptest::collection::vec("[a-z]{1,6}", 1..5)) {
            let phrase = words.join(" ");
            let line = format!("cmd \"{phrase}\"");
            prop_assert_eq!(parse_arguments(&line).unwrap(), vec!["cmd".to_string(), phrase]);
        }
    }
}
