//! Prefix completion over literal words and command names

use crate::args::LiteralArg;

/// Source of completions for a partially typed word
pub trait AutoComplete {
    /// Every candidate that starts with `prefix`, ignoring case
    fn completions(&self, prefix: &str) -> Vec<String>;

    /// First candidate that starts with `prefix`, ignoring case
    fn complete(&self, prefix: &str) -> Option<String> {
        self.completions(prefix).into_iter().next()
    }
}

/// Candidates from `names` that start with `prefix`, ignoring case, in order
pub fn static_prefix_match<'a>(
    names: impl IntoIterator<Item = &'a str>,
    prefix: &str,
) -> Vec<String> {
    let prefix = prefix.to_lowercase();
    names
        .into_iter()
        .filter(|name| name.to_lowercase().starts_with(&prefix))
        .map(str::to_owned)
        .collect()
}

impl AutoComplete for LiteralArg {
    fn completions(&self, prefix: &str) -> Vec<String> {
        let names = std::iter::once(crate::Argument::name(self))
            .chain(self.aliases().iter().map(String::as_str));
        static_prefix_match(names, prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_prefix_match_ignores_case() {
        let names = ["Help", "hello", "exit"];
        assert_eq!(static_prefix_match(names, "he"), vec!["Help", "hello"]);
        assert_eq!(static_prefix_match(names, "HEL"), vec!["Help", "hello"]);
        assert!(static_prefix_match(names, "x").is_empty());
        assert_eq!(static_prefix_match(names, "").len(), 3);
    }

    #[test]
    fn test_literal_completes_name_then_aliases() {
        let literal = LiteralArg::new("volume", &["vol", "v"]);
        assert_eq!(literal.completions("vo"), vec!["volume", "vol"]);
        assert_eq!(literal.complete("V").as_deref(), Some("volume"));
        assert_eq!(literal.complete("m"), None);
    }
}
