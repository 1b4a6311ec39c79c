//! Splitting a raw log line into field tokens.

use crate::schema::{BracketPair, Separator};
use regex::Regex;
use thiserror::Error;

/// Why a line could not be tokenized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// All fields were found in brackets but text remains after the last one
    #[error("unexpected text after the last field: '{0}'")]
    TrailingText(String),
}

/// Splits lines according to a separator.
///
/// The bracket regex is compiled once per tokenizer, so one tokenizer should be
/// reused for every line decoded with the same schema.
#[derive(Debug, Clone)]
pub enum Tokenizer {
    Brackets(Regex),
    Literal(String),
}

impl Tokenizer {
    pub fn new(separator: &Separator) -> Self {
        match separator {
            Separator::Brackets(pair) => Tokenizer::Brackets(bracket_pattern(*pair)),
            Separator::Literal(raw) => Tokenizer::Literal(raw.clone()),
        }
    }

    /// Tokenize one line for a schema expecting `field_count` fields.
    ///
    /// Bracket mode extracts every `open ... close` group (non-greedy, trimmed).
    /// While fewer groups than `field_count` were found, the trimmed text after
    /// the last complete group becomes one final token. Literal mode splits on
    /// the separator without trimming or limit. The caller checks the count.
    pub fn tokenize(&self, line: &str, field_count: usize) -> Result<Vec<String>, TokenizeError> {
        match self {
            Tokenizer::Literal(separator) => {
                Ok(line.split(separator.as_str()).map(str::to_string).collect())
            }
            Tokenizer::Brackets(pattern) => {
                let mut tokens = Vec::new();
                let mut consumed = 0;
                for captures in pattern.captures_iter(line) {
                    if let Some(group) = captures.get(0) {
                        consumed = group.end();
                    }
                    if let Some(interior) = captures.get(1) {
                        tokens.push(interior.as_str().trim().to_string());
                    }
                }

                // Text after the last complete group; stray closing brackets stay in it
                let remainder = line[consumed..].trim();

                if tokens.len() < field_count {
                    tokens.push(remainder.to_string());
                } else if !remainder.is_empty() {
                    return Err(TokenizeError::TrailingText(remainder.to_string()));
                }

                Ok(tokens)
            }
        }
    }
}

fn bracket_pattern(pair: BracketPair) -> Regex {
    let pattern = format!(
        "{}(.*?){}",
        regex::escape(&pair.open().to_string()),
        regex::escape(&pair.close().to_string())
    );
    Regex::new(&pattern).expect("escaped bracket pattern is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brackets(pair: BracketPair) -> Tokenizer {
        Tokenizer::new(&Separator::Brackets(pair))
    }

    #[test]
    fn test_literal_split_keeps_everything() {
        let tokenizer = Tokenizer::new(&Separator::Literal("|".to_string()));
        assert_eq!(
            tokenizer.tokenize("ERROR|2024-01-01 10:00:00|disk full", 3).unwrap(),
            vec!["ERROR", "2024-01-01 10:00:00", "disk full"]
        );
        assert_eq!(
            tokenizer.tokenize("a | b|c|d", 3).unwrap(),
            vec!["a ", " b", "c", "d"]
        );
    }

    #[test]
    fn test_literal_split_multichar_separator() {
        let tokenizer = Tokenizer::new(&Separator::Literal(" | ".to_string()));
        assert_eq!(
            tokenizer.tokenize("INFO | 01.01.2024 10:00 | ok|fine", 3).unwrap(),
            vec!["INFO", "01.01.2024 10:00", "ok|fine"]
        );
    }

    #[test]
    fn test_brackets_with_trailing_message() {
        let tokens = brackets(BracketPair::Square)
            .tokenize("[ERROR] [2024-01-01 10:00:00] disk full", 3)
            .unwrap();
        assert_eq!(tokens, vec!["ERROR", "2024-01-01 10:00:00", "disk full"]);
    }

    #[test]
    fn test_brackets_trim_interiors() {
        let tokens = brackets(BracketPair::Curly)
            .tokenize("{ 2024-01-01 10:00:00 }{ WARN }   low memory  ", 3)
            .unwrap();
        assert_eq!(tokens, vec!["2024-01-01 10:00:00", "WARN", "low memory"]);
    }

    #[test]
    fn test_brackets_all_fields_bracketed() {
        let tokens = brackets(BracketPair::Round)
            .tokenize("(INFO) (2024-01-01 10:00:00) (started)", 3)
            .unwrap();
        assert_eq!(tokens, vec!["INFO", "2024-01-01 10:00:00", "started"]);
    }

    #[test]
    fn test_brackets_reject_text_after_full_set() {
        let result = brackets(BracketPair::Square).tokenize("[a] [b] [c] extra", 3);
        assert_eq!(result, Err(TokenizeError::TrailingText("extra".to_string())));
    }

    #[test]
    fn test_brackets_short_line_yields_short_token_list() {
        let tokens = brackets(BracketPair::Square)
            .tokenize("[ERROR] disk full", 3)
            .unwrap();
        assert_eq!(tokens, vec!["ERROR", "disk full"]);

        let tokens = brackets(BracketPair::Square).tokenize("no brackets", 3).unwrap();
        assert_eq!(tokens, vec!["no brackets"]);
    }

    #[test]
    fn test_brackets_empty_remainder() {
        let tokens = brackets(BracketPair::Square)
            .tokenize("[ERROR] [2024-01-01 10:00:00]", 3)
            .unwrap();
        assert_eq!(tokens, vec!["ERROR", "2024-01-01 10:00:00", ""]);
    }

    #[test]
    fn test_stray_closing_bracket_stays_in_message() {
        let tokens = brackets(BracketPair::Square)
            .tokenize("[ERROR] [2024-01-01 10:00:00] disk ] full", 3)
            .unwrap();
        assert_eq!(tokens, vec!["ERROR", "2024-01-01 10:00:00", "disk ] full"]);
    }
}
