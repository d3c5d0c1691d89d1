//! Natural sort key for filenames.
//!
//! Splits a name into alternating text and number tokens so that embedded
//! numeric runs compare by value rather than character by character:
//! `item2.pdf` sorts before `item10.pdf`. Text tokens are lower-cased, so the
//! ordering is case-insensitive.

use std::cmp::Ordering;

/// One segment of a natural sort key.
///
/// `Number` is declared before `Text` so the derived ordering is total even
/// when keys of different shapes are compared.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Token {
    Number(u128),
    Text(String),
}

/// Comparable key derived from a filename.
///
/// Tokens strictly alternate, starting with a (possibly empty) text token.
/// This keeps token kinds aligned position-by-position between any two keys,
/// so element-wise comparison never pits a number against text except when
/// one key is a strict prefix of the other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey {
    tokens: Vec<Token>,
}

impl NaturalKey {
    /// Build the key for a name.
    pub fn new(name: &str) -> Self {
        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut digits = String::new();

        for ch in name.chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
            } else {
                if !digits.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut text)));
                    tokens.push(parse_digits(std::mem::take(&mut digits)));
                }
                text.extend(ch.to_lowercase());
            }
        }

        if !digits.is_empty() {
            tokens.push(Token::Text(std::mem::take(&mut text)));
            tokens.push(parse_digits(digits));
            tokens.push(Token::Text(String::new()));
        } else {
            tokens.push(Token::Text(text));
        }

        Self { tokens }
    }
}

/// Digit runs that overflow the integer type compare as text.
fn parse_digits(run: String) -> Token {
    match run.parse::<u128>() {
        Ok(value) => Token::Number(value),
        Err(_) => Token::Text(run),
    }
}

/// Compare two names by their natural sort keys.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    NaturalKey::new(a).cmp(&NaturalKey::new(b))
}
