//! Splits rule patterns and URLs into atomic tokens.

use std::fmt;

/// The fixed separator alphabet recognized as single-character tokens.
pub const SEPARATORS: [char; 9] = ['.', '-', '_', '/', '?', '=', '&', ':', '^'];

/// One atomic token in a tokenized rule or URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// One of the fixed separator-alphabet characters.
    Separator(char),
    /// An opaque run between separators, or one of the recognized
    /// multi-character prefixes (`https`, `http`, `://`).
    Exact(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Separator(c) => write!(f, "{c}"),
            Token::Exact(s) => write!(f, "{s}"),
        }
    }
}

impl Token {
    /// The single character this token represents, if it is exactly
    /// one character wide (a `Separator`, or a one-character opaque
    /// run such as a stray `%`).
    pub fn single_char(&self) -> Option<char> {
        match self {
            Token::Separator(c) => Some(*c),
            Token::Exact(s) => {
                let mut chars = s.chars();
                let c = chars.next()?;
                chars.next().is_none().then_some(c)
            }
        }
    }

    /// The literal text this token was produced from.
    pub fn text(&self) -> String {
        match self {
            Token::Separator(c) => c.to_string(),
            Token::Exact(s) => s.clone(),
        }
    }
}

/// A character is separator-class if it is not an ASCII letter or
/// digit. The glossary additionally names `_ - . %`, all of which
/// already satisfy that condition; the clause is preserved here for
/// fidelity to the source wording but adds no extra cases.
pub fn is_separator_class(c: char) -> bool {
    !c.is_ascii_alphanumeric()
}

/// Splits `s` into an ordered sequence of tokens: each recognized
/// separator character or scheme literal becomes its own token, and
/// every maximal run of characters between two recognized tokens
/// becomes one opaque `Exact` token. No token is ever empty. Pure and
/// deterministic.
pub fn tokenize(s: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = s;
    let mut run = String::new();

    if rest.starts_with("https") {
        flush(&mut run, &mut tokens);
        tokens.push(Token::Exact("https".to_string()));
        rest = &rest[5..];
    } else if rest.starts_with("http") {
        flush(&mut run, &mut tokens);
        tokens.push(Token::Exact("http".to_string()));
        rest = &rest[4..];
    }

    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if rest[i..].starts_with("://") {
            flush(&mut run, &mut tokens);
            tokens.push(Token::Exact("://".to_string()));
            chars.next();
            chars.next();
            continue;
        }
        if SEPARATORS.contains(&c) {
            flush(&mut run, &mut tokens);
            tokens.push(Token::Separator(c));
        } else {
            run.push(c);
        }
    }
    flush(&mut run, &mut tokens);

    tokens
}

fn flush(run: &mut String, tokens: &mut Vec<Token>) {
    if !run.is_empty() {
        tokens.push(Token::Exact(std::mem::take(run)));
    }
}
