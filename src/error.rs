//! Ambient error type for the crate's I/O boundary.
//!
//! The matcher's own surface (`add_rule`, `add_rules_from`, `matches`)
//! is infallible by design: malformed rules are silently dropped,
//! never surfaced as an `Error`. This type exists for everything
//! around that surface — opening a rule file, CLI argument handling.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_formats_message() {
        let e = Error::config("missing rule file");
        assert_eq!(e.to_string(), "configuration error: missing rule file");
    }
}
