//! urlfilter — a URL filter matcher for Adblock Plus / AdGuard-syntax
//! and `hosts`-syntax rules.
//!
//! Rules are compiled into a shared trie; `Matcher::matches` decides in
//! sub-linear time whether any inserted rule matches a given URL.
//!
//! ```text
//!          add_rule(line)                     matches(url)
//!               |                                  |
//!        +------v------+                    +------v------+
//!        | rule::classify|                  | token::tokenize|
//!        +------+------+                    +------+------+
//!               |                                  |
//!        +------v----------------------------------v------+
//!        |                 node::Node trie                |
//!        |   (AddressRoot / HostnameRoot / Domain / plain) |
//!        +--------------------------------------------------+
//! ```

pub mod error;
pub mod matcher;
pub mod modifiers;
pub mod node;
pub mod rule;
pub mod token;

pub use error::{Error, Result};
pub use matcher::{new_matcher, FrozenMatcher, Matcher};
