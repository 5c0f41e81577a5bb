//! Classifies a raw rule line into an anchor kind, token sequence, and
//! parsed modifiers.

use crate::modifiers::ModifierSet;
use crate::token::{tokenize, Token};

/// Which root sub-trie a rule's tokens get inserted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    AddressRoot,
    HostnameRoot,
    Domain,
    /// "Address-parts" rules: inserted directly under the trie root,
    /// starting with whatever the first token happens to be.
    None,
}

/// The outcome of classifying one rule line.
#[derive(Debug, Clone)]
pub enum ParsedRule {
    /// Comment, cosmetic rule, exception rule, or otherwise a no-op.
    Ignored,
    Parsed {
        anchor: AnchorKind,
        tokens: Vec<Token>,
        modifiers: Option<ModifierSet>,
    },
}

const COSMETIC_MARKERS: [&str; 4] = ["##", "#?#", "#$#", "#@#"];
const RESERVED_HOSTS: [&str; 5] = [
    "0.0.0.0",
    "broadcasthost",
    "local",
    "localhost",
    "localhost.localdomain",
];

/// Classifies a single rule line, applying the five shapes in order;
/// the first one that fits wins.
pub fn classify(line: &str) -> ParsedRule {
    let line = line.trim();
    if line.is_empty() {
        return ParsedRule::Ignored;
    }
    if line.starts_with('!') || line.starts_with('#') || line.starts_with('[') || line.starts_with("@@") {
        return ParsedRule::Ignored;
    }
    if COSMETIC_MARKERS.iter().any(|m| line.contains(m)) {
        return ParsedRule::Ignored;
    }

    if let Some(parsed) = parse_hosts_line(line) {
        return parsed;
    }
    if let Some(parsed) = parse_domain_anchored(line) {
        return parsed;
    }
    if let Some(parsed) = parse_address_anchored(line) {
        return parsed;
    }
    parse_address_parts(line)
}

fn is_reserved_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    RESERVED_HOSTS.contains(&host.as_str()) || host.starts_with("ip6-")
}

/// Shape 2: `0.0.0.0 H` or `127.0.0.1 H`.
fn parse_hosts_line(line: &str) -> Option<ParsedRule> {
    for prefix in ["0.0.0.0 ", "127.0.0.1 "] {
        if let Some(rest) = line.strip_prefix(prefix) {
            let host = rest.trim();
            if host.is_empty() || is_reserved_host(host) {
                return Some(ParsedRule::Ignored);
            }
            let tokens = tokenize(host);
            if tokens.is_empty() {
                return Some(ParsedRule::Ignored);
            }
            return Some(ParsedRule::Parsed {
                anchor: AnchorKind::HostnameRoot,
                tokens,
                modifiers: None,
            });
        }
    }
    None
}

/// Shape 3: `||H^` optionally followed by `$modifiers`.
fn parse_domain_anchored(line: &str) -> Option<ParsedRule> {
    let rest = line.strip_prefix("||")?;
    let caret = rest.find('^')?;
    let host = &rest[..caret];
    let tail = &rest[caret + 1..];
    let modifiers = match parse_trailing_modifiers(tail) {
        Ok(m) => m,
        Err(()) => return Some(ParsedRule::Ignored),
    };
    let tokens = tokenize(host);
    if tokens.is_empty() {
        return Some(ParsedRule::Ignored);
    }
    Some(ParsedRule::Parsed {
        anchor: AnchorKind::Domain,
        tokens,
        modifiers,
    })
}

/// Shape 4: `|URL` optionally followed by `$modifiers`. A trailing `|`
/// on the URL body (end-of-address anchor) is stripped before
/// tokenizing so it doesn't become a stray literal character in the
/// pattern.
fn parse_address_anchored(line: &str) -> Option<ParsedRule> {
    let rest = line.strip_prefix('|')?;
    let (body, mods_tail) = split_trailing_dollar(rest);
    let body = body.strip_suffix('|').unwrap_or(body);
    let modifiers = match mods_tail {
        Some(tail) => match parse_trailing_modifiers(tail) {
            Ok(m) => m,
            Err(()) => return Some(ParsedRule::Ignored),
        },
        None => None,
    };
    let tokens = tokenize(body);
    if tokens.is_empty() {
        return Some(ParsedRule::Ignored);
    }
    Some(ParsedRule::Parsed {
        anchor: AnchorKind::AddressRoot,
        tokens,
        modifiers,
    })
}

/// Shape 5: everything else, inserted at the plain root.
fn parse_address_parts(line: &str) -> ParsedRule {
    let (body, mods_tail) = split_trailing_dollar(line);
    let modifiers = match mods_tail {
        Some(tail) => match parse_trailing_modifiers(tail) {
            Ok(m) => m,
            Err(()) => return ParsedRule::Ignored,
        },
        None => None,
    };
    let tokens = tokenize(body);
    if tokens.is_empty() {
        return ParsedRule::Ignored;
    }
    ParsedRule::Parsed {
        anchor: AnchorKind::None,
        tokens,
        modifiers,
    }
}

fn split_trailing_dollar(s: &str) -> (&str, Option<&str>) {
    match s.rfind('$') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    }
}

fn parse_trailing_modifiers(tail: &str) -> Result<Option<ModifierSet>, ()> {
    if tail.is_empty() {
        return Ok(None);
    }
    ModifierSet::parse(tail).map(Some)
}
