//! The matcher façade: owns the trie root and runs the seven-phase
//! descent that decides whether any inserted rule matches a URL.

use std::io::BufRead;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::node::{Node, NodeKey};
use crate::rule::{classify, AnchorKind, ParsedRule};
use crate::token::{tokenize, Token};

/// Owns the trie root and exposes the public matching surface.
/// Cheaply `Clone`-able: cloning shares the same underlying nodes, so
/// a `Matcher` can be handed to many threads.
#[derive(Clone, Default)]
pub struct Matcher {
    root: Arc<Node>,
}

/// A read-only view over an already-built `Matcher`. `matches` is
/// identical to `Matcher::matches` — the distinction exists only to
/// document the build-once/match-many usage pattern; no locking is
/// skipped today, since the per-node `RwLock` is already nearly free
/// on an uncontended read path, but the type gives callers a place to
/// hang that optimization later without changing their call sites.
#[derive(Clone)]
pub struct FrozenMatcher {
    root: Arc<Node>,
}

/// Constructs an empty matcher.
pub fn new_matcher() -> Matcher {
    Matcher::new()
}

impl Matcher {
    pub fn new() -> Self {
        Matcher {
            root: Arc::new(Node::new()),
        }
    }

    /// Parses and inserts one rule. Infallible from the caller's
    /// perspective: unparseable or unsupported rules are silently
    /// dropped.
    pub fn add_rule(&self, rule: &str) {
        let ParsedRule::Parsed {
            anchor,
            tokens,
            modifiers,
        } = classify(rule)
        else {
            return;
        };

        let mut node = match anchor {
            AnchorKind::AddressRoot => self.root.child_or_create(NodeKey::AddressRoot),
            AnchorKind::HostnameRoot => self.root.child_or_create(NodeKey::HostnameRoot),
            AnchorKind::Domain => self.root.child_or_create(NodeKey::Domain),
            AnchorKind::None => self.root.clone(),
        };

        for token in &tokens {
            let key = match token {
                // Only `^` becomes a `Separator` node; every other separator-alphabet
                // character (`.`, `/`, `-`, ...) is just another literal
                // one-character token.
                Token::Separator('^') => NodeKey::Separator,
                Token::Exact(s) if s == "*" => NodeKey::Wildcard,
                Token::Separator(c) => NodeKey::Exact(c.to_string()),
                Token::Exact(s) => NodeKey::Exact(s.clone()),
            };
            node = node.child_or_create(key);
        }

        node.mark_rule(modifiers);
    }

    /// Reads rules from `reader` until exhaustion, one per line. A
    /// line that fails to read (e.g. invalid UTF-8) is logged and
    /// skipped; reading continues.
    pub fn add_rules_from<R: BufRead>(&self, reader: R) {
        for line in reader.lines() {
            match line {
                Ok(rule) => self.add_rule(&rule),
                Err(e) => warn!("skipping unreadable rule line: {e}"),
            }
        }
    }

    /// Decides whether any inserted rule matches `url`, running the
    /// match phases in order and returning `true` on the first hit.
    pub fn matches(&self, url: &str) -> bool {
        matches_against(&self.root, url)
    }

    /// Freezes the matcher into a read-only view. The returned value
    /// shares nodes with `self`; this matcher remains usable
    /// afterwards (rules added later are visible to both).
    pub fn freeze(&self) -> FrozenMatcher {
        FrozenMatcher {
            root: self.root.clone(),
        }
    }
}

impl FrozenMatcher {
    pub fn matches(&self, url: &str) -> bool {
        matches_against(&self.root, url)
    }
}

fn matches_against(root: &Arc<Node>, url: &str) -> bool {
    let tokens = tokenize(url);

    // Phase 1: address-root, full consumption required.
    if let Some(addr_root) = root.child(&NodeKey::AddressRoot) {
        if let Some((_, rest)) = addr_root.match_tokens(&tokens) {
            if rest.is_empty() {
                debug!(phase = "address-root", url, "matched");
                return true;
            }
        }
    }

    // Phase 2: free-anchor attempt on the full token stream.
    if root.match_tokens(&tokens).is_some() {
        debug!(phase = "free-anchor-full", url, "matched");
        return true;
    }

    let mut rest: &[Token] = &tokens;

    // Phase 3: drop the scheme literal and retry.
    if !rest.is_empty() {
        rest = &rest[1..];
        if root.match_tokens(rest).is_some() {
            debug!(phase = "free-anchor-no-scheme", url, "matched");
            return true;
        }
    }

    // Phase 4: drop the `://` separator and retry.
    if !rest.is_empty() {
        rest = &rest[1..];
        if root.match_tokens(rest).is_some() {
            debug!(phase = "free-anchor-no-scheme-sep", url, "matched");
            return true;
        }
    }

    // Phase 5: hostname-root, label-boundary suffix matching.
    if let Some(host_root) = root.child(&NodeKey::HostnameRoot) {
        if hostname_phase(&host_root, rest) {
            debug!(phase = "hostname-root", url, "matched");
            return true;
        }
    }

    // Phase 6: domain-segment and free-anchor attempts beneath the
    // hostname, advancing one token per position up to the first `/`.
    if domain_and_free_phase(root, rest) {
        debug!(phase = "domain-segment", url, "matched");
        return true;
    }

    // Phase 7: path phase. Probing a single empty-keyed child slot (as a
    // literal reading of the original source's "findChild(ExactMatch, _)"
    // would do) never fires, since insertion never populates that slot,
    // which would leave rules like `/banner/*/img^` (free-anchor literals
    // positioned inside the path/query) permanently unmatchable. Instead
    // this scans free-anchor attempts forward across the remaining
    // path/query positions, picking up where phase 6 (hostname-only)
    // stops.
    if path_phase(root, rest) {
        debug!(phase = "path-probe", url, "matched");
        return true;
    }

    false
}

/// Position of the first `/` token, or the whole length if there is
/// none — the boundary between "hostname" and "path/query" in the
/// remaining token stream.
fn path_boundary(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .position(|t| matches!(t, Token::Separator('/')))
        .unwrap_or(tokens.len())
}

/// Phase 5 driver: repeatedly attempts to match successive suffixes of
/// the hostname, each starting at a label boundary.
fn hostname_phase(host_root: &Arc<Node>, tokens: &[Token]) -> bool {
    let boundary = path_boundary(tokens);
    let mut label_start = 0usize;
    loop {
        if hostname_accept(host_root, &tokens[label_start..]) {
            return true;
        }
        match tokens[label_start..boundary]
            .iter()
            .position(|t| matches!(t, Token::Separator('.')))
        {
            Some(offset) => label_start += offset + 1,
            None => return false,
        }
    }
}

/// The recursive phase 5 helper: runs `match_tokens` from `node`;
/// accepts at end-of-input or at a `/` boundary, and otherwise follows
/// a literal `.` child forward across the next label.
fn hostname_accept(node: &Arc<Node>, tokens: &[Token]) -> bool {
    match node.match_tokens(tokens) {
        Some((_, rest)) => {
            if rest.is_empty() {
                return true;
            }
            if matches!(rest[0], Token::Separator('/')) {
                return true;
            }
            if matches!(rest[0], Token::Separator('.')) {
                if let Some(dot_child) = node.child(&NodeKey::Exact(".".to_string())) {
                    return hostname_accept(&dot_child, &rest[1..]);
                }
            }
            false
        }
        None => false,
    }
}

/// Phase 6: walks forward over the tokens up to (not including) the
/// first `/`, trying a `Domain`-rooted match and a plain free-anchor
/// match at every position whose token isn't `.`.
fn domain_and_free_phase(root: &Arc<Node>, tokens: &[Token]) -> bool {
    let boundary = path_boundary(tokens);
    let domain_root = root.child(&NodeKey::Domain);

    for i in 0..boundary {
        if !matches!(tokens[i], Token::Separator('.')) {
            if let Some(ref droot) = domain_root {
                if droot.match_tokens(&tokens[i..]).is_some() {
                    return true;
                }
            }
        }
        if root.match_tokens(&tokens[i..]).is_some() {
            return true;
        }
    }
    false
}

/// Phase 7 (see the comment at its call site): scans every position from
/// the path boundary onward, trying a free-anchor match at each.
fn path_phase(root: &Arc<Node>, tokens: &[Token]) -> bool {
    let boundary = path_boundary(tokens);
    for i in boundary..=tokens.len() {
        if root.match_tokens(&tokens[i..]).is_some() {
            return true;
        }
    }
    false
}
