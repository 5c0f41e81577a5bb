//! The trie node and its recursive sub-trie match primitive.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::modifiers::ModifierSet;
use crate::token::{is_separator_class, Token};

/// `(node-kind, token)` key into a node's children map. Only `Exact`
/// carries a token string; every other kind is a singleton per node,
/// so the pair collapses naturally into this enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    AddressRoot,
    HostnameRoot,
    Domain,
    Wildcard,
    Separator,
    Exact(String),
}

/// A node in the shared trie. Children are guarded by a per-node
/// reader/writer lock; `is_rule` publishes via `Release`/`Acquire` so a
/// reader that observes it `true` also observes the `modifiers`
/// written alongside it under the same exclusive section.
#[derive(Debug, Default)]
pub struct Node {
    children: RwLock<HashMap<NodeKey, Arc<Node>>>,
    is_rule: AtomicBool,
    modifiers: RwLock<Option<ModifierSet>>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(&self, key: &NodeKey) -> Option<Arc<Node>> {
        self.children.read().get(key).cloned()
    }

    /// Descends to the child under `key`, creating it if absent.
    /// Idempotent with respect to the key set: concurrent callers
    /// inserting the same key converge on one shared child.
    pub fn child_or_create(&self, key: NodeKey) -> Arc<Node> {
        if let Some(existing) = self.child(&key) {
            return existing;
        }
        self.children
            .write()
            .entry(key)
            .or_insert_with(|| Arc::new(Node::default()))
            .clone()
    }

    pub fn is_terminal(&self) -> bool {
        self.is_rule.load(Ordering::Acquire)
    }

    pub fn modifiers(&self) -> Option<ModifierSet> {
        self.modifiers.read().clone()
    }

    /// Marks this node as the terminus of a complete rule. `is_rule`
    /// flips at most once (false -> true); a rule re-inserted over an
    /// existing one leaves the first-seen `modifiers` untouched.
    pub fn mark_rule(&self, modifiers: Option<ModifierSet>) {
        if self.is_rule.load(Ordering::Acquire) {
            return;
        }
        let mut guard = self.modifiers.write();
        if self.is_rule.load(Ordering::Acquire) {
            return;
        }
        *guard = modifiers;
        drop(guard);
        self.is_rule.store(true, Ordering::Release);
    }

    /// The recursive sub-trie match primitive. Returns the terminal
    /// node reached and the unconsumed token suffix, or `None` if no
    /// rule matches along this path.
    ///
    /// Steps 3 and 4 both report the *pre-descent* token slice as the
    /// remaining suffix rather than the slice the recursive call
    /// actually consumed — this is deliberate and load-bearing for the
    /// hostname phase's dot-resumption logic in `matcher.rs`; it is
    /// replicated exactly rather than "fixed".
    pub fn match_tokens<'a>(self: &Arc<Node>, tokens: &'a [Token]) -> Option<(Arc<Node>, &'a [Token])> {
        // 1. Greedy early acceptance.
        if self.is_terminal() {
            return Some((self.clone(), tokens));
        }

        // 2. End of input: only a terminal `^` child can still accept.
        if tokens.is_empty() {
            return self
                .child(&NodeKey::Separator)
                .filter(|child| child.is_terminal())
                .map(|child| (child, tokens));
        }

        // 3. Separator-class first token.
        if let Some(c) = tokens[0].single_char() {
            if is_separator_class(c) {
                if let Some(sep) = self.child(&NodeKey::Separator) {
                    if let Some((node, _consumed)) = sep.match_tokens(&tokens[1..]) {
                        return Some((node, tokens));
                    }
                }
            }
        }

        // 4. Wildcard: matches exactly one input token.
        if let Some(wildcard) = self.child(&NodeKey::Wildcard) {
            if let Some((node, _consumed)) = wildcard.match_tokens(&tokens[1..]) {
                return Some((node, tokens));
            }
        }

        // 5. Literal token.
        let exact_key = NodeKey::Exact(tokens[0].text());
        if let Some(exact) = self.child(&exact_key) {
            return exact.match_tokens(&tokens[1..]);
        }

        None
    }
}
