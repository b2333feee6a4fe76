// crates/regiondb-core/src/index/trie.rs
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Handle of a node inside a [`Trie`] arena.
pub type NodeId = u32;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieNode {
    pub children: BTreeMap<char, NodeId>,
    /// Every code whose key passes through (or ends at) this node.
    pub codes: BTreeSet<String>,
    pub terminal: bool,
}

/// Prefix tree stored as a flat arena.
///
/// Node 0 is the root and never carries codes; each inserted key adds its
/// code to every node on its path, and the last node is flagged terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.nodes.get(id as usize)
    }

    pub fn insert(&mut self, key: &str, code: &str) {
        if key.is_empty() {
            return;
        }
        let mut current = ROOT;
        for c in key.chars() {
            let next = match self.nodes[current as usize].children.get(&c) {
                Some(&id) => id,
                None => {
                    let id = self.nodes.len() as NodeId;
                    self.nodes.push(TrieNode::default());
                    self.nodes[current as usize].children.insert(c, id);
                    id
                }
            };
            self.nodes[next as usize].codes.insert(code.to_string());
            current = next;
        }
        self.nodes[current as usize].terminal = true;
    }

    /// Follows `prefix` character by character.
    pub fn descend(&self, prefix: &str) -> Option<NodeId> {
        let mut current = ROOT;
        for c in prefix.chars() {
            current = *self.nodes[current as usize].children.get(&c)?;
        }
        Some(current)
    }

    /// Codes of every key starting with `prefix`.
    ///
    /// Walks the subtree with an explicit stack, unioning each node's set.
    pub fn collect_prefix(&self, prefix: &str) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let Some(start) = self.descend(prefix) else {
            return out;
        };
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            out.extend(node.codes.iter().cloned());
            stack.extend(node.children.values().copied());
        }
        out
    }

    /// `true` if `key` was inserted as a whole key.
    pub fn contains_key(&self, key: &str) -> bool {
        !key.is_empty()
            && self
                .descend(key)
                .and_then(|id| self.node(id))
                .is_some_and(|n| n.terminal)
    }
}
