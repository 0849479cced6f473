use serde_json::{Map, Value};

const ALPHABET_SIZE: usize = 26;

/// Normalize a word the same way the trie walks it: lowercase, alphabetic
/// characters only. Everything else is dropped, not rejected.
pub fn normalize(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Map a character to its child slot, or None if it is skipped during walks.
fn slot(c: char) -> Option<usize> {
    if c.is_ascii_alphabetic() {
        Some((c.to_ascii_lowercase() as u8 - b'a') as usize)
    } else {
        None
    }
}

/// One node per distinct prefix of any stored word. A node with the word flag
/// unset always has a zero score.
pub struct TrieNode {
    children: [Option<Box<TrieNode>>; ALPHABET_SIZE],
    is_word: bool,
    score: u32,
}

impl TrieNode {
    const NO_CHILD: Option<Box<TrieNode>> = None;

    fn new() -> Self {
        Self {
            children: [Self::NO_CHILD; ALPHABET_SIZE],
            is_word: false,
            score: 0,
        }
    }

    pub fn is_word(&self) -> bool {
        self.is_word
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Present children in a-z order.
    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_deref().map(|n| ((b'a' + i as u8) as char, n)))
    }
}

/// In-memory trie over lowercase a-z, storing a popularity score per word.
///
/// All operations case-fold their input and skip non-alphabetic characters,
/// so `insert("Hello!!")` and `contains("hello")` agree. An empty word (after
/// folding) resolves to the root node.
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
        }
    }

    /// Insert a word with the given seed score, creating nodes as needed.
    /// Inserting an existing word is a no-op and does not overwrite its
    /// score. Returns whether a new word was added.
    pub fn insert(&mut self, word: &str, score: u32) -> bool {
        let mut current = &mut self.root;

        for c in word.chars() {
            let Some(i) = slot(c) else { continue };
            current = current.children[i].get_or_insert_with(|| Box::new(TrieNode::new()));
        }

        if current.is_word {
            return false;
        }

        current.is_word = true;
        current.score = score;
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.walk(word).is_some_and(|n| n.is_word)
    }

    /// Bump a word's popularity by one. Fails if the word is not stored.
    pub fn increment_score(&mut self, word: &str) -> bool {
        match self.walk_mut(word) {
            Some(node) if node.is_word => {
                node.score += 1;
                true
            }
            _ => false,
        }
    }

    /// Remove a word by clearing its flag and score. Fails if the word is not
    /// stored. Node structure is retained, so prefixes of other words and the
    /// memory of the removed path stay in place.
    pub fn delete(&mut self, word: &str) -> bool {
        match self.walk_mut(word) {
            Some(node) if node.is_word => {
                node.is_word = false;
                node.score = 0;
                true
            }
            _ => false,
        }
    }

    /// Find the node a prefix leads to, without creating anything.
    pub fn find_prefix_node(&self, prefix: &str) -> Option<&TrieNode> {
        self.walk(prefix)
    }

    fn walk(&self, word: &str) -> Option<&TrieNode> {
        let mut current = &self.root;
        for c in word.chars() {
            let Some(i) = slot(c) else { continue };
            current = current.children[i].as_deref()?;
        }
        Some(current)
    }

    fn walk_mut(&mut self, word: &str) -> Option<&mut TrieNode> {
        let mut current = &mut self.root;
        for c in word.chars() {
            let Some(i) = slot(c) else { continue };
            current = current.children[i].as_deref_mut()?;
        }
        Some(current)
    }

    /// Dump the whole trie as JSON for the debug endpoint:
    /// `{"end": bool, "freq": n, "children": {"a": {...}}}`.
    pub fn to_json(&self) -> Value {
        node_to_json(&self.root)
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

fn node_to_json(node: &TrieNode) -> Value {
    let mut children = Map::new();
    for (c, child) in node.children() {
        children.insert(c.to_string(), node_to_json(child));
    }

    serde_json::json!({
        "end": node.is_word,
        "freq": node.score,
        "children": children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut t = Trie::new();
        assert!(t.insert("cat", 100));
        assert!(t.contains("cat"));
        assert!(!t.contains("ca"));
        assert!(!t.contains("cats"));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut t = Trie::new();
        assert!(t.insert("cat", 100));
        assert!(!t.insert("cat", 1));
        assert_eq!(t.walk("cat").map(|n| n.score), Some(100));
    }

    #[test]
    fn normalizes_case_and_punctuation() {
        let mut t = Trie::new();
        t.insert("Hello!!", 5);
        assert!(t.contains("hello"));
        assert!(t.contains("HELLO"));
        assert!(t.contains("h-e-l-l-o"));
        assert!(t.find_prefix_node("Hel").is_some());
    }

    #[test]
    fn empty_and_non_alphabetic_words_resolve_to_root() {
        let mut t = Trie::new();
        t.insert("cat", 1);
        assert!(t.find_prefix_node("").is_some());
        assert!(!t.contains(""));
        assert!(!t.contains("123"));
    }

    #[test]
    fn increment_score() {
        let mut t = Trie::new();
        t.insert("cat", 100);
        assert!(t.increment_score("cat"));
        assert_eq!(t.walk("cat").map(|n| n.score), Some(101));

        assert!(!t.increment_score("dog"));
        assert!(!t.increment_score("ca"));
    }

    #[test]
    fn delete_clears_word_but_keeps_structure() {
        let mut t = Trie::new();
        t.insert("cart", 100);
        t.insert("car", 100);

        assert!(t.delete("cart"));
        assert!(!t.contains("cart"));
        assert!(t.contains("car"));
        // The path survives for future re-insertion.
        assert!(t.find_prefix_node("cart").is_some());

        assert!(!t.delete("cart"));
        assert!(!t.delete("missing"));

        assert!(t.insert("cart", 7));
        assert_eq!(t.walk("cart").map(|n| n.score), Some(7));
    }

    #[test]
    fn json_dump_shape() {
        let mut t = Trie::new();
        t.insert("ab", 3);

        let v = t.to_json();
        assert_eq!(v["end"], false);
        let b = &v["children"]["a"]["children"]["b"];
        assert_eq!(b["end"], true);
        assert_eq!(b["freq"], 3);
    }
}
