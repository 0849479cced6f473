use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::trie::TrieNode;

/// A completed word and its popularity score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub word: String,
    pub score: u32,
}

// Score first, then word, so the heap root is the lowest-scored entry and,
// among equal scores, the lexicographically smallest word.
impl Ord for Completion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for Completion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Collect the k highest-scored words in the subtree under `node`, where
/// `prefix` is the normalized path that led to it.
///
/// Candidates are discovered depth-first in a-z child order and offered to a
/// min-heap capped at k entries. A full heap only admits a candidate whose
/// score strictly beats the current minimum, so among equal scores the
/// first-discovered (alphabetically earliest) word is retained.
///
/// Results are sorted by descending score, ties by ascending word.
pub fn select_top_k(node: &TrieNode, prefix: &str, k: usize) -> Vec<Completion> {
    if k == 0 {
        return Vec::new();
    }

    let mut heap = BinaryHeap::new();
    let mut buf = String::from(prefix);
    collect(node, &mut buf, k, &mut heap);

    let mut out: Vec<Completion> = heap.into_iter().map(|Reverse(c)| c).collect();
    out.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.word.cmp(&b.word)));
    out
}

fn collect(node: &TrieNode, buf: &mut String, k: usize, heap: &mut BinaryHeap<Reverse<Completion>>) {
    if node.is_word() {
        offer(
            heap,
            k,
            Completion {
                word: buf.clone(),
                score: node.score(),
            },
        );
    }

    for (c, child) in node.children() {
        buf.push(c);
        collect(child, buf, k, heap);
        buf.pop();
    }
}

fn offer(heap: &mut BinaryHeap<Reverse<Completion>>, k: usize, cand: Completion) {
    if heap.len() < k {
        heap.push(Reverse(cand));
    } else if let Some(Reverse(min)) = heap.peek() {
        // Strictly greater only. An equal score loses to the entry already
        // in the heap.
        if cand.score > min.score {
            heap.pop();
            heap.push(Reverse(cand));
        }
    }
}
