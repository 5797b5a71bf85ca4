//! Prefix matching over a loaded lexicon. Recursive descent with a two-way
//! prefix test: a subtree is entered when its key is a prefix of the query
//! or the query is a prefix of its key; everything else is pruned.

use crate::normalize::fold;
use crate::trie::{Branch, Entry, Lexicon, Node};

/// Queries shorter than this return nothing without touching the tree.
pub const MIN_QUERY_CHARS: usize = 2;

/// All entries consistent with `query` under the two-way prefix rule, in
/// pre-order, child order preserved. Total over any valid tree and query.
pub fn lookup<'a>(lexicon: &'a Lexicon, query: &str) -> Vec<&'a Entry> {
    let query = fold(query);
    let query_chars = query.chars().count();
    if query_chars < MIN_QUERY_CHARS {
        return Vec::new();
    }
    let mut matches = Vec::new();
    descend(lexicon.root(), &query, query_chars, &mut matches);
    matches
}

fn descend<'a>(branch: &'a Branch, query: &str, query_chars: usize, matches: &mut Vec<&'a Entry>) {
    for child in &branch.children {
        match child {
            Node::Word(entry) => {
                // A word is reported only when its own full key is at least
                // as long as the query; shorter words are still traversed
                // past structurally.
                if entry.key.chars().count() >= query_chars {
                    matches.push(entry);
                }
            }
            Node::Branch(sub) => {
                let key_chars = sub.key.chars().count();
                if query_chars < key_chars {
                    if sub.key.starts_with(query) {
                        descend(sub, query, query_chars, matches);
                    }
                } else if query.starts_with(sub.key.as_str()) {
                    descend(sub, query, query_chars, matches);
                }
            }
        }
    }
}
