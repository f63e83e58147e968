use std::{
    collections::{HashMap, VecDeque},
    num::NonZeroUsize,
    sync::Arc,
};

use crate::interpreter::token::Token;

/// Postfix sequences keyed by the literal text they were built from.
///
/// Keys are never normalized: `1+2` and `1 + 2` are separate entries. When a
/// capacity is set, inserting past it evicts the entry inserted longest ago.
#[derive(Debug, Clone, Default)]
pub struct PostfixCache {
    entries:  HashMap<String, Arc<[Token]>>,
    order:    VecDeque<String>,
    capacity: Option<NonZeroUsize>,
}

impl PostfixCache {
    /// Creates an empty cache with an optional capacity.
    #[must_use]
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        Self { entries: HashMap::new(),
               order: VecDeque::new(),
               capacity }
    }

    /// Returns the cached sequence for `expression`.
    #[must_use]
    pub fn get(&self, expression: &str) -> Option<Arc<[Token]>> {
        self.entries.get(expression).cloned()
    }

    /// Stores the sequence for `expression`, evicting the oldest entries if
    /// the cache is full.
    pub fn insert(&mut self, expression: &str, postfix: Arc<[Token]>) {
        if self.entries.insert(expression.to_string(), postfix).is_some() {
            return;
        }
        self.order.push_back(expression.to_string());

        if let Some(capacity) = self.capacity {
            while self.order.len() > capacity.get() {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
        }
    }

    /// Returns `true` if `expression` has a cached sequence.
    #[must_use]
    pub fn contains(&self, expression: &str) -> bool {
        self.entries.contains_key(expression)
    }

    /// Number of cached sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every cached sequence.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
