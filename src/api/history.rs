//! Recent results, newest first
//!
//! Bounded list of the last scored wallets. Scoring an address again moves
//! it to the front instead of adding a duplicate row.

use std::collections::VecDeque;

use super::types::RecentEntry;
use crate::models::types::WalletAddress;
use crate::utils::constants::RECENT_RESULTS_CAPACITY;

#[derive(Debug, Clone)]
pub struct RecentScores {
    entries: VecDeque<RecentEntry>,
    capacity: usize,
}

impl RecentScores {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: RecentEntry) {
        let key = WalletAddress::normalize(&entry.address);
        self.entries
            .retain(|e| WalletAddress::normalize(&e.address) != key);
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn list(&self) -> Vec<RecentEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RecentScores {
    fn default() -> Self {
        Self::new(RECENT_RESULTS_CAPACITY)
    }
}
