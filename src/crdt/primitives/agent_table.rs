//! Agent table for mapping agent names to compact indices.
//!
//! Agents are identified by opaque strings. Storing the full name in every
//! item (three identifiers per item) would be expensive, so each document
//! interns names into 16-bit indices.
//!
//! The table supports:
//! - Get or insert: O(1) average case (hash map)
//! - Index to name: O(1) (array lookup)
//! - Maximum 65,534 agents (u16::MAX reserved for the boundary sentinel)
//!
//! Indices are assigned in first-seen order and are therefore replica-local.
//! Tie-breaks between concurrent items compare the underlying names, never
//! the indices, so every replica orders the same items the same way.

use rustc_hash::FxHashMap;

use super::id::AgentIdx;

/// A table mapping agent names to compact indices.
#[derive(Clone, Debug)]
pub struct AgentTable {
    /// Map from agent name to index.
    name_to_idx: FxHashMap<String, AgentIdx>,
    /// Map from index to agent name.
    idx_to_name: Vec<String>,
}

impl Default for AgentTable {
    fn default() -> Self {
        return Self::new();
    }
}

impl AgentTable {
    /// Create a new empty agent table.
    pub fn new() -> AgentTable {
        return AgentTable {
            name_to_idx: FxHashMap::default(),
            idx_to_name: Vec::new(),
        };
    }

    /// Get or insert an agent, returning its index.
    ///
    /// Panics if trying to add more than 65,534 agents.
    pub fn get_or_insert(&mut self, name: &str) -> AgentIdx {
        if let Some(&idx) = self.name_to_idx.get(name) {
            return idx;
        }

        let idx = self.idx_to_name.len();
        assert!(idx < u16::MAX as usize, "too many agents (max 65534)");

        let agent_idx = AgentIdx::new(idx as u16);
        self.idx_to_name.push(name.to_string());
        self.name_to_idx.insert(name.to_string(), agent_idx);

        return agent_idx;
    }

    /// Get the index for an agent, if known.
    #[inline]
    pub fn get(&self, name: &str) -> Option<AgentIdx> {
        return self.name_to_idx.get(name).copied();
    }

    /// Get the name for an index, if it exists.
    #[inline]
    pub fn name(&self, idx: AgentIdx) -> Option<&str> {
        if idx.is_none() {
            return None;
        }
        return self.idx_to_name.get(idx.0 as usize).map(String::as_str);
    }

    /// Get the number of agents in the table.
    #[inline]
    pub fn len(&self) -> usize {
        return self.idx_to_name.len();
    }

    /// Check if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.idx_to_name.is_empty();
    }

    /// Iterate over all (index, name) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (AgentIdx, &str)> {
        return self
            .idx_to_name
            .iter()
            .enumerate()
            .map(|(i, name)| (AgentIdx::new(i as u16), name.as_str()));
    }
}
