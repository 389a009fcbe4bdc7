//! Identifier types for items and their anchors.
//!
//! Every item is identified by an `(agent, seq)` pair. Agents are interned
//! into a compact 16-bit index (see `agent_table`), so identifiers stay
//! small enough to store three per item (own id plus both origins).
//!
//! A reserved sentinel index doubles as the two boundary anchors: the
//! document root (for `origin_left`) and the end of the document (for
//! `origin_right`). Which boundary it means depends on the field it sits in.

use std::cmp::Ordering;

/// A compact agent index.
///
/// Instead of storing full agent names in every item, we use a 16-bit index
/// into an `AgentTable`. Indices are replica-local: the same agent may have
/// different indices in different documents, so any ordering decision must
/// go through the table and compare the underlying names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentIdx(pub u16);

impl AgentIdx {
    /// Sentinel value indicating no agent (boundary anchors).
    pub const NONE: AgentIdx = AgentIdx(u16::MAX);

    /// Create a new agent index.
    pub fn new(idx: u16) -> AgentIdx {
        return AgentIdx(idx);
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        return self.0 == u16::MAX;
    }
}

/// An item identifier: the agent that created the item plus the agent's
/// sequence number for it. Sequence numbers increment by exactly one per
/// agent, so `(agent, seq)` pairs are globally unique.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Id {
    /// The agent that created this item.
    pub agent: AgentIdx,
    /// The agent's sequence number, starting at 0.
    pub seq: u32,
}

impl Id {
    /// Create a new identifier.
    pub fn new(agent: AgentIdx, seq: u32) -> Id {
        return Id { agent, seq };
    }

    /// The boundary sentinel: document root as a left anchor, end of
    /// document as a right anchor.
    pub fn none() -> Id {
        return Id {
            agent: AgentIdx::NONE,
            seq: 0,
        };
    }

    /// Check if this is the boundary sentinel.
    pub fn is_none(&self) -> bool {
        return self.agent.is_none();
    }

    /// The identifier of the previous operation by the same agent, if any.
    pub fn pred(&self) -> Option<Id> {
        if self.is_none() || self.seq == 0 {
            return None;
        }
        return Some(Id::new(self.agent, self.seq - 1));
    }
}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        // Index order, not name order. Only valid within a single document;
        // cross-replica tie-breaks must compare names via the agent table.
        match self.agent.cmp(&other.agent) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            other => other,
        }
    }
}
