//! The document: a linear buffer of items plus derived state.
//!
//! Items live in a plain `Vec` in materialization order. Tombstones and
//! placeholders stay in the buffer forever; the visible document is the
//! subsequence of items with content that are not deleted. The linear
//! layout keeps every lookup legible at the cost of O(n) scans; the id
//! lookup takes a locality hint to cheapen the common case where
//! consecutive local edits land next to each other.
//!
//! The document also owns the agent table (names interned to compact
//! indices) and the version vector (per-agent high-water marks). Items
//! arriving from another document must be re-interned through [`Doc::adopt`]
//! before anything else looks at them.

use super::error::CrdtError;
use super::error::Result;
use super::item::Item;
use super::primitives::AgentIdx;
use super::primitives::AgentTable;
use super::primitives::Id;
use super::primitives::Version;
use super::profiling;

/// A replicated document: item buffer, version vector, agent table, and
/// derived counters.
#[derive(Clone, Debug)]
pub struct Doc {
    /// Items in materialization order.
    pub(crate) items: Vec<Item>,
    /// Highest sequence number observed per agent.
    pub(crate) version: Version,
    /// Interned agent names.
    pub(crate) agents: AgentTable,
    /// Count of visible items (content present, not deleted).
    pub(crate) len: usize,
    /// One past the highest document-wide `seq` integrated so far.
    /// Consulted by the Automerge strategy only.
    pub(crate) next_seq: u32,
}

impl Default for Doc {
    fn default() -> Self {
        return Self::new();
    }
}

impl Doc {
    /// Create a new empty document.
    pub fn new() -> Doc {
        return Doc {
            items: Vec::new(),
            version: Version::new(),
            agents: AgentTable::new(),
            len: 0,
            next_seq: 0,
        };
    }

    /// Intern an agent name, returning its index in this document.
    pub fn agent(&mut self, name: &str) -> AgentIdx {
        return self.agents.get_or_insert(name);
    }

    /// Resolve an agent index back to its name.
    pub fn agent_name(&self, idx: AgentIdx) -> Option<&str> {
        return self.agents.name(idx);
    }

    /// The visible length of the document.
    #[inline]
    pub fn len(&self) -> usize {
        return self.len;
    }

    /// Check if the visible document is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// All items, including tombstones and placeholders.
    pub fn items(&self) -> &[Item] {
        return &self.items;
    }

    /// The document's version vector.
    pub fn version(&self) -> &Version {
        return &self.version;
    }

    /// The visible content: non-deleted payloads in document order.
    pub fn content(&self) -> String {
        return self
            .items
            .iter()
            .filter(|item| !item.deleted)
            .filter_map(|item| item.content)
            .collect();
    }

    /// Find the index of the item with the given identifier.
    ///
    /// Returns -1 for the boundary sentinel. A non-negative `hint` is
    /// checked first; consecutive local edits make it right most of the
    /// time. With `at_end` set, only items with content match, which
    /// distinguishes the two halves of a split item sharing an id.
    pub fn find_item(&self, needle: Id, at_end: bool, hint: isize) -> Result<isize> {
        if needle.is_none() {
            return Ok(-1);
        }

        if hint >= 0 && (hint as usize) < self.items.len() {
            let item = &self.items[hint as usize];
            if item.id == needle && (!at_end || item.content.is_some()) {
                profiling::hint_hit();
                return Ok(hint);
            }
        }
        profiling::hint_miss();

        for (i, item) in self.items.iter().enumerate() {
            if item.id == needle && (!at_end || item.content.is_some()) {
                return Ok(i as isize);
            }
        }
        return Err(CrdtError::ItemNotFound);
    }

    /// Find the item index for a visible position.
    ///
    /// Walks the buffer counting only visible items. With `stick_end` set,
    /// the first candidate index is returned even when the item there is a
    /// tombstone or placeholder, permitting insertion before adjacent empty
    /// items. A position equal to the visible length resolves to one past
    /// the last item.
    pub fn find_item_at_pos(&self, pos: usize, stick_end: bool) -> Result<usize> {
        let mut remaining = pos;
        for (i, item) in self.items.iter().enumerate() {
            if stick_end && remaining == 0 {
                return Ok(i);
            } else if item.deleted || item.content.is_none() {
                continue;
            } else if remaining == 0 {
                return Ok(i);
            }
            remaining -= 1;
        }

        if remaining == 0 {
            return Ok(self.items.len());
        }
        return Err(CrdtError::PositionOutOfRange { pos, len: self.len });
    }

    /// Delete the item at a visible position.
    ///
    /// The item is tombstoned in place; it keeps its slot so that anchors
    /// referencing it stay valid. Deletion is local-only: it does not
    /// travel through a merge.
    pub fn local_delete(&mut self, pos: usize) -> Result<()> {
        let idx = self.find_item_at_pos(pos, false)?;
        if idx == self.items.len() {
            return Err(CrdtError::PositionOutOfRange { pos, len: self.len });
        }

        let item = &mut self.items[idx];
        if !item.deleted {
            item.deleted = true;
            self.len -= 1;
        }
        return Ok(());
    }

    /// Check the integration precondition for an item id and record it.
    ///
    /// Operations from one agent must arrive in strict sequence order.
    pub(crate) fn admit(&mut self, id: Id) -> Result<()> {
        let expected = self.version.observed(id.agent);
        if id.seq != expected {
            return Err(CrdtError::OutOfOrder { seq: id.seq, expected });
        }
        self.version.record(id);
        return Ok(());
    }

    /// Splice an item into the buffer at its integration index.
    pub(crate) fn splice(&mut self, item: Item, idx: usize) {
        if item.visible() {
            self.len += 1;
        }
        self.items.insert(idx, item);
    }

    /// Translate a foreign item into this document's agent index space.
    ///
    /// The item's own id and both origins are re-interned; everything else
    /// is carried through unchanged.
    pub fn adopt(&mut self, item: &Item, src: &Doc) -> Item {
        let mut adopted = item.clone();
        adopted.id = self.adopt_id(item.id, src);
        adopted.origin_left = self.adopt_id(item.origin_left, src);
        adopted.origin_right = self.adopt_id(item.origin_right, src);
        return adopted;
    }

    fn adopt_id(&mut self, id: Id, src: &Doc) -> Id {
        if id.is_none() {
            return id;
        }
        return match src.agents.name(id.agent) {
            Some(name) => Id::new(self.agents.get_or_insert(name), id.seq),
            None => Id::none(),
        };
    }

    /// Audit the structural invariants. Panics on violation.
    ///
    /// Checks that the version vector dominates every item with no
    /// per-agent gaps, that every anchor resolves, and that the visible
    /// length matches the buffer.
    pub fn check_invariants(&self) {
        let visible = self.items.iter().filter(|item| item.visible()).count();
        assert_eq!(visible, self.len, "visible length out of sync with buffer");

        let mut per_agent = vec![0u32; self.agents.len()];
        for item in &self.items {
            assert!(
                self.version.contains(item.id),
                "item {:?} ahead of the version vector",
                item.id
            );
            assert!(
                self.version.contains(item.origin_left),
                "left anchor of {:?} not present",
                item.id
            );
            assert!(
                self.version.contains(item.origin_right),
                "right anchor of {:?} not present",
                item.id
            );
            if item.content.is_some() {
                per_agent[item.id.agent.0 as usize] += 1;
            }
        }

        // Unique ids below the high-water mark, counted once per agent,
        // leave no room for gaps.
        for (idx, _name) in self.agents.iter() {
            assert_eq!(
                per_agent[idx.0 as usize],
                self.version.observed(idx),
                "per-agent sequence has gaps"
            );
        }
    }
}
