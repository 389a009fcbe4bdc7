//! YjsMod: dual-origin integration with a deferred-commit scan.
//!
//! Like classic Yjs, every item remembers both neighbors it was created
//! between. The difference is in how a new item walks past concurrent
//! siblings: the decision is two-dimensional, comparing the candidate's
//! left origin against ours *and* its right origin against ours.
//!
//! When a sibling shares our left origin but targets a nearer right origin,
//! we enter a *scanning* phase: the insertion index stops advancing while
//! the scan continues, so the tentative index stays just before the
//! sibling's run. Scanning ends either at a direct anchor collision
//! (resolved by agent name) or when the foreign run is fully skipped. This
//! is what keeps two concurrent runs anchored at the same spot from
//! interleaving, in either typing direction.
//!
//! # Example
//!
//! ```
//! use weft::crdt::{Algorithm, Doc, YjsMod};
//!
//! let mut doc = Doc::new();
//! let alice = doc.agent("alice");
//! YjsMod.local_insert(&mut doc, alice, 0, 'h').unwrap();
//! YjsMod.local_insert(&mut doc, alice, 1, 'i').unwrap();
//! assert_eq!(doc.content(), "hi");
//! ```

use super::algorithm::agent_before;
use super::algorithm::Algorithm;
use super::doc::Doc;
use super::error::Result;
use super::item::Item;
use super::profiling;

/// The YjsMod strategy.
pub struct YjsMod;

impl Algorithm for YjsMod {
    fn name(&self) -> &'static str {
        return "yjs_mod";
    }

    fn integrate(&self, doc: &mut Doc, item: Item, hint: Option<usize>) -> Result<()> {
        doc.admit(item.id)?;
        let hint = hint.map_or(-1, |idx| idx as isize);

        let left = doc.find_item(item.origin_left, false, hint - 1)?;
        let right = if item.origin_right.is_none() {
            doc.items.len() as isize
        } else {
            doc.find_item(item.origin_right, false, hint)?
        };

        let mut dest = (left + 1) as usize;
        let mut scanning = false;

        let mut i = dest;
        loop {
            // While scanning, the commit index is pinned before the
            // candidate run we might yet win against.
            if !scanning {
                dest = i;
            }
            if i == doc.items.len() || i as isize == right {
                break;
            }

            let other = &doc.items[i];
            let oleft = doc.find_item(other.origin_left, false, -1)?;
            let oright = if other.origin_right.is_none() {
                doc.items.len() as isize
            } else {
                doc.find_item(other.origin_right, false, -1)?
            };

            if oleft < left {
                break;
            } else if oleft == left {
                if oright < right {
                    scanning = true;
                } else if oright == right {
                    // Direct anchor collision: agent name decides.
                    if agent_before(doc, item.id.agent, other.id.agent) {
                        break;
                    }
                    scanning = false;
                } else {
                    scanning = false;
                }
            }
            // oleft > left: interior of a foreign run, skip it.

            profiling::scan_step();
            i += 1;
        }

        doc.splice(item, dest);
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crdt::primitives::Id;

    #[test]
    fn sequential_typing() {
        let mut doc = Doc::new();
        let alice = doc.agent("alice");
        for (i, ch) in "hello".chars().enumerate() {
            YjsMod.local_insert(&mut doc, alice, i, ch).unwrap();
        }
        assert_eq!(doc.content(), "hello");
        assert_eq!(doc.len(), 5);
    }

    #[test]
    fn insert_in_middle() {
        let mut doc = Doc::new();
        let alice = doc.agent("alice");
        YjsMod.local_insert(&mut doc, alice, 0, 'h').unwrap();
        YjsMod.local_insert(&mut doc, alice, 1, 'o').unwrap();
        YjsMod.local_insert(&mut doc, alice, 1, 'l').unwrap();
        assert_eq!(doc.content(), "hlo");
    }

    #[test]
    fn delete_then_insert() {
        let mut doc = Doc::new();
        let alice = doc.agent("alice");
        for (i, ch) in "abc".chars().enumerate() {
            YjsMod.local_insert(&mut doc, alice, i, ch).unwrap();
        }
        doc.local_delete(1).unwrap();
        assert_eq!(doc.content(), "ac");

        YjsMod.local_insert(&mut doc, alice, 1, 'x').unwrap();
        assert_eq!(doc.content(), "axc");
        doc.check_invariants();
    }

    #[test]
    fn concurrent_root_inserts_order_by_agent() {
        // Two root-anchored items, integrated in both orders.
        let mut ab = Doc::new();
        let a = ab.agent("A");
        let b = ab.agent("B");
        YjsMod
            .integrate(&mut ab, Item::new('a', Id::new(a, 0), Id::none(), Id::none(), 0), None)
            .unwrap();
        YjsMod
            .integrate(&mut ab, Item::new('b', Id::new(b, 0), Id::none(), Id::none(), 0), None)
            .unwrap();

        let mut ba = Doc::new();
        let b2 = ba.agent("B");
        let a2 = ba.agent("A");
        YjsMod
            .integrate(&mut ba, Item::new('b', Id::new(b2, 0), Id::none(), Id::none(), 0), None)
            .unwrap();
        YjsMod
            .integrate(&mut ba, Item::new('a', Id::new(a2, 0), Id::none(), Id::none(), 0), None)
            .unwrap();

        assert_eq!(ab.content(), "ab");
        assert_eq!(ba.content(), "ab");
    }

    #[test]
    fn out_of_order_rejected() {
        let mut doc = Doc::new();
        let alice = doc.agent("alice");
        let item = Item::new('x', Id::new(alice, 3), Id::none(), Id::none(), 0);
        assert!(YjsMod.integrate(&mut doc, item, None).is_err());
    }
}
