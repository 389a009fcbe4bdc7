//! Classic Yjs (YATA) integration.
//!
//! Same scaffolding as `yjs_mod`: resolve both anchors to indices, then
//! scan forward from the left anchor deciding, for each candidate already
//! in the gap, whether the new item goes before it. The case split differs
//! when the candidate shares our left origin: the agent comparison comes
//! first and the right origins are only consulted for an exact match.
//!
//! The divergence from YjsMod is observable in a small number of
//! topologies; the `with_tails2` conformance check documents one and is
//! skipped here rather than fixed.

use super::algorithm::agent_before;
use super::algorithm::Algorithm;
use super::doc::Doc;
use super::error::Result;
use super::item::Item;
use super::profiling;

/// The classic Yjs strategy.
pub struct Yjs;

impl Algorithm for Yjs {
    fn name(&self) -> &'static str {
        return "yjs";
    }

    fn skipped_checks(&self) -> &'static [&'static str] {
        return &["interleaving_backward", "with_tails2"];
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
                if agent_before(doc, other.id.agent, item.id.agent) {
                    scanning = false;
                } else if oright == right {
                    break;
                } else {
                    scanning = true;
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
            Yjs.local_insert(&mut doc, alice, i, ch).unwrap();
        }
        assert_eq!(doc.content(), "hello");
    }

    #[test]
    fn concurrent_root_inserts_order_by_agent() {
        let mut doc = Doc::new();
        let b = doc.agent("B");
        let a = doc.agent("A");
        Yjs.integrate(&mut doc, Item::new('b', Id::new(b, 0), Id::none(), Id::none(), 0), None)
            .unwrap();
        Yjs.integrate(&mut doc, Item::new('a', Id::new(a, 0), Id::none(), Id::none(), 0), None)
            .unwrap();
        assert_eq!(doc.content(), "ab");
    }

    #[test]
    fn known_divergences_are_declared() {
        assert!(Yjs.skipped_checks().contains(&"with_tails2"));
    }
}
