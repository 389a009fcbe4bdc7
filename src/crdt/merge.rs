//! Merging: transfer missing items between documents.
//!
//! A merge adopts every item the destination has not seen, then repeatedly
//! sweeps the set, integrating whichever items are causally ready: the
//! agent's previous operation and both anchors must already be in the
//! destination. Item sets from well-formed documents are causally closed,
//! so every sweep integrates at least one item; a sweep that integrates
//! nothing means the input is broken and the merge fails loudly.
//!
//! Only the deleted-at-transfer flag travels with an item. A deletion
//! performed after the destination already had the item does not propagate;
//! cross-replica tombstone sync is not part of this engine.

use super::algorithm::Algorithm;
use super::doc::Doc;
use super::error::CrdtError;
use super::error::Result;
use super::item::Item;
use super::primitives::Id;
use super::primitives::Version;

/// Check whether an identifier is covered by a version vector.
pub fn is_in_version(id: Id, version: &Version) -> bool {
    return version.contains(id);
}

/// Check whether an item is causally ready to integrate into `doc`.
///
/// The item must be unknown, its agent's previous operation (if any) must
/// be known, and both anchors must be known. The item's identifiers must
/// already be in `doc`'s agent index space (see [`Doc::adopt`]).
pub fn can_insert_now(item: &Item, doc: &Doc) -> bool {
    if doc.version.contains(item.id) {
        return false;
    }
    if item.id.seq > 0 && !doc.version.contains(Id::new(item.id.agent, item.id.seq - 1)) {
        return false;
    }
    return doc.version.contains(item.origin_left) && doc.version.contains(item.origin_right);
}

/// Transfer every item `dest` is missing from `src`, integrating with the
/// given strategy as each becomes causally ready.
pub fn merge_into<A: Algorithm + ?Sized>(alg: &A, dest: &mut Doc, src: &Doc) -> Result<()> {
    // Placeholder halves are skipped: integration recreates splits on the
    // destination side as children arrive.
    let mut missing: Vec<Option<Item>> = Vec::new();
    for item in src.items() {
        if item.content.is_none() {
            continue;
        }
        let adopted = dest.adopt(item, src);
        if dest.version.contains(adopted.id) {
            continue;
        }
        missing.push(Some(adopted));
    }

    let mut remaining = missing.len();
    while remaining > 0 {
        let mut merged_here = 0;

        for slot in missing.iter_mut() {
            let ready = match slot {
                Some(item) => can_insert_now(item, dest),
                None => false,
            };
            if !ready {
                continue;
            }
            if let Some(item) = slot.take() {
                alg.integrate(dest, item, None)?;
                merged_here += 1;
            }
        }

        if merged_here == 0 {
            return Err(CrdtError::UnresolvableDependency { remaining });
        }
        remaining -= merged_here;
    }

    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crdt::primitives::AgentIdx;
    use crate::crdt::yjs_mod::YjsMod;

    fn typed(text: &str, agent: &str) -> Doc {
        let mut doc = Doc::new();
        let idx = doc.agent(agent);
        for (i, ch) in text.chars().enumerate() {
            YjsMod.local_insert(&mut doc, idx, i, ch).unwrap();
        }
        return doc;
    }

    #[test]
    fn round_trip_converges() {
        let mut a = typed("hello", "alice");
        let mut b = typed("world", "bob");

        merge_into(&YjsMod, &mut b, &a).unwrap();
        merge_into(&YjsMod, &mut a, &b).unwrap();

        assert_eq!(a.content(), b.content());
        assert_eq!(a.len(), 10);
        a.check_invariants();
        b.check_invariants();
    }

    #[test]
    fn merge_is_idempotent() {
        let mut a = typed("hello", "alice");
        let b = typed("world", "bob");

        merge_into(&YjsMod, &mut a, &b).unwrap();
        let once = a.content();
        let items = a.items().len();

        merge_into(&YjsMod, &mut a, &b).unwrap();
        assert_eq!(a.content(), once);
        assert_eq!(a.items().len(), items);
    }

    #[test]
    fn deleted_at_transfer_stays_deleted() {
        let mut a = typed("hi", "alice");
        a.local_delete(0).unwrap();

        let mut b = Doc::new();
        merge_into(&YjsMod, &mut b, &a).unwrap();

        assert_eq!(b.content(), "i");
        assert_eq!(b.items().len(), 2);
        b.check_invariants();
    }

    #[test]
    fn readiness_requires_anchors() {
        let a = typed("xy", "alice");
        let dest = Doc::new();

        // The second character anchors on the first; it cannot go before it.
        let second = a.items()[1].clone();
        assert!(!can_insert_now(&second, &dest));
    }

    #[test]
    fn broken_causality_fails_loudly() {
        // Hand-build a document whose item anchors on history nobody has.
        let mut src = Doc::new();
        let ghost = src.agent("ghost");
        let alice = src.agent("alice");
        let item = Item::new('x', Id::new(alice, 0), Id::new(ghost, 0), Id::none(), 0);
        src.version.record(item.id);
        src.items.push(item);
        src.len = 1;

        let mut dest = Doc::new();
        assert_eq!(
            merge_into(&YjsMod, &mut dest, &src),
            Err(CrdtError::UnresolvableDependency { remaining: 1 })
        );
    }

    #[test]
    fn sentinel_is_in_every_version() {
        let version = Version::new();
        assert!(is_in_version(Id::none(), &version));
        assert!(!is_in_version(Id::new(AgentIdx::new(0), 0), &version));
    }
}
