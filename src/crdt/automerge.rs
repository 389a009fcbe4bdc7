//! Automerge-style integration.
//!
//! Only the left origin is consulted; concurrency between same-parent
//! siblings is ordered by the document-wide `seq` counter instead of a
//! right origin. Higher `seq` sorts first (a later editor saw more of the
//! document), and equal `seq` falls back to the agent name, ascending.
//!
//! The ascending agent order inverts the published Automerge rule; it is
//! kept this way for consistency with the other strategies here, and the
//! conformance suite encodes it.
//!
//! Because a subtree ordered after a losing sibling can only be entered by
//! first losing against that sibling, the scan carries a `lost_conflict`
//! flag and asserts it when skipping foreign subtrees. A fast path exits as
//! soon as the new item's `seq` beats the candidate's, which is correct
//! because every surviving branch below guarantees the candidate's `seq`
//! is at least ours.

use super::algorithm::agent_before;
use super::algorithm::Algorithm;
use super::doc::Doc;
use super::error::Result;
use super::item::Item;
use super::profiling;

/// The Automerge-style strategy.
pub struct Automerge;

impl Algorithm for Automerge {
    fn name(&self) -> &'static str {
        return "automerge";
    }

    fn skipped_checks(&self) -> &'static [&'static str] {
        return &["interleaving_backward", "with_tails", "with_tails2"];
    }

    fn integrate(&self, doc: &mut Doc, item: Item, hint: Option<usize>) -> Result<()> {
        doc.admit(item.id)?;
        let hint = hint.map_or(-1, |idx| idx as isize);

        let parent = doc.find_item(item.origin_left, false, hint - 1)?;
        let mut dest = (parent + 1) as usize;
        let mut lost_conflict = false;

        while dest < doc.items.len() {
            let other = &doc.items[dest];

            // Fast path: everything from here on has seq >= ours unless we
            // have left the parent's region entirely.
            if item.seq > other.seq {
                break;
            }

            let oparent = doc.find_item(other.origin_left, false, -1)?;
            if oparent < parent {
                break;
            } else if oparent == parent {
                if item.seq > other.seq {
                    break;
                } else if item.seq == other.seq {
                    if agent_before(doc, item.id.agent, other.id.agent) {
                        break;
                    }
                    lost_conflict = true;
                } else {
                    lost_conflict = true;
                }
            } else {
                // Inside the subtree of a sibling we already lost against.
                debug_assert!(lost_conflict, "entered a sibling subtree without losing");
            }

            profiling::scan_step();
            dest += 1;
        }

        if doc.next_seq <= item.seq {
            doc.next_seq = item.seq + 1;
        }
        doc.splice(item, dest);
        return Ok(());
    }
}
