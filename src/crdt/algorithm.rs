//! Algorithm dispatch.
//!
//! The four integration strategies share one item shape and one document
//! representation; they differ only in how `integrate` picks the canonical
//! index for a new item. Rather than parameterizing the document over the
//! strategy, each strategy is a unit struct implementing this trait, and a
//! document stays strategy-agnostic storage.
//!
//! | Strategy | Sibling order | Consults |
//! |-------------|----------------------------------|-------------------------------|
//! | `Yjs` | right origin, then agent | both origins |
//! | `YjsMod` | two-phase scan, then agent | both origins |
//! | `Automerge` | document seq desc, then agent | left origin + `seq` |
//! | `Sync9` | agent, with in-place splits | left origin + `insert_after` |

use std::fmt::Write;

use super::doc::Doc;
use super::error::Result;
use super::item::Item;
use super::merge;
use super::primitives::AgentIdx;
use super::primitives::Id;

/// One integration strategy.
///
/// Implementations are stateless; all state lives in the document. The
/// same document must be driven by the same strategy for its whole life:
/// the strategies agree on representation but not on ordering.
pub trait Algorithm {
    /// Short name for reports and skip lists.
    fn name(&self) -> &'static str;

    /// Place a fully-anchored item at its canonical index.
    ///
    /// `hint` is the expected neighborhood of the item's anchors, used to
    /// shortcut the id lookup for clustered local edits.
    fn integrate(&self, doc: &mut Doc, item: Item, hint: Option<usize>) -> Result<()>;

    /// Translate a visible position into an anchored item and integrate it.
    fn local_insert(&self, doc: &mut Doc, agent: AgentIdx, pos: usize, content: char) -> Result<()> {
        let idx = doc.find_item_at_pos(pos, false)?;
        let item = anchored_item(doc, agent, idx, content);
        return self.integrate(doc, item, Some(idx));
    }

    /// Transfer every item `dest` is missing from `src`, respecting causal
    /// readiness.
    fn merge_into(&self, dest: &mut Doc, src: &Doc) -> Result<()> {
        return merge::merge_into(self, dest, src);
    }

    /// Conformance checks this strategy is known to diverge on. The listed
    /// divergences are documented behavior; a reimplementation must keep
    /// them rather than fix them.
    fn skipped_checks(&self) -> &'static [&'static str] {
        return &[];
    }

    /// Render the item buffer for debugging.
    fn dump(&self, doc: &Doc) -> String {
        let fmt_id = |id: Id| -> String {
            if id.is_none() {
                return "*".to_string();
            }
            return format!("{}:{}", doc.agent_name(id.agent).unwrap_or("?"), id.seq);
        };

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {} visible of {} items",
            self.name(),
            doc.len(),
            doc.items().len()
        );
        for (i, item) in doc.items().iter().enumerate() {
            let content = match item.content {
                Some(ch) => format!("{:?}", ch),
                None => "(placeholder)".to_string(),
            };
            let _ = writeln!(
                out,
                "  [{}] {} {} left={} right={} seq={}{}{}",
                i,
                fmt_id(item.id),
                content,
                fmt_id(item.origin_left),
                fmt_id(item.origin_right),
                item.seq,
                if item.insert_after { "" } else { " before" },
                if item.deleted { " deleted" } else { "" },
            );
        }
        return out;
    }
}

/// Build an item anchored at visible index `idx` (standard path).
///
/// The anchors are whatever sits on either side of the insertion point
/// right now, tombstones included; the strategies resolve concurrent
/// claims to the same gap later.
pub(crate) fn anchored_item(doc: &Doc, agent: AgentIdx, idx: usize, content: char) -> Item {
    let id = Id::new(agent, doc.version.observed(agent));
    let origin_left = if idx == 0 { Id::none() } else { doc.items[idx - 1].id };
    let origin_right = if idx < doc.items.len() { doc.items[idx].id } else { Id::none() };
    return Item::new(content, id, origin_left, origin_right, doc.next_seq);
}

/// Compare two agents by name. Indices are replica-local, so ordering
/// decisions must go through the names.
pub(crate) fn agent_before(doc: &Doc, a: AgentIdx, b: AgentIdx) -> bool {
    return doc.agent_name(a) < doc.agent_name(b);
}

/// The registry of provided strategies.
pub fn algorithms() -> [&'static dyn Algorithm; 4] {
    return [
        &super::yjs::Yjs,
        &super::yjs_mod::YjsMod,
        &super::automerge::Automerge,
        &super::sync9::Sync9,
    ];
}
