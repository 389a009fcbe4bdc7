//! The sequence-CRDT integration engine.
//!
//! A document is a linear buffer of items; an item is one element plus the
//! anchors it was created between. Integration (deciding where a new item
//! lands so that every replica agrees) is the whole game, and four
//! strategies are provided behind one dispatch trait:
//!
//! | Strategy | Approach |
//! |-------------|------------------------------------------------|
//! | `Yjs` | dual origins, classic YATA case split |
//! | `YjsMod` | dual origins with a deferred-commit scan phase |
//! | `Automerge` | parent + document-seq sibling ordering |
//! | `Sync9` | item tree with in-place splits |
//!
//! All four share the item representation, the document, local deletes,
//! and the causally-gated merge; they differ only inside `integrate`.

pub mod algorithm;
pub mod automerge;
pub mod doc;
pub mod error;
pub mod item;
pub mod merge;
pub mod primitives;
pub mod profiling;
pub mod sync9;
pub mod yjs;
pub mod yjs_mod;

// Re-exports for convenience
pub use algorithm::algorithms;
pub use algorithm::Algorithm;
pub use automerge::Automerge;
pub use doc::Doc;
pub use error::CrdtError;
pub use error::Result;
pub use item::Item;
pub use merge::can_insert_now;
pub use merge::is_in_version;
pub use merge::merge_into;
pub use primitives::AgentIdx;
pub use primitives::Id;
pub use primitives::Version;
pub use sync9::Sync9;
pub use yjs::Yjs;
pub use yjs_mod::YjsMod;
