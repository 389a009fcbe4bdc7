//! Weft - a collaborative text CRDT integration engine.
//!
//! # Quick Start
//!
//! ```
//! use weft::crdt::{Algorithm, Doc, YjsMod, merge_into};
//!
//! // Two replicas edit independently.
//! let mut left = Doc::new();
//! let alice = left.agent("alice");
//! for (i, ch) in "hello".chars().enumerate() {
//!     YjsMod.local_insert(&mut left, alice, i, ch).unwrap();
//! }
//!
//! let mut right = Doc::new();
//! let bob = right.agent("bob");
//! for (i, ch) in "world".chars().enumerate() {
//!     YjsMod.local_insert(&mut right, bob, i, ch).unwrap();
//! }
//!
//! // Merging both ways converges.
//! merge_into(&YjsMod, &mut left, &right).unwrap();
//! merge_into(&YjsMod, &mut right, &left).unwrap();
//! assert_eq!(left.content(), right.content());
//! ```

pub mod crdt;
