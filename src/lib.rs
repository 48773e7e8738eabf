//! A height-balanced ordered map for Rust.
//!
//! This crate provides [`AvlMap`], an ordered associative container backed by an
//! AVL tree: a self-balancing binary search tree whose nodes carry parent links,
//! so that in-order navigation needs no auxiliary stack and no whole-tree scan.
//!
//! # Example
//!
//! ```
//! use larch_tree::AvlMap;
//!
//! let mut scores = AvlMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Entries iterate in key order.
//! let names: Vec<_> = scores.keys().copied().collect();
//! assert_eq!(names, ["Alice", "Bob", "Carol"]);
//!
//! // Bound queries return cursors into the sorted sequence.
//! let cursor = scores.lower_bound(&"B");
//! assert_eq!(cursor.key(), Some(&"Bob"));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Custom key orders** - A [`Compare`] instance may be injected at construction;
//!   keys only ever need the injected `less` relation, never an equality operation
//! - **Stable cursors** - [`Cursor`](avl_map::Cursor) values identify nodes, not paths,
//!   so they survive the rotations triggered by unrelated inserts and removals
//! - **Familiar API** - Mirrors `std::collections::BTreeMap` where the semantics agree
//!
//! # Implementation
//!
//! Nodes live in a slot arena and reference each other through compact handles.
//! Rebalancing after an insert or removal rewires parent/child links bottom-up
//! along the mutated path; node identity (and thus cursor validity) is only lost
//! when a node's own key is removed. Insertion is idempotent: inserting a key
//! that already compares equal to a stored key leaves the stored value alone.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: We have to allow unsafe code for the aliasing-free mutable iterators.
// #![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod pair;
mod raw;

pub mod avl_map;

pub use avl_map::{AvlMap, Cursor, Entry};
pub use compare::{ByOrdering, Compare, Less};
pub use error::OutOfRange;
pub use pair::Pair;
