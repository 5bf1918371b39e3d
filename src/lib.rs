//! This crate provides a doubly-linked list that recycles its nodes,
//! implemented as a ring with two sentinels.
//!
//! The [`List`] allows inserting, removing elements at both ends and at any
//! given position in constant time. Removed nodes are not freed: they stay in
//! the ring as spare capacity, so a list that shrinks and grows again does
//! not allocate.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use ring_list::{List, ReadCursor};
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//!
//! let mut cursor = list.cursor_start_mut();
//!
//! cursor.insert(0).unwrap(); // insert 0 at the beginning of the list
//! assert_eq!(cursor.current(), Some(&1));
//! assert_eq!(cursor.view(), &List::from_iter([0, 1, 2, 3, 4]));
//!
//! cursor.move_next();
//! cursor.move_next(); // move the cursor to 3, and removes it.
//! assert_eq!(cursor.remove(), Some(3));
//! assert_eq!(cursor.view(), &List::from_iter([0, 1, 2, 4]));
//!
//! // The node of 3 is kept for the next insertion.
//! assert_eq!(list.excess(), 1);
//! list.push_front(5);
//! assert_eq!(list.excess(), 0);
//! ```
//!
//! # Memory Layout
//!
//! Every node of the list lives in one arena owned by the list, and links are
//! arena indices. The nodes form a single ring:
//! ```text
//!                      active arc                               free arc
//!     ┌───────┐   ┌───────┐     ┌───────┐   ┌───────┐   ┌───────┐     ┌───────┐
//!  ┌→ │ front │ → │ elt 0 │ → ┄ │ elt n │ → │ back  │ → │ spare │ → ┄ │ spare │ ─┐
//!  │  └───────┘   └───────┘     └───────┘   └───────┘   └───────┘     └───────┘  │
//!  └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//! (the `prev` links, omitted above, run the other way.)
//!
//! The `List` contains:
//! - the arena `nodes`;
//! - the index `front` of the front sentinel;
//! - the index `back` of the back sentinel.
//!
//! The elements are the nodes strictly between `front` and `back` (the
//! *active arc*); the nodes strictly between `back` and `front` are spare (the
//! *free arc*, or *excess*). Initially, the ring is made of the two sentinels
//! only.
//!
//! The sentinels are ordinary nodes: a role, not an identity. When a spare node
//! is available, [`push_back`] writes the element into the back sentinel and
//! hands the role on to the next spare node, without rewiring any link.
//! [`pop_back`] does the opposite, and so do [`push_front`] and [`pop_front`]
//! at the other end. Links are only rewired to allocate a node, or to move a
//! node for an insertion or a removal in the middle of the list.
//!
//! As a consequence, [`clear`] is constant time: it makes the whole active arc
//! spare. The cleared elements are dropped lazily, when their nodes are reused,
//! or when the list is [`release`]d or dropped.
//!
//! # Positions
//!
//! A [`Position`] is a plain handle on a node, returned by [`begin`], [`end`],
//! [`insert_at`] and friends. It does not borrow the list, but only the list
//! that made it accepts it. A position whose element was removed is rejected
//! until its node holds an element again.
//!
//! ```
//! use ring_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([3, 1, 4, 1, 5]);
//! let four = list.includes(&4);
//! list.insert_at(four, 9).unwrap();
//! list[four] += 40;
//! assert_eq!(Vec::from_iter(list), vec![3, 1, 9, 44, 1, 5]);
//! ```
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended iterators and iterate the list like an array (fused and non-cyclic).
//! [`IterMut`] provides mutability of the elements (but not the linked structure of
//! the list).
//!
//! ## Examples
//!
//! ```
//! use ring_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! Beside iteration, the cursors [`Cursor`] and [`CursorMut`] provide more
//! flexible ways of viewing a list. Reading goes through the [`ReadCursor`]
//! trait, implemented by both; writing elements goes through [`WriteCursor`],
//! implemented by [`CursorMut`] only. [`CursorMut`] can also [`insert`] and
//! [`remove`] elements.
//!
//! Unlike iterators, cursors walk the whole ring: moving past the back
//! sentinel visits the spare nodes, then the front sentinel. Spare nodes show
//! no element, even when they still hold a cleared one.
//!
//! # Diagnostics
//!
//! [`List::audit`] and [`List::check_links`] verify the structure of the ring,
//! and [`List::dump`] shows all of it, spare nodes included. With the `audit`
//! feature enabled, every mutation of a list audits the ring and panics on the
//! first fault.
//!
//! # Logging
//!
//! The crate reports through the [`log`](https://docs.rs/log) facade: misuses
//! such as popping an empty list are logged as warnings, failed allocations as
//! errors, and ring growth at the trace level.
//!
//! [`List`]: crate::List
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`Position`]: crate::Position
//! [`Cursor`]: crate::Cursor
//! [`CursorMut`]: crate::CursorMut
//! [`ReadCursor`]: crate::ReadCursor
//! [`WriteCursor`]: crate::WriteCursor
//! [`push_back`]: crate::List::push_back
//! [`pop_back`]: crate::List::pop_back
//! [`push_front`]: crate::List::push_front
//! [`pop_front`]: crate::List::pop_front
//! [`clear`]: crate::List::clear
//! [`release`]: crate::List::release
//! [`begin`]: crate::List::begin
//! [`end`]: crate::List::end
//! [`insert_at`]: crate::List::insert_at
//! [`insert`]: crate::CursorMut::insert
//! [`remove`]: crate::CursorMut::remove

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use list::cursor::{Cursor, CursorMut, Position, ReadCursor, WriteCursor};
#[doc(inline)]
pub use list::diagnostics::LinkFault;
#[doc(inline)]
pub use list::iterator::{Drain, IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

pub mod list;

mod error;
