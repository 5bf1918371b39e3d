use std::collections::TryReserveError;
use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::Error;
use crate::list::cursor::{Cursor, CursorMut, Position};
use crate::{Drain, IntoIter, Iter, IterMut};

pub mod cursor;
pub mod diagnostics;
pub mod iterator;

mod algorithms;

/// Link value of a node that is not part of the ring.
pub(crate) const DETACHED: usize = usize::MAX;

/// Stamp of a node that holds no element of the list.
pub(crate) const VACANT: u64 = 0;

static NEXT_LIST_ID: AtomicUsize = AtomicUsize::new(0);

/// The `List` is a doubly-linked list whose nodes live in a ring together with
/// two sentinels. Removed nodes are not freed but kept in the ring as spare
/// capacity, and later insertions reuse them before allocating.
///
/// The `List` contains:
/// - an arena `nodes` owning every node of the ring, sentinels included;
/// - the arena index `front` of the front sentinel;
/// - the arena index `back` of the back sentinel;
/// - an `id` unique to the list, carried by its positions;
/// - the current `epoch`: a node is an element exactly when its stamp
///   equals it, so bumping the epoch vacates every element at once.
///
/// # Naming Conventions
///
/// - *active arc*: the nodes from `front.next` to `back` (exclusive), which
///   are the elements of the list;
/// - *free arc*: the nodes from `back.next` to `front` (exclusive), which are
///   the spare capacity, or *excess*, of the list.
pub struct List<T> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) front: usize,
    pub(crate) back: usize,
    pub(crate) id: usize,
    pub(crate) epoch: u64,
}

pub(crate) struct Node<T> {
    pub(crate) next: usize,
    pub(crate) prev: usize,
    pub(crate) stamp: u64,
    pub(crate) element: Option<T>,
}

// private methods
impl<T> List<T> {
    pub(crate) fn first_node(&self) -> usize {
        self.nodes[self.front].next
    }
    pub(crate) fn last_node(&self) -> usize {
        self.nodes[self.back].prev
    }
    pub(crate) fn first_free_node(&self) -> usize {
        self.nodes[self.back].next
    }

    fn connect(&mut self, prev: usize, next: usize) {
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    /// Splice the detached node `node` into the ring, right before `location`.
    fn link_in(&mut self, location: usize, node: usize) {
        debug_assert!(
            self.nodes[node].next == DETACHED && self.nodes[node].prev == DETACHED,
            "Cannot link in a node that is still linked"
        );
        let prev = self.nodes[location].prev;
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, location);
        self.connect(prev, node);
        self.connect(node, location);
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, node);
            self.assert_adjacent(node, location);
        }
    }

    /// Take `node` out of the ring, joining its neighbors, and leave it detached.
    fn link_out(&mut self, node: usize) -> usize {
        let Node { prev, next, .. } = self.nodes[node];
        self.connect(prev, next);
        self.nodes[node].next = DETACHED;
        self.nodes[node].prev = DETACHED;
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        node
    }

    fn reserve_nodes(&mut self, additional: usize) -> Result<(), TryReserveError> {
        #[cfg(test)]
        {
            if tests::take_alloc_failure() {
                return Vec::<u8>::new().try_reserve(usize::MAX);
            }
        }
        self.nodes.try_reserve(additional)
    }

    /// Make sure that the next call to `new_node` does not allocate.
    fn try_reserve_node(&mut self) -> Result<(), Error> {
        self.reserve_nodes(1).map_err(|err| {
            log::error!("ring node allocation failed: {}", err);
            Error::Alloc(err)
        })
    }

    /// Push an empty detached node to the arena.
    fn new_node(&mut self) -> usize {
        let node = self.nodes.len();
        self.nodes.push(Node::detached(None));
        log::trace!("ring grown to {} nodes", self.nodes.len());
        node
    }

    /// Store `element` in `node` and mark the node as an element.
    fn occupy(&mut self, node: usize, element: T) {
        let slot = &mut self.nodes[node];
        slot.element = Some(element);
        slot.stamp = self.epoch;
    }

    /// Unmark `node` as an element and take its element out.
    fn vacate(&mut self, node: usize) -> Option<T> {
        let slot = &mut self.nodes[node];
        slot.stamp = VACANT;
        slot.element.take()
    }

    pub(crate) fn is_element(&self, node: usize) -> bool {
        self.nodes[node].stamp == self.epoch
    }

    pub(crate) fn position(&self, node: usize) -> Position {
        Position::new(self.id, node)
    }

    /// The arena index `at` points to, if `at` was made by this list.
    pub(crate) fn resolve(&self, at: Position) -> Option<usize> {
        at.node_in(self.id).filter(|&node| node < self.nodes.len())
    }

    /// Add `count` empty nodes to the free arc. The arena must already have
    /// room for them.
    fn grow_free(&mut self, count: usize) {
        for _ in 0..count {
            let node = self.new_node();
            let location = self.first_free_node();
            self.link_in(location, node);
        }
    }

    /// Count the nodes strictly between `from` and `to`, walking forward.
    fn arc_len(&self, from: usize, to: usize) -> usize {
        let mut len = 0;
        let mut node = self.nodes[from].next;
        while node != to {
            len += 1;
            node = self.nodes[node].next;
        }
        len
    }

    /// Like [`List::pop_front`], but an empty list is not worth a warning.
    pub(crate) fn take_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // The first element becomes the front sentinel.
        self.front = self.first_node();
        self.vacate(self.front)
    }

    /// Like [`List::pop_back`], but an empty list is not worth a warning.
    pub(crate) fn take_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // The last element becomes the back sentinel.
        self.back = self.last_node();
        self.vacate(self.back)
    }

    /// Move the element node `node` to the head of the free arc and return its
    /// element.
    pub(crate) fn demote(&mut self, node: usize) -> Option<T> {
        debug_assert!(node != self.front && node != self.back);
        self.link_out(node);
        let location = self.first_free_node();
        self.link_in(location, node);
        self.vacate(node)
    }

    /// Resolve a position where a new element can be inserted before: an
    /// element, or the back sentinel.
    fn insert_location(&self, at: Position) -> Result<usize, Error> {
        match self.resolve(at) {
            Some(node) if node == self.front => {
                log::warn!("cannot insert before the front sentinel");
                Err(Error::SentinelPosition)
            }
            Some(node) if node == self.back || self.is_element(node) => Ok(node),
            _ => {
                log::warn!("cannot insert at a detached position");
                Err(Error::DetachedPosition)
            }
        }
    }

    /// Resolve a position that must hold an element.
    fn element_node(&self, at: Position) -> Result<usize, Error> {
        match self.resolve(at) {
            Some(node) if node == self.front || node == self.back => {
                log::warn!("cannot remove a sentinel");
                Err(Error::SentinelPosition)
            }
            Some(node) if self.is_element(node) => Ok(node),
            _ => {
                log::warn!("cannot remove at a detached position");
                Err(Error::DetachedPosition)
            }
        }
    }

    /// Remove the element at `at` and return the node following it, together
    /// with the removed element.
    pub(crate) fn unlink(&mut self, at: Position) -> Result<(usize, T), Error> {
        let node = self.element_node(at)?;
        let next = self.nodes[node].next;
        let element = self.demote(node).ok_or(Error::DetachedPosition)?;
        #[cfg(feature = "audit")]
        self.assert_links();
        Ok((next, element))
    }

    #[cfg(feature = "audit")]
    pub(crate) fn assert_links(&self) {
        let faults = self.audit();
        assert!(faults.is_empty(), "ring links corrupted: {:?}", faults);
    }
}

impl<T> List<T> {
    /// Create an empty `List`, made of its two sentinels only.
    ///
    /// # Examples
    /// ```
    /// use ring_list::List;
    /// let list: List<u32> = List::new();
    /// assert_eq!(list.capacity(), 0);
    /// ```
    pub fn new() -> Self {
        let nodes = vec![
            Node {
                next: 1,
                prev: 1,
                stamp: VACANT,
                element: None,
            },
            Node {
                next: 0,
                prev: 0,
                stamp: VACANT,
                element: None,
            },
        ];
        Self {
            nodes,
            front: 0,
            back: 1,
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            epoch: VACANT + 1,
        }
    }

    /// Create an empty `List` with room for at least `capacity` elements
    /// before it allocates again.
    ///
    /// # Examples
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::with_capacity(4);
    /// assert_eq!(list.excess(), 4);
    ///
    /// list.push_back(1);
    /// list.push_front(0);
    /// assert_eq!(list.capacity(), 4);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let mut list = Self::new();
        list.reserve(capacity);
        list
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first_node() == self.back
    }

    /// Returns `true` if the `List` has no spare node, so that the next
    /// insertion has to allocate.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_full());
    ///
    /// list.push_back(1);
    /// list.pop_back();
    /// assert!(!list.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.first_free_node() == self.front
    }

    /// Returns the number of elements of the `List`.
    ///
    /// The length is not cached, so that [`clear`](List::clear) stays
    /// constant time.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 3);
    /// ```
    pub fn len(&self) -> usize {
        self.arc_len(self.front, self.back)
    }

    /// Returns the number of spare nodes kept in the ring for reuse.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*m*) time, where *m* is the
    /// number of spare nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.excess(), 0);
    ///
    /// list.pop_front();
    /// assert_eq!(list.excess(), 1);
    /// ```
    pub fn excess(&self) -> usize {
        self.arc_len(self.back, self.front)
    }

    /// Returns the number of nodes usable for elements, which is always
    /// `len() + excess()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// list.pop_back();
    /// assert_eq!(list.capacity(), 3);
    /// ```
    pub fn capacity(&self) -> usize {
        self.len() + self.excess()
    }

    /// Makes sure that at least `additional` elements can be inserted
    /// without allocating, by adding spare nodes to the ring.
    ///
    /// # Panics
    ///
    /// Panics if the new node count overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(0);
    /// list.reserve(3);
    /// assert_eq!(list.excess(), 3);
    ///
    /// list.reserve(2);
    /// assert_eq!(list.excess(), 3);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let missing = additional.saturating_sub(self.excess());
        self.nodes.reserve(missing);
        self.grow_free(missing);
        #[cfg(feature = "audit")]
        self.assert_links();
    }

    /// Like [`reserve`](List::reserve), but returns an error instead of
    /// aborting if the allocation fails. On error the list is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{Error, List};
    ///
    /// let mut list: List<u8> = List::new();
    /// assert!(list.try_reserve(8).is_ok());
    /// assert!(matches!(list.try_reserve(usize::MAX), Err(Error::Alloc(_))));
    /// assert_eq!(list.excess(), 8);
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        let missing = additional.saturating_sub(self.excess());
        self.reserve_nodes(missing).map_err(|err| {
            log::error!("cannot reserve {} ring nodes: {}", missing, err);
            Error::Alloc(err)
        })?;
        self.grow_free(missing);
        #[cfg(feature = "audit")]
        self.assert_links();
        Ok(())
    }

    /// Removes all elements from the `List`, keeping their nodes as spare
    /// capacity.
    ///
    /// The removed elements are not dropped right away: each one is dropped
    /// when its node is reused, or when the list is released or dropped.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(list.front(), Some(&1));
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.excess(), 2);
    /// assert_eq!(list.front(), None);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.back = self.first_node();
        self.epoch += 1;
        #[cfg(feature = "audit")]
        self.assert_links();
    }

    /// Drops every element and every spare node, leaving a bare ring made
    /// of the two sentinels.
    ///
    /// Positions obtained before the release are all invalidated: the list
    /// rejects them from then on.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// list.pop_back();
    /// list.release();
    /// assert!(list.is_empty());
    /// assert_eq!(list.capacity(), 0);
    /// ```
    pub fn release(&mut self) {
        *self = Self::new();
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            log::warn!("front called on an empty list");
            return None;
        }
        self.nodes[self.first_node()].element.as_ref()
    }

    /// Provides a mutable reference to the front element, or `None` if the list
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    ///
    /// if let Some(x) = list.front_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.front(), Some(&5));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            log::warn!("front_mut called on an empty list");
            return None;
        }
        let node = self.first_node();
        self.nodes[node].element.as_mut()
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.push_back(1);
    /// assert_eq!(list.back(), Some(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            log::warn!("back called on an empty list");
            return None;
        }
        self.nodes[self.last_node()].element.as_ref()
    }

    /// Provides a mutable reference to the back element, or `None` if the list
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.push_back(1);
    /// if let Some(x) = list.back_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.back(), Some(&5));
    /// ```
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            log::warn!("back_mut called on an empty list");
            return None;
        }
        let node = self.last_node();
        self.nodes[node].element.as_mut()
    }

    /// Adds an element first in the list.
    ///
    /// If the list has a spare node, the element is written into the front
    /// sentinel, and the sentinel role moves on to the spare node. No link
    /// is rewired. Otherwise a new node is allocated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front().unwrap(), &2);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front().unwrap(), &1);
    /// ```
    pub fn push_front(&mut self, elt: T) {
        if self.is_full() {
            let node = self.new_node();
            self.occupy(node, elt);
            let location = self.first_node();
            self.link_in(location, node);
        } else {
            // The last spare node becomes the front sentinel.
            self.occupy(self.front, elt);
            self.front = self.nodes[self.front].prev;
        }
        #[cfg(feature = "audit")]
        self.assert_links();
    }

    /// Like [`push_front`](List::push_front), but returns an error instead of
    /// aborting if a node has to be allocated and the allocation fails. On
    /// error the list is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.try_push_front(1).is_ok());
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    pub fn try_push_front(&mut self, elt: T) -> Result<(), Error> {
        if self.is_full() {
            self.try_reserve_node()?;
        }
        self.push_front(elt);
        Ok(())
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// The node of the element is kept as spare capacity.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// assert_eq!(list.excess(), 2);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            log::warn!("pop_front called on an empty list");
            return None;
        }
        let elt = self.take_front();
        #[cfg(feature = "audit")]
        self.assert_links();
        elt
    }

    /// Appends an element to the back of a list.
    ///
    /// If the list has a spare node, the element is written into the back
    /// sentinel, and the sentinel role moves on to the spare node. No link
    /// is rewired. Otherwise a new node is allocated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back().unwrap(), &3);
    /// ```
    pub fn push_back(&mut self, elt: T) {
        if self.is_full() {
            let node = self.new_node();
            self.occupy(node, elt);
            self.link_in(self.back, node);
        } else {
            // The first spare node becomes the back sentinel.
            self.occupy(self.back, elt);
            self.back = self.nodes[self.back].next;
        }
        #[cfg(feature = "audit")]
        self.assert_links();
    }

    /// Like [`push_back`](List::push_back), but returns an error instead of
    /// aborting if a node has to be allocated and the allocation fails. On
    /// error the list is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.try_push_back(1).is_ok());
    /// assert_eq!(list.back(), Some(&1));
    /// ```
    pub fn try_push_back(&mut self, elt: T) -> Result<(), Error> {
        if self.is_full() {
            self.try_reserve_node()?;
        }
        self.push_back(elt);
        Ok(())
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    ///
    /// The node of the element is kept as spare capacity.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_back(), None);
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            log::warn!("pop_back called on an empty list");
            return None;
        }
        let elt = self.take_back();
        #[cfg(feature = "audit")]
        self.assert_links();
        elt
    }

    /// Inserts an element before the position `at`, and returns the position
    /// of the new element.
    ///
    /// A spare node, if any, is taken from the back of the ring and moved
    /// in place; otherwise a new node is allocated. Inserting into an empty
    /// list or at [`end`](List::end) appends to the list.
    ///
    /// # Errors
    ///
    /// - [`Error::DetachedPosition`] if `at` is neither an element nor
    ///   [`end`](List::end) of this list, when it is not empty;
    /// - [`Error::SentinelPosition`] if `at` is [`rend`](List::rend);
    /// - [`Error::Alloc`] if a node has to be allocated and the allocation
    ///   fails.
    ///
    /// The list is unchanged on error.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([3, 1, 4, 1, 5]);
    ///
    /// let at = list.includes(&4);
    /// let inserted = list.insert_at(at, 9).unwrap();
    /// assert_eq!(list[inserted], 9);
    /// assert_eq!(Vec::from_iter(list), vec![3, 1, 9, 4, 1, 5]);
    /// ```
    pub fn insert_at(&mut self, at: Position, elt: T) -> Result<Position, Error> {
        let location = if self.is_empty() {
            self.back
        } else {
            self.insert_location(at)?
        };
        if location == self.back {
            self.try_push_back(elt)?;
            return Ok(self.position(self.last_node()));
        }
        let node = if self.is_full() {
            self.try_reserve_node()?;
            self.new_node()
        } else {
            // Grow the list at the back, then move the new last node in place.
            let node = self.back;
            self.back = self.nodes[node].next;
            self.link_out(node)
        };
        self.occupy(node, elt);
        self.link_in(location, node);
        #[cfg(feature = "audit")]
        self.assert_links();
        Ok(self.position(node))
    }

    /// Appends an element to the list, and returns its position.
    ///
    /// It is the same as [`insert_at`](List::insert_at) at
    /// [`end`](List::end).
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// let at = list.insert('a').unwrap();
    /// list.insert('b').unwrap();
    /// assert_eq!(list[at], 'a');
    /// assert_eq!(list.back(), Some(&'b'));
    /// ```
    pub fn insert(&mut self, elt: T) -> Result<Position, Error> {
        self.insert_at(self.end(), elt)
    }

    /// Removes the element at the position `at`, and returns the position of
    /// the element that followed it.
    ///
    /// The node of the element is moved to the spare capacity of the ring.
    ///
    /// # Errors
    ///
    /// - [`Error::SentinelPosition`] if `at` is a sentinel, such as
    ///   [`end`](List::end);
    /// - [`Error::DetachedPosition`] if `at` does not refer to an element of
    ///   this list.
    ///
    /// The list is unchanged on error.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{Error, List};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// let next = list.remove_at(list.begin()).unwrap();
    /// assert_eq!(list[next], 2);
    /// assert_eq!(list.remove_at(list.end()), Err(Error::SentinelPosition));
    /// assert_eq!(Vec::from_iter(list), vec![2, 3]);
    /// ```
    pub fn remove_at(&mut self, at: Position) -> Result<Position, Error> {
        self.unlink(at).map(|(next, _)| self.position(next))
    }

    /// Returns the position of the first element, or [`end`](List::end) if
    /// the list is empty.
    pub fn begin(&self) -> Position {
        self.position(self.first_node())
    }

    /// Returns the position past the last element, which is the back
    /// sentinel.
    pub fn end(&self) -> Position {
        self.position(self.back)
    }

    /// Returns the position of the last element, or [`rend`](List::rend) if
    /// the list is empty.
    pub fn rbegin(&self) -> Position {
        self.position(self.last_node())
    }

    /// Returns the position before the first element, which is the front
    /// sentinel.
    pub fn rend(&self) -> Position {
        self.position(self.front)
    }

    /// Returns the position following `at` in the ring. A detached position,
    /// or one of another list, gives a detached position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, Position};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2]);
    /// let at = list.next_of(list.begin());
    /// assert_eq!(list[at], 2);
    /// assert_eq!(list.next_of(at), list.end());
    /// assert_eq!(list.next_of(Position::DETACHED), Position::DETACHED);
    /// ```
    pub fn next_of(&self, at: Position) -> Position {
        self.resolve(at)
            .map_or(Position::DETACHED, |node| self.position(self.nodes[node].next))
    }

    /// Returns the position preceding `at` in the ring. A detached position,
    /// or one of another list, gives a detached position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2]);
    /// let at = list.prev_of(list.end());
    /// assert_eq!(at, list.rbegin());
    /// assert_eq!(list[at], 2);
    /// ```
    pub fn prev_of(&self, at: Position) -> Position {
        self.resolve(at)
            .map_or(Position::DETACHED, |node| self.position(self.nodes[node].prev))
    }

    /// Returns a reference to the element at `at`, or `None` if `at` does not
    /// refer to an element of this list: a sentinel, a spare node, or a
    /// detached position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, Position};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2]);
    /// assert_eq!(list.get(list.begin()), Some(&1));
    /// assert_eq!(list.get(list.end()), None);
    /// assert_eq!(list.get(Position::DETACHED), None);
    /// ```
    pub fn get(&self, at: Position) -> Option<&T> {
        let node = self.resolve(at).filter(|&node| self.is_element(node))?;
        self.nodes[node].element.as_ref()
    }

    /// Returns a mutable reference to the element at `at`, or `None` if `at`
    /// does not refer to an element of this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2]);
    /// if let Some(x) = list.get_mut(list.rbegin()) {
    ///     *x *= 10;
    /// }
    /// assert_eq!(list.back(), Some(&20));
    /// ```
    pub fn get_mut(&mut self, at: Position) -> Option<&mut T> {
        let node = self.resolve(at).filter(|&node| self.is_element(node))?;
        self.nodes[node].element.as_mut()
    }

    /// Provides a cursor at the given position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, ReadCursor};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let cursor = list.cursor_at(list.includes(&2));
    /// assert_eq!(cursor.current(), Some(&2));
    /// ```
    pub fn cursor_at(&self, at: Position) -> Cursor<'_, T> {
        Cursor::new(self, at)
    }

    /// Provides a cursor at the first element.
    ///
    /// The cursor is at the back sentinel if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, ReadCursor};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let cursor = list.cursor_start();
    /// assert_eq!(cursor.current(), Some(&1));
    /// ```
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.begin())
    }

    /// Provides a cursor at the back sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, ReadCursor};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_end();
    /// assert_eq!(cursor.current(), None);
    /// cursor.move_prev();
    /// assert_eq!(cursor.current(), Some(&3));
    /// ```
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.end())
    }

    /// Provides a cursor with editing operations at the given position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, WriteCursor};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let at = list.rbegin();
    /// *list.cursor_at_mut(at).get_mut() *= 5;
    /// assert_eq!(list.back(), Some(&15));
    /// ```
    pub fn cursor_at_mut(&mut self, at: Position) -> CursorMut<'_, T> {
        CursorMut::new(self, at)
    }

    /// Provides a cursor with editing operations at the first element.
    ///
    /// The cursor is at the back sentinel if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, ReadCursor, WriteCursor};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    ///
    /// if let Some(x) = cursor.current_mut() {
    ///     *x *= 5;
    /// }
    /// assert_eq!(cursor.current(), Some(&5));
    /// ```
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let at = self.begin();
        CursorMut::new(self, at)
    }

    /// Provides a cursor with editing operations at the back sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, ReadCursor};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_end_mut();
    ///
    /// cursor.insert(4).unwrap();
    /// assert!(cursor.is_end());
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4]);
    /// ```
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let at = self.end();
        CursorMut::new(self, at)
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&11));
    /// assert_eq!(iter.next(), Some(&12));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Removes every element from the list and returns them as an iterator.
    /// The nodes are kept as spare capacity.
    ///
    /// Elements not consumed by the iterator are dropped with it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert_eq!(Vec::from_iter(list.drain()), vec![1, 2, 3]);
    /// assert!(list.is_empty());
    /// assert_eq!(list.excess(), 3);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain::new(self)
    }

    /// Appends a copy of every element of `other` to the back of the list.
    ///
    /// Spare nodes of the list are reused before new ones are allocated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*m*) time, where *m* is the
    /// length of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list1 = List::new();
    /// list1.push_back('a');
    ///
    /// let mut list2 = List::new();
    /// list2.push_back('b');
    /// list2.push_back('c');
    ///
    /// list1.append(&list2);
    ///
    /// let mut iter = list1.iter();
    /// assert_eq!(iter.next(), Some(&'a'));
    /// assert_eq!(iter.next(), Some(&'b'));
    /// assert_eq!(iter.next(), Some(&'c'));
    /// assert!(iter.next().is_none());
    ///
    /// assert_eq!(list2.len(), 2);
    /// ```
    pub fn append(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.extend(other.iter().cloned());
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dereference a position.
///
/// # Panics
///
/// Panics if the position is detached or made by another list, or if it
/// holds no element.
impl<T> Index<Position> for List<T> {
    type Output = T;

    fn index(&self, at: Position) -> &T {
        assert!(
            self.resolve(at).is_some(),
            "Cannot dereference a detached position"
        );
        self.get(at)
            .expect("Cannot dereference a position without element")
    }
}

/// Dereference a position mutably.
///
/// # Panics
///
/// Panics if the position is detached or made by another list, or if it
/// holds no element.
impl<T> IndexMut<Position> for List<T> {
    fn index_mut(&mut self, at: Position) -> &mut T {
        assert!(
            self.resolve(at).is_some(),
            "Cannot dereference a detached position"
        );
        self.get_mut(at)
            .expect("Cannot dereference a position without element")
    }
}

impl<T> Node<T> {
    /// Create a detached node with given element.
    pub(crate) fn detached(element: Option<T>) -> Self {
        Node {
            next: DETACHED,
            prev: DETACHED,
            stamp: VACANT,
            element,
        }
    }
}

#[cfg(debug_assertions)]
impl<T> List<T> {
    fn assert_adjacent(&self, prev: usize, next: usize) {
        assert_eq!(self.nodes[prev].next, next);
        assert_eq!(self.nodes[next].prev, prev);
    }
}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}
