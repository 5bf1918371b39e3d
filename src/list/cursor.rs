use crate::error::Error;
use crate::list::List;
use std::fmt;
use std::fmt::Formatter;
use std::ptr;

/// A handle to one node of a [`List`], as returned by [`List::begin`],
/// [`List::insert_at`] and friends.
///
/// A `Position` does not borrow the list, but it remembers which list made
/// it: the list rejects positions made by any other list, its own clones
/// included. A position stays meaningful as long as its node stays in the
/// list. Once the element is removed, or the list is cleared, positional
/// operations refuse the position until its node holds an element again;
/// it then refers to that new element.
///
/// The default position is *detached*: it refers to no node at all.
///
/// # Examples
///
/// ```
/// use ring_list::{List, Position};
/// use std::iter::FromIterator;
///
/// let list = List::from_iter(['a', 'b']);
/// let at = list.begin();
/// assert_eq!(list[at], 'a');
/// assert_eq!(list[list.next_of(at)], 'b');
///
/// assert!(Position::default().is_detached());
/// assert_eq!(list.get(Position::default()), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position(Option<NodeRef>);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct NodeRef {
    list: usize,
    node: usize,
}

impl Position {
    /// The position that refers to no node.
    pub const DETACHED: Position = Position(None);

    pub(crate) fn new(list: usize, node: usize) -> Self {
        Position(Some(NodeRef { list, node }))
    }

    /// The arena index of the position, if it was made by the list `list`.
    pub(crate) fn node_in(self, list: usize) -> Option<usize> {
        self.0
            .filter(|slot| slot.list == list)
            .map(|slot| slot.node)
    }

    /// Returns `true` if the position refers to no node.
    pub fn is_detached(self) -> bool {
        self.0.is_none()
    }
}

/// Read access to a list through a movable position.
///
/// Implementors only provide the list and the position; navigation and
/// dereference come for free.
pub trait ReadCursor {
    type Item;

    /// Temporarily view the list via an immutable reference.
    fn view(&self) -> &List<Self::Item>;

    /// Returns the position of the cursor.
    fn position(&self) -> Position;

    /// Move the cursor to the given position.
    fn seek(&mut self, at: Position);

    /// Returns `true` if the cursor refers to no node of its list.
    fn is_detached(&self) -> bool {
        self.view().resolve(self.position()).is_none()
    }

    /// Returns `true` if the cursor is at the back sentinel, past the last
    /// element.
    fn is_end(&self) -> bool {
        self.position() == self.view().end()
    }

    /// Move the cursor to the next node of the ring. A detached cursor stays
    /// detached.
    ///
    /// Past [`end`](List::end), the cursor visits the spare nodes, where it
    /// sees no element and cannot insert nor remove.
    ///
    /// This operation should compute in *O*(*1*) time.
    fn move_next(&mut self) {
        let next = self.view().next_of(self.position());
        self.seek(next);
    }

    /// Move the cursor to the previous node of the ring. A detached cursor
    /// stays detached.
    ///
    /// This operation should compute in *O*(*1*) time.
    fn move_prev(&mut self) {
        let prev = self.view().prev_of(self.position());
        self.seek(prev);
    }

    /// Returns the element at the cursor, or `None` if the cursor is
    /// detached, at a sentinel or at a spare node.
    fn current(&self) -> Option<&Self::Item> {
        self.view().get(self.position())
    }

    /// Returns the element at the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is not at an element.
    fn get(&self) -> &Self::Item {
        &self.view()[self.position()]
    }
}

/// Write access to the element under a cursor.
pub trait WriteCursor: ReadCursor {
    /// Returns the element at the cursor mutably, or `None` if the cursor
    /// is not at an element.
    fn current_mut(&mut self) -> Option<&mut Self::Item>;

    /// Returns the element at the cursor mutably.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is not at an element.
    fn get_mut(&mut self) -> &mut Self::Item {
        assert!(
            !self.is_detached(),
            "Cannot dereference a detached position"
        );
        match self.current_mut() {
            Some(element) => element,
            None => panic!("Cannot dereference a position without element"),
        }
    }
}

/// A cursor over a `List`.
///
/// A `Cursor` is like an iterator, except that it can freely seek back-and-forth,
/// and it walks the whole ring, sentinels and spare nodes included. Spare
/// nodes hold no element as far as the cursor is concerned.
///
/// # Examples
///
/// Here is a simple example showing how the cursors work.
/// ```
/// use ring_list::{List, ReadCursor};
/// use std::iter::FromIterator;
///
/// // Create a list: [ A B C D ]
/// let list = List::from_iter(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D ]
/// let mut cursor = list.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [ A|B C D ]
/// cursor.move_next();
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // Create a cursor in the end: [ A B C D|]
/// let mut cursor = list.cursor_end();
/// assert_eq!(cursor.current(), None);
/// assert!(cursor.is_end());
///
/// // Move cursor backward: [ A B C|D ]
/// cursor.move_prev();
/// assert_eq!(cursor.get(), &'D');
/// ```
pub struct Cursor<'a, T: 'a> {
    list: &'a List<T>,
    position: Position,
}

/// A cursor over a `List` with editing operations.
///
/// A `CursorMut` is like an iterator, except that it can freely seek back-and-forth,
/// and can safely mutate the list during iteration. This is because the lifetime of
/// its yielded references is tied to its own lifetime, instead of just the underlying
/// list. This means cursors cannot yield multiple elements at once.
///
/// For convenience, [`ReadCursor::view`] provides a function to temporarily borrow
/// the list and returns an immutable reference whose lifetime is shorter than the
/// cursor.
///
/// # Examples
///
/// ```compile_fail
/// use ring_list::{List, ReadCursor};
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut cursor = list.cursor_start_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a> {
    list: &'a mut List<T>,
    position: Position,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        impl<'a, T: 'a> ReadCursor for $CURSOR<'a, T> {
            type Item = T;

            fn view(&self) -> &List<T> {
                self.list
            }

            fn position(&self) -> Position {
                self.position
            }

            fn seek(&mut self, at: Position) {
                self.position = at;
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("list", &self.list)
                    .field("position", &self.position)
                    .field("current", &self.current())
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, position: Position) -> Self {
        Self { list, position }
    }

    fn same_list_with(&self, other: &Self) -> bool {
        ptr::eq(self.list, other.list)
    }
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self::new(self.list, self.position)
    }
}

/// Compare cursors by its position.
///
/// Only cursors belong to the same list and have the same positions
/// are considered equal.
///
/// # Examples
/// ```
/// use ring_list::{List, ReadCursor};
/// use std::iter::FromIterator;
///
/// let list = List::from_iter([1, 2, 3]);
/// let cursor1 = list.cursor_start();
/// let mut cursor2 = cursor1.clone();
/// // The same list, and the same position.
/// assert_eq!(cursor1, cursor2);
///
/// cursor2.move_next();
/// // The same list, but different positions.
/// assert_ne!(cursor1, cursor2);
///
/// let another_list = list.clone();
/// let cursor3 = another_list.cursor_start();
/// // Different list, same node index.
/// assert_ne!(cursor1, cursor3);
/// ```
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_list_with(other) && self.position == other.position
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, position: Position) -> Self {
        Self { list, position }
    }

    /// Re-borrow the mutable cursor as a short-lived immutable one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.list, self.position)
    }

    /// Convert the mutable cursor to an immutable one.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.list, self.position)
    }

    /// Add an element before the cursor position, and return the position
    /// of the new element. The cursor stays put.
    ///
    /// It is the same as [`List::insert_at`] at the cursor, including the
    /// errors, except it avoids another mutable borrow of the list while
    /// the mutable cursor is being used.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, ReadCursor};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    /// cursor.move_next();
    ///
    /// cursor.insert(4).unwrap(); // becomes [1, 4, 2, 3]
    /// assert_eq!(cursor.current(), Some(&2));
    ///
    /// let mut cursor = list.cursor_end_mut();
    /// cursor.insert(5).unwrap(); // becomes [1, 4, 2, 3, 5]
    /// assert!(cursor.is_end());
    /// cursor.move_prev();
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 4, 2, 3, 5]);
    /// ```
    pub fn insert(&mut self, item: T) -> Result<Position, Error> {
        let end = self.list.end();
        let inserted = self.list.insert_at(self.position, item)?;
        // Appending hands the back sentinel role over to another node.
        if self.position == end {
            self.position = self.list.end();
        }
        Ok(inserted)
    }

    /// Remove the element at the cursor and return it, or return `None`
    /// if the cursor is not at an element. After removal, the cursor
    /// is moved to the next node unless no removing is happened.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, ReadCursor};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(0..10);
    /// let at = list.includes(&5);
    /// let mut cursor = list.cursor_at_mut(at);
    ///
    /// assert_eq!(cursor.remove(), Some(5)); // becomes [0, 1, 2, 3, 4, 6, 7, 8, 9]
    /// assert_eq!(cursor.current(), Some(&6));
    ///
    /// let mut cursor = list.cursor_end_mut();
    /// assert_eq!(cursor.remove(), None);
    /// assert!(cursor.is_end());
    ///
    /// assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 4, 6, 7, 8, 9]);
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        let (next, element) = self.list.unlink(self.position).ok()?;
        self.position = self.list.position(next);
        Some(element)
    }
}

impl<'a, T: 'a> WriteCursor for CursorMut<'a, T> {
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, ReadCursor, WriteCursor};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// // Create a cursor and mutate the element in the current node.
    /// let mut cursor = list.cursor_start_mut();
    /// *cursor.current_mut().unwrap() *= 5;
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// // Cannot mutate the back sentinel.
    /// assert!(list.cursor_end_mut().current_mut().is_none());
    /// ```
    fn current_mut(&mut self) -> Option<&mut T> {
        self.list.get_mut(self.position)
    }
}

impl<'a, T: 'a> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        cursor.into_cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::{Position, ReadCursor, WriteCursor};
    use crate::list::List;
    use crate::Error;
    use std::iter::FromIterator;

    #[test]
    fn cursor_walks_the_ring() {
        let mut list = List::from_iter([1, 2, 3]);
        list.pop_front();
        list.push_back(4);
        let mut cursor = list.cursor_start();
        let mut seen = Vec::new();
        while !cursor.is_end() {
            seen.push(*cursor.get());
            cursor.move_next();
        }
        assert_eq!(seen, vec![2, 3, 4]);

        // No spare node is left, so the front sentinel follows the back one.
        assert!(list.is_full());
        cursor.move_next();
        assert_eq!(cursor.position(), list.rend());
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&2));
        cursor.move_prev();
        assert_eq!(cursor.current(), None);
        assert!(!cursor.is_end());
    }

    #[test]
    fn cursor_detached_stays_detached() {
        let list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor_at(Position::DETACHED);
        assert!(cursor.is_detached());
        cursor.move_next();
        assert!(cursor.is_detached());
        cursor.move_prev();
        assert!(cursor.is_detached());
        assert_eq!(cursor.current(), None);
        cursor.seek(list.rbegin());
        assert_eq!(cursor.get(), &3);
    }

    #[test]
    fn cursor_equality() {
        let list = List::from_iter([1, 2, 3]);
        let other = list.clone();
        let cursor = list.cursor_start();
        assert_eq!(cursor, list.cursor_at(list.begin()));
        assert_ne!(cursor, list.cursor_end());
        assert_ne!(cursor, other.cursor_start());
    }

    #[test]
    fn cursor_mut_insert_and_remove() {
        let mut list = List::from_iter(0..5);
        let at = list.includes(&2);
        let mut cursor = list.cursor_at_mut(at);

        assert_eq!(cursor.remove(), Some(2));
        assert_eq!(cursor.get(), &3);
        let inserted = cursor.insert(20).unwrap();
        assert_eq!(cursor.get(), &3);
        assert_eq!(cursor.view()[inserted], 20);

        *cursor.get_mut() = 30;
        cursor.move_prev();
        assert_eq!(cursor.current(), Some(&20));

        let cursor = cursor.into_cursor();
        assert_eq!(cursor.current(), Some(&20));
        assert_eq!(Vec::from_iter(list), vec![0, 1, 20, 30, 4]);
    }

    #[test]
    fn cursor_mut_insert_at_end_follows_end() {
        let mut list = List::new();
        let mut cursor = list.cursor_end_mut();
        for i in 0..4 {
            cursor.insert(i).unwrap();
            assert!(cursor.is_end());
        }
        assert_eq!(cursor.as_cursor().view().len(), 4);
        cursor.move_prev();
        assert_eq!(cursor.remove(), Some(3));
        assert!(cursor.is_end());
        cursor.insert(5).unwrap();
        assert!(cursor.is_end());
        assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 5]);
    }

    #[test]
    fn cursor_mut_rejects_sentinels() {
        let mut list = List::from_iter([1, 2]);
        let at = list.rend();
        let mut cursor = list.cursor_at_mut(at);
        assert_eq!(cursor.insert(0), Err(Error::SentinelPosition));
        assert_eq!(cursor.remove(), None);
        assert_eq!(cursor.current_mut(), None);
        assert_eq!(cursor.position(), at);

        cursor.seek(Position::DETACHED);
        assert_eq!(cursor.insert(0), Err(Error::DetachedPosition));
        assert_eq!(cursor.remove(), None);
        assert_eq!(Vec::from_iter(list), vec![1, 2]);
    }

    #[test]
    fn cursor_mut_sees_no_element_at_spare_nodes() {
        let mut list = List::from_iter([1, 2, 3, 4]);
        list.pop_back();
        list.pop_back();
        let mut cursor = list.cursor_end_mut();
        cursor.move_next();
        cursor.move_next();
        assert!(!cursor.is_end());
        assert!(!cursor.is_detached());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.current_mut(), None);
        assert_eq!(cursor.insert(99), Err(Error::DetachedPosition));
        assert_eq!(cursor.remove(), None);
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 2]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.excess(), 2);
        assert!(list.audit().is_empty());

        // Cleared elements linger in their nodes, but are gone from the list.
        list.clear();
        list.push_front(7);
        let mut out = String::new();
        list.dump(&mut out, Some(' ')).unwrap();
        assert_eq!(out, " 7 1 2 3 4 _\n");

        let mut cursor = list.cursor_end_mut();
        cursor.move_next();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.remove(), None);
        assert_eq!(cursor.insert(8), Err(Error::DetachedPosition));
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![7]);
        assert_eq!(list.excess(), 4);
        assert!(list.audit().is_empty());
    }

    #[test]
    fn cursor_at_position_of_another_list() {
        let list = List::from_iter([1, 2, 3]);
        let other = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor_at(other.begin());
        assert!(cursor.is_detached());
        assert_eq!(cursor.current(), None);
        cursor.move_next();
        assert!(cursor.is_detached());
    }

    #[test]
    #[should_panic(expected = "Cannot dereference a detached position")]
    fn cursor_get_detached() {
        let mut list = List::from_iter([1]);
        let mut cursor = list.cursor_at_mut(Position::DETACHED);
        cursor.get_mut();
    }

    #[test]
    #[should_panic(expected = "Cannot dereference a position without element")]
    fn cursor_get_sentinel() {
        let list = List::from_iter([1]);
        list.cursor_end().get();
    }
}
