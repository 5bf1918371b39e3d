use crate::list::{List, Node};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the elements of a `List`.
///
/// It uses a pair of nodes `start..end` to represent a half-open arc
/// of the ring, where `start` is inclusive and `end` is not.
///
/// # Examples
///
/// ```compile_fail
/// use ring_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    nodes: &'a [Node<T>],
    start: usize,
    end: usize,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            nodes: &list.nodes,
            start: list.first_node(),
            end: list.back,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            start: self.start,
            end: self.end,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        self.clone().for_each(|element| {
            f.field(element);
        });
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let current = &self.nodes[self.start];
        self.start = current.next;
        current.element.as_ref()
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        self.end = self.nodes[self.end].prev;
        self.nodes[self.end].element.as_ref()
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `List`.
///
/// `start..end` denotes an arc of the ring.
///
/// Though the `IterMut` does not hold a reference from the list,
/// it actually *borrows* (mutably) from the list, so a phantom
/// marker of `&'a mut List<T>` is added to protect the list from
/// begin read.
///
/// # Examples
///
/// `List` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use ring_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    nodes: NonNull<Node<T>>,
    start: usize,
    end: usize,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        let start = list.first_node();
        let end = list.back;
        let nodes = NonNull::from(list.nodes.as_mut_slice()).cast();
        Self {
            nodes,
            start,
            end,
            _marker: PhantomData,
        }
    }

    fn node(&self, index: usize) -> *mut Node<T> {
        // SAFETY: every link of the ring is an index into the arena.
        unsafe { self.nodes.as_ptr().add(index) }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("IterMut");
        let mut index = self.start;
        while index != self.end {
            // SAFETY: `start..end` is an arc of the arena borrowed by the iterator,
            // and no element of it has been yielded yet.
            let current = unsafe { &*self.node(index) };
            if let Some(element) = &current.element {
                f.field(element);
            }
            index = current.next;
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let current = self.node(self.start);
        // SAFETY: `start` is in the borrowed arc, and leaves it right away,
        // so its element is handed out only once.
        unsafe {
            self.start = (*current).next;
            (*current).element.as_mut()
        }
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: only the links of `end` are read; its element is either
        // a sentinel's or one already yielded, and is not touched.
        self.end = unsafe { (*self.node(self.end)).prev };
        // SAFETY: the new `end` just left the borrowed arc, so its element is
        // handed out only once.
        unsafe { (*self.node(self.end)).element.as_mut() }
    }
}

/// An owning iterator over the elements of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.take_front()
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.take_back()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

/// A draining iterator over the elements of a `List`.
///
/// This `struct` is created by [`List::drain`]. The drained nodes go back to
/// the spare capacity of the list, and elements left in the iterator when it
/// is dropped are dropped too.
pub struct Drain<'a, T: 'a> {
    list: &'a mut List<T>,
}

impl<'a, T: 'a> Drain<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        Self { list }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Drain<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Drain").field(&self.list).finish()
    }
}

impl<'a, T: 'a> Iterator for Drain<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.take_front()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Drain<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.take_back()
    }
}

impl<'a, T: 'a> FusedIterator for Drain<'a, T> {}

impl<'a, T: 'a> Drop for Drain<'a, T> {
    fn drop(&mut self) {
        while self.list.take_front().is_some() {}
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(array: [T; N]) -> Self {
        Self::from_iter(array)
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::fmt::Debug;
    use std::iter::FromIterator;

    /// Build a list whose arena order differs from its element order.
    fn scrambled<T: Clone>(vec: &[T]) -> List<T> {
        let mut list = List::with_capacity(vec.len() / 2);
        let (head, tail) = vec.split_at(vec.len() / 2);
        tail.iter().cloned().for_each(|item| list.push_back(item));
        head.iter().rev().cloned().for_each(|item| list.push_front(item));
        list
    }

    #[test]
    fn test_iter() {
        macro_rules! test_iter {
            ($FN:ident, $ITER:ident $(, $REV:ident)?) => {
                fn $FN<T, I>(input: I, mid: usize)
                where
                    T: Eq + Debug + Clone,
                    I: IntoIterator<Item = T>,
                {
                    #[allow(unused_mut)]
                    let mut vec = Vec::from_iter(input);
                    #[allow(unused_mut)]
                    let mut list = scrambled(&vec);
                    let mut iter = list.$ITER() $( .$REV() )?;
                    for item in vec.$ITER() $( .$REV() )? {
                        assert_eq!(iter.next(), Some(item));
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);

                    let mut iter = list.$ITER() $( .$REV() )?;
                    for item in vec.$ITER() $( .$REV() )? .take(mid) {
                        assert_eq!(iter.next(), Some(item));
                    }
                    let mut iter = iter.rev();
                    for item in vec.$ITER() $( .$REV() )? .skip(mid).rev() {
                        assert_eq!(iter.next(), Some(item));
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                }
            };
        }
        test_iter!(test_iter, iter);
        test_iter!(test_iter_mut, iter_mut);
        test_iter!(test_back_iter, iter, rev);
        test_iter!(test_back_iter_mut, iter_mut, rev);

        fn test_case<T, I>(input: I, mid: usize)
        where
            T: Eq + Debug + Clone,
            I: IntoIterator<Item = T> + Clone,
        {
            test_iter(input.clone(), mid);
            test_iter_mut(input.clone(), mid);
            test_back_iter(input.clone(), mid);
            test_back_iter_mut(input.clone(), mid);
        }
        test_case(0..10, 10);
        test_case(0..10, 8);
        test_case(0..10, 5);
        test_case(0..10, 2);
        test_case(0..10, 0);
        test_case(0..2, 2);
        test_case(0..2, 1);
        test_case(0..2, 0);
        test_case(0..1, 1);
        test_case(0..1, 0);
        test_case(0..0, 0);
    }

    #[test]
    fn test_into_iter() {
        let list = scrambled(&[0, 1, 2, 3, 4, 5]);
        let mut iter = list.into_iter();
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next_back(), Some(5));
        assert_eq!(Vec::from_iter(iter.rev()), vec![4, 3, 2, 1]);

        let list = List::from([1, 2, 3]);
        assert_eq!(list.into_iter().last(), Some(3));
    }

    #[test]
    fn test_drain() {
        let mut list = List::from_iter(0..6);
        let capacity = list.capacity();
        let mut drain = list.drain();
        assert_eq!(drain.next(), Some(0));
        assert_eq!(drain.next_back(), Some(5));
        drop(drain);
        assert!(list.is_empty());
        assert_eq!(list.excess(), capacity);

        list.extend(&[7, 8]);
        assert_eq!(Vec::from_iter(list.drain().rev()), vec![8, 7]);
        assert_eq!(list.capacity(), capacity);
    }

    #[test]
    fn test_extend() {
        let mut list = List::from([1, 2]);
        list.extend(vec![3, 4]);
        list.extend(&[5, 6]);
        for element in &mut list {
            *element *= 10;
        }
        let collected: Vec<_> = (&list).into_iter().copied().collect();
        assert_eq!(collected, vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(format!("{:?}", list.iter()), "Iter(10, 20, 30, 40, 50, 60)");
        assert_eq!(
            format!("{:?}", list.iter_mut()),
            "IterMut(10, 20, 30, 40, 50, 60)"
        );
    }
}
