use crate::list::cursor::Position;
use crate::list::List;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::AddAssign;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

/// Cloning copies the elements only: the clone has no spare capacity, and
/// `clone_from` reuses the nodes the target already owns.
impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, other: &Self) {
        self.clear();
        self.extend(other.iter().cloned());
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

/// Append a copy of `other`, as [`List::append`] does.
///
/// # Examples
///
/// ```
/// use ring_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2]);
/// list += &List::from_iter([3, 4]);
/// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4]);
/// ```
impl<T: Clone> AddAssign<&List<T>> for List<T> {
    fn add_assign(&mut self, other: &List<T>) {
        self.append(other);
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
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
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Returns the position of the first element equal to the given value,
    /// or [`end`](List::end) if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter(['a', 'b', 'a']);
    /// assert_eq!(list.includes(&'a'), list.begin());
    /// assert_eq!(list.includes(&'z'), list.end());
    /// ```
    pub fn includes(&self, x: &T) -> Position
    where
        T: PartialEq<T>,
    {
        let mut node = self.first_node();
        while node != self.back {
            if self.nodes[node].element.as_ref() == Some(x) {
                break;
            }
            node = self.nodes[node].next;
        }
        self.position(node)
    }

    /// Removes every element equal to the given value, and returns how many
    /// were removed. Their nodes are kept as spare capacity.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([3, 1, 4, 1, 5]);
    /// assert_eq!(list.remove_value(&1), 2);
    /// assert_eq!(list.remove_value(&9), 0);
    /// assert_eq!(Vec::from_iter(list.iter().copied()), vec![3, 4, 5]);
    /// assert_eq!(list.excess(), 2);
    /// ```
    pub fn remove_value(&mut self, x: &T) -> usize
    where
        T: PartialEq<T>,
    {
        let mut removed = 0;
        let mut node = self.first_node();
        while node != self.back {
            let next = self.nodes[node].next;
            if self.nodes[node].element.as_ref() == Some(x) {
                self.demote(node);
                removed += 1;
            }
            node = next;
        }
        #[cfg(feature = "audit")]
        self.assert_links();
        removed
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::iter::FromIterator;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_eq_ignores_excess() {
        let mut list1 = List::new();
        let mut list2 = List::new();
        for i in 0..5 {
            list1.push_back(i);
            list2.push_front(4 - i);
        }
        assert_eq!(list1, list2);

        list2.push_back(5);
        assert_ne!(list1, list2);
        list2.pop_back();
        assert_eq!(list1, list2);
        assert_ne!(list1.excess(), list2.excess());
        assert_eq!(hash_of(&list1), hash_of(&list2));
    }

    #[test]
    fn test_ord() {
        let list = List::from_iter([1, 2, 3]);
        assert!(list < List::from_iter([1, 2, 4]));
        assert!(list > List::from_iter([1, 2]));
        assert!(List::<i32>::new() < list);
        let nan = List::from_iter([f64::NAN]);
        assert_eq!(nan.partial_cmp(&nan), None);
    }

    #[test]
    fn test_clone() {
        let mut list = List::from_iter(0..4);
        list.pop_front();
        let clone = list.clone();
        assert_eq!(clone, list);
        assert_eq!(clone.excess(), 0);

        let mut target = List::from_iter(10..20);
        let capacity = target.capacity();
        target.clone_from(&list);
        assert_eq!(target, list);
        assert_eq!(target.capacity(), capacity);
    }

    #[test]
    fn test_append_self_copy() {
        let mut list = List::from_iter([1, 2]);
        let copy = list.clone();
        list += &copy;
        list += &List::new();
        assert_eq!(Vec::from_iter(list), vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_search() {
        let mut list = List::from_iter([3, 1, 4, 1, 5]);
        assert!(list.contains(&4));
        assert!(!list.contains(&9));
        let at = list.includes(&1);
        assert_eq!(list.next_of(at), list.includes(&4));

        assert_eq!(list.remove_value(&3), 1);
        assert_eq!(list.remove_value(&5), 1);
        assert_eq!(list.remove_value(&1), 2);
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![4]);
        assert_eq!(list.includes(&1), list.end());
        assert_eq!(list.excess(), 4);
        assert!(list.audit().is_empty());
    }
}
