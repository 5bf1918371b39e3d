//! Structural checks and textual views of a [`List`].
//!
//! These are debugging aids: they read the ring as it is, including its
//! sentinels and spare nodes, and never modify it.

use crate::list::{List, Node};
use std::fmt;
use std::fmt::Write;

/// A structural fault of the ring found by [`List::audit`].
///
/// Faults are located by *link number*: the number of steps from the front
/// sentinel, walking forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkFault {
    /// `node.next.prev` is not `node`.
    Forward { link: usize },
    /// `node.prev.next` is not `node`.
    Reverse { link: usize },
    /// A link of the node is not an index of the arena.
    Dangling { link: usize },
    /// A node between the sentinels holds no element.
    VacantElement { link: usize },
    /// A node is marked as an element outside the active arc, or as spare
    /// inside it.
    ArcMismatch { link: usize },
    /// The back sentinel was not met on the way around the ring.
    BackMissing,
    /// The walk did not come back to the front sentinel.
    Unclosed { count: usize },
    /// The ring does not go through every node of the arena.
    CountMismatch {
        count: usize,
        size: usize,
        excess: usize,
        nodes: usize,
    },
}

impl fmt::Display for LinkFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkFault::Forward { link } => write!(f, " ** forward check failure at link {}", link),
            LinkFault::Reverse { link } => write!(f, " ** reverse check failure at link {}", link),
            LinkFault::Dangling { link } => write!(f, " ** dangling index at link {}", link),
            LinkFault::VacantElement { link } => write!(f, " ** vacant element at link {}", link),
            LinkFault::ArcMismatch { link } => write!(f, " ** arc mismatch at link {}", link),
            LinkFault::BackMissing => f.write_str(" ** back sentinel missing from the ring"),
            LinkFault::Unclosed { count } => {
                write!(f, " ** ring not closed after {} links", count)
            }
            LinkFault::CountMismatch {
                count,
                size,
                excess,
                nodes,
            } => write!(
                f,
                " ** link count mismatch: count = {} , size = {} , excess = {} , nodes = {}",
                count, size, excess, nodes
            ),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Arc {
    Front,
    Active,
    Free,
}

impl<T> List<T> {
    /// Walk the whole ring once and report every structural fault found.
    ///
    /// The walk takes at most as many steps as there are nodes, so it
    /// terminates even on corrupted links. An empty result means the ring is
    /// sound.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(0..8);
    /// list.remove_value(&3);
    /// list.clear();
    /// assert!(list.audit().is_empty());
    /// ```
    pub fn audit(&self) -> Vec<LinkFault> {
        let nodes = self.nodes.len();
        let mut faults = Vec::new();
        let (mut size, mut excess) = (0, 0);
        let mut arc = Arc::Front;
        let mut count = 0;
        let mut node = self.front;
        loop {
            let Node {
                next,
                prev,
                stamp,
                ref element,
            } = self.nodes[node];
            let active = arc == Arc::Active && node != self.back;
            if (stamp == self.epoch) != active {
                faults.push(LinkFault::ArcMismatch { link: count });
            }
            if node == self.back {
                arc = Arc::Free;
            } else if arc == Arc::Active {
                size += 1;
                if element.is_none() {
                    faults.push(LinkFault::VacantElement { link: count });
                }
            } else if arc == Arc::Free {
                excess += 1;
            }
            if next >= nodes {
                faults.push(LinkFault::Dangling { link: count });
                return faults;
            }
            if self.nodes[next].prev != node {
                faults.push(LinkFault::Forward { link: count });
            }
            if prev >= nodes {
                faults.push(LinkFault::Dangling { link: count });
            } else if self.nodes[prev].next != node {
                faults.push(LinkFault::Reverse { link: count });
            }
            if arc == Arc::Front {
                arc = Arc::Active;
            }
            count += 1;
            node = next;
            if node == self.front || count >= nodes {
                break;
            }
        }
        if node != self.front {
            faults.push(LinkFault::Unclosed { count });
        }
        if arc != Arc::Free {
            faults.push(LinkFault::BackMissing);
        }
        if count != nodes {
            faults.push(LinkFault::CountMismatch {
                count,
                size,
                excess,
                nodes,
            });
        }
        faults
    }

    /// Write every structural fault of the ring to `sink`, one per line.
    /// Nothing is written for a sound ring.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter(['a', 'b']);
    /// let mut report = String::new();
    /// list.check_links(&mut report).unwrap();
    /// assert!(report.is_empty());
    /// ```
    pub fn check_links<W: Write>(&self, sink: &mut W) -> fmt::Result {
        self.audit()
            .iter()
            .try_for_each(|fault| writeln!(sink, "{}", fault))
    }

    /// Write the elements to `sink`, from front to back.
    ///
    /// With a separator, it is written before each element; without, the
    /// elements are written back to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut out = String::new();
    /// list.display(&mut out, Some(',')).unwrap();
    /// assert_eq!(out, ",1,2,3");
    /// assert_eq!(list.to_string(), "123");
    /// ```
    pub fn display<W: Write>(&self, sink: &mut W, separator: Option<char>) -> fmt::Result
    where
        T: fmt::Display,
    {
        for element in self.iter() {
            if let Some(separator) = separator {
                sink.write_char(separator)?;
            }
            write!(sink, "{}", element)?;
        }
        Ok(())
    }

    /// Write the whole ring to `sink`, starting at the first element and
    /// going once around, sentinels and spare nodes included, followed by a
    /// newline.
    ///
    /// Nodes without an element are written as `_`. Spare nodes may still
    /// show an element that was removed but not yet dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// list.pop_back();
    /// let mut out = String::new();
    /// list.dump(&mut out, Some(' ')).unwrap();
    /// assert_eq!(out, " 1 2 _ _ _\n");
    /// ```
    pub fn dump<W: Write>(&self, sink: &mut W, separator: Option<char>) -> fmt::Result
    where
        T: fmt::Display,
    {
        let start = self.first_node();
        let mut node = start;
        for _ in 0..self.nodes.len() {
            let current = match self.nodes.get(node) {
                Some(current) => current,
                None => break,
            };
            if let Some(separator) = separator {
                sink.write_char(separator)?;
            }
            match &current.element {
                Some(element) => write!(sink, "{}", element)?,
                None => sink.write_char('_')?,
            }
            node = current.next;
            if node == start {
                break;
            }
        }
        sink.write_char('\n')
    }
}

impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(f, None)
    }
}

#[cfg(test)]
mod tests {
    use super::LinkFault;
    use crate::list::{List, Node};
    use std::iter::FromIterator;

    fn report<T>(list: &List<T>) -> String {
        let mut report = String::new();
        list.check_links(&mut report).unwrap();
        report
    }

    #[test]
    fn test_sound_rings() {
        let mut list = List::new();
        assert!(list.audit().is_empty());
        list.extend(0..6);
        list.pop_front();
        list.remove_value(&3);
        list.insert_at(list.begin(), 9).unwrap();
        assert!(list.audit().is_empty());
        list.clear();
        assert!(list.audit().is_empty());
        list.release();
        assert_eq!(report(&list), "");
    }

    #[test]
    fn test_broken_links() {
        let mut list = List::from_iter([1, 2, 3]);
        // Arena: front, back, then the elements in order.
        list.nodes[3].prev = 4;
        assert_eq!(
            list.audit(),
            vec![LinkFault::Forward { link: 1 }, LinkFault::Reverse { link: 2 }]
        );
        assert_eq!(
            report(&list),
            " ** forward check failure at link 1\n ** reverse check failure at link 2\n"
        );
    }

    #[test]
    fn test_dangling_and_vacant() {
        let mut list = List::from_iter([1, 2, 3]);
        list.nodes[2].element = None;
        assert_eq!(list.audit(), vec![LinkFault::VacantElement { link: 1 }]);

        list.nodes[4].next = 99;
        assert_eq!(
            list.audit(),
            vec![
                LinkFault::VacantElement { link: 1 },
                LinkFault::Dangling { link: 3 }
            ]
        );
    }

    #[test]
    fn test_arc_mismatch() {
        let mut list = List::from_iter([1, 2, 3]);
        list.nodes[3].stamp = 0;
        assert_eq!(list.audit(), vec![LinkFault::ArcMismatch { link: 2 }]);

        list.nodes[3].stamp = list.epoch;
        list.pop_front();
        list.nodes[2].stamp = list.epoch;
        assert_eq!(report(&list), " ** arc mismatch at link 0\n");
    }

    #[test]
    fn test_orphan_node() {
        let mut list = List::from_iter([1, 2, 3]);
        list.nodes.push(Node::detached(Some(4)));
        assert_eq!(
            list.audit(),
            vec![LinkFault::CountMismatch {
                count: 5,
                size: 3,
                excess: 0,
                nodes: 6
            }]
        );
        assert_eq!(
            report(&list),
            " ** link count mismatch: count = 5 , size = 3 , excess = 0 , nodes = 6\n"
        );
    }

    #[test]
    fn test_display() {
        let list = List::from_iter(['a', 'b', 'c']);
        let mut out = String::new();
        list.display(&mut out, None).unwrap();
        assert_eq!(out, "abc");
        out.clear();
        list.display(&mut out, Some('\t')).unwrap();
        assert_eq!(out, "\ta\tb\tc");
        assert_eq!(format!("{}", List::<u8>::new()), "");
        assert_eq!(format!("{:?}", list), "['a', 'b', 'c']");
    }

    #[test]
    fn test_dump() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut out = String::new();
        list.dump(&mut out, None).unwrap();
        assert_eq!(out, "123__\n");

        // Cleared elements linger in the spare nodes.
        list.clear();
        list.push_back(7);
        out.clear();
        list.dump(&mut out, Some(' ')).unwrap();
        assert_eq!(out, " 7 2 3 _ _\n");
    }
}
