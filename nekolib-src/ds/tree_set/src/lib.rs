//! Sorted set on an AVL tree, with navigation queries, fail-fast iterators
//! and a live descending view.
//!
//! ```
//! use tree_set::TreeSet;
//!
//! let mut set = TreeSet::<i32>::new();
//! for x in [51, 23, 90, 42] {
//!     set.add(x)?;
//! }
//! assert_eq!(set.to_vec(), [23, 42, 51, 90]);
//! assert_eq!(set.lower(&42)?, Some(23));
//! assert_eq!(set.ceiling(&43)?, Some(51));
//!
//! let mut desc = set.descending_set();
//! assert_eq!(desc.to_vec(), [90, 51, 42, 23]);
//! assert_eq!(desc.lower(&42)?, Some(51));
//!
//! desc.add(5)?;
//! assert_eq!(set.first(), Some(5));
//! # Ok::<(), tree_set::Error>(())
//! ```
//!
//! Elements are compared either by their [`PartialOrd`] implementation or
//! by a [`Comparator`]. A pair for which `partial_cmp` gives `None` is
//! reported as [`Error::TypeMismatch`] by the operation that compared them,
//! and that operation leaves the set untouched.

use std::{cell::RefCell, fmt, rc::Rc};

use log::debug;

mod avl;
#[cfg(test)]
mod debug;
mod error;
mod iter;
mod order;

pub use error::{Error, Result};
pub use iter::Iter;
pub use order::Comparator;

use avl::{AvlTree, NodeId, Probe};
use order::Order;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn rev(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// Storage shared by a set and all of its descending views.
pub(crate) struct Shared<T> {
    pub(crate) tree: AvlTree<T>,
    pub(crate) mod_count: u64,
}

pub struct TreeSet<T> {
    shared: Rc<RefCell<Shared<T>>>,
    dir: Direction,
}

fn present<U>(elt: Option<U>) -> Result<U> {
    elt.ok_or(Error::InvalidArgument("element"))
}

impl<T: PartialOrd> TreeSet<T> {
    pub fn new() -> Self { Self::from_order(Order::natural()) }
}

impl<T: PartialOrd> Default for TreeSet<T> {
    fn default() -> Self { Self::new() }
}

impl<T> TreeSet<T> {
    pub fn with_comparator(
        cmp: impl Into<Option<Comparator<T>>>,
    ) -> Result<Self> {
        let cmp = cmp.into().ok_or(Error::InvalidArgument("comparator"))?;
        Ok(Self::from_order(Order::Explicit(cmp)))
    }

    fn from_order(order: Order<T>) -> Self {
        debug!(
            "new tree set ({})",
            if order.comparator().is_some() { "comparator" } else { "natural" }
        );
        let shared = Shared { tree: AvlTree::new(order), mod_count: 0 };
        Self {
            shared: Rc::new(RefCell::new(shared)),
            dir: Direction::Ascending,
        }
    }

    pub fn len(&self) -> usize { self.shared.borrow().tree.len() }
    pub fn is_empty(&self) -> bool { self.shared.borrow().tree.is_empty() }
    pub fn is_descending(&self) -> bool { self.dir == Direction::Descending }

    /// The comparator in the order of this handle, `None` under the natural
    /// order.
    pub fn comparator(&self) -> Option<Comparator<T>> {
        let shared = self.shared.borrow();
        let cmp = shared.tree.order().comparator()?;
        Some(match self.dir {
            Direction::Ascending => cmp.clone(),
            Direction::Descending => cmp.reversed(),
        })
    }

    /// Inserts `elt` unless an equal element is present.
    pub fn add(&mut self, elt: impl Into<Option<T>>) -> Result<bool> {
        let elt = present(elt.into())?;
        let mut shared = self.shared.borrow_mut();
        let added = shared.tree.insert(elt)?;
        if added {
            shared.mod_count += 1;
        }
        Ok(added)
    }

    pub fn remove<'a>(&mut self, elt: impl Into<Option<&'a T>>) -> Result<bool>
    where
        T: 'a,
    {
        let elt = present(elt.into())?;
        let mut shared = self.shared.borrow_mut();
        let removed = shared.tree.remove(elt)?.is_some();
        if removed {
            shared.mod_count += 1;
        }
        Ok(removed)
    }

    pub fn contains<'a>(&self, elt: impl Into<Option<&'a T>>) -> Result<bool>
    where
        T: 'a,
    {
        let elt = present(elt.into())?;
        Ok(self.shared.borrow().tree.find(elt)?.is_some())
    }

    pub fn clear(&mut self) {
        let mut shared = self.shared.borrow_mut();
        if !shared.tree.is_empty() {
            debug!("clearing {} elements", shared.tree.len());
            shared.tree.clear();
            shared.mod_count += 1;
        }
    }

    /// Adds every element of `iter`, stopping at the first failure, and
    /// returns how many were new.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        let mut added = 0;
        for elt in iter {
            if self.add(elt)? {
                added += 1;
            }
        }
        Ok(added)
    }

    fn first_node(&self, tree: &AvlTree<T>) -> Option<NodeId> {
        match self.dir {
            Direction::Ascending => tree.min(),
            Direction::Descending => tree.max(),
        }
    }
    fn last_node(&self, tree: &AvlTree<T>) -> Option<NodeId> {
        match self.dir {
            Direction::Ascending => tree.max(),
            Direction::Descending => tree.min(),
        }
    }

    fn probe<'a>(
        &self,
        elt: impl Into<Option<&'a T>>,
        probe: Probe,
    ) -> Result<Option<T>>
    where
        T: Clone + 'a,
    {
        let elt = present(elt.into())?;
        let probe = match self.dir {
            Direction::Ascending => probe,
            Direction::Descending => probe.flip(),
        };
        let shared = self.shared.borrow();
        let tree = &shared.tree;
        Ok(tree.probe(elt, probe)?.map(|x| tree.elt(x).clone()))
    }

    /// The greatest element strictly less than `elt`.
    pub fn lower<'a>(&self, elt: impl Into<Option<&'a T>>) -> Result<Option<T>>
    where
        T: Clone + 'a,
    {
        self.probe(elt, Probe::Lower)
    }
    /// The greatest element less than or equal to `elt`.
    pub fn floor<'a>(&self, elt: impl Into<Option<&'a T>>) -> Result<Option<T>>
    where
        T: Clone + 'a,
    {
        self.probe(elt, Probe::Floor)
    }
    /// The least element greater than or equal to `elt`.
    pub fn ceiling<'a>(
        &self,
        elt: impl Into<Option<&'a T>>,
    ) -> Result<Option<T>>
    where
        T: Clone + 'a,
    {
        self.probe(elt, Probe::Ceiling)
    }
    /// The least element strictly greater than `elt`.
    pub fn higher<'a>(
        &self,
        elt: impl Into<Option<&'a T>>,
    ) -> Result<Option<T>>
    where
        T: Clone + 'a,
    {
        self.probe(elt, Probe::Higher)
    }

    pub fn first(&self) -> Option<T>
    where
        T: Clone,
    {
        let shared = self.shared.borrow();
        let x = self.first_node(&shared.tree)?;
        Some(shared.tree.elt(x).clone())
    }
    pub fn last(&self) -> Option<T>
    where
        T: Clone,
    {
        let shared = self.shared.borrow();
        let x = self.last_node(&shared.tree)?;
        Some(shared.tree.elt(x).clone())
    }

    pub fn poll_first(&mut self) -> Option<T> {
        let mut shared = self.shared.borrow_mut();
        let x = self.first_node(&shared.tree)?;
        shared.mod_count += 1;
        Some(shared.tree.remove_node(x))
    }
    pub fn poll_last(&mut self) -> Option<T> {
        let mut shared = self.shared.borrow_mut();
        let x = self.last_node(&shared.tree)?;
        shared.mod_count += 1;
        Some(shared.tree.remove_node(x))
    }

    pub fn iter(&self) -> Iter<T> {
        Iter::new(Rc::clone(&self.shared), self.dir)
    }
    pub fn descending_iter(&self) -> Iter<T> {
        Iter::new(Rc::clone(&self.shared), self.dir.rev())
    }

    /// Another handle on the same elements, ordered the other way round.
    ///
    /// Changes made through either handle are visible through both, and
    /// invalidate the iterators of both.
    pub fn descending_set(&self) -> Self {
        debug!("new {:?} view", self.dir.rev());
        Self { shared: Rc::clone(&self.shared), dir: self.dir.rev() }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let shared = self.shared.borrow();
        shared.tree.elts(self.is_descending()).cloned().collect()
    }
}

impl<'a, T: Clone> IntoIterator for &'a TreeSet<T> {
    type Item = Result<T>;
    type IntoIter = Iter<T>;
    fn into_iter(self) -> Iter<T> { self.iter() }
}

impl<T: fmt::Debug> fmt::Debug for TreeSet<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        fmt.debug_set().entries(shared.tree.elts(self.is_descending())).finish()
    }
}


#[cfg(test)]
mod proptests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use crate::{Error, TreeSet};

    fn arbitrary_ops() -> impl Strategy<Value = Vec<(bool, i16)>> {
        proptest::collection::vec((any::<bool>(), -64_i16..64), 0..200)
    }

    fn replay(ops: &[(bool, i16)]) -> (TreeSet<i16>, BTreeSet<i16>) {
        let mut set = TreeSet::new();
        let mut model = BTreeSet::new();
        for &(add, x) in ops {
            if add {
                set.add(x).unwrap();
                model.insert(x);
            } else {
                set.remove(&x).unwrap();
                model.remove(&x);
            }
        }
        (set, model)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn size_counts_distinct(ops in arbitrary_ops()) {
            let (set, model) = replay(&ops);
            prop_assert_eq!(set.len(), model.len());
            set.shared.borrow().tree.verify();
        }

        #[test]
        fn iteration_is_strictly_increasing(ops in arbitrary_ops()) {
            let (set, _) = replay(&ops);
            let elts: Vec<_> = set.iter().collect::<Result<_, _>>().unwrap();
            prop_assert!(elts.windows(2).all(|w| w[0] < w[1]));
            if let (Some(first), Some(last)) = (set.first(), set.last()) {
                prop_assert!(elts.iter().all(|x| first <= *x && *x <= last));
            }

            let mut rev: Vec<_> =
                set.descending_iter().collect::<Result<_, _>>().unwrap();
            rev.reverse();
            prop_assert_eq!(elts, rev);
        }

        #[test]
        fn neighbors(ops in arbitrary_ops(), e in -70_i16..70) {
            let (set, _) = replay(&ops);
            let member = set.contains(&e).unwrap();
            let lower = set.lower(&e).unwrap();
            let floor = set.floor(&e).unwrap();
            let ceiling = set.ceiling(&e).unwrap();
            let higher = set.higher(&e).unwrap();

            prop_assert!(lower.map_or(true, |l| l < e));
            prop_assert!(higher.map_or(true, |h| e < h));
            prop_assert!(floor.map_or(true, |f| f <= e));
            prop_assert!(ceiling.map_or(true, |c| e <= c));
            prop_assert_eq!(member, floor == Some(e) && ceiling == Some(e));
        }

        #[test]
        fn descending_view_is_live(ops in arbitrary_ops(), x in any::<i16>()) {
            let (mut set, _) = replay(&ops);
            let desc = set.descending_set();
            let before = desc.len();
            let added = set.add(x).unwrap();
            prop_assert_eq!(desc.len(), before + usize::from(added));
        }

        #[test]
        fn only_real_changes_invalidate(
            ops in arbitrary_ops(),
            x in -64_i16..64,
        ) {
            let (mut set, _) = replay(&ops);
            let mut iter = set.iter();
            let added = set.add(x).unwrap();
            let res = iter.has_next();
            if added {
                prop_assert_eq!(res, Err(Error::ConcurrentModification));
            } else {
                prop_assert_eq!(res, Ok(true));
            }
        }
    }
}
