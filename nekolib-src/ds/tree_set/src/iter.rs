use std::{cell::RefCell, rc::Rc};

use log::warn;

use crate::{
    avl::NodeId,
    error::{Error, Result},
    Direction, Shared,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Cursor {
    Created,
    Positioned(NodeId),
    Exhausted,
    Invalid,
}

/// Fail-fast traversal over a [`TreeSet`](crate::TreeSet).
///
/// Any structural modification of the set after the iterator was created
/// makes every later call fail with [`Error::ConcurrentModification`].
/// As an [`Iterator`], the error is yielded once and the iterator then
/// stays empty.
pub struct Iter<T> {
    shared: Rc<RefCell<Shared<T>>>,
    expected: u64,
    dir: Direction,
    cursor: Cursor,
    fused: bool,
}

impl<T> Iter<T> {
    pub(crate) fn new(shared: Rc<RefCell<Shared<T>>>, dir: Direction) -> Self {
        let expected = shared.borrow().mod_count;
        Self { shared, expected, dir, cursor: Cursor::Created, fused: false }
    }

    fn check(&mut self) -> Result<()> {
        if self.cursor == Cursor::Invalid {
            return Err(Error::ConcurrentModification);
        }
        let live = self.shared.borrow().mod_count;
        if live != self.expected {
            warn!(
                "set modified during iteration (expected {}, found {live})",
                self.expected
            );
            self.cursor = Cursor::Invalid;
            return Err(Error::ConcurrentModification);
        }
        Ok(())
    }

    pub fn has_next(&mut self) -> Result<bool> {
        self.check()?;
        if self.cursor == Cursor::Created {
            let shared = self.shared.borrow();
            let first = match self.dir {
                Direction::Ascending => shared.tree.min(),
                Direction::Descending => shared.tree.max(),
            };
            self.cursor = first.map_or(Cursor::Exhausted, Cursor::Positioned);
        }
        Ok(matches!(self.cursor, Cursor::Positioned(_)))
    }

    pub fn try_next(&mut self) -> Result<T>
    where
        T: Clone,
    {
        self.has_next()?;
        let Cursor::Positioned(x) = self.cursor else {
            return Err(Error::NoSuchElement);
        };
        let shared = self.shared.borrow();
        let tree = &shared.tree;
        let next = match self.dir {
            Direction::Ascending => tree.successor(x),
            Direction::Descending => tree.predecessor(x),
        };
        self.cursor = next.map_or(Cursor::Exhausted, Cursor::Positioned);
        Ok(tree.elt(x).clone())
    }
}

impl<T: Clone> Iterator for Iter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if self.fused {
            return None;
        }
        match self.try_next() {
            Ok(elt) => Some(Ok(elt)),
            Err(Error::NoSuchElement) => None,
            Err(e) => {
                self.fused = true;
                Some(Err(e))
            }
        }
    }
}
