use std::cmp::Ordering::{self, Equal, Greater, Less};

use log::trace;

use crate::{error::Result, order::Order};

/// Index of a node in the arena.
///
/// Indices stay valid only until the next removal, which relocates the
/// last node into the freed slot.
pub(crate) type NodeId = usize;

pub(crate) struct Node<T> {
    pub elt: T,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
    pub height: u8,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Probe {
    Lower,
    Floor,
    Ceiling,
    Higher,
}

impl Probe {
    pub fn flip(self) -> Self {
        match self {
            Probe::Lower => Probe::Higher,
            Probe::Floor => Probe::Ceiling,
            Probe::Ceiling => Probe::Floor,
            Probe::Higher => Probe::Lower,
        }
    }
    fn accepts(self, ord: Ordering) -> bool {
        // `ord` is the probe compared against the node.
        match self {
            Probe::Lower => ord == Greater,
            Probe::Floor => ord != Less,
            Probe::Ceiling => ord != Greater,
            Probe::Higher => ord == Less,
        }
    }
    fn upward(self) -> bool { matches!(self, Probe::Ceiling | Probe::Higher) }
}

enum Search {
    Found(NodeId),
    Vacant(Option<(NodeId, Ordering)>),
}

/// Height-balanced binary search tree.
///
/// Nodes live densely in `nodes`; owning edges go root to leaves through
/// `left`/`right` and `parent` is a plain back-index.
pub(crate) struct AvlTree<T> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) root: Option<NodeId>,
    pub(crate) order: Order<T>,
}

impl<T> AvlTree<T> {
    pub fn new(order: Order<T>) -> Self {
        Self { nodes: vec![], root: None, order }
    }

    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }
    pub fn order(&self) -> &Order<T> { &self.order }
    pub fn elt(&self, x: NodeId) -> &T { &self.nodes[x].elt }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    fn search(&self, elt: &T) -> Result<Search> {
        let mut cur = self.root;
        let mut last = None;
        while let Some(x) = cur {
            let node = &self.nodes[x];
            let ord = self.order.compare(elt, &node.elt)?;
            cur = match ord {
                Less => node.left,
                Greater => node.right,
                Equal => return Ok(Search::Found(x)),
            };
            last = Some((x, ord));
        }
        Ok(Search::Vacant(last))
    }

    pub fn find(&self, elt: &T) -> Result<Option<NodeId>> {
        match self.search(elt)? {
            Search::Found(x) => Ok(Some(x)),
            Search::Vacant(_) => Ok(None),
        }
    }

    pub fn insert(&mut self, elt: T) -> Result<bool> {
        let parent = match self.search(&elt)? {
            Search::Found(_) => return Ok(false),
            Search::Vacant(parent) => parent,
        };

        let x = self.nodes.len();
        self.nodes.push(Node {
            elt,
            left: None,
            right: None,
            parent: parent.map(|(p, _)| p),
            height: 1,
        });
        match parent {
            None => self.root = Some(x),
            Some((p, Less)) => self.nodes[p].left = Some(x),
            Some((p, _)) => self.nodes[p].right = Some(x),
        }
        self.retrace(parent.map(|(p, _)| p));
        Ok(true)
    }

    pub fn remove(&mut self, elt: &T) -> Result<Option<T>> {
        match self.search(elt)? {
            Search::Found(x) => Ok(Some(self.remove_node(x))),
            Search::Vacant(_) => Ok(None),
        }
    }

    /// Unlinks `x` and returns its element.
    pub fn remove_node(&mut self, mut x: NodeId) -> T {
        let Node { left, right, .. } = self.nodes[x];
        if let (Some(_), Some(right)) = (left, right) {
            let succ = self.min_from(right);
            self.swap_elts(x, succ);
            x = succ;
        }

        let Node { left, right, parent, .. } = self.nodes[x];
        let child = left.or(right);
        self.replace_child(parent, x, child);
        if let Some(c) = child {
            self.nodes[c].parent = parent;
        }

        let last = self.nodes.len() - 1;
        let elt = self.release(x);
        self.retrace(parent.map(|p| if p == last { x } else { p }));
        elt
    }

    /// Drops the unlinked node `x` from the arena, moving the last node into
    /// its slot.
    fn release(&mut self, x: NodeId) -> T {
        let last = self.nodes.len() - 1;
        if x != last {
            let Node { left, right, parent, .. } = self.nodes[last];
            if let Some(l) = left {
                self.nodes[l].parent = Some(x);
            }
            if let Some(r) = right {
                self.nodes[r].parent = Some(x);
            }
            self.replace_child(parent, last, Some(x));
        }
        self.nodes.swap_remove(x).elt
    }

    fn swap_elts(&mut self, x: NodeId, y: NodeId) {
        let (lo, hi) = if x < y { (x, y) } else { (y, x) };
        let (front, back) = self.nodes.split_at_mut(hi);
        std::mem::swap(&mut front[lo].elt, &mut back[0].elt);
    }

    fn replace_child(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) {
        match parent {
            None => self.root = new,
            Some(p) if self.nodes[p].left == Some(old) => {
                self.nodes[p].left = new
            }
            Some(p) => self.nodes[p].right = new,
        }
    }

    fn height(&self, x: Option<NodeId>) -> u8 {
        x.map_or(0, |x| self.nodes[x].height)
    }
    fn update(&mut self, x: NodeId) {
        let Node { left, right, .. } = self.nodes[x];
        self.nodes[x].height = 1 + self.height(left).max(self.height(right));
    }
    fn skew(&self, x: NodeId) -> i16 {
        let Node { left, right, .. } = self.nodes[x];
        self.height(left) as i16 - self.height(right) as i16
    }

    fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let Some(y) = self.nodes[x].right else { return x };
        trace!("rotate left at {x}");
        let inner = self.nodes[y].left;
        let parent = self.nodes[x].parent;

        self.nodes[x].right = inner;
        if let Some(c) = inner {
            self.nodes[c].parent = Some(x);
        }
        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, Some(y));

        self.update(x);
        self.update(y);
        y
    }
    fn rotate_right(&mut self, x: NodeId) -> NodeId {
        let Some(y) = self.nodes[x].left else { return x };
        trace!("rotate right at {x}");
        let inner = self.nodes[y].right;
        let parent = self.nodes[x].parent;

        self.nodes[x].left = inner;
        if let Some(c) = inner {
            self.nodes[c].parent = Some(x);
        }
        self.nodes[y].right = Some(x);
        self.nodes[x].parent = Some(y);
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, Some(y));

        self.update(x);
        self.update(y);
        y
    }

    /// Restores the balance of the subtree rooted at `x` and returns its new
    /// root.
    fn rebalance(&mut self, x: NodeId) -> NodeId {
        self.update(x);
        let skew = self.skew(x);
        if skew > 1 {
            if let Some(l) = self.nodes[x].left {
                if self.skew(l) < 0 {
                    self.rotate_left(l);
                }
            }
            self.rotate_right(x)
        } else if skew < -1 {
            if let Some(r) = self.nodes[x].right {
                if self.skew(r) > 0 {
                    self.rotate_right(r);
                }
            }
            self.rotate_left(x)
        } else {
            x
        }
    }

    fn retrace(&mut self, from: Option<NodeId>) {
        let mut cur = from;
        while let Some(x) = cur {
            let x = self.rebalance(x);
            cur = self.nodes[x].parent;
        }
    }

    fn min_from(&self, mut x: NodeId) -> NodeId {
        while let Some(l) = self.nodes[x].left {
            x = l;
        }
        x
    }
    fn max_from(&self, mut x: NodeId) -> NodeId {
        while let Some(r) = self.nodes[x].right {
            x = r;
        }
        x
    }

    pub fn min(&self) -> Option<NodeId> { self.root.map(|x| self.min_from(x)) }
    pub fn max(&self) -> Option<NodeId> { self.root.map(|x| self.max_from(x)) }

    pub fn successor(&self, x: NodeId) -> Option<NodeId> {
        if let Some(r) = self.nodes[x].right {
            return Some(self.min_from(r));
        }
        let mut cur = x;
        while let Some(p) = self.nodes[cur].parent {
            if self.nodes[p].left == Some(cur) {
                return Some(p);
            }
            cur = p;
        }
        None
    }
    pub fn predecessor(&self, x: NodeId) -> Option<NodeId> {
        if let Some(l) = self.nodes[x].left {
            return Some(self.max_from(l));
        }
        let mut cur = x;
        while let Some(p) = self.nodes[cur].parent {
            if self.nodes[p].right == Some(cur) {
                return Some(p);
            }
            cur = p;
        }
        None
    }

    /// Nearest node to `elt` satisfying `probe`.
    pub fn probe(&self, elt: &T, probe: Probe) -> Result<Option<NodeId>> {
        let mut cur = self.root;
        let mut best = None;
        while let Some(x) = cur {
            let node = &self.nodes[x];
            let accepted = probe.accepts(self.order.compare(elt, &node.elt)?);
            if accepted {
                best = Some(x);
            }
            cur = if accepted == probe.upward() {
                node.left
            } else {
                node.right
            };
        }
        Ok(best)
    }

    pub fn elts(&self, rev: bool) -> impl Iterator<Item = &T> + '_ {
        let first = if rev { self.max() } else { self.min() };
        std::iter::successors(first, move |&x| {
            if rev { self.predecessor(x) } else { self.successor(x) }
        })
        .map(move |x| &self.nodes[x].elt)
    }
}
