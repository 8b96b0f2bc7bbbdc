use std::{
    cmp::Ordering::Less,
    fmt::{self, Debug, Write},
};

use crate::avl::{AvlTree, NodeId};

impl<T: Debug> AvlTree<T> {
    /// Panics unless every structural invariant holds.
    pub(crate) fn verify(&self) {
        let Some(root) = self.root else {
            assert!(self.nodes.is_empty(), "empty tree with live nodes");
            return;
        };
        assert_eq!(self.nodes[root].parent, None, "root has a parent");
        let mut count = 0;
        self.verify_subtree(root, &mut count);
        assert_eq!(count, self.nodes.len(), "unreachable nodes in the arena");

        let elts: Vec<_> = self.elts(false).collect();
        for w in elts.windows(2) {
            let ord = self.order.compare(w[0], w[1]);
            assert_eq!(ord, Ok(Less), "{:?} and {:?} out of order", w[0], w[1]);
        }
        assert_eq!(elts.len(), self.nodes.len());
    }

    fn verify_subtree(&self, x: NodeId, count: &mut usize) -> u8 {
        *count += 1;
        let node = &self.nodes[x];
        let mut heights = [0; 2];
        for (i, child) in [node.left, node.right].into_iter().enumerate() {
            let Some(c) = child else { continue };
            assert_eq!(self.nodes[c].parent, Some(x), "stale back-reference");
            heights[i] = self.verify_subtree(c, count);
        }
        let [hl, hr] = heights;
        assert!(hl.abs_diff(hr) <= 1, "unbalanced at {:?}", node.elt);
        assert_eq!(node.height, 1 + hl.max(hr), "stale height at {:?}", x);
        node.height
    }

    pub(crate) fn render(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        if let Some(root) = self.root {
            writeln!(out, "{:?}", self.nodes[root].elt)?;
            self.render_children(root, "", &mut out)?;
        }
        Ok(out)
    }

    fn render_children(
        &self,
        x: NodeId,
        prefix: &str,
        out: &mut String,
    ) -> fmt::Result {
        let node = &self.nodes[x];
        if node.left.is_none() && node.right.is_none() {
            return Ok(());
        }
        for (child, last) in [(node.left, false), (node.right, true)] {
            let (branch, cont) =
                if last { ("└── ", "    ") } else { ("├── ", "│   ") };
            match child {
                Some(c) => {
                    writeln!(out, "{prefix}{branch}{:?}", self.nodes[c].elt)?;
                    self.render_children(c, &format!("{prefix}{cont}"), out)?;
                }
                None => writeln!(out, "{prefix}{branch}·")?,
            }
        }
        Ok(())
    }
}
