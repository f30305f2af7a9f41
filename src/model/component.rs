//! The shared capability of every node in a table's column and row trees.

/// Common surface of column-tree and row-tree nodes.
///
/// A node is a leaf exactly when it has no children. The two instantiations
/// (`ColumnNode`, `RowNode`) only ever nest one level deep in practice, but
/// traversal is written recursively and does not rely on that.
pub trait DataComponent: Sized {
    /// Display label. For columns this may span several joined header cells.
    fn title(&self) -> &str;

    /// Replace the display label.
    fn set_title(&mut self, title: &str);

    /// Inclusion flag, true on construction; the editing layer toggles it.
    fn is_selected(&self) -> bool;

    fn set_selected(&mut self, selected: bool);

    /// Child nodes in display order; empty for leaves.
    fn children(&self) -> &[Self];

    fn children_mut(&mut self) -> &mut [Self];

    fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Number of direct children.
    fn count_children(&self) -> usize {
        self.children().len()
    }

    /// Depth-first search by exact title, starting at this node itself.
    /// Returns the first match, so selections round-trip by label.
    fn find(&self, title: &str) -> Option<&Self> {
        if self.title() == title {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(title))
    }

    /// All leaf descendants in left-to-right order. A leaf yields itself.
    fn leaf_children(&self) -> Vec<&Self> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a Self>) {
        if self.is_leaf() {
            leaves.push(self);
        } else {
            for child in self.children() {
                child.collect_leaves(leaves);
            }
        }
    }
}
