//! Arena-backed member tree.

use std::ops::Index;

use memlay_record::FieldRecord;

use crate::{Error, Result, TreeBuilder};

/// Name reported for the synthetic root node.
pub const ROOT_NAME: &str = "root";

/// Handle to a node inside a [`FieldTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The synthetic root.
    pub const ROOT: Self = Self(0);

    /// Position of the node in the arena.
    ///
    /// Nodes are stored in stream order, so node `n` holds record `n - 1`.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the member tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    record: Option<FieldRecord>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    level: usize,
}

impl TreeNode {
    /// The member record, `None` only for the root.
    pub fn record(&self) -> Option<&FieldRecord> {
        self.record.as_ref()
    }

    /// Member name, or [`ROOT_NAME`] for the root.
    pub fn name(&self) -> &str {
        self.record.as_ref().map_or(ROOT_NAME, |r| r.name.as_str())
    }

    /// Member offset.
    pub fn offset(&self) -> Option<u32> {
        self.record.as_ref().map(|r| r.offset)
    }

    /// Member type name, if the record has one.
    pub fn type_name(&self) -> Option<&str> {
        self.record.as_ref().and_then(|r| r.type_name.as_deref())
    }

    /// The enclosing node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in stream order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Check if this node has any children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of ancestors above this node (0 for the root).
    pub fn level(&self) -> usize {
        self.level
    }

    /// Check if this is the synthetic root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Member tree reconstructed from a record stream.
///
/// The root is always present and never carries a record. Nodes are only
/// appended, and the whole tree is dropped as one unit.
#[derive(Debug, Clone)]
pub struct FieldTree {
    nodes: Vec<TreeNode>,
}

impl FieldTree {
    /// Create a tree holding only the root.
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![TreeNode {
                record: None,
                parent: None,
                children: Vec::new(),
                level: 0,
            }],
        }
    }

    /// Append `record` as the last child of `parent`.
    pub(crate) fn attach(&mut self, parent: NodeId, record: FieldRecord) -> NodeId {
        let id = NodeId(self.nodes.len());
        let level = self.nodes[parent.0].level + 1;
        self.nodes.push(TreeNode {
            record: Some(record),
            parent: Some(parent),
            children: Vec::new(),
            level,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Build a tree from a fallible record stream such as a
    /// [`RecordDecoder`](memlay_record::RecordDecoder).
    ///
    /// The first error aborts the build; no partial tree is returned.
    pub fn build<I, E>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = std::result::Result<FieldRecord, E>>,
        E: Into<Error>,
    {
        let mut builder = TreeBuilder::new();
        for record in records {
            builder.push(record.map_err(Into::into)?)?;
        }
        Ok(builder.finish())
    }

    /// Build a tree from already decoded records.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = FieldRecord>,
    {
        let mut builder = TreeBuilder::new();
        for record in records {
            builder.push(record)?;
        }
        Ok(builder.finish())
    }

    /// Get the root node.
    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    /// Get a node by handle.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Get the children of a node.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &TreeNode)> {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&child| (child, &self.nodes[child.0]))
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    /// Number of member records in the tree (the root is not counted).
    pub fn record_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Check if the tree holds no members.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Deepest level in the tree (0 when empty).
    pub fn max_level(&self) -> usize {
        self.nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }

    /// Records in the order they appeared in the stream.
    pub fn records(&self) -> impl Iterator<Item = &FieldRecord> {
        self.nodes.iter().filter_map(|n| n.record.as_ref())
    }

    /// Iterate over all members in pre-order, skipping the root.
    pub fn iter(&self) -> TreeIter<'_> {
        TreeIter {
            tree: self,
            stack: self.nodes[0].children.iter().rev().copied().collect(),
        }
    }

    /// Find a member by its dotted path, e.g. `"header.flags"`.
    ///
    /// An empty path names the root. When siblings share a name the first
    /// one wins.
    pub fn find_path(&self, path: &str) -> Option<NodeId> {
        if path.is_empty() {
            return Some(NodeId::ROOT);
        }

        path.split('.').try_fold(NodeId::ROOT, |current, segment| {
            self.children(current)
                .find(|(_, node)| node.name() == segment)
                .map(|(id, _)| id)
        })
    }

    /// Dotted path of a node; empty for the root.
    pub fn path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = self.node(id);
        while let Some(node) = current {
            if node.is_root() {
                break;
            }
            names.push(node.name());
            current = node.parent.and_then(|p| self.node(p));
        }
        names.reverse();
        names.join(".")
    }
}

impl Index<NodeId> for FieldTree {
    type Output = TreeNode;

    fn index(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }
}

impl<'a> IntoIterator for &'a FieldTree {
    type Item = (NodeId, &'a TreeNode);
    type IntoIter = TreeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over the members of a [`FieldTree`].
pub struct TreeIter<'a> {
    tree: &'a FieldTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for TreeIter<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id.0];
        // Push children in reverse order so they're visited left-to-right
        self.stack.extend(node.children.iter().rev().copied());
        Some((id, node))
    }
}
