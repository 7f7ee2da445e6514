//! Incremental tree reconstruction from depth-tagged records.

use std::cmp::Ordering;

use memlay_record::FieldRecord;
use tracing::{debug, trace};

use crate::{Error, FieldTree, NodeId, Result};

/// Builds a [`FieldTree`] one record at a time.
///
/// Each record is placed purely from its depth relative to the previous
/// record:
///
/// - same depth: sibling of the previous record
/// - one deeper: first child of the previous record
/// - shallower: sibling of the matching ancestor
/// - more than one deeper: rejected with [`Error::DepthJump`]
///
/// The first record anchors the outermost level, so a stream starting at
/// depth 3 nests exactly like one starting at depth 0. Records shallower than
/// that are rejected with [`Error::DepthUnderflow`].
///
/// A rejected record leaves the builder untouched.
#[derive(Debug)]
pub struct TreeBuilder {
    tree: FieldTree,
    base_depth: Option<usize>,
    expected_depth: usize,
    current_parent: NodeId,
    last_node: Option<NodeId>,
    records_seen: usize,
}

impl TreeBuilder {
    /// Create a builder holding an empty tree.
    pub fn new() -> Self {
        Self {
            tree: FieldTree::new(),
            base_depth: None,
            expected_depth: 0,
            current_parent: NodeId::ROOT,
            last_node: None,
            records_seen: 0,
        }
    }

    /// Attach the next record from the stream.
    pub fn push(&mut self, record: FieldRecord) -> Result<NodeId> {
        let index = self.records_seen;
        let depth = usize::from(record.depth);
        let base = *self.base_depth.get_or_insert(depth);
        let expected = if index == 0 { depth } else { self.expected_depth };

        let parent = match depth.cmp(&expected) {
            Ordering::Equal => self.current_parent,
            Ordering::Greater if depth == expected + 1 => {
                self.last_node.ok_or(Error::DepthJump {
                    index,
                    depth,
                    expected,
                })?
            }
            Ordering::Greater => {
                return Err(Error::DepthJump {
                    index,
                    depth,
                    expected,
                })
            }
            Ordering::Less => self.unwind(index, depth, expected, base)?,
        };

        let id = self.tree.attach(parent, record);
        trace!(index, depth, parent = parent.index(), "attached member");

        self.current_parent = parent;
        self.expected_depth = depth;
        self.last_node = Some(id);
        self.records_seen += 1;

        Ok(id)
    }

    /// Walk up from the current parent until `depth` is reached.
    fn unwind(&self, index: usize, depth: usize, expected: usize, base: usize) -> Result<NodeId> {
        let mut parent = self.current_parent;
        for _ in depth..expected {
            parent = self
                .tree
                .parent(parent)
                .ok_or(Error::DepthUnderflow { index, depth, base })?;
        }
        debug!(index, from = expected, to = depth, "closed nesting levels");
        Ok(parent)
    }

    /// Number of records attached so far.
    pub fn records_seen(&self) -> usize {
        self.records_seen
    }

    /// The tree built so far.
    pub fn tree(&self) -> &FieldTree {
        &self.tree
    }

    /// Finish building and take the tree.
    pub fn finish(self) -> FieldTree {
        debug!(
            records = self.records_seen,
            max_level = self.tree.max_level(),
            "member tree complete"
        );
        self.tree
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
