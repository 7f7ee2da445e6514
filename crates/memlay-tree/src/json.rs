//! JSON rendering.

use memlay_record::FieldRecord;
use serde::Serialize;

use crate::{FieldTree, NodeId};

#[derive(Serialize)]
struct JsonNode<'a> {
    #[serde(flatten)]
    record: &'a FieldRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonNode<'a>>,
}

fn collect<'a>(tree: &'a FieldTree, parent: NodeId) -> Vec<JsonNode<'a>> {
    tree.children(parent)
        .filter_map(|(id, node)| {
            node.record().map(|record| JsonNode {
                record,
                children: collect(tree, id),
            })
        })
        .collect()
}

/// Members below `node` as a JSON array of nested objects.
pub fn to_json(tree: &FieldTree, node: NodeId) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(collect(tree, node))
}

/// Members below `node` as pretty-printed JSON.
pub fn to_json_string(tree: &FieldTree, node: NodeId) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&collect(tree, node))
}
