//! Member tree reconstruction.
//!
//! Layout records carry only a nesting depth, no parent links or child
//! counts. [`TreeBuilder`] turns such a flat, ordered sequence into a
//! [`FieldTree`] by tracking the currently open parent while scanning
//! forward; the renderers then print the tree as indented text (or JSON
//! with the `json` feature).
//!
//! # Example
//!
//! ```no_run
//! use memlay_record::RecordDecoder;
//! use memlay_tree::{render_text, FieldTree, RenderOptions};
//!
//! let tree = FieldTree::build(RecordDecoder::open("layout.bin")?)?;
//! print!("{}", render_text(&tree, &RenderOptions::default()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod error;
mod render;
mod tree;

#[cfg(feature = "json")]
mod json;

pub use builder::TreeBuilder;
pub use error::{Error, Result};
pub use render::{render_text, write_text, write_text_from, RenderOptions, DEFAULT_INDENT};
pub use tree::{FieldTree, NodeId, TreeIter, TreeNode, ROOT_NAME};

#[cfg(feature = "json")]
pub use json::{to_json, to_json_string};
