//! Memlay - struct member layout dump library.
//!
//! This crate provides a unified interface to the Memlay crates.
//!
//! # Crates
//!
//! - [`memlay_record`] - Fixed-size record layout, decoder and writer
//! - [`memlay_tree`] - Member tree reconstruction and rendering
//!
//! # Example
//!
//! ```no_run
//! use memlay::prelude::*;
//!
//! let tree = memlay::load_tree("layout.bin")?;
//! print!("{}", render_text(&tree, &RenderOptions::default()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

// Re-export all sub-crates
pub use memlay_record as record;
pub use memlay_tree as tree;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use memlay_record::{FieldRecord, RecordDecoder, RecordWriter, RECORD_SIZE};
    pub use memlay_tree::{
        render_text, write_text, write_text_from, FieldTree, NodeId, RenderOptions, TreeBuilder,
        TreeNode,
    };

    #[cfg(feature = "json")]
    pub use memlay_tree::{to_json, to_json_string};
}

/// Errors from [`load_tree`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file could not be opened.
    #[error("could not open {}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file was opened but its records are unreadable or badly nested.
    #[error(transparent)]
    Tree(#[from] memlay_tree::Error),
}

/// Open a layout dump, decode it and rebuild the member tree.
///
/// The file is closed once decoding finishes, whether or not it succeeded.
pub fn load_tree<P: AsRef<Path>>(path: P) -> Result<tree::FieldTree, LoadError> {
    let path = path.as_ref();
    let decoder = record::RecordDecoder::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(tree::FieldTree::build(decoder)?)
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
