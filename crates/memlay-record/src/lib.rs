//! Member layout record stream decoding.
//!
//! A layout dump is a headerless sequence of fixed-size records, each
//! describing one struct member: its nesting depth, byte offset, size, array
//! dimensions, name and (optionally) type name. This crate reads and writes
//! that format.
//!
//! # Example
//!
//! ```no_run
//! use memlay_record::RecordDecoder;
//!
//! for record in RecordDecoder::open("layout.bin")? {
//!     let record = record?;
//!     println!("{} {} @{}", record.depth, record.name, record.offset);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decoder;
mod error;
mod layout;
mod record;
mod writer;

pub use decoder::RecordDecoder;
pub use error::{Error, Result};
pub use layout::{RawFieldRecord, DIM_SLOTS, NAME_LEN, RECORD_SIZE, TYPE_LEN, UNUSED_DIM};
pub use record::FieldRecord;
pub use writer::RecordWriter;
