//! On-disk record layout.

use std::borrow::Cow;

use zerocopy::byteorder::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Width of the member name buffer.
pub const NAME_LEN: usize = 128;

/// Width of the type name buffer.
pub const TYPE_LEN: usize = 128;

/// Number of array dimension slots per record.
pub const DIM_SLOTS: usize = 4;

/// Filler written into dimension slots an array does not use.
pub const UNUSED_DIM: u32 = u32::MAX;

/// Size of one encoded record in bytes.
pub const RECORD_SIZE: usize = std::mem::size_of::<RawFieldRecord>();

const _: () = assert!(RECORD_SIZE == 1 + 4 + 4 + 1 + 4 * DIM_SLOTS + NAME_LEN + TYPE_LEN);

/// A record exactly as it is stored in the stream.
///
/// All integers are little-endian. Strings are NUL-padded and are not
/// required to carry a terminator when they fill the whole buffer.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct RawFieldRecord {
    /// Nesting depth of the member.
    pub depth: u8,
    /// Byte offset of the member inside its parent.
    pub offset: U32,
    /// Byte size of the member (element size for arrays).
    pub size: U32,
    /// Non-zero when the member is an array.
    pub array: u8,
    /// Array dimensions.
    pub dims: [U32; DIM_SLOTS],
    /// Member name.
    pub name: [u8; NAME_LEN],
    /// Type name, all zero when the member has none.
    pub type_name: [u8; TYPE_LEN],
}

impl RawFieldRecord {
    /// Decode the name buffer.
    pub fn name(&self) -> Cow<'_, str> {
        fixed_str(&self.name)
    }

    /// Decode the type name buffer, `None` when it is empty.
    pub fn type_name(&self) -> Option<Cow<'_, str>> {
        let type_name = fixed_str(&self.type_name);
        (!type_name.is_empty()).then_some(type_name)
    }

    /// Dimension slots in host order.
    pub fn dims(&self) -> [u32; DIM_SLOTS] {
        let dims = self.dims;
        dims.map(|d| d.get())
    }
}

/// Read a string from a fixed-size buffer, stopping at the first NUL.
fn fixed_str(buffer: &[u8]) -> Cow<'_, str> {
    let end = memchr::memchr(0, buffer).unwrap_or(buffer.len());
    String::from_utf8_lossy(&buffer[..end])
}

/// Copy `value` into a NUL-padded buffer.
pub(crate) fn fill_fixed<const N: usize>(value: &str) -> [u8; N] {
    let mut buffer = [0u8; N];
    buffer[..value.len()].copy_from_slice(value.as_bytes());
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_size() {
        assert_eq!(RECORD_SIZE, 282);
    }

    #[test]
    fn test_fixed_str_stops_at_nul() {
        assert_eq!(fixed_str(b"abc\0def\0"), "abc");
        assert_eq!(fixed_str(b"\0\0\0"), "");
    }

    #[test]
    fn test_fixed_str_full_buffer() {
        assert_eq!(fixed_str(b"abcd"), "abcd");
    }

    #[test]
    fn test_little_endian_fields() {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[0] = 3;
        bytes[1..5].copy_from_slice(&[0x01, 0x02, 0x03, 0x04]);
        bytes[5..9].copy_from_slice(&[0x10, 0x00, 0x00, 0x00]);
        bytes[9] = 1;
        bytes[10..14].copy_from_slice(&[0x02, 0x00, 0x00, 0x00]);
        bytes[26..29].copy_from_slice(b"foo");

        let raw = RawFieldRecord::read_from_bytes(&bytes[..]).unwrap();
        assert_eq!(raw.depth, 3);
        assert_eq!(raw.offset.get(), 0x04030201);
        assert_eq!(raw.size.get(), 16);
        assert_eq!(raw.array, 1);
        assert_eq!(raw.dims()[0], 2);
        assert_eq!(raw.name(), "foo");
        assert!(raw.type_name().is_none());
    }
}
