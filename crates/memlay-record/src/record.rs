//! Decoded member records.

use zerocopy::byteorder::little_endian::U32;
use zerocopy::IntoBytes;

use crate::layout::{fill_fixed, RawFieldRecord, DIM_SLOTS, NAME_LEN, TYPE_LEN, UNUSED_DIM};
use crate::{Error, Result};

/// One struct member as described by a layout record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldRecord {
    /// Raw nesting depth as stored in the stream.
    pub depth: u8,
    /// Byte offset inside the enclosing member.
    pub offset: u32,
    /// Byte size of the member, or of one element for arrays.
    pub size: u32,
    /// Whether the member is an array.
    pub is_array: bool,
    /// Raw dimension slots.
    pub dims: [u32; DIM_SLOTS],
    /// Member name.
    pub name: String,
    /// Type name, absent for aggregate members.
    pub type_name: Option<String>,
}

impl FieldRecord {
    /// Create a scalar member record without a type name.
    pub fn new(depth: u8, name: impl Into<String>, offset: u32) -> Self {
        Self {
            depth,
            offset,
            size: 0,
            is_array: false,
            dims: [1, UNUSED_DIM, UNUSED_DIM, UNUSED_DIM],
            name: name.into(),
            type_name: None,
        }
    }

    /// Set the member size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the type name.
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Mark the member as an array with the given dimensions.
    pub fn with_array_dims(mut self, dims: &[u32]) -> Result<Self> {
        if dims.len() > DIM_SLOTS {
            return Err(Error::TooManyDimensions {
                count: dims.len(),
                max: DIM_SLOTS,
            });
        }
        self.is_array = true;
        self.dims = [UNUSED_DIM; DIM_SLOTS];
        self.dims[..dims.len()].copy_from_slice(dims);
        Ok(self)
    }

    /// The populated dimensions of an array member.
    ///
    /// Returns the slots before the first unused (or zero) slot; empty for
    /// non-array members.
    pub fn array_dims(&self) -> &[u32] {
        if !self.is_array {
            return &[];
        }
        let used = self
            .dims
            .iter()
            .position(|&d| d == UNUSED_DIM || d == 0)
            .unwrap_or(DIM_SLOTS);
        &self.dims[..used]
    }

    /// Number of elements the member holds (1 for non-arrays).
    pub fn element_count(&self) -> u64 {
        self.array_dims().iter().map(|&d| u64::from(d)).product()
    }

    /// Whether the record carries a type name.
    pub fn has_type(&self) -> bool {
        self.type_name.is_some()
    }

    /// Encode into the on-disk representation.
    pub fn to_raw(&self) -> Result<RawFieldRecord> {
        check_len("name", &self.name, NAME_LEN)?;
        let type_name = self.type_name.as_deref().unwrap_or("");
        check_len("type name", type_name, TYPE_LEN)?;

        Ok(RawFieldRecord {
            depth: self.depth,
            offset: U32::new(self.offset),
            size: U32::new(self.size),
            array: u8::from(self.is_array),
            dims: self.dims.map(U32::new),
            name: fill_fixed::<NAME_LEN>(&self.name),
            type_name: fill_fixed::<TYPE_LEN>(type_name),
        })
    }

    /// Convert to bytes for writing.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_raw()?.as_bytes().to_vec())
    }
}

impl From<&RawFieldRecord> for FieldRecord {
    fn from(raw: &RawFieldRecord) -> Self {
        Self {
            depth: raw.depth,
            offset: raw.offset.get(),
            size: raw.size.get(),
            is_array: raw.array != 0,
            dims: raw.dims(),
            name: raw.name().into_owned(),
            type_name: raw.type_name().map(|t| t.into_owned()),
        }
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(Error::FieldTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    if let Some(position) = memchr::memchr(0, value.as_bytes()) {
        return Err(Error::InteriorNul { field, position });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RECORD_SIZE;
    use zerocopy::FromBytes;

    #[test]
    fn test_to_bytes_layout() {
        let record = FieldRecord::new(1, "flags", 0x0102_0304)
            .with_size(4)
            .with_type("unsigned int");
        let bytes = record.to_bytes().unwrap();

        assert_eq!(bytes.len(), RECORD_SIZE);
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..5], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[5..9], &[4, 0, 0, 0]);
        assert_eq!(bytes[9], 0);
        assert_eq!(&bytes[26..31], b"flags");
        assert_eq!(bytes[31], 0);
        assert_eq!(&bytes[154..166], b"unsigned int");
    }

    #[test]
    fn test_empty_type_decodes_to_none() {
        let bytes = FieldRecord::new(0, "inner", 8).to_bytes().unwrap();
        let raw = RawFieldRecord::read_from_bytes(&bytes[..]).unwrap();
        let record = FieldRecord::from(&raw);

        assert_eq!(record.name, "inner");
        assert_eq!(record.offset, 8);
        assert_eq!(record.type_name, None);
        assert!(!record.has_type());
    }

    #[test]
    fn test_name_too_long() {
        let record = FieldRecord::new(0, "x".repeat(NAME_LEN + 1), 0);
        assert!(matches!(
            record.to_bytes(),
            Err(Error::FieldTooLong { field: "name", .. })
        ));

        // A name filling the whole buffer has no terminator but still fits.
        let record = FieldRecord::new(0, "y".repeat(NAME_LEN), 0);
        let bytes = record.to_bytes().unwrap();
        let raw = RawFieldRecord::read_from_bytes(&bytes[..]).unwrap();
        assert_eq!(FieldRecord::from(&raw).name.len(), NAME_LEN);
    }

    #[test]
    fn test_interior_nul_rejected() {
        let record = FieldRecord::new(0, "a\0b", 0);
        assert!(matches!(
            record.to_bytes(),
            Err(Error::InteriorNul {
                field: "name",
                position: 1
            })
        ));

        let record = FieldRecord::new(0, "ab", 0).with_type("x\0y");
        assert!(matches!(
            record.to_bytes(),
            Err(Error::InteriorNul {
                field: "type name",
                position: 1
            })
        ));
    }

    #[test]
    fn test_array_dims() {
        let record = FieldRecord::new(0, "matrix", 0)
            .with_type("float")
            .with_array_dims(&[3, 4])
            .unwrap();

        assert!(record.is_array);
        assert_eq!(record.array_dims(), &[3, 4]);
        assert_eq!(record.element_count(), 12);
        assert_eq!(record.dims, [3, 4, UNUSED_DIM, UNUSED_DIM]);
    }

    #[test]
    fn test_scalar_has_no_array_dims() {
        let record = FieldRecord::new(0, "count", 0);
        assert!(record.array_dims().is_empty());
        assert_eq!(record.element_count(), 1);
    }

    #[test]
    fn test_too_many_dims() {
        let result = FieldRecord::new(0, "cube", 0).with_array_dims(&[1, 2, 3, 4, 5]);
        assert!(matches!(
            result,
            Err(Error::TooManyDimensions { count: 5, max: 4 })
        ));
    }
}
