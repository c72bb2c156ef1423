//! Tag values and their physical storage.
//!
//! A [`TagValueCell`] is one attribute's value as the container stores
//! it: a storage type plus either an eagerly held byte buffer or a
//! deferred `(position, length)` descriptor into the backing source.
//! Values are variable length and can be large (attached pictures), so
//! parsed cells stay deferred until something actually asks for bytes,
//! and a deferred read is never cached.
//!
//! The storage type is the physical encoding on disk and is distinct
//! from a tag's declared [`AsfTagDataType`]; reading coerces between the
//! two. Coercions are total over the supported pairs — an unsupported
//! pair reads as "no value", never as an error or a wrong value.

use std::io::SeekFrom;

use uuid::Uuid;

use crate::error::{AsfError, Result};
use crate::source::{Source, SourceExt};
use crate::tags::AsfTagDataType;
use crate::text;

/// Physical encoding of a stored value.
///
/// Discriminants are the type codes used on disk by the Extended Content
/// Description object. They do not match `WMT_ATTR_DATATYPE` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// UTF-16LE string.
    String = 0,
    /// Byte array.
    Binary = 1,
    /// Boolean, stored as a 32-bit integer.
    Bool = 2,
    /// Unsigned 32-bit integer.
    UInt32 = 3,
    /// Unsigned 64-bit integer.
    UInt64 = 4,
    /// Unsigned 16-bit integer.
    UInt16 = 5,
}

impl StorageType {
    /// Decode a wire type code.
    pub fn from_code(code: u16) -> Option<StorageType> {
        match code {
            0 => Some(StorageType::String),
            1 => Some(StorageType::Binary),
            2 => Some(StorageType::Bool),
            3 => Some(StorageType::UInt32),
            4 => Some(StorageType::UInt64),
            5 => Some(StorageType::UInt16),
            _ => None,
        }
    }

    /// The wire type code.
    pub fn code(self) -> u16 {
        self as u16
    }

    fn is_integer(self) -> bool {
        matches!(
            self,
            StorageType::UInt16 | StorageType::UInt32 | StorageType::UInt64
        )
    }
}

/// A runtime tag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsfValue {
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Bool(bool),
    String(String),
    Binary(Vec<u8>),
    Guid(Uuid),
}

impl AsfValue {
    /// Name of the runtime type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            AsfValue::UInt16(_) => "u16",
            AsfValue::UInt32(_) => "u32",
            AsfValue::UInt64(_) => "u64",
            AsfValue::Bool(_) => "bool",
            AsfValue::String(_) => "string",
            AsfValue::Binary(_) => "binary",
            AsfValue::Guid(_) => "guid",
        }
    }
}

#[derive(Debug, Clone)]
enum CellData {
    Eager(Vec<u8>),
    Deferred { position: u64, length: u32 },
}

/// One attribute value, eagerly held or deferred into the source.
#[derive(Debug, Clone)]
pub struct TagValueCell {
    storage: StorageType,
    data: CellData,
}

impl TagValueCell {
    /// Record a value still sitting in the source. No bytes are read.
    pub fn deferred(storage: StorageType, position: u64, length: u32) -> Self {
        Self {
            storage,
            data: CellData::Deferred { position, length },
        }
    }

    /// Encode a new value under the given logical type.
    ///
    /// The storage type is the one the format chooses for that logical
    /// type. Note the identifier quirk: GUID values keep their raw 16
    /// wire bytes but are tagged as `String` storage, matching how the
    /// format has always labelled them.
    pub fn encode(logical: AsfTagDataType, value: &AsfValue) -> Result<Self> {
        let (storage, bytes) = match (logical, value) {
            (AsfTagDataType::Binary, AsfValue::Binary(bytes)) => {
                (StorageType::Binary, bytes.clone())
            }
            (AsfTagDataType::Bool, AsfValue::Bool(value)) => (
                StorageType::Bool,
                u32::from(*value).to_le_bytes().to_vec(),
            ),
            (AsfTagDataType::Guid, AsfValue::Guid(guid)) => {
                (StorageType::String, guid.to_bytes_le().to_vec())
            }
            (AsfTagDataType::UInt16, AsfValue::UInt16(value)) => {
                (StorageType::UInt16, value.to_le_bytes().to_vec())
            }
            (AsfTagDataType::UInt32, AsfValue::UInt32(value)) => {
                (StorageType::UInt32, value.to_le_bytes().to_vec())
            }
            (AsfTagDataType::UInt64, AsfValue::UInt64(value)) => {
                (StorageType::UInt64, value.to_le_bytes().to_vec())
            }
            (AsfTagDataType::String, AsfValue::String(text)) => {
                (StorageType::String, text::encode_utf16z(text))
            }
            _ => {
                return Err(AsfError::InvalidValueCombination {
                    expected: logical,
                    actual: value.type_name(),
                });
            }
        };
        Ok(Self {
            storage,
            data: CellData::Eager(bytes),
        })
    }

    /// The storage type.
    pub fn storage(&self) -> StorageType {
        self.storage
    }

    /// Byte length of the value as it will serialize, regardless of
    /// which representation backs it.
    pub fn len(&self) -> u64 {
        match &self.data {
            CellData::Eager(bytes) => bytes.len() as u64,
            CellData::Deferred { length, .. } => u64::from(*length),
        }
    }

    /// Whether the value serializes to zero bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize the value bytes.
    ///
    /// A deferred cell seeks the source to its recorded position, reads,
    /// and restores the prior cursor position before returning. Fails
    /// with [`AsfError::MissingSource`] if the cell is deferred and no
    /// source was supplied.
    pub fn bytes(&self, src: Option<&mut dyn Source>) -> Result<Vec<u8>> {
        match &self.data {
            CellData::Eager(bytes) => Ok(bytes.clone()),
            CellData::Deferred { position, length } => {
                let src = src.ok_or(AsfError::MissingSource)?;
                let prior = src.stream_position()?;
                src.seek(SeekFrom::Start(*position))?;
                let value = src.read_bytes(*length as usize);
                src.seek(SeekFrom::Start(prior))?;
                value
            }
        }
    }

    /// Materialize and coerce the value to a logical type.
    ///
    /// Returns `Ok(None)` for storage/logical pairs outside the coercion
    /// table — the tag simply has no value under that interpretation.
    pub fn read_as(
        &self,
        logical: AsfTagDataType,
        src: Option<&mut dyn Source>,
    ) -> Result<Option<AsfValue>> {
        let bytes = self.bytes(src)?;
        Ok(coerce(self.storage, logical, &bytes))
    }
}

/// Coerce materialized bytes from their storage type to a logical type.
fn coerce(storage: StorageType, logical: AsfTagDataType, bytes: &[u8]) -> Option<AsfValue> {
    match logical {
        AsfTagDataType::Binary => Some(AsfValue::Binary(bytes.to_vec())),
        AsfTagDataType::Bool => {
            if storage == StorageType::Bool || storage.is_integer() {
                Some(AsfValue::Bool(le_uint(bytes) != 0))
            } else {
                None
            }
        }
        AsfTagDataType::Guid => match storage {
            StorageType::Binary if bytes.len() == 16 => {
                let mut raw = [0u8; 16];
                raw.copy_from_slice(bytes);
                Some(AsfValue::Guid(Uuid::from_bytes_le(raw)))
            }
            StorageType::String => Uuid::parse_str(text::decode_utf16(bytes).trim())
                .ok()
                .map(AsfValue::Guid),
            _ => None,
        },
        AsfTagDataType::String => match storage {
            StorageType::Bool => Some(AsfValue::String((le_uint(bytes) != 0).to_string())),
            StorageType::String => Some(AsfValue::String(text::decode_utf16(bytes))),
            _ if storage.is_integer() => Some(AsfValue::String(le_uint(bytes).to_string())),
            _ => None,
        },
        AsfTagDataType::UInt16 => uint_value(storage, bytes).map(|v| AsfValue::UInt16(v as u16)),
        AsfTagDataType::UInt32 => uint_value(storage, bytes).map(|v| AsfValue::UInt32(v as u32)),
        AsfTagDataType::UInt64 => uint_value(storage, bytes).map(AsfValue::UInt64),
    }
}

/// Widen stored integer bytes (or parse a decimal string) to `u64`.
/// Requests for narrower targets truncate at the call site.
fn uint_value(storage: StorageType, bytes: &[u8]) -> Option<u64> {
    if storage.is_integer() {
        Some(le_uint(bytes))
    } else if storage == StorageType::String {
        text::decode_utf16(bytes).trim().parse::<u64>().ok()
    } else {
        None
    }
}

/// Interpret up to the first eight bytes as a little-endian unsigned
/// integer.
fn le_uint(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .take(8)
        .enumerate()
        .fold(0u64, |acc, (i, b)| acc | (u64::from(*b) << (i * 8)))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn no_source() -> Option<&'static mut dyn Source> {
        None
    }

    #[test]
    fn encode_rejects_mismatched_value() {
        let result = TagValueCell::encode(AsfTagDataType::UInt32, &AsfValue::String("5".into()));
        assert!(matches!(
            result,
            Err(AsfError::InvalidValueCombination { .. })
        ));
    }

    #[test]
    fn bool_encodes_as_four_bytes() {
        let cell = TagValueCell::encode(AsfTagDataType::Bool, &AsfValue::Bool(true)).unwrap();
        assert_eq!(cell.storage(), StorageType::Bool);
        assert_eq!(cell.len(), 4);
        assert_eq!(cell.bytes(no_source()).unwrap(), vec![1, 0, 0, 0]);
    }

    #[test]
    fn guid_encodes_with_string_storage_tag() {
        let guid = Uuid::new_v4();
        let cell = TagValueCell::encode(AsfTagDataType::Guid, &AsfValue::Guid(guid)).unwrap();
        assert_eq!(cell.storage(), StorageType::String);
        assert_eq!(cell.bytes(no_source()).unwrap(), guid.to_bytes_le());
    }

    #[test]
    fn bool_reads_back_as_string() {
        let cell = TagValueCell::encode(AsfTagDataType::Bool, &AsfValue::Bool(true)).unwrap();
        let value = cell.read_as(AsfTagDataType::String, no_source()).unwrap();
        assert_eq!(value, Some(AsfValue::String("true".into())));
    }

    #[test]
    fn integer_widens_and_truncates() {
        let cell = TagValueCell::encode(AsfTagDataType::UInt32, &AsfValue::UInt32(5)).unwrap();
        assert_eq!(
            cell.read_as(AsfTagDataType::UInt16, no_source()).unwrap(),
            Some(AsfValue::UInt16(5))
        );
        assert_eq!(
            cell.read_as(AsfTagDataType::UInt64, no_source()).unwrap(),
            Some(AsfValue::UInt64(5))
        );
        assert_eq!(
            cell.read_as(AsfTagDataType::Bool, no_source()).unwrap(),
            Some(AsfValue::Bool(true))
        );
    }

    #[test]
    fn string_parses_as_integer() {
        let cell =
            TagValueCell::encode(AsfTagDataType::String, &AsfValue::String("12".into())).unwrap();
        assert_eq!(
            cell.read_as(AsfTagDataType::UInt32, no_source()).unwrap(),
            Some(AsfValue::UInt32(12))
        );
        let cell =
            TagValueCell::encode(AsfTagDataType::String, &AsfValue::String("abc".into())).unwrap();
        assert_eq!(cell.read_as(AsfTagDataType::UInt32, no_source()).unwrap(), None);
    }

    #[test]
    fn guid_parses_from_string_literal() {
        let guid = Uuid::new_v4();
        let cell = TagValueCell::encode(
            AsfTagDataType::String,
            &AsfValue::String(guid.hyphenated().to_string()),
        )
        .unwrap();
        assert_eq!(
            cell.read_as(AsfTagDataType::Guid, no_source()).unwrap(),
            Some(AsfValue::Guid(guid))
        );
    }

    #[test]
    fn unsupported_pair_reads_as_absent() {
        let cell =
            TagValueCell::encode(AsfTagDataType::Binary, &AsfValue::Binary(vec![1, 2])).unwrap();
        assert_eq!(cell.read_as(AsfTagDataType::Bool, no_source()).unwrap(), None);
        assert_eq!(
            cell.read_as(AsfTagDataType::String, no_source()).unwrap(),
            None
        );
        // Binary is always readable.
        assert_eq!(
            cell.read_as(AsfTagDataType::Binary, no_source()).unwrap(),
            Some(AsfValue::Binary(vec![1, 2]))
        );
    }

    #[test]
    fn deferred_cell_restores_cursor() {
        let mut src = Cursor::new(vec![0u8, 0, b'H', 0, b'i', 0, 9, 9]);
        src.set_position(1);
        let cell = TagValueCell::deferred(StorageType::String, 2, 4);
        let value = cell
            .read_as(AsfTagDataType::String, Some(&mut src))
            .unwrap();
        assert_eq!(value, Some(AsfValue::String("Hi".into())));
        assert_eq!(src.position(), 1);
    }

    #[test]
    fn deferred_cell_without_source_fails() {
        let cell = TagValueCell::deferred(StorageType::String, 0, 4);
        assert!(matches!(
            cell.bytes(no_source()),
            Err(AsfError::MissingSource)
        ));
    }
}
