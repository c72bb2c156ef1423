//! The ASF object tree.
//!
//! An ASF container is a flat sequence of objects, each introduced by a
//! 24-byte header carrying the object's GUID and its total size. The
//! Header Object is the root: its body lists the child objects that hold
//! all file-level metadata. This module models the root and the three
//! child object kinds that carry tags; everything else is preserved
//! opaquely and copied through byte-for-byte on save.

mod content_description;
mod extended_content_description;
mod file_properties;
mod header;
mod header_object;
mod unknown;

pub use content_description::{CONTENT_DESCRIPTION_GUID, ContentDescriptionObject};
pub use extended_content_description::{
    EXTENDED_CONTENT_DESCRIPTION_GUID, ExtendedContentDescriptionObject,
};
pub use file_properties::{FILE_PROPERTIES_GUID, FILE_PROPERTIES_LEN, FilePropertiesObject};
pub use header::{OBJECT_HEADER_LEN, ObjectHeader};
pub use header_object::{HEADER_OBJECT_GUID, HeaderObject};
pub use unknown::UnknownObject;
