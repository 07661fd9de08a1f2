//! Model for the header record of a compiled resource file.

use crate::config::ConfigDescriptor;
use crate::model::Source;
use crate::name::ResourceName;

/// Payload format of a compiled file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileKind {
    #[default]
    Unknown,
    Png,
    BinaryXml,
    ProtoXml,
}

/// Resource declared inline inside a compiled file, such as a new id
/// introduced by an XML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedResourceName {
    pub name: ResourceName,
    pub line: u32,
}

/// Decoded compiled-file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    /// Resource this file defines (e.g. `layout/main`).
    pub name: ResourceName,
    pub config: ConfigDescriptor,
    pub source: Source,
    pub kind: FileKind,
    pub exported_symbols: Vec<SourcedResourceName>,
}
