//! Decoder for the serialized intermediate representation of compiled
//! application resources.
//!
//! Three kinds of payload are understood: whole resource tables (packages,
//! types, entries and their per-configuration values), standalone
//! compiled-file headers, and compiled XML documents. Parsing the raw bytes
//! and rebuilding the in-memory model are separate layers; the `parse_*`
//! functions run both.
//!
//! ```
//! let table = restable::parse_table(&[], None)?;
//! assert!(table.packages.is_empty());
//! # Ok::<(), restable::DecodeError>(())
//! ```

pub mod config;
mod cursor;
pub mod err;
pub mod files;
pub mod locale;
pub mod model;
pub mod name;
pub mod proto;
pub mod source_pool;
pub mod string_pool;

pub use crate::config::ConfigDescriptor;
pub use crate::err::{DecodeError, DecodeResult};
pub use crate::files::{FileCollection, FileHandle, InMemoryFileCollection};
pub use crate::model::file::ResourceFile;
pub use crate::model::table::ResourceTable;
pub use crate::model::xml::XmlResource;
pub use crate::name::{ResourceId, ResourceName, ResourceType};
pub use crate::proto::{parse_compiled_file, parse_table, parse_xml};
pub use crate::string_pool::StringPool;
