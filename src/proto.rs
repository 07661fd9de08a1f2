//! Decoding of the serialized resource model.
//!
//! Split in two layers. [`wire`] parses raw bytes into plain message structs
//! that stay close to the schema. The sibling modules then rebuild the
//! in-memory model from those messages, which is where the interesting
//! merging and validation lives.

pub(crate) mod reader;
pub mod wire;

mod compiled_file;
mod config;
mod table;
#[cfg(test)]
pub(crate) mod testutil;
mod value;
mod xml;

pub use self::compiled_file::{decode_compiled_file, parse_compiled_file};
pub use self::config::decode_config;
pub use self::table::{decode_table, parse_table};
pub use self::value::{decode_item, decode_value};
pub use self::xml::{decode_xml, parse_xml};
