use thiserror::Error;

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Errors produced while decoding the serialized resource IR.
///
/// The first failure at any nesting level aborts the enclosing decode call;
/// partially built tables and trees are never surfaced to callers.
#[derive(Debug, Error)]
pub enum DecodeError {
    // Wire-level failures (byte stream → wire messages).
    #[error("offset {offset}: truncated {what} (need {need} bytes, have {have})")]
    Truncated {
        what: &'static str,
        offset: u64,
        need: usize,
        have: usize,
    },

    #[error("offset {offset}: varint exceeds 64 bits")]
    VarintOverflow { offset: u64 },

    #[error("offset {offset}: invalid field tag")]
    InvalidTag { offset: u64 },

    #[error("offset {offset}: unsupported wire type {value}")]
    UnsupportedWireType { value: u8, offset: u64 },

    #[error("offset {offset}: string field is not valid utf-8")]
    InvalidUtf8 { offset: u64 },

    #[error("message nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    // Structural failures (wire messages → model).
    #[error("invalid source pool: {reason}")]
    InvalidSourcePool { reason: &'static str },

    #[error("configuration has invalid locale '{tag}'")]
    InvalidLocale { tag: String },

    #[error("unknown type '{name}'")]
    UnknownResourceType { name: String },

    #[error("duplicate configuration in resource table")]
    DuplicateConfiguration,

    #[error("reference has invalid resource name '{name}'")]
    InvalidReferenceName { name: String },

    /// A `Value` record whose variant tag is missing or from a newer schema.
    ///
    /// The schema guarantees exhaustiveness, so this is a schema-version
    /// mismatch rather than ordinary bad input; it is still reported as a
    /// plain decode failure so old readers degrade gracefully.
    #[error("value has an unrecognized or missing variant")]
    UnknownValueVariant,

    #[error("item has an unrecognized or missing variant")]
    UnknownItemVariant,

    #[error("compound value has an unrecognized or missing variant")]
    UnknownCompoundValueVariant,

    #[error("xml node has an unrecognized or missing variant")]
    UnknownXmlNodeVariant,

    #[error("invalid resource name in compiled file header: {name}")]
    InvalidCompiledFileName { name: String },

    #[error("invalid resource name for exported symbol in compiled file header: {name}")]
    InvalidExportedSymbolName { name: String },

    #[error("invalid resource configuration in compiled file header: {source}")]
    InvalidCompiledFileConfig {
        #[source]
        source: Box<DecodeError>,
    },
}
