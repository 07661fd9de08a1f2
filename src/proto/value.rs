//! Value decoding: item variants and the compound shapes above them.
//!
//! Dispatch is two-level. A value is either a single item or a compound
//! value; each carries a second variant selector. A value with no variant
//! this decoder recognizes is a schema violation and fails the decode, so a
//! partially built value never lands in the table.

use crate::config::ConfigDescriptor;
use crate::err::{DecodeError, DecodeResult};
use crate::files::FileCollection;
use crate::model::Source;
use crate::model::file::FileKind;
use crate::model::value::{
    Array, AttrSymbol, Attribute, AttributeTypeMask, FileReference, Item, ItemKind, Plural,
    Primitive, Reference, ReferenceKind, Style, StyleEntry, StyleParent, Styleable, StyleableEntry,
    Value, ValueKind, ValueMeta,
};
use crate::name::ResourceId;
use crate::name::parse_resource_name;
use crate::proto::wire;
use crate::source_pool::SourcePool;
use crate::string_pool::{Priority, StringPool};

pub(crate) fn decode_source(pb: &wire::Source, source_pool: &SourcePool) -> Source {
    Source {
        path: source_pool.get(pb.path_idx).unwrap_or_default().to_owned(),
        line: Some(pb.position.line_number),
    }
}

fn decode_meta(source: Option<&wire::Source>, comment: &str, source_pool: &SourcePool) -> ValueMeta {
    ValueMeta {
        source: source.map(|source| decode_source(source, source_pool)),
        comment: comment.to_owned(),
        weak: false,
    }
}

pub(crate) fn decode_reference(pb: &wire::Reference) -> DecodeResult<Reference> {
    // 1 = attribute reference, everything else reads as a resource reference.
    let kind = match pb.ref_type {
        1 => ReferenceKind::Attribute,
        _ => ReferenceKind::Resource,
    };

    let name = if pb.name.is_empty() {
        None
    } else {
        let parsed =
            parse_resource_name(&pb.name).ok_or_else(|| DecodeError::InvalidReferenceName {
                name: pb.name.clone(),
            })?;
        Some(parsed.to_resource_name())
    };

    Ok(Reference {
        id: (pb.id != 0).then(|| ResourceId(pb.id)),
        name,
        kind,
        private: pb.private,
    })
}

fn decode_optional_reference(pb: Option<&wire::Reference>) -> DecodeResult<Reference> {
    match pb {
        Some(reference) => decode_reference(reference),
        None => Ok(Reference::default()),
    }
}

pub(crate) fn decode_file_kind(raw: u32) -> FileKind {
    // 1 = png, 2 = binary xml, 3 = proto xml.
    match raw {
        1 => FileKind::Png,
        2 => FileKind::BinaryXml,
        3 => FileKind::ProtoXml,
        _ => FileKind::Unknown,
    }
}

/// Decodes a single item into its kind.
///
/// Metadata is not part of the item message itself; callers attach whatever
/// envelope they decoded it from. String-bearing variants intern through
/// `string_pool` tagged with `config`; file paths additionally intern at
/// high priority and resolve through `files` when a collection is present.
pub fn decode_item(
    pb: &wire::Item,
    config: &ConfigDescriptor,
    string_pool: &mut StringPool,
    files: Option<&dyn FileCollection>,
) -> DecodeResult<ItemKind> {
    let Some(variant) = &pb.value else {
        return Err(DecodeError::UnknownItemVariant);
    };

    let kind = match variant {
        wire::ItemVariant::Ref(pb_ref) => ItemKind::Ref(decode_reference(pb_ref)?),
        wire::ItemVariant::Str(pb_str) => {
            ItemKind::Str(string_pool.intern(&pb_str.value, Priority::Normal, config))
        }
        wire::ItemVariant::RawStr(pb_str) => {
            ItemKind::RawStr(string_pool.intern(&pb_str.value, Priority::Normal, config))
        }
        wire::ItemVariant::StyledStr(pb_styled) => {
            let spans = pb_styled
                .spans
                .iter()
                .map(|span| (span.tag.as_str(), span.first_char, span.last_char));
            ItemKind::StyledStr(string_pool.intern_styled(
                &pb_styled.value,
                spans,
                Priority::Normal,
                config,
            ))
        }
        wire::ItemVariant::File(pb_file) => {
            let path = string_pool.intern(&pb_file.path, Priority::High, config);
            let file = files.and_then(|files| files.find(&pb_file.path));
            ItemKind::File(FileReference {
                path,
                kind: decode_file_kind(pb_file.file_type),
                file,
            })
        }
        wire::ItemVariant::Id => ItemKind::Id,
        wire::ItemVariant::Prim(pb_prim) => ItemKind::Prim(Primitive {
            data_type: pb_prim.data_type as u8,
            data: pb_prim.data,
        }),
    };
    Ok(kind)
}

fn decode_nested_item(
    pb: Option<&wire::Item>,
    config: &ConfigDescriptor,
    string_pool: &mut StringPool,
    files: Option<&dyn FileCollection>,
) -> DecodeResult<ItemKind> {
    match pb {
        Some(item) => decode_item(item, config, string_pool, files),
        None => Err(DecodeError::UnknownItemVariant),
    }
}

fn decode_compound(
    pb: &wire::CompoundValue,
    source_pool: &SourcePool,
    config: &ConfigDescriptor,
    string_pool: &mut StringPool,
    files: Option<&dyn FileCollection>,
) -> DecodeResult<ValueKind> {
    let Some(variant) = &pb.value else {
        return Err(DecodeError::UnknownCompoundValueVariant);
    };

    let kind = match variant {
        wire::CompoundValueVariant::Attr(pb_attr) => {
            let mut symbols = Vec::with_capacity(pb_attr.symbols.len());
            for pb_symbol in &pb_attr.symbols {
                symbols.push(AttrSymbol {
                    meta: decode_meta(pb_symbol.source.as_ref(), &pb_symbol.comment, source_pool),
                    name: decode_optional_reference(pb_symbol.name.as_ref())?,
                    value: pb_symbol.value,
                });
            }
            ValueKind::Attr(Attribute {
                type_mask: AttributeTypeMask::from_bits_retain(pb_attr.format_flags),
                min_int: pb_attr.min_int as i32,
                max_int: pb_attr.max_int as i32,
                symbols,
            })
        }
        wire::CompoundValueVariant::Style(pb_style) => {
            let parent = match &pb_style.parent {
                Some(pb_parent) => Some(StyleParent {
                    reference: decode_reference(pb_parent)?,
                    source: pb_style
                        .parent_source
                        .as_ref()
                        .map(|source| decode_source(source, source_pool)),
                }),
                None => None,
            };

            let mut entries = Vec::with_capacity(pb_style.entries.len());
            for pb_entry in &pb_style.entries {
                let meta = decode_meta(pb_entry.source.as_ref(), &pb_entry.comment, source_pool);
                let kind =
                    decode_nested_item(pb_entry.item.as_ref(), config, string_pool, files)?;
                entries.push(StyleEntry {
                    key: decode_optional_reference(pb_entry.key.as_ref())?,
                    // The entry and its item carry the same metadata.
                    value: Item {
                        meta: meta.clone(),
                        kind,
                    },
                    meta,
                });
            }
            ValueKind::Style(Style { parent, entries })
        }
        wire::CompoundValueVariant::Styleable(pb_styleable) => {
            let mut entries = Vec::with_capacity(pb_styleable.entries.len());
            for pb_entry in &pb_styleable.entries {
                entries.push(StyleableEntry {
                    meta: decode_meta(pb_entry.source.as_ref(), &pb_entry.comment, source_pool),
                    attr: decode_optional_reference(pb_entry.attr.as_ref())?,
                });
            }
            ValueKind::Styleable(Styleable { entries })
        }
        wire::CompoundValueVariant::Array(pb_array) => {
            let mut elements = Vec::with_capacity(pb_array.elements.len());
            for pb_element in &pb_array.elements {
                let kind =
                    decode_nested_item(pb_element.item.as_ref(), config, string_pool, files)?;
                elements.push(Item {
                    meta: decode_meta(pb_element.source.as_ref(), &pb_element.comment, source_pool),
                    kind,
                });
            }
            ValueKind::Array(Array { elements })
        }
        wire::CompoundValueVariant::Plural(pb_plural) => {
            let mut plural = Plural::default();
            for pb_entry in &pb_plural.entries {
                // 0..4 name the explicit quantities, anything else is "other".
                let slot = match pb_entry.arity {
                    0 => Plural::ZERO,
                    1 => Plural::ONE,
                    2 => Plural::TWO,
                    3 => Plural::FEW,
                    4 => Plural::MANY,
                    _ => Plural::OTHER,
                };
                let kind =
                    decode_nested_item(pb_entry.item.as_ref(), config, string_pool, files)?;
                plural.values[slot] = Some(Item {
                    meta: decode_meta(pb_entry.source.as_ref(), &pb_entry.comment, source_pool),
                    kind,
                });
            }
            ValueKind::Plural(plural)
        }
    };
    Ok(kind)
}

/// Decodes a full value envelope: the variant plus its shared metadata.
pub fn decode_value(
    pb: &wire::Value,
    source_pool: &SourcePool,
    config: &ConfigDescriptor,
    string_pool: &mut StringPool,
    files: Option<&dyn FileCollection>,
) -> DecodeResult<Value> {
    let kind = match &pb.value {
        Some(wire::ValueVariant::Item(pb_item)) => {
            ValueKind::Item(decode_item(pb_item, config, string_pool, files)?)
        }
        Some(wire::ValueVariant::CompoundValue(pb_compound)) => {
            decode_compound(pb_compound, source_pool, config, string_pool, files)?
        }
        None => return Err(DecodeError::UnknownValueVariant),
    };

    let mut meta = decode_meta(pb.source.as_ref(), &pb.comment, source_pool);
    meta.weak = pb.weak;
    Ok(Value { meta, kind })
}
