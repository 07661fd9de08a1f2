//! Compiled XML document decoding.

use crate::config::ConfigDescriptor;
use crate::err::{DecodeError, DecodeResult};
use crate::model::Source;
use crate::model::value::{Item, ValueMeta};
use crate::model::xml::{Element, NamespaceDecl, Text, XmlAttribute, XmlNode, XmlResource};
use crate::name::ResourceId;
use crate::proto::value::decode_item;
use crate::proto::wire;
use crate::string_pool::StringPool;

/// Parses and decodes a serialized XML document in one step.
pub fn parse_xml(bytes: &[u8]) -> DecodeResult<Option<XmlResource>> {
    let pb = wire::XmlNode::parse(bytes)?;
    decode_xml(&pb)
}

/// Decodes a parsed XML node tree into a document.
///
/// Returns `None` when the top node is not an element; a document cannot
/// hang off bare text. Precompiled attribute values are interned into the
/// document's own string pool.
pub fn decode_xml(pb: &wire::XmlNode) -> DecodeResult<Option<XmlResource>> {
    let Some(wire::XmlNodeVariant::Element(pb_root)) = &pb.node else {
        return Ok(None);
    };
    let mut string_pool = StringPool::new();
    let root = decode_element(pb_root, &pb.source, &mut string_pool)?;
    Ok(Some(XmlResource { root, string_pool }))
}

fn decode_element(
    pb: &wire::XmlElement,
    source: &wire::SourcePosition,
    string_pool: &mut StringPool,
) -> DecodeResult<Element> {
    let mut element = Element {
        name: pb.name.clone(),
        namespace_uri: pb.namespace_uri.clone(),
        line_number: source.line_number,
        column_number: source.column_number,
        ..Element::default()
    };

    for pb_decl in &pb.namespace_decls {
        element.namespace_decls.push(NamespaceDecl {
            prefix: pb_decl.prefix.clone(),
            uri: pb_decl.uri.clone(),
            line_number: pb_decl.source.line_number,
            column_number: pb_decl.source.column_number,
        });
    }

    // Attribute items carry no config of their own.
    let default_config = ConfigDescriptor::default();
    for pb_attr in &pb.attributes {
        let mut attribute = XmlAttribute {
            namespace_uri: pb_attr.namespace_uri.clone(),
            name: pb_attr.name.clone(),
            value: pb_attr.value.clone(),
            ..XmlAttribute::default()
        };
        if pb_attr.resource_id != 0 {
            attribute.resource_id = Some(ResourceId(pb_attr.resource_id));
        }
        if let Some(pb_item) = &pb_attr.compiled_item {
            let kind = decode_item(pb_item, &default_config, string_pool, None)?;
            attribute.compiled_value = Some(Item {
                meta: ValueMeta {
                    source: Some(Source::with_line("", pb_attr.source.line_number)),
                    ..ValueMeta::default()
                },
                kind,
            });
        }
        element.attributes.push(attribute);
    }

    for pb_child in &pb.children {
        match &pb_child.node {
            Some(wire::XmlNodeVariant::Element(pb_el)) => {
                let child = decode_element(pb_el, &pb_child.source, string_pool)?;
                element.children.push(XmlNode::Element(child));
            }
            Some(wire::XmlNodeVariant::Text(text)) => {
                element.children.push(XmlNode::Text(Text {
                    text: text.clone(),
                    line_number: pb_child.source.line_number,
                    column_number: pb_child.source.column_number,
                }));
            }
            None => return Err(DecodeError::UnknownXmlNodeVariant),
        }
    }

    Ok(element)
}
