//! Decoded XML document tree.

use crate::model::value::Item;
use crate::name::ResourceId;
use crate::string_pool::StringPool;

/// Namespace declared on an element (`xmlns:prefix="uri"`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamespaceDecl {
    pub prefix: String,
    pub uri: String,
    pub line_number: u32,
    pub column_number: u32,
}

/// Attribute of an element, optionally carrying the id of the attribute
/// resource it maps to and a precompiled value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlAttribute {
    pub name: String,
    pub namespace_uri: String,
    pub value: String,
    pub resource_id: Option<ResourceId>,
    pub compiled_value: Option<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub namespace_uri: String,
    pub line_number: u32,
    pub column_number: u32,
    pub namespace_decls: Vec<NamespaceDecl>,
    pub attributes: Vec<XmlAttribute>,
    /// Children in document order.
    pub children: Vec<XmlNode>,
}

impl Element {
    pub fn find_attribute(&self, namespace_uri: &str, name: &str) -> Option<&XmlAttribute> {
        self.attributes
            .iter()
            .find(|attr| attr.namespace_uri == namespace_uri && attr.name == name)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    pub text: String,
    pub line_number: u32,
    pub column_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    Text(Text),
}

/// A whole decoded document: the root element plus the pool holding any
/// strings its precompiled attribute values interned.
#[derive(Debug)]
pub struct XmlResource {
    pub root: Element,
    pub string_pool: StringPool,
}
