//! Resource values: single items and the compound shapes built from them.
//!
//! Every value carries the same metadata envelope (source, comment, weak
//! flag). References inside any value shape are reachable through
//! [`visit_references_mut`], which the table resolver uses to attach names
//! to numeric-only references.

use bitflags::bitflags;

use crate::files::FileHandle;
use crate::model::Source;
use crate::model::file::FileKind;
use crate::name::{ResourceId, ResourceName};
use crate::string_pool::{StringRef, StyledRef};

/// Metadata shared by all value shapes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueMeta {
    pub source: Option<Source>,
    pub comment: String,
    pub weak: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceKind {
    /// `@resource` style reference.
    #[default]
    Resource,
    /// `?attribute` style reference.
    Attribute,
}

/// Reference to another resource, by id, by name, or both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reference {
    pub id: Option<ResourceId>,
    pub name: Option<ResourceName>,
    pub kind: ReferenceKind,
    pub private: bool,
}

/// Raw binary value in the platform's type/data encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitive {
    pub data_type: u8,
    pub data: u32,
}

/// Reference to a file elsewhere in the package, with the handle attached
/// when a file collection was supplied to the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub path: StringRef,
    pub kind: FileKind,
    pub file: Option<FileHandle>,
}

/// A single (non-compound) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Ref(Reference),
    Str(StringRef),
    RawStr(StringRef),
    StyledStr(StyledRef),
    File(FileReference),
    Id,
    Prim(Primitive),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub meta: ValueMeta,
    pub kind: ItemKind,
}

bitflags! {
    /// Accepted formats for an attribute, matching the platform's
    /// attribute-format bits. Unknown bits pass through untouched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AttributeTypeMask: u32 {
        const REFERENCE = 1 << 0;
        const STRING = 1 << 1;
        const INTEGER = 1 << 2;
        const BOOLEAN = 1 << 3;
        const COLOR = 1 << 4;
        const FLOAT = 1 << 5;
        const DIMENSION = 1 << 6;
        const FRACTION = 1 << 7;
        const ENUM = 1 << 16;
        const FLAGS = 1 << 17;
        const ANY = 0x0000_ffff;
    }
}

/// One named constant of an enum or flag attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSymbol {
    pub meta: ValueMeta,
    pub name: Reference,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub type_mask: AttributeTypeMask,
    pub min_int: i32,
    pub max_int: i32,
    pub symbols: Vec<AttrSymbol>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleParent {
    pub reference: Reference,
    pub source: Option<Source>,
}

/// One `key = value` pair of a style. The metadata is shared verbatim with
/// the nested item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub meta: ValueMeta,
    pub key: Reference,
    pub value: Item,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    pub parent: Option<StyleParent>,
    pub entries: Vec<StyleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleableEntry {
    pub meta: ValueMeta,
    pub attr: Reference,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Styleable {
    pub entries: Vec<StyleableEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Array {
    pub elements: Vec<Item>,
}

/// Quantity-keyed values. A later entry with the same arity silently
/// replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plural {
    pub values: [Option<Item>; 6],
}

impl Plural {
    pub const ZERO: usize = 0;
    pub const ONE: usize = 1;
    pub const TWO: usize = 2;
    pub const FEW: usize = 3;
    pub const MANY: usize = 4;
    pub const OTHER: usize = 5;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Item(ItemKind),
    Attr(Attribute),
    Style(Style),
    Styleable(Styleable),
    Array(Array),
    Plural(Plural),
}

/// A fully decoded resource value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub meta: ValueMeta,
    pub kind: ValueKind,
}

fn visit_item_references_mut(kind: &mut ItemKind, f: &mut impl FnMut(&mut Reference)) {
    if let ItemKind::Ref(reference) = kind {
        f(reference);
    }
}

/// Calls `f` on every reference reachable from `value`, including those
/// nested in compound entries.
pub fn visit_references_mut(value: &mut Value, f: &mut impl FnMut(&mut Reference)) {
    match &mut value.kind {
        ValueKind::Item(kind) => visit_item_references_mut(kind, f),
        ValueKind::Attr(attr) => {
            for symbol in &mut attr.symbols {
                f(&mut symbol.name);
            }
        }
        ValueKind::Style(style) => {
            if let Some(parent) = &mut style.parent {
                f(&mut parent.reference);
            }
            for entry in &mut style.entries {
                f(&mut entry.key);
                visit_item_references_mut(&mut entry.value.kind, f);
            }
        }
        ValueKind::Styleable(styleable) => {
            for entry in &mut styleable.entries {
                f(&mut entry.attr);
            }
        }
        ValueKind::Array(array) => {
            for element in &mut array.elements {
                visit_item_references_mut(&mut element.kind, f);
            }
        }
        ValueKind::Plural(plural) => {
            for item in plural.values.iter_mut().flatten() {
                visit_item_references_mut(&mut item.kind, f);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::ResourceType;

    fn reference(id: u32) -> Reference {
        Reference {
            id: Some(ResourceId(id)),
            ..Reference::default()
        }
    }

    fn ref_item(id: u32) -> Item {
        Item {
            meta: ValueMeta::default(),
            kind: ItemKind::Ref(reference(id)),
        }
    }

    #[test]
    fn visits_references_in_every_compound_shape() {
        let mut style = Value {
            meta: ValueMeta::default(),
            kind: ValueKind::Style(Style {
                parent: Some(StyleParent {
                    reference: reference(0x7f01_0001),
                    source: None,
                }),
                entries: vec![StyleEntry {
                    meta: ValueMeta::default(),
                    key: reference(0x0101_0001),
                    value: ref_item(0x7f01_0002),
                }],
            }),
        };

        let mut seen = Vec::new();
        visit_references_mut(&mut style, &mut |reference| {
            seen.push(reference.id.map(|id| id.0));
        });
        assert_eq!(
            seen,
            vec![Some(0x7f01_0001), Some(0x0101_0001), Some(0x7f01_0002)]
        );

        let mut plural = Value {
            meta: ValueMeta::default(),
            kind: ValueKind::Plural(Plural {
                values: {
                    let mut values: [Option<Item>; 6] = Default::default();
                    values[Plural::OTHER] = Some(ref_item(0x7f02_0001));
                    values
                },
            }),
        };
        let mut count = 0;
        visit_references_mut(&mut plural, &mut |_| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn visitor_can_rewrite_names() {
        let mut value = Value {
            meta: ValueMeta::default(),
            kind: ValueKind::Item(ItemKind::Ref(reference(0x7f01_0001))),
        };
        visit_references_mut(&mut value, &mut |reference| {
            reference.name = Some(ResourceName::new("com.app", ResourceType::String, "foo"));
        });

        match &value.kind {
            ValueKind::Item(ItemKind::Ref(reference)) => {
                assert_eq!(reference.id, Some(ResourceId(0x7f01_0001)));
                assert_eq!(
                    reference.name.as_ref().map(|name| name.entry.as_str()),
                    Some("foo")
                );
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
