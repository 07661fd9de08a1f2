//! Wire messages of the serialized resource model.
//!
//! Each struct mirrors one message of the interchange schema and parses
//! itself from a raw byte slice. Unknown fields and fields with an
//! unexpected wire type are skipped, so readers stay compatible with newer
//! writers. Scalar ids that need presence (`package_id` and friends) travel
//! wrapped in a one-field message and are flattened here into `Option`s.

use crate::err::{DecodeError, DecodeResult};
use crate::proto::reader::{WireReader, WireType};

/// Upper bound on element nesting in documents. Hostile inputs otherwise
/// recurse the parser off the stack.
pub const MAX_NESTING_DEPTH: usize = 256;

fn parse_id_wrapper(bytes: &[u8], what: &'static str) -> DecodeResult<u32> {
    let mut reader = WireReader::new(bytes);
    let mut id = 0;
    while !reader.at_end() {
        let (field, wire_type) = reader.field_header()?;
        match (field, wire_type) {
            (1, WireType::Varint) => id = reader.varint_u32(what)?,
            _ => reader.skip(wire_type, what)?,
        }
    }
    Ok(id)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourcePosition {
    pub line_number: u32,
    pub column_number: u32,
}

impl SourcePosition {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<SourcePosition> {
        let mut reader = WireReader::new(bytes);
        let mut msg = SourcePosition::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::Varint) => msg.line_number = reader.varint_u32("line number")?,
                (2, WireType::Varint) => msg.column_number = reader.varint_u32("column number")?,
                _ => reader.skip(wire_type, "source position")?,
            }
        }
        Ok(msg)
    }
}

/// Where a record came from: an index into the source pool plus a position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Source {
    pub path_idx: u32,
    pub position: SourcePosition,
}

impl Source {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Source> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Source::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::Varint) => msg.path_idx = reader.varint_u32("path index")?,
                (2, WireType::LengthDelimited) => {
                    msg.position = SourcePosition::parse(reader.bytes("position")?)?;
                }
                _ => reader.skip(wire_type, "source")?,
            }
        }
        Ok(msg)
    }
}

/// Device configuration as serialized. Enumerated axes are raw numbers
/// here; the configuration decoder gives them meaning.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Configuration {
    pub mcc: u32,
    pub mnc: u32,
    pub locale: String,
    pub layout_direction: u32,
    pub screen_width: u32,
    pub screen_height: u32,
    pub screen_width_dp: u32,
    pub screen_height_dp: u32,
    pub smallest_screen_width_dp: u32,
    pub screen_layout_size: u32,
    pub screen_layout_long: u32,
    pub screen_round: u32,
    pub wide_color_gamut: u32,
    pub hdr: u32,
    pub orientation: u32,
    pub ui_mode_type: u32,
    pub ui_mode_night: u32,
    pub density: u32,
    pub touchscreen: u32,
    pub keys_hidden: u32,
    pub keyboard: u32,
    pub nav_hidden: u32,
    pub navigation: u32,
    pub sdk_version: u32,
    pub product: String,
}

impl Configuration {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Configuration> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Configuration::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::Varint) => msg.mcc = reader.varint_u32("mcc")?,
                (2, WireType::Varint) => msg.mnc = reader.varint_u32("mnc")?,
                (3, WireType::LengthDelimited) => msg.locale = reader.string("locale")?,
                (4, WireType::Varint) => {
                    msg.layout_direction = reader.varint_u32("layout direction")?;
                }
                (5, WireType::Varint) => msg.screen_width = reader.varint_u32("screen width")?,
                (6, WireType::Varint) => msg.screen_height = reader.varint_u32("screen height")?,
                (7, WireType::Varint) => {
                    msg.screen_width_dp = reader.varint_u32("screen width dp")?;
                }
                (8, WireType::Varint) => {
                    msg.screen_height_dp = reader.varint_u32("screen height dp")?;
                }
                (9, WireType::Varint) => {
                    msg.smallest_screen_width_dp = reader.varint_u32("smallest screen width dp")?;
                }
                (10, WireType::Varint) => {
                    msg.screen_layout_size = reader.varint_u32("screen layout size")?;
                }
                (11, WireType::Varint) => {
                    msg.screen_layout_long = reader.varint_u32("screen layout long")?;
                }
                (12, WireType::Varint) => msg.screen_round = reader.varint_u32("screen round")?,
                (13, WireType::Varint) => {
                    msg.wide_color_gamut = reader.varint_u32("wide color gamut")?;
                }
                (14, WireType::Varint) => msg.hdr = reader.varint_u32("hdr")?,
                (15, WireType::Varint) => msg.orientation = reader.varint_u32("orientation")?,
                (16, WireType::Varint) => msg.ui_mode_type = reader.varint_u32("ui mode type")?,
                (17, WireType::Varint) => msg.ui_mode_night = reader.varint_u32("ui mode night")?,
                (18, WireType::Varint) => msg.density = reader.varint_u32("density")?,
                (19, WireType::Varint) => msg.touchscreen = reader.varint_u32("touchscreen")?,
                (20, WireType::Varint) => msg.keys_hidden = reader.varint_u32("keys hidden")?,
                (21, WireType::Varint) => msg.keyboard = reader.varint_u32("keyboard")?,
                (22, WireType::Varint) => msg.nav_hidden = reader.varint_u32("nav hidden")?,
                (23, WireType::Varint) => msg.navigation = reader.varint_u32("navigation")?,
                (24, WireType::Varint) => msg.sdk_version = reader.varint_u32("sdk version")?,
                (25, WireType::LengthDelimited) => msg.product = reader.string("product")?,
                _ => reader.skip(wire_type, "configuration")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reference {
    /// 0 = resource reference, 1 = attribute reference.
    pub ref_type: u32,
    pub id: u32,
    pub name: String,
    pub private: bool,
}

impl Reference {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Reference> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Reference::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::Varint) => msg.ref_type = reader.varint_u32("reference type")?,
                (2, WireType::Varint) => msg.id = reader.varint_u32("reference id")?,
                (3, WireType::LengthDelimited) => msg.name = reader.string("reference name")?,
                (4, WireType::Varint) => msg.private = reader.bool("reference private")?,
                _ => reader.skip(wire_type, "reference")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringValue {
    pub value: String,
}

impl StringValue {
    pub(crate) fn parse(bytes: &[u8], what: &'static str) -> DecodeResult<StringValue> {
        let mut reader = WireReader::new(bytes);
        let mut msg = StringValue::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => msg.value = reader.string(what)?,
                _ => reader.skip(wire_type, what)?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledStringSpan {
    pub tag: String,
    pub first_char: u32,
    pub last_char: u32,
}

impl StyledStringSpan {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<StyledStringSpan> {
        let mut reader = WireReader::new(bytes);
        let mut msg = StyledStringSpan::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => msg.tag = reader.string("span tag")?,
                (2, WireType::Varint) => msg.first_char = reader.varint_u32("span first char")?,
                (3, WireType::Varint) => msg.last_char = reader.varint_u32("span last char")?,
                _ => reader.skip(wire_type, "styled string span")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledString {
    pub value: String,
    pub spans: Vec<StyledStringSpan>,
}

impl StyledString {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<StyledString> {
        let mut reader = WireReader::new(bytes);
        let mut msg = StyledString::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => msg.value = reader.string("styled string")?,
                (2, WireType::LengthDelimited) => {
                    msg.spans.push(StyledStringSpan::parse(reader.bytes("span")?)?);
                }
                _ => reader.skip(wire_type, "styled string")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileReference {
    pub path: String,
    /// 0 = unknown, 1 = png, 2 = binary xml, 3 = proto xml.
    pub file_type: u32,
}

impl FileReference {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<FileReference> {
        let mut reader = WireReader::new(bytes);
        let mut msg = FileReference::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => msg.path = reader.string("file path")?,
                (2, WireType::Varint) => msg.file_type = reader.varint_u32("file type")?,
                _ => reader.skip(wire_type, "file reference")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Primitive {
    pub data_type: u32,
    pub data: u32,
}

impl Primitive {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Primitive> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Primitive::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::Varint) => msg.data_type = reader.varint_u32("primitive type")?,
                (2, WireType::Varint) => msg.data = reader.varint_u32("primitive data")?,
                _ => reader.skip(wire_type, "primitive")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemVariant {
    Ref(Reference),
    Str(StringValue),
    RawStr(StringValue),
    StyledStr(StyledString),
    File(FileReference),
    Id,
    Prim(Primitive),
}

/// A single value. Exactly one variant is expected; `value` stays `None`
/// when the writer set none (or only ones this reader does not know).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    pub value: Option<ItemVariant>,
}

impl Item {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Item> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Item::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.value = Some(ItemVariant::Ref(Reference::parse(reader.bytes("ref")?)?));
                }
                (2, WireType::LengthDelimited) => {
                    msg.value = Some(ItemVariant::Str(StringValue::parse(
                        reader.bytes("str")?,
                        "string value",
                    )?));
                }
                (3, WireType::LengthDelimited) => {
                    msg.value = Some(ItemVariant::RawStr(StringValue::parse(
                        reader.bytes("raw str")?,
                        "raw string value",
                    )?));
                }
                (4, WireType::LengthDelimited) => {
                    msg.value = Some(ItemVariant::StyledStr(StyledString::parse(
                        reader.bytes("styled str")?,
                    )?));
                }
                (5, WireType::LengthDelimited) => {
                    msg.value = Some(ItemVariant::File(FileReference::parse(
                        reader.bytes("file")?,
                    )?));
                }
                (6, WireType::LengthDelimited) => {
                    let _ = reader.bytes("id")?;
                    msg.value = Some(ItemVariant::Id);
                }
                (7, WireType::LengthDelimited) => {
                    msg.value = Some(ItemVariant::Prim(Primitive::parse(reader.bytes("prim")?)?));
                }
                _ => reader.skip(wire_type, "item")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeSymbol {
    pub source: Option<Source>,
    pub comment: String,
    pub name: Option<Reference>,
    pub value: u32,
}

impl AttributeSymbol {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<AttributeSymbol> {
        let mut reader = WireReader::new(bytes);
        let mut msg = AttributeSymbol::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.source = Some(Source::parse(reader.bytes("symbol source")?)?);
                }
                (2, WireType::LengthDelimited) => {
                    msg.comment = reader.string("symbol comment")?;
                }
                (3, WireType::LengthDelimited) => {
                    msg.name = Some(Reference::parse(reader.bytes("symbol name")?)?);
                }
                (4, WireType::Varint) => msg.value = reader.varint_u32("symbol value")?,
                _ => reader.skip(wire_type, "attribute symbol")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attribute {
    pub format_flags: u32,
    pub min_int: u32,
    pub max_int: u32,
    pub symbols: Vec<AttributeSymbol>,
}

impl Attribute {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Attribute> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Attribute::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::Varint) => msg.format_flags = reader.varint_u32("format flags")?,
                (2, WireType::Varint) => msg.min_int = reader.varint_u32("min int")?,
                (3, WireType::Varint) => msg.max_int = reader.varint_u32("max int")?,
                (4, WireType::LengthDelimited) => {
                    msg.symbols.push(AttributeSymbol::parse(reader.bytes("symbol")?)?);
                }
                _ => reader.skip(wire_type, "attribute")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleEntry {
    pub source: Option<Source>,
    pub comment: String,
    pub key: Option<Reference>,
    pub item: Option<Item>,
}

impl StyleEntry {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<StyleEntry> {
        let mut reader = WireReader::new(bytes);
        let mut msg = StyleEntry::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.source = Some(Source::parse(reader.bytes("entry source")?)?);
                }
                (2, WireType::LengthDelimited) => msg.comment = reader.string("entry comment")?,
                (3, WireType::LengthDelimited) => {
                    msg.key = Some(Reference::parse(reader.bytes("entry key")?)?);
                }
                (4, WireType::LengthDelimited) => {
                    msg.item = Some(Item::parse(reader.bytes("entry item")?)?);
                }
                _ => reader.skip(wire_type, "style entry")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub parent: Option<Reference>,
    pub parent_source: Option<Source>,
    pub entries: Vec<StyleEntry>,
}

impl Style {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Style> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Style::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.parent = Some(Reference::parse(reader.bytes("style parent")?)?);
                }
                (2, WireType::LengthDelimited) => {
                    msg.parent_source = Some(Source::parse(reader.bytes("parent source")?)?);
                }
                (3, WireType::LengthDelimited) => {
                    msg.entries.push(StyleEntry::parse(reader.bytes("style entry")?)?);
                }
                _ => reader.skip(wire_type, "style")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleableEntry {
    pub source: Option<Source>,
    pub comment: String,
    pub attr: Option<Reference>,
}

impl StyleableEntry {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<StyleableEntry> {
        let mut reader = WireReader::new(bytes);
        let mut msg = StyleableEntry::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.source = Some(Source::parse(reader.bytes("entry source")?)?);
                }
                (2, WireType::LengthDelimited) => msg.comment = reader.string("entry comment")?,
                (3, WireType::LengthDelimited) => {
                    msg.attr = Some(Reference::parse(reader.bytes("entry attr")?)?);
                }
                _ => reader.skip(wire_type, "styleable entry")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Styleable {
    pub entries: Vec<StyleableEntry>,
}

impl Styleable {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Styleable> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Styleable::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.entries.push(StyleableEntry::parse(reader.bytes("styleable entry")?)?);
                }
                _ => reader.skip(wire_type, "styleable")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayElement {
    pub source: Option<Source>,
    pub comment: String,
    pub item: Option<Item>,
}

impl ArrayElement {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<ArrayElement> {
        let mut reader = WireReader::new(bytes);
        let mut msg = ArrayElement::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.source = Some(Source::parse(reader.bytes("element source")?)?);
                }
                (2, WireType::LengthDelimited) => {
                    msg.comment = reader.string("element comment")?;
                }
                (3, WireType::LengthDelimited) => {
                    msg.item = Some(Item::parse(reader.bytes("element item")?)?);
                }
                _ => reader.skip(wire_type, "array element")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    pub elements: Vec<ArrayElement>,
}

impl Array {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Array> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Array::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.elements.push(ArrayElement::parse(reader.bytes("array element")?)?);
                }
                _ => reader.skip(wire_type, "array")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PluralEntry {
    pub source: Option<Source>,
    pub comment: String,
    /// 0 = zero, 1 = one, 2 = two, 3 = few, 4 = many, 5 = other.
    pub arity: u32,
    pub item: Option<Item>,
}

impl PluralEntry {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<PluralEntry> {
        let mut reader = WireReader::new(bytes);
        let mut msg = PluralEntry::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.source = Some(Source::parse(reader.bytes("entry source")?)?);
                }
                (2, WireType::LengthDelimited) => msg.comment = reader.string("entry comment")?,
                (3, WireType::Varint) => msg.arity = reader.varint_u32("arity")?,
                (4, WireType::LengthDelimited) => {
                    msg.item = Some(Item::parse(reader.bytes("entry item")?)?);
                }
                _ => reader.skip(wire_type, "plural entry")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plural {
    pub entries: Vec<PluralEntry>,
}

impl Plural {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Plural> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Plural::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.entries.push(PluralEntry::parse(reader.bytes("plural entry")?)?);
                }
                _ => reader.skip(wire_type, "plural")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompoundValueVariant {
    Attr(Attribute),
    Style(Style),
    Styleable(Styleable),
    Array(Array),
    Plural(Plural),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundValue {
    pub value: Option<CompoundValueVariant>,
}

impl CompoundValue {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<CompoundValue> {
        let mut reader = WireReader::new(bytes);
        let mut msg = CompoundValue::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.value = Some(CompoundValueVariant::Attr(Attribute::parse(
                        reader.bytes("attr")?,
                    )?));
                }
                (2, WireType::LengthDelimited) => {
                    msg.value = Some(CompoundValueVariant::Style(Style::parse(
                        reader.bytes("style")?,
                    )?));
                }
                (3, WireType::LengthDelimited) => {
                    msg.value = Some(CompoundValueVariant::Styleable(Styleable::parse(
                        reader.bytes("styleable")?,
                    )?));
                }
                (4, WireType::LengthDelimited) => {
                    msg.value = Some(CompoundValueVariant::Array(Array::parse(
                        reader.bytes("array")?,
                    )?));
                }
                (5, WireType::LengthDelimited) => {
                    msg.value = Some(CompoundValueVariant::Plural(Plural::parse(
                        reader.bytes("plural")?,
                    )?));
                }
                _ => reader.skip(wire_type, "compound value")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueVariant {
    Item(Item),
    CompoundValue(CompoundValue),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Value {
    pub value: Option<ValueVariant>,
    pub source: Option<Source>,
    pub comment: String,
    pub weak: bool,
}

impl Value {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Value> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Value::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.value = Some(ValueVariant::Item(Item::parse(reader.bytes("item")?)?));
                }
                (2, WireType::LengthDelimited) => {
                    msg.value = Some(ValueVariant::CompoundValue(CompoundValue::parse(
                        reader.bytes("compound value")?,
                    )?));
                }
                (3, WireType::LengthDelimited) => {
                    msg.source = Some(Source::parse(reader.bytes("value source")?)?);
                }
                (4, WireType::LengthDelimited) => msg.comment = reader.string("value comment")?,
                (5, WireType::Varint) => msg.weak = reader.bool("value weak")?,
                _ => reader.skip(wire_type, "value")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigValue {
    pub config: Option<Configuration>,
    pub value: Option<Value>,
}

impl ConfigValue {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<ConfigValue> {
        let mut reader = WireReader::new(bytes);
        let mut msg = ConfigValue::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.config = Some(Configuration::parse(reader.bytes("config")?)?);
                }
                (2, WireType::LengthDelimited) => {
                    msg.value = Some(Value::parse(reader.bytes("value")?)?);
                }
                _ => reader.skip(wire_type, "config value")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolStatus {
    /// 0 = unknown, 1 = private, 2 = public.
    pub visibility: u32,
    pub source: Option<Source>,
    pub comment: String,
    pub allow_new: bool,
}

impl SymbolStatus {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<SymbolStatus> {
        let mut reader = WireReader::new(bytes);
        let mut msg = SymbolStatus::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::Varint) => msg.visibility = reader.varint_u32("visibility")?,
                (2, WireType::LengthDelimited) => {
                    msg.source = Some(Source::parse(reader.bytes("status source")?)?);
                }
                (3, WireType::LengthDelimited) => msg.comment = reader.string("status comment")?,
                (4, WireType::Varint) => msg.allow_new = reader.bool("allow new")?,
                _ => reader.skip(wire_type, "symbol status")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    pub entry_id: Option<u32>,
    pub name: String,
    pub symbol_status: Option<SymbolStatus>,
    pub config_values: Vec<ConfigValue>,
}

impl Entry {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Entry> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Entry::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.entry_id = Some(parse_id_wrapper(reader.bytes("entry id")?, "entry id")?);
                }
                (2, WireType::LengthDelimited) => msg.name = reader.string("entry name")?,
                (3, WireType::LengthDelimited) => {
                    msg.symbol_status = Some(SymbolStatus::parse(reader.bytes("symbol status")?)?);
                }
                (4, WireType::LengthDelimited) => {
                    msg.config_values.push(ConfigValue::parse(reader.bytes("config value")?)?);
                }
                _ => reader.skip(wire_type, "entry")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Type {
    pub type_id: Option<u32>,
    pub name: String,
    pub entries: Vec<Entry>,
}

impl Type {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Type> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Type::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.type_id = Some(parse_id_wrapper(reader.bytes("type id")?, "type id")?);
                }
                (2, WireType::LengthDelimited) => msg.name = reader.string("type name")?,
                (3, WireType::LengthDelimited) => {
                    msg.entries.push(Entry::parse(reader.bytes("entry")?)?);
                }
                _ => reader.skip(wire_type, "type")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Package {
    pub package_id: Option<u32>,
    pub package_name: String,
    pub types: Vec<Type>,
}

impl Package {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<Package> {
        let mut reader = WireReader::new(bytes);
        let mut msg = Package::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.package_id =
                        Some(parse_id_wrapper(reader.bytes("package id")?, "package id")?);
                }
                (2, WireType::LengthDelimited) => {
                    msg.package_name = reader.string("package name")?;
                }
                (3, WireType::LengthDelimited) => {
                    msg.types.push(Type::parse(reader.bytes("type")?)?);
                }
                _ => reader.skip(wire_type, "package")?,
            }
        }
        Ok(msg)
    }
}

/// Top-level table message. The source pool arrives as an opaque blob
/// (itself wrapped in a one-field message) and is decoded separately.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceTable {
    pub source_pool: Option<Vec<u8>>,
    pub packages: Vec<Package>,
}

impl ResourceTable {
    pub fn parse(bytes: &[u8]) -> DecodeResult<ResourceTable> {
        let mut reader = WireReader::new(bytes);
        let mut msg = ResourceTable::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.source_pool = Some(parse_source_pool_wrapper(reader.bytes("source pool")?)?);
                }
                (2, WireType::LengthDelimited) => {
                    msg.packages.push(Package::parse(reader.bytes("package")?)?);
                }
                _ => reader.skip(wire_type, "resource table")?,
            }
        }
        Ok(msg)
    }
}

fn parse_source_pool_wrapper(bytes: &[u8]) -> DecodeResult<Vec<u8>> {
    let mut reader = WireReader::new(bytes);
    let mut data = Vec::new();
    while !reader.at_end() {
        let (field, wire_type) = reader.field_header()?;
        match (field, wire_type) {
            (1, WireType::LengthDelimited) => {
                data = reader.bytes("source pool data")?.to_vec();
            }
            _ => reader.skip(wire_type, "source pool")?,
        }
    }
    Ok(data)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlNamespace {
    pub prefix: String,
    pub uri: String,
    pub source: SourcePosition,
}

impl XmlNamespace {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<XmlNamespace> {
        let mut reader = WireReader::new(bytes);
        let mut msg = XmlNamespace::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => msg.prefix = reader.string("namespace prefix")?,
                (2, WireType::LengthDelimited) => msg.uri = reader.string("namespace uri")?,
                (3, WireType::LengthDelimited) => {
                    msg.source = SourcePosition::parse(reader.bytes("namespace source")?)?;
                }
                _ => reader.skip(wire_type, "xml namespace")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlAttribute {
    pub namespace_uri: String,
    pub name: String,
    pub value: String,
    pub resource_id: u32,
    pub compiled_item: Option<Item>,
    pub source: SourcePosition,
}

impl XmlAttribute {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<XmlAttribute> {
        let mut reader = WireReader::new(bytes);
        let mut msg = XmlAttribute::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.namespace_uri = reader.string("attribute namespace")?;
                }
                (2, WireType::LengthDelimited) => msg.name = reader.string("attribute name")?,
                (3, WireType::LengthDelimited) => msg.value = reader.string("attribute value")?,
                (4, WireType::Varint) => msg.resource_id = reader.varint_u32("attribute id")?,
                (5, WireType::LengthDelimited) => {
                    msg.compiled_item = Some(Item::parse(reader.bytes("compiled item")?)?);
                }
                (6, WireType::LengthDelimited) => {
                    msg.source = SourcePosition::parse(reader.bytes("attribute source")?)?;
                }
                _ => reader.skip(wire_type, "xml attribute")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    pub namespace_decls: Vec<XmlNamespace>,
    pub namespace_uri: String,
    pub name: String,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    fn parse_at_depth(bytes: &[u8], depth: usize) -> DecodeResult<XmlElement> {
        let mut reader = WireReader::new(bytes);
        let mut msg = XmlElement::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.namespace_decls
                        .push(XmlNamespace::parse(reader.bytes("namespace declaration")?)?);
                }
                (2, WireType::LengthDelimited) => {
                    msg.namespace_uri = reader.string("element namespace")?;
                }
                (3, WireType::LengthDelimited) => msg.name = reader.string("element name")?,
                (4, WireType::LengthDelimited) => {
                    msg.attributes.push(XmlAttribute::parse(reader.bytes("attribute")?)?);
                }
                (5, WireType::LengthDelimited) => {
                    msg.children
                        .push(XmlNode::parse_at_depth(reader.bytes("child")?, depth + 1)?);
                }
                _ => reader.skip(wire_type, "xml element")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNodeVariant {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlNode {
    pub node: Option<XmlNodeVariant>,
    pub source: SourcePosition,
}

impl XmlNode {
    pub fn parse(bytes: &[u8]) -> DecodeResult<XmlNode> {
        XmlNode::parse_at_depth(bytes, 0)
    }

    fn parse_at_depth(bytes: &[u8], depth: usize) -> DecodeResult<XmlNode> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(DecodeError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        let mut reader = WireReader::new(bytes);
        let mut msg = XmlNode::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.node = Some(XmlNodeVariant::Element(XmlElement::parse_at_depth(
                        reader.bytes("element")?,
                        depth,
                    )?));
                }
                (2, WireType::LengthDelimited) => {
                    msg.node = Some(XmlNodeVariant::Text(reader.string("text")?));
                }
                (3, WireType::LengthDelimited) => {
                    msg.source = SourcePosition::parse(reader.bytes("node source")?)?;
                }
                _ => reader.skip(wire_type, "xml node")?,
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledFileSymbol {
    pub resource_name: String,
    pub source: SourcePosition,
}

impl CompiledFileSymbol {
    pub(crate) fn parse(bytes: &[u8]) -> DecodeResult<CompiledFileSymbol> {
        let mut reader = WireReader::new(bytes);
        let mut msg = CompiledFileSymbol::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.resource_name = reader.string("symbol name")?;
                }
                (2, WireType::LengthDelimited) => {
                    msg.source = SourcePosition::parse(reader.bytes("symbol source")?)?;
                }
                _ => reader.skip(wire_type, "exported symbol")?,
            }
        }
        Ok(msg)
    }
}

/// Header record written in front of each compiled file payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledFile {
    pub resource_name: String,
    pub source_path: String,
    /// Same numbering as [`FileReference::file_type`].
    pub file_type: u32,
    pub config: Option<Configuration>,
    pub exported_symbols: Vec<CompiledFileSymbol>,
}

impl CompiledFile {
    pub fn parse(bytes: &[u8]) -> DecodeResult<CompiledFile> {
        let mut reader = WireReader::new(bytes);
        let mut msg = CompiledFile::default();
        while !reader.at_end() {
            let (field, wire_type) = reader.field_header()?;
            match (field, wire_type) {
                (1, WireType::LengthDelimited) => {
                    msg.resource_name = reader.string("resource name")?;
                }
                (2, WireType::LengthDelimited) => msg.source_path = reader.string("source path")?,
                (3, WireType::Varint) => msg.file_type = reader.varint_u32("file type")?,
                (4, WireType::LengthDelimited) => {
                    msg.config = Some(Configuration::parse(reader.bytes("config")?)?);
                }
                (5, WireType::LengthDelimited) => {
                    msg.exported_symbols
                        .push(CompiledFileSymbol::parse(reader.bytes("exported symbol")?)?);
                }
                _ => reader.skip(wire_type, "compiled file")?,
            }
        }
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::testutil::Pb;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_a_configuration_message() {
        let bytes = Pb::new()
            .varint(1, 310)
            .varint(2, 260)
            .string(3, "en-US")
            .varint(18, 480)
            .varint(24, 29)
            .build();
        let config = Configuration::parse(&bytes).unwrap();

        assert_eq!(config.mcc, 310);
        assert_eq!(config.mnc, 260);
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.density, 480);
        assert_eq!(config.sdk_version, 29);
        assert_eq!(config.orientation, 0);
    }

    #[test]
    fn skips_unknown_fields_and_mismatched_wire_types() {
        let bytes = Pb::new()
            .varint(1, 310)
            .string(99, "future field")
            .fixed32(100, 0xdead_beef)
            .fixed64(101, 7)
            // Field 3 (locale) with varint wire type is not a locale.
            .varint(3, 12)
            .build();
        let config = Configuration::parse(&bytes).unwrap();
        assert_eq!(config.mcc, 310);
        assert_eq!(config.locale, "");
    }

    #[test]
    fn truncated_nested_messages_are_reported() {
        // The type field announces five payload bytes; only one follows.
        let bytes = Pb::new()
            .string(2, "com.example.app")
            .raw(&[0x1a, 0x05, 0x08])
            .build();
        let err = Package::parse(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn item_oneof_keeps_the_last_variant() {
        let bytes = Pb::new()
            .message(2, Pb::new().string(1, "first"))
            .message(3, Pb::new().string(1, "second"))
            .build();
        let item = Item::parse(&bytes).unwrap();
        assert_eq!(
            item.value,
            Some(ItemVariant::RawStr(StringValue {
                value: "second".to_owned()
            }))
        );
    }

    #[test]
    fn parses_packages_with_wrapped_ids() {
        let bytes = Pb::new()
            .message(1, Pb::new().varint(1, 0x7f))
            .string(2, "com.example.app")
            .message(
                3,
                Pb::new().message(1, Pb::new().varint(1, 0x01)).string(2, "string"),
            )
            .build();
        let package = Package::parse(&bytes).unwrap();

        assert_eq!(package.package_id, Some(0x7f));
        assert_eq!(package.package_name, "com.example.app");
        assert_eq!(package.types.len(), 1);
        assert_eq!(package.types[0].type_id, Some(0x01));
        assert_eq!(package.types[0].name, "string");
    }

    #[test]
    fn missing_id_wrapper_stays_absent() {
        let bytes = Pb::new().string(2, "com.example.app").build();
        let package = Package::parse(&bytes).unwrap();
        assert_eq!(package.package_id, None);
    }

    #[test]
    fn deep_xml_nesting_is_rejected() {
        let mut node = Pb::new().message(1, Pb::new().string(3, "leaf"));
        for _ in 0..MAX_NESTING_DEPTH {
            node = Pb::new().message(1, Pb::new().string(3, "el").message(5, node));
        }
        let err = XmlNode::parse(&node.build()).unwrap_err();
        assert!(matches!(err, DecodeError::NestingTooDeep { .. }));
    }

    #[test]
    fn shallow_xml_trees_parse() {
        let bytes = Pb::new()
            .message(
                1,
                Pb::new()
                    .string(3, "LinearLayout")
                    .message(5, Pb::new().string(2, "hello").message(3, Pb::new().varint(1, 5))),
            )
            .message(3, Pb::new().varint(1, 1).varint(2, 1))
            .build();
        let node = XmlNode::parse(&bytes).unwrap();

        let element = match node.node {
            Some(XmlNodeVariant::Element(element)) => element,
            other => panic!("expected element, got {other:?}"),
        };
        assert_eq!(element.name, "LinearLayout");
        assert_eq!(element.children.len(), 1);
        match &element.children[0].node {
            Some(XmlNodeVariant::Text(text)) => assert_eq!(text, "hello"),
            other => panic!("expected text, got {other:?}"),
        }
        assert_eq!(element.children[0].source.line_number, 5);
    }
}
