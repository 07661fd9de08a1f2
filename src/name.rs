use std::fmt;

/// The closed set of resource type names understood by the table.
///
/// Wire records carry the type as a plain string; anything outside this set
/// is an "unknown type" decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    Anim,
    Animator,
    Array,
    Attr,
    /// Synthetic type used when an attribute is made private (`^attr-private`).
    AttrPrivate,
    Bool,
    Color,
    ConfigVarying,
    Dimen,
    Drawable,
    Font,
    Fraction,
    Id,
    Integer,
    Interpolator,
    Layout,
    Menu,
    Mipmap,
    Navigation,
    Plurals,
    Raw,
    String,
    Style,
    Styleable,
    Transition,
    Xml,
}

impl ResourceType {
    pub fn parse(name: &str) -> Option<ResourceType> {
        let ty = match name {
            "anim" => ResourceType::Anim,
            "animator" => ResourceType::Animator,
            "array" => ResourceType::Array,
            "attr" => ResourceType::Attr,
            "^attr-private" => ResourceType::AttrPrivate,
            "bool" => ResourceType::Bool,
            "color" => ResourceType::Color,
            "configVarying" => ResourceType::ConfigVarying,
            "dimen" => ResourceType::Dimen,
            "drawable" => ResourceType::Drawable,
            "font" => ResourceType::Font,
            "fraction" => ResourceType::Fraction,
            "id" => ResourceType::Id,
            "integer" => ResourceType::Integer,
            "interpolator" => ResourceType::Interpolator,
            "layout" => ResourceType::Layout,
            "menu" => ResourceType::Menu,
            "mipmap" => ResourceType::Mipmap,
            "navigation" => ResourceType::Navigation,
            "plurals" => ResourceType::Plurals,
            "raw" => ResourceType::Raw,
            "string" => ResourceType::String,
            "style" => ResourceType::Style,
            "styleable" => ResourceType::Styleable,
            "transition" => ResourceType::Transition,
            "xml" => ResourceType::Xml,
            _ => return None,
        };
        Some(ty)
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceType::Anim => "anim",
            ResourceType::Animator => "animator",
            ResourceType::Array => "array",
            ResourceType::Attr => "attr",
            ResourceType::AttrPrivate => "^attr-private",
            ResourceType::Bool => "bool",
            ResourceType::Color => "color",
            ResourceType::ConfigVarying => "configVarying",
            ResourceType::Dimen => "dimen",
            ResourceType::Drawable => "drawable",
            ResourceType::Font => "font",
            ResourceType::Fraction => "fraction",
            ResourceType::Id => "id",
            ResourceType::Integer => "integer",
            ResourceType::Interpolator => "interpolator",
            ResourceType::Layout => "layout",
            ResourceType::Menu => "menu",
            ResourceType::Mipmap => "mipmap",
            ResourceType::Navigation => "navigation",
            ResourceType::Plurals => "plurals",
            ResourceType::Raw => "raw",
            ResourceType::String => "string",
            ResourceType::Style => "style",
            ResourceType::Styleable => "styleable",
            ResourceType::Transition => "transition",
            ResourceType::Xml => "xml",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fully qualified resource name (`package:type/entry`).
///
/// The package may be empty for names that are resolved relative to the
/// surrounding table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceName {
    pub package: String,
    pub ty: ResourceType,
    pub entry: String,
}

impl ResourceName {
    pub fn new(package: impl Into<String>, ty: ResourceType, entry: impl Into<String>) -> Self {
        ResourceName {
            package: package.into(),
            ty,
            entry: entry.into(),
        }
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.package.is_empty() {
            write!(f, "{}:", self.package)?;
        }
        write!(f, "{}/{}", self.ty, self.entry)
    }
}

/// Borrowed result of [`parse_resource_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedName<'a> {
    pub package: &'a str,
    pub ty: ResourceType,
    pub entry: &'a str,
    /// Set when the name carried a leading `*` marker.
    pub private: bool,
}

impl ParsedName<'_> {
    pub fn to_resource_name(&self) -> ResourceName {
        ResourceName::new(self.package, self.ty, self.entry)
    }
}

/// Parses a structured resource name of the form `[*][package:]type/entry`.
///
/// Returns `None` for empty input, an unknown type name, or a missing
/// type/entry segment.
pub fn parse_resource_name(input: &str) -> Option<ParsedName<'_>> {
    if input.is_empty() {
        return None;
    }

    let (private, rest) = match input.strip_prefix('*') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (package, rest) = match rest.split_once(':') {
        Some((package, rest)) => (package, rest),
        None => ("", rest),
    };

    let (type_name, entry) = rest.split_once('/')?;
    let ty = ResourceType::parse(type_name)?;
    if entry.is_empty() {
        return None;
    }

    Some(ParsedName {
        package,
        ty,
        entry,
        private,
    })
}

/// Packed resource identifier: `0xPPTTEEEE` (package, type, entry).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u32);

impl ResourceId {
    pub fn new(package_id: u8, type_id: u8, entry_id: u16) -> Self {
        ResourceId(
            (u32::from(package_id) << 24) | (u32::from(type_id) << 16) | u32::from(entry_id),
        )
    }

    pub fn package_id(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn type_id(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn entry_id(self) -> u16 {
        self.0 as u16
    }

    /// An id is well-formed only when all three components are non-zero.
    pub fn is_valid(self) -> bool {
        self.package_id() != 0 && self.type_id() != 0 && self.entry_id() != 0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId(0x{:08x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_fully_qualified_names() {
        let name = parse_resource_name("com.app:string/foo").unwrap();
        assert_eq!(name.package, "com.app");
        assert_eq!(name.ty, ResourceType::String);
        assert_eq!(name.entry, "foo");
        assert!(!name.private);
    }

    #[test]
    fn parses_names_without_package() {
        let name = parse_resource_name("drawable/icon").unwrap();
        assert_eq!(name.package, "");
        assert_eq!(name.ty, ResourceType::Drawable);
        assert_eq!(name.entry, "icon");
    }

    #[test]
    fn parses_private_marker() {
        let name = parse_resource_name("*android:attr/borderStyle").unwrap();
        assert!(name.private);
        assert_eq!(name.package, "android");
        assert_eq!(name.ty, ResourceType::Attr);
    }

    #[test]
    fn rejects_malformed_names() {
        assert_eq!(parse_resource_name(""), None);
        assert_eq!(parse_resource_name("foo"), None);
        assert_eq!(parse_resource_name("string/"), None);
        assert_eq!(parse_resource_name("badtype/foo"), None);
        assert_eq!(parse_resource_name("com.app:string"), None);
    }

    #[test]
    fn resource_type_name_round_trips() {
        for name in ["anim", "^attr-private", "configVarying", "plurals", "xml"] {
            let ty = ResourceType::parse(name).unwrap();
            assert_eq!(ty.name(), name);
        }
        assert_eq!(ResourceType::parse("strings"), None);
    }

    #[test]
    fn id_packing_and_validity() {
        let id = ResourceId::new(0x7f, 0x01, 0x0001);
        assert_eq!(id.0, 0x7f01_0001);
        assert_eq!(id.package_id(), 0x7f);
        assert_eq!(id.type_id(), 0x01);
        assert_eq!(id.entry_id(), 0x0001);
        assert!(id.is_valid());

        assert!(!ResourceId(0x0001_0001).is_valid());
        assert!(!ResourceId(0x7f00_0001).is_valid());
        assert!(!ResourceId(0x7f01_0000).is_valid());
        assert_eq!(format!("{}", id), "0x7f010001");
    }
}
