//! The resource table: packages, type groups, entries and their
//! per-configuration values.
//!
//! The tree is assembled with find-or-create lookups so that records
//! arriving in any order land in the same node. Lookups are linear; tables
//! are small and are built once.

use crate::config::ConfigDescriptor;
use crate::model::Source;
use crate::model::value::Value;
use crate::name::ResourceType;
use crate::string_pool::StringPool;

/// Whether a symbol is visible to other packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Visibility {
    #[default]
    Undefined,
    Private,
    Public,
}

/// Visibility plus where and why it was declared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolStatus {
    pub visibility: Visibility,
    pub source: Option<Source>,
    pub comment: String,
    pub allow_new: bool,
}

/// One value of an entry under a specific (configuration, product) pair.
///
/// `value` is only `None` while the table is being assembled; a fully
/// decoded table has every slot filled.
#[derive(Debug)]
pub struct ResourceConfigValue {
    pub config: ConfigDescriptor,
    pub product: String,
    pub value: Option<Value>,
}

#[derive(Debug, Default)]
pub struct Entry {
    pub name: String,
    pub id: Option<u16>,
    pub symbol_status: SymbolStatus,
    pub values: Vec<ResourceConfigValue>,
}

impl Entry {
    pub fn find_value(&self, config: &ConfigDescriptor, product: &str) -> Option<&ResourceConfigValue> {
        self.values
            .iter()
            .find(|value| value.config == *config && value.product == product)
    }

    pub fn find_or_create_value(
        &mut self,
        config: &ConfigDescriptor,
        product: &str,
    ) -> &mut ResourceConfigValue {
        let index = match self
            .values
            .iter()
            .position(|value| value.config == *config && value.product == product)
        {
            Some(index) => index,
            None => {
                self.values.push(ResourceConfigValue {
                    config: *config,
                    product: product.to_owned(),
                    value: None,
                });
                self.values.len() - 1
            }
        };
        &mut self.values[index]
    }
}

/// All entries of one resource type within a package.
#[derive(Debug)]
pub struct TypeGroup {
    pub ty: ResourceType,
    pub id: Option<u8>,
    pub visibility: Visibility,
    pub entries: Vec<Entry>,
}

impl TypeGroup {
    pub fn find_entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn find_or_create_entry(&mut self, name: &str) -> &mut Entry {
        let index = match self.entries.iter().position(|entry| entry.name == name) {
            Some(index) => index,
            None => {
                self.entries.push(Entry {
                    name: name.to_owned(),
                    ..Entry::default()
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    /// Raises the group's visibility: public always wins, private only
    /// replaces undefined.
    pub fn merge_visibility(&mut self, visibility: Visibility) {
        match visibility {
            Visibility::Public => self.visibility = Visibility::Public,
            Visibility::Private if self.visibility == Visibility::Undefined => {
                self.visibility = Visibility::Private;
            }
            _ => {}
        }
    }
}

#[derive(Debug)]
pub struct Package {
    pub name: String,
    pub id: Option<u8>,
    pub types: Vec<TypeGroup>,
}

impl Package {
    pub fn find_type(&self, ty: ResourceType) -> Option<&TypeGroup> {
        self.types.iter().find(|group| group.ty == ty)
    }

    pub fn find_or_create_type(&mut self, ty: ResourceType) -> &mut TypeGroup {
        let index = match self.types.iter().position(|group| group.ty == ty) {
            Some(index) => index,
            None => {
                self.types.push(TypeGroup {
                    ty,
                    id: None,
                    visibility: Visibility::Undefined,
                    entries: Vec::new(),
                });
                self.types.len() - 1
            }
        };
        &mut self.types[index]
    }
}

/// The decoded table, plus the pool all its value strings were interned in.
#[derive(Debug, Default)]
pub struct ResourceTable {
    pub packages: Vec<Package>,
    pub string_pool: StringPool,
}

impl ResourceTable {
    pub fn new() -> Self {
        ResourceTable::default()
    }

    pub fn find_package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|package| package.name == name)
    }

    pub fn find_or_create_package(&mut self, name: &str) -> &mut Package {
        let index = match self.packages.iter().position(|package| package.name == name) {
            Some(index) => index,
            None => {
                self.packages.push(Package {
                    name: name.to_owned(),
                    id: None,
                    types: Vec::new(),
                });
                self.packages.len() - 1
            }
        };
        &mut self.packages[index]
    }

    /// Convenience lookup spanning the package/type/entry levels.
    pub fn find_entry(&self, package: &str, ty: ResourceType, entry: &str) -> Option<&Entry> {
        self.find_package(package)?.find_type(ty)?.find_entry(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn find_or_create_reuses_nodes() {
        let mut table = ResourceTable::new();
        table
            .find_or_create_package("com.app")
            .find_or_create_type(ResourceType::String)
            .find_or_create_entry("foo");
        table
            .find_or_create_package("com.app")
            .find_or_create_type(ResourceType::String)
            .find_or_create_entry("foo");
        table
            .find_or_create_package("com.app")
            .find_or_create_type(ResourceType::String)
            .find_or_create_entry("bar");

        assert_eq!(table.packages.len(), 1);
        assert_eq!(table.packages[0].types.len(), 1);
        assert_eq!(table.packages[0].types[0].entries.len(), 2);
        assert!(table.find_entry("com.app", ResourceType::String, "bar").is_some());
        assert!(table.find_entry("com.app", ResourceType::Color, "bar").is_none());
    }

    #[test]
    fn config_values_are_keyed_by_config_and_product() {
        let mut entry = Entry::default();
        let config = ConfigDescriptor::default();

        entry.find_or_create_value(&config, "");
        entry.find_or_create_value(&config, "");
        entry.find_or_create_value(&config, "tablet");
        let mut land = config;
        land.orientation = ConfigDescriptor::ORIENTATION_LAND;
        entry.find_or_create_value(&land, "");

        assert_eq!(entry.values.len(), 3);
        assert!(entry.find_value(&config, "tablet").is_some());
        assert!(entry.find_value(&land, "tablet").is_none());
    }

    #[test]
    fn visibility_merge_truth_table() {
        let cases = [
            (Visibility::Undefined, Visibility::Public, Visibility::Public),
            (Visibility::Undefined, Visibility::Private, Visibility::Private),
            (Visibility::Undefined, Visibility::Undefined, Visibility::Undefined),
            (Visibility::Private, Visibility::Public, Visibility::Public),
            (Visibility::Private, Visibility::Private, Visibility::Private),
            (Visibility::Public, Visibility::Private, Visibility::Public),
            (Visibility::Public, Visibility::Undefined, Visibility::Public),
        ];
        for (current, incoming, expected) in cases {
            let mut group = TypeGroup {
                ty: ResourceType::String,
                id: None,
                visibility: current,
                entries: Vec::new(),
            };
            group.merge_visibility(incoming);
            assert_eq!(group.visibility, expected, "{current:?} + {incoming:?}");
        }
    }
}
