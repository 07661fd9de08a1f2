//! Table decoding.
//!
//! Packages, types and entries are merged into the table with
//! find-or-create semantics, so the same node can be assembled from several
//! wire records. While entries are added, every fully valid id is recorded
//! in a side index; once the whole table is built, a single pass walks all
//! values and attaches names to references that carry only a numeric id.

use ahash::AHashMap;
use log::{debug, trace};

use crate::err::{DecodeError, DecodeResult};
use crate::files::FileCollection;
use crate::model::table::{Package, ResourceTable, SymbolStatus, Visibility};
use crate::model::value::visit_references_mut;
use crate::name::{ResourceId, ResourceName, ResourceType};
use crate::proto::config::decode_config;
use crate::proto::value::{decode_source, decode_value};
use crate::proto::wire;
use crate::source_pool::SourcePool;
use crate::string_pool::StringPool;

/// Parses and decodes a serialized resource table in one step.
pub fn parse_table(bytes: &[u8], files: Option<&dyn FileCollection>) -> DecodeResult<ResourceTable> {
    let pb = wire::ResourceTable::parse(bytes)?;
    decode_table(&pb, files)
}

/// Decodes a parsed table message into the in-memory model.
///
/// `files` is optional; without it, file references stay unresolved.
pub fn decode_table(
    pb: &wire::ResourceTable,
    files: Option<&dyn FileCollection>,
) -> DecodeResult<ResourceTable> {
    let source_pool = match &pb.source_pool {
        Some(data) => SourcePool::from_bytes(data)?,
        None => SourcePool::empty(),
    };

    let mut table = ResourceTable::new();
    let mut id_index: AHashMap<ResourceId, ResourceName> = AHashMap::new();
    for pb_package in &pb.packages {
        decode_package(
            pb_package,
            &source_pool,
            files,
            &mut table.packages,
            &mut table.string_pool,
            &mut id_index,
        )?;
    }

    resolve_references(&mut table, &id_index);
    debug!(
        "decoded resource table: {} packages, {} indexed ids, {} pooled strings",
        table.packages.len(),
        id_index.len(),
        table.string_pool.len()
    );
    Ok(table)
}

fn decode_visibility(raw: u32) -> Visibility {
    // 1 = private, 2 = public.
    match raw {
        1 => Visibility::Private,
        2 => Visibility::Public,
        _ => Visibility::Undefined,
    }
}

fn decode_symbol_status(pb: &wire::SymbolStatus, source_pool: &SourcePool) -> SymbolStatus {
    SymbolStatus {
        visibility: decode_visibility(pb.visibility),
        source: pb
            .source
            .as_ref()
            .map(|source| decode_source(source, source_pool)),
        comment: pb.comment.clone(),
        allow_new: pb.allow_new,
    }
}

fn decode_package(
    pb: &wire::Package,
    source_pool: &SourcePool,
    files: Option<&dyn FileCollection>,
    packages: &mut Vec<Package>,
    string_pool: &mut StringPool,
    id_index: &mut AHashMap<ResourceId, ResourceName>,
) -> DecodeResult<()> {
    let package_index = match packages
        .iter()
        .position(|package| package.name == pb.package_name)
    {
        Some(index) => index,
        None => {
            packages.push(Package {
                name: pb.package_name.clone(),
                id: None,
                types: Vec::new(),
            });
            packages.len() - 1
        }
    };
    let package = &mut packages[package_index];
    if let Some(id) = pb.package_id {
        package.id = Some(id as u8);
    }

    let default_config = wire::Configuration::default();
    for pb_type in &pb.types {
        let ty = ResourceType::parse(&pb_type.name).ok_or_else(|| {
            DecodeError::UnknownResourceType {
                name: pb_type.name.clone(),
            }
        })?;

        let group = package.find_or_create_type(ty);
        if let Some(id) = pb_type.type_id {
            group.id = Some(id as u8);
        }

        for pb_entry in &pb_type.entries {
            let status = pb_entry
                .symbol_status
                .as_ref()
                .map(|pb_status| decode_symbol_status(pb_status, source_pool));
            if let Some(status) = &status {
                group.merge_visibility(status.visibility);
            }

            let entry = group.find_or_create_entry(&pb_entry.name);
            if let Some(id) = pb_entry.entry_id {
                entry.id = Some(id as u16);
            }
            if let Some(status) = status {
                entry.symbol_status = status;
            }

            let resource_id = ResourceId::new(
                pb.package_id.unwrap_or(0) as u8,
                pb_type.type_id.unwrap_or(0) as u8,
                pb_entry.entry_id.unwrap_or(0) as u16,
            );
            if resource_id.is_valid() {
                id_index.insert(
                    resource_id,
                    ResourceName::new(pb.package_name.as_str(), ty, pb_entry.name.as_str()),
                );
            }

            for pb_config_value in &pb_entry.config_values {
                let pb_config = pb_config_value.config.as_ref().unwrap_or(&default_config);
                let config = decode_config(pb_config)?;

                let slot = entry.find_or_create_value(&config, &pb_config.product);
                if slot.value.is_some() {
                    return Err(DecodeError::DuplicateConfiguration);
                }

                let value = match &pb_config_value.value {
                    Some(pb_value) => {
                        decode_value(pb_value, source_pool, &config, string_pool, files)?
                    }
                    None => return Err(DecodeError::UnknownValueVariant),
                };
                slot.value = Some(value);
            }
        }
    }
    Ok(())
}

/// Attaches symbolic names to references that arrived with only an id.
///
/// Hits keep the numeric id alongside the new name; misses are left as-is,
/// the id may belong to a table merged in later.
fn resolve_references(table: &mut ResourceTable, id_index: &AHashMap<ResourceId, ResourceName>) {
    for package in &mut table.packages {
        for group in &mut package.types {
            for entry in &mut group.entries {
                for config_value in &mut entry.values {
                    if let Some(value) = &mut config_value.value {
                        visit_references_mut(value, &mut |reference| {
                            let Some(id) = reference.id else {
                                return;
                            };
                            if !id.is_valid() {
                                return;
                            }
                            if let Some(name) = id_index.get(&id) {
                                trace!("resolved {id} to {name}");
                                reference.name = Some(name.clone());
                            }
                        });
                    }
                }
            }
        }
    }
}
