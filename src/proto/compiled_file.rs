//! Compiled-file header decoding.

use crate::err::{DecodeError, DecodeResult};
use crate::model::Source;
use crate::model::file::{ResourceFile, SourcedResourceName};
use crate::name::parse_resource_name;
use crate::proto::config::decode_config;
use crate::proto::value::decode_file_kind;
use crate::proto::wire;

/// Parses and decodes a serialized compiled-file header in one step.
pub fn parse_compiled_file(bytes: &[u8]) -> DecodeResult<ResourceFile> {
    let pb = wire::CompiledFile::parse(bytes)?;
    decode_compiled_file(&pb)
}

/// Decodes a parsed compiled-file header into a [`ResourceFile`].
///
/// The header names the resource the file defines, where it came from on
/// disk, and any symbols it exports (ids declared inline in layouts). The
/// defining config travels with it; a config that fails to decode poisons
/// the whole header.
pub fn decode_compiled_file(pb: &wire::CompiledFile) -> DecodeResult<ResourceFile> {
    let name = parse_resource_name(&pb.resource_name)
        .ok_or_else(|| DecodeError::InvalidCompiledFileName {
            name: pb.resource_name.clone(),
        })?
        .to_resource_name();

    let default_config = wire::Configuration::default();
    let pb_config = pb.config.as_ref().unwrap_or(&default_config);
    let config = decode_config(pb_config).map_err(|source| {
        DecodeError::InvalidCompiledFileConfig {
            source: Box::new(source),
        }
    })?;

    let mut exported_symbols = Vec::with_capacity(pb.exported_symbols.len());
    for pb_symbol in &pb.exported_symbols {
        let symbol_name = parse_resource_name(&pb_symbol.resource_name).ok_or_else(|| {
            DecodeError::InvalidExportedSymbolName {
                name: pb_symbol.resource_name.clone(),
            }
        })?;
        exported_symbols.push(SourcedResourceName {
            name: symbol_name.to_resource_name(),
            line: pb_symbol.source.line_number,
        });
    }

    Ok(ResourceFile {
        name,
        config,
        source: Source::new(pb.source_path.as_str()),
        kind: decode_file_kind(pb.file_type),
        exported_symbols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::file::FileKind;
    use crate::name::ResourceType;
    use crate::proto::testutil::Pb;
    use pretty_assertions::assert_eq;

    fn header(resource_name: &str) -> wire::CompiledFile {
        wire::CompiledFile {
            resource_name: resource_name.to_owned(),
            source_path: "res/layout/main.xml".to_owned(),
            file_type: 3,
            config: None,
            exported_symbols: Vec::new(),
        }
    }

    #[test]
    fn decodes_name_source_and_kind() {
        let file = decode_compiled_file(&header("com.app:layout/main")).unwrap();
        assert_eq!(file.name.package, "com.app");
        assert_eq!(file.name.ty, ResourceType::Layout);
        assert_eq!(file.name.entry, "main");
        assert_eq!(file.source.path, "res/layout/main.xml");
        assert_eq!(file.source.line, None);
        assert_eq!(file.kind, FileKind::ProtoXml);
        assert!(file.config.is_default());
    }

    #[test]
    fn carries_the_defining_config() {
        let mut pb = header("com.app:layout/main");
        pb.config = Some(wire::Configuration {
            locale: "de".to_owned(),
            ..wire::Configuration::default()
        });

        let file = decode_compiled_file(&pb).unwrap();
        assert_eq!(&file.config.language, b"de");
    }

    #[test]
    fn bad_resource_name_is_fatal() {
        let err = decode_compiled_file(&header("no-type-separator")).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidCompiledFileName { ref name } if name == "no-type-separator"
        ));
    }

    #[test]
    fn config_failure_is_wrapped() {
        let mut pb = header("com.app:layout/main");
        pb.config = Some(wire::Configuration {
            locale: "not-a-locale".to_owned(),
            ..wire::Configuration::default()
        });

        let err = decode_compiled_file(&pb).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidCompiledFileConfig { .. }));
        assert!(
            err.to_string()
                .starts_with("invalid resource configuration in compiled file header:")
        );
    }

    #[test]
    fn exported_symbols_keep_their_lines() {
        let mut pb = header("com.app:layout/main");
        pb.exported_symbols = vec![
            wire::CompiledFileSymbol {
                resource_name: "com.app:id/title".to_owned(),
                source: wire::SourcePosition {
                    line_number: 12,
                    column_number: 4,
                },
            },
            wire::CompiledFileSymbol {
                resource_name: "com.app:id/body".to_owned(),
                source: wire::SourcePosition::default(),
            },
        ];

        let file = decode_compiled_file(&pb).unwrap();
        assert_eq!(file.exported_symbols.len(), 2);
        assert_eq!(file.exported_symbols[0].name.entry, "title");
        assert_eq!(file.exported_symbols[0].line, 12);
        assert_eq!(file.exported_symbols[1].name.entry, "body");
        assert_eq!(file.exported_symbols[1].line, 0);
    }

    #[test]
    fn bad_symbol_name_points_at_the_symbol() {
        let mut pb = header("com.app:layout/main");
        pb.exported_symbols = vec![wire::CompiledFileSymbol {
            resource_name: "notaname".to_owned(),
            source: wire::SourcePosition::default(),
        }];

        let err = decode_compiled_file(&pb).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidExportedSymbolName { ref name } if name == "notaname"
        ));
    }

    #[test]
    fn parses_a_header_from_bytes() {
        let bytes = Pb::new()
            .string(1, "com.app:drawable/icon")
            .string(2, "res/drawable/icon.png")
            .varint(3, 1)
            .build();

        let file = parse_compiled_file(&bytes).unwrap();
        assert_eq!(file.name.ty, ResourceType::Drawable);
        assert_eq!(file.kind, FileKind::Png);
        assert_eq!(file.source.path, "res/drawable/icon.png");
    }
}
