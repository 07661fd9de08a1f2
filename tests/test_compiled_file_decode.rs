
use fixtures::*;
use restable::model::file::FileKind;
use restable::{DecodeError, ResourceType, parse_compiled_file};

fn header() -> Pb {
    Pb::new()
        .string(1, "com.app:layout/main")
        .string(2, "res/layout/main.xml")
        .varint(3, 3)
}

#[test]
fn decodes_a_header_end_to_end() {
    ensure_env_logger_initialized();

    let bytes = header()
        .message(4, Pb::new().string(3, "en").varint(24, 21))
        .message(
            5,
            Pb::new()
                .string(1, "com.app:id/title")
                .message(2, Pb::new().varint(1, 12)),
        )
        .message(5, Pb::new().string(1, "com.app:id/body"))
        .build();

    let file = parse_compiled_file(&bytes).unwrap();
    assert_eq!(file.name.to_string(), "com.app:layout/main");
    assert_eq!(file.name.ty, ResourceType::Layout);
    assert_eq!(file.source.path, "res/layout/main.xml");
    assert_eq!(file.kind, FileKind::ProtoXml);
    assert_eq!(&file.config.language, b"en");
    assert_eq!(file.config.sdk_version, 21);

    assert_eq!(file.exported_symbols.len(), 2);
    assert_eq!(file.exported_symbols[0].name.to_string(), "com.app:id/title");
    assert_eq!(file.exported_symbols[0].line, 12);
    assert_eq!(file.exported_symbols[1].line, 0);
}

#[test]
fn rejects_an_unparsable_resource_name() {
    ensure_env_logger_initialized();

    let bytes = Pb::new()
        .string(1, "missing-a-type")
        .string(2, "res/raw/blob.bin")
        .build();

    let err = parse_compiled_file(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidCompiledFileName { .. }));
    assert_eq!(
        err.to_string(),
        "invalid resource name in compiled file header: missing-a-type"
    );
}

#[test]
fn surfaces_config_failures_with_context() {
    ensure_env_logger_initialized();

    let bytes = header()
        .message(4, Pb::new().string(3, "notalocale"))
        .build();

    let err = parse_compiled_file(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidCompiledFileConfig { .. }));
    assert_eq!(
        err.to_string(),
        "invalid resource configuration in compiled file header: \
         configuration has invalid locale 'notalocale'"
    );
}

#[test]
fn names_the_offending_exported_symbol() {
    ensure_env_logger_initialized();

    let bytes = header()
        .message(5, Pb::new().string(1, "com.app:id/ok"))
        .message(5, Pb::new().string(1, "broken"))
        .build();

    let err = parse_compiled_file(&bytes).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::InvalidExportedSymbolName { ref name } if name == "broken"
    ));
}
