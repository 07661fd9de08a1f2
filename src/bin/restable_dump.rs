use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, Command};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use restable::config::ConfigDescriptor;
use restable::model::file::{FileKind, ResourceFile};
use restable::model::table::{ResourceTable, Visibility};
use restable::model::value::{ItemKind, Reference, ReferenceKind, Value, ValueKind};
use restable::model::xml::{Element, XmlNode, XmlResource};
use restable::{parse_compiled_file, parse_table, parse_xml};

fn command() -> Command {
    Command::new("restable_dump")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Dumps serialized resource payloads in a readable form")
        .arg(
            Arg::new("INPUT")
                .required(true)
                .help("Path to the serialized payload"),
        )
        .arg(
            Arg::new("input-format")
                .long("format")
                .short('t')
                .value_parser(["table", "file", "xml"])
                .default_value("table")
                .help("What the input contains: a resource table, a compiled-file header, or a compiled XML document"),
        )
        .arg(
            Arg::new("output-target")
                .long("output")
                .short('f')
                .value_name("PATH")
                .help("Writes output to the file specified instead of stdout. Will create parent directories if needed."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("-v - info, -vv - debug, -vvv - trace."),
        )
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => return,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("failed to initialize logging: {e}");
    }
}

fn create_output_file(path: &Path) -> Result<File> {
    if path.is_dir() {
        bail!("there is a directory at {}, refusing to overwrite", path.display());
    }
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create `{}`", parent.display()))?;
        }
    }
    File::create(path).with_context(|| format!("failed to create `{}`", path.display()))
}

fn locale_cell(cell: &[u8; 2]) -> String {
    // Three-letter codes are stored packed with the high bit set; show those
    // raw rather than guessing at the packing.
    if cell[0] & 0x80 == 0 {
        cell.iter().map(|&b| b as char).collect()
    } else {
        format!("{:02x}{:02x}", cell[0], cell[1])
    }
}

fn render_config(config: &ConfigDescriptor) -> String {
    if config.is_default() {
        return "default".to_owned();
    }
    let mut parts = Vec::new();
    if config.mcc != 0 {
        parts.push(format!("mcc{}", config.mcc));
    }
    if config.mnc != 0 {
        parts.push(format!("mnc{}", config.mnc));
    }
    if config.language[0] != 0 {
        parts.push(locale_cell(&config.language));
    }
    if config.country[0] != 0 {
        parts.push(format!("r{}", locale_cell(&config.country).to_uppercase()));
    }
    if config.smallest_screen_width_dp != 0 {
        parts.push(format!("sw{}dp", config.smallest_screen_width_dp));
    }
    if config.screen_width_dp != 0 {
        parts.push(format!("w{}dp", config.screen_width_dp));
    }
    if config.screen_height_dp != 0 {
        parts.push(format!("h{}dp", config.screen_height_dp));
    }
    if config.density != 0 {
        parts.push(format!("{}dpi", config.density));
    }
    if config.sdk_version != 0 {
        parts.push(format!("v{}", config.sdk_version));
    }
    if parts.is_empty() {
        // Set bits on axes the qualifier rendering does not cover.
        return "non-default".to_owned();
    }
    parts.join("-")
}

fn render_reference(reference: &Reference) -> String {
    let prefix = match reference.kind {
        ReferenceKind::Resource => '@',
        ReferenceKind::Attribute => '?',
    };
    match (&reference.name, reference.id) {
        (Some(name), Some(id)) => format!("{prefix}{name} ({id})"),
        (Some(name), None) => format!("{prefix}{name}"),
        (None, Some(id)) => format!("{prefix}{id}"),
        (None, None) => format!("{prefix}null"),
    }
}

fn render_item(kind: &ItemKind) -> String {
    match kind {
        ItemKind::Ref(reference) => render_reference(reference),
        ItemKind::Str(text) => format!("{:?}", text.text()),
        ItemKind::RawStr(text) => format!("raw {:?}", text.text()),
        ItemKind::StyledStr(styled) => {
            format!("styled {:?} spans={}", styled.text.text(), styled.spans.len())
        }
        ItemKind::File(file) => format!("file {}", file.path.text()),
        ItemKind::Id => "id".to_owned(),
        ItemKind::Prim(primitive) => format!(
            "prim type={:#04x} data={:#010x}",
            primitive.data_type, primitive.data
        ),
    }
}

const QUANTITY_NAMES: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

fn render_value(value: &Value) -> String {
    let mut rendered = match &value.kind {
        ValueKind::Item(kind) => render_item(kind),
        ValueKind::Attr(attr) => format!(
            "attr mask={:#06x} min={} max={} symbols={}",
            attr.type_mask.bits(),
            attr.min_int,
            attr.max_int,
            attr.symbols.len()
        ),
        ValueKind::Style(style) => {
            let entries: Vec<String> = style
                .entries
                .iter()
                .map(|entry| {
                    format!("{}={}", render_reference(&entry.key), render_item(&entry.value.kind))
                })
                .collect();
            match &style.parent {
                Some(parent) => format!(
                    "style parent={} {{{}}}",
                    render_reference(&parent.reference),
                    entries.join(", ")
                ),
                None => format!("style {{{}}}", entries.join(", ")),
            }
        }
        ValueKind::Styleable(styleable) => {
            let refs: Vec<String> = styleable
                .entries
                .iter()
                .map(|entry| render_reference(&entry.attr))
                .collect();
            format!("styleable [{}]", refs.join(", "))
        }
        ValueKind::Array(array) => {
            let elements: Vec<String> = array
                .elements
                .iter()
                .map(|element| render_item(&element.kind))
                .collect();
            format!("array [{}]", elements.join(", "))
        }
        ValueKind::Plural(plural) => {
            let slots: Vec<String> = plural
                .values
                .iter()
                .enumerate()
                .filter_map(|(arity, slot)| {
                    slot.as_ref()
                        .map(|item| format!("{}={}", QUANTITY_NAMES[arity], render_item(&item.kind)))
                })
                .collect();
            format!("plural [{}]", slots.join(", "))
        }
    };
    if value.meta.weak {
        rendered.push_str(" (weak)");
    }
    if let Some(source) = &value.meta.source {
        rendered.push_str(&format!(" ({source})"));
    }
    rendered
}

fn visibility_marker(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Undefined => "",
        Visibility::Private => " (private)",
        Visibility::Public => " (public)",
    }
}

fn dump_table(out: &mut dyn Write, table: &ResourceTable) -> io::Result<()> {
    for package in &table.packages {
        match package.id {
            Some(id) => writeln!(out, "package {} id={id:#04x}", package.name)?,
            None => writeln!(out, "package {}", package.name)?,
        }
        for group in &package.types {
            let mut line = format!("  type {}", group.ty);
            if let Some(id) = group.id {
                line.push_str(&format!(" id={id:#04x}"));
            }
            line.push_str(visibility_marker(group.visibility));
            writeln!(out, "{line}")?;
            for entry in &group.entries {
                let mut line = format!("    entry {}", entry.name);
                if let Some(id) = entry.id {
                    line.push_str(&format!(" id={id:#06x}"));
                }
                line.push_str(visibility_marker(entry.symbol_status.visibility));
                writeln!(out, "{line}")?;
                for config_value in &entry.values {
                    let mut line = format!("      {}", render_config(&config_value.config));
                    if !config_value.product.is_empty() {
                        line.push_str(&format!(" product={}", config_value.product));
                    }
                    match &config_value.value {
                        Some(value) => line.push_str(&format!(" = {}", render_value(value))),
                        None => line.push_str(" = <missing>"),
                    }
                    writeln!(out, "{line}")?;
                }
            }
        }
    }
    Ok(())
}

fn render_file_kind(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Unknown => "unknown",
        FileKind::Png => "png",
        FileKind::BinaryXml => "binary-xml",
        FileKind::ProtoXml => "proto-xml",
    }
}

fn dump_file(out: &mut dyn Write, file: &ResourceFile) -> io::Result<()> {
    writeln!(out, "file {}", file.name)?;
    writeln!(out, "  path {}", file.source.path)?;
    writeln!(out, "  kind {}", render_file_kind(file.kind))?;
    writeln!(out, "  config {}", render_config(&file.config))?;
    for symbol in &file.exported_symbols {
        writeln!(out, "  symbol {} line={}", symbol.name, symbol.line)?;
    }
    Ok(())
}

fn dump_element(out: &mut dyn Write, element: &Element, depth: usize) -> io::Result<()> {
    let pad = "  ".repeat(depth);
    if element.namespace_uri.is_empty() {
        writeln!(
            out,
            "{pad}<{}> @{}:{}",
            element.name, element.line_number, element.column_number
        )?;
    } else {
        writeln!(
            out,
            "{pad}<{{{}}}{}> @{}:{}",
            element.namespace_uri, element.name, element.line_number, element.column_number
        )?;
    }
    for decl in &element.namespace_decls {
        writeln!(out, "{pad}  xmlns:{}={:?}", decl.prefix, decl.uri)?;
    }
    for attribute in &element.attributes {
        let mut line = format!("{pad}  {}={:?}", attribute.name, attribute.value);
        if let Some(id) = attribute.resource_id {
            line.push_str(&format!(" id={id}"));
        }
        if let Some(item) = &attribute.compiled_value {
            line.push_str(&format!(" compiled={}", render_item(&item.kind)));
        }
        writeln!(out, "{line}")?;
    }
    for child in &element.children {
        match child {
            XmlNode::Element(child) => dump_element(out, child, depth + 1)?,
            XmlNode::Text(text) => writeln!(
                out,
                "{pad}  {:?} @{}:{}",
                text.text, text.line_number, text.column_number
            )?,
        }
    }
    Ok(())
}

fn dump_xml(out: &mut dyn Write, resource: &XmlResource) -> io::Result<()> {
    dump_element(out, &resource.root, 0)
}

fn main() -> Result<()> {
    let matches = command().get_matches();
    init_logging(matches.get_count("verbose"));

    let input = PathBuf::from(
        matches
            .get_one::<String>("INPUT")
            .expect("required argument"),
    );
    let bytes =
        fs::read(&input).with_context(|| format!("failed to read `{}`", input.display()))?;

    let mut output: Box<dyn Write> = match matches.get_one::<String>("output-target") {
        Some(path) => Box::new(create_output_file(Path::new(path))?),
        None => Box::new(io::stdout()),
    };

    match matches
        .get_one::<String>("input-format")
        .expect("has default")
        .as_str()
    {
        "table" => {
            let table = parse_table(&bytes, None)
                .with_context(|| format!("failed to decode `{}` as a resource table", input.display()))?;
            dump_table(&mut output, &table)?;
        }
        "file" => {
            let file = parse_compiled_file(&bytes).with_context(|| {
                format!("failed to decode `{}` as a compiled-file header", input.display())
            })?;
            dump_file(&mut output, &file)?;
        }
        "xml" => {
            let resource = parse_xml(&bytes).with_context(|| {
                format!("failed to decode `{}` as an XML document", input.display())
            })?;
            match resource {
                Some(resource) => dump_xml(&mut output, &resource)?,
                None => bail!("`{}` has no root element", input.display()),
            }
        }
        other => unreachable!("clap rejects `{other}`"),
    }
    Ok(())
}
