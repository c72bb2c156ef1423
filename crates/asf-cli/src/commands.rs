//! Command implementations.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use tracing::{debug, info};

use asf_tag::{AsfTagEditor, Tag, TagDataType, TagValue, time};

use crate::cli::{GetArgs, RemoveArgs, SetArgs, ShowArgs};

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let mut editor = open_editor(&args.file)?;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Tag", "Value"]);
    for tag in Tag::ALL {
        if !editor.has(*tag) {
            continue;
        }
        if let Some(value) = editor.read(*tag)? {
            table.add_row(vec![tag.name().to_owned(), format_value(&value)]);
        }
    }
    println!("{table}");

    if args.raw {
        print_raw_attributes(&args.file, &editor)?;
    }
    Ok(())
}

pub fn run_get(args: &GetArgs) -> Result<()> {
    let tag = parse_tag(&args.tag)?;
    let mut editor = open_editor(&args.file)?;
    match editor.read(tag)? {
        Some(value) => println!("{}", format_value(&value)),
        None => bail!("tag '{}' is not set", args.tag),
    }
    Ok(())
}

pub fn run_set(args: &SetArgs) -> Result<()> {
    let tag = parse_tag(&args.tag)?;
    let value = parse_value(tag, &args.value)?;
    rewrite(&args.file, args.output.as_deref(), |editor| {
        editor.write(tag, Some(&value))?;
        Ok(())
    })?;
    info!(tag = tag.name(), file = %args.file.display(), "tag updated");
    Ok(())
}

pub fn run_remove(args: &RemoveArgs) -> Result<()> {
    let tag = parse_tag(&args.tag)?;
    rewrite(&args.file, args.output.as_deref(), |editor| {
        editor.write(tag, None)?;
        Ok(())
    })?;
    info!(tag = tag.name(), file = %args.file.display(), "tag removed");
    Ok(())
}

fn open_editor(path: &Path) -> Result<AsfTagEditor<File>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    AsfTagEditor::new(file).with_context(|| format!("failed to parse {}", path.display()))
}

/// Apply edits and write the result. With an explicit output path the
/// result goes there; otherwise the rewritten container goes to a
/// temporary sibling first and then renames over the original.
fn rewrite<F>(path: &Path, output: Option<&Path>, apply: F) -> Result<()>
where
    F: FnOnce(&mut AsfTagEditor<File>) -> Result<()>,
{
    let mut editor = open_editor(path)?;
    apply(&mut editor)?;
    if let Some(output) = output {
        let mut dest = File::create(output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        editor.save(&mut dest)?;
        return Ok(());
    }
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))
        .context("failed to create temporary file")?;
    editor.save(tmp.as_file_mut())?;
    debug!(tmp = %tmp.path().display(), "rewrote container");
    tmp.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

fn parse_tag(name: &str) -> Result<Tag> {
    match Tag::from_name(name) {
        Some(tag) => Ok(tag),
        None => {
            let known: Vec<&str> = Tag::ALL.iter().map(|tag| tag.name()).collect();
            bail!("unknown tag '{name}'; known tags: {}", known.join(", "))
        }
    }
}

fn parse_value(tag: Tag, text: &str) -> Result<TagValue> {
    match tag.data_type() {
        TagDataType::String => Ok(TagValue::String(text.to_owned())),
        TagDataType::Int32 => {
            let n: i32 = text
                .parse()
                .with_context(|| format!("tag '{}' takes an integer", tag.name()))?;
            Ok(TagValue::Int32(n))
        }
        TagDataType::Int64 => {
            let n: i64 = text
                .parse()
                .with_context(|| format!("tag '{}' takes an integer", tag.name()))?;
            Ok(TagValue::Int64(n))
        }
        TagDataType::DateTime => Ok(TagValue::DateTime(parse_datetime(text)?)),
        TagDataType::Duration => bail!("tag '{}' is read-only", tag.name()),
        TagDataType::Picture => bail!("picture tags cannot be set in ASF files"),
    }
}

fn parse_datetime(text: &str) -> Result<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Ok(at.with_timezone(&Utc));
    }
    if let Some(at) = time::year_to_datetime(text) {
        return Ok(at);
    }
    bail!("expected an RFC 3339 timestamp or a 4-digit year, got '{text}'")
}

fn format_value(value: &TagValue) -> String {
    match value {
        TagValue::String(text) => text.clone(),
        TagValue::Int32(n) => n.to_string(),
        TagValue::Int64(n) => n.to_string(),
        TagValue::Duration(duration) => {
            let secs = duration.as_secs();
            format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
        }
        TagValue::DateTime(at) => at.to_rfc3339(),
        TagValue::Picture(bytes) => format!("<picture, {} bytes>", bytes.len()),
    }
}

/// List every extended attribute by its on-disk name, with the storage
/// type and a short hex preview of the value bytes.
fn print_raw_attributes(path: &Path, editor: &AsfTagEditor<File>) -> Result<()> {
    let Some(extended) = editor.header().extended_content_description() else {
        return Ok(());
    };
    // A second handle so the preview reads do not disturb the editor.
    let mut src =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Attribute", "Declared", "Stored", "Bytes", "Value"]);
    for (name, cell) in extended.iter() {
        let bytes = cell.bytes(Some(&mut src))?;
        let preview = if bytes.len() > 16 {
            format!("{}..", hex::encode(&bytes[..16]))
        } else {
            hex::encode(&bytes)
        };
        let declared = match asf_tag::asf_tag_by_name(name) {
            Some(info) => format!("{:?}", info.data_type),
            None => "-".to_owned(),
        };
        table.add_row(vec![
            name.to_owned(),
            declared,
            format!("{:?}", cell.storage()),
            cell.len().to_string(),
            preview,
        ]);
    }
    println!("{table}");
    Ok(())
}
