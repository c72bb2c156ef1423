//! End-to-end parse/edit/save tests over synthetic containers.

use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::time::Duration;

use uuid::Uuid;

use asf_tag::object::{
    CONTENT_DESCRIPTION_GUID, EXTENDED_CONTENT_DESCRIPTION_GUID, FILE_PROPERTIES_GUID,
    HEADER_OBJECT_GUID, OBJECT_HEADER_LEN, ObjectHeader,
};
use asf_tag::{AsfTagEditor, Tag, TagValue, guid_bytes};

fn utf16z(text: &str) -> Vec<u8> {
    let mut bytes: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    bytes.extend_from_slice(&[0, 0]);
    bytes
}

fn object(guid: Uuid, body: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    ObjectHeader {
        guid,
        size: OBJECT_HEADER_LEN + body.len() as u64,
    }
    .write(&mut bytes)
    .unwrap();
    bytes.extend_from_slice(body);
    bytes
}

fn file_properties(file_size: u64, raw_duration: u64, preroll: u64) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&guid_bytes(Uuid::nil()));
    body.extend_from_slice(&file_size.to_le_bytes());
    body.extend_from_slice(&0u64.to_le_bytes()); // creation date
    body.extend_from_slice(&0u64.to_le_bytes()); // packet count
    body.extend_from_slice(&raw_duration.to_le_bytes());
    body.extend_from_slice(&0u64.to_le_bytes()); // send duration
    body.extend_from_slice(&preroll.to_le_bytes());
    body.extend_from_slice(&0u32.to_le_bytes()); // flags
    body.extend_from_slice(&0u32.to_le_bytes());
    body.extend_from_slice(&0u32.to_le_bytes());
    body.extend_from_slice(&0u32.to_le_bytes());
    object(FILE_PROPERTIES_GUID, &body)
}

fn content_description(slots: [Option<&str>; 5]) -> Vec<u8> {
    let encoded: Vec<Option<Vec<u8>>> = slots.iter().map(|slot| slot.map(utf16z)).collect();
    let mut body = Vec::new();
    for slot in &encoded {
        let len = slot.as_ref().map(Vec::len).unwrap_or(0) as u16;
        body.extend_from_slice(&len.to_le_bytes());
    }
    for slot in encoded.iter().flatten() {
        body.extend_from_slice(slot);
    }
    object(CONTENT_DESCRIPTION_GUID, &body)
}

/// Entries must be given in name order; serialization sorts by name.
fn extended_content_description(entries: &[(&str, u16, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for (name, code, value) in entries {
        let name_bytes = utf16z(name);
        body.extend_from_slice(&(name_bytes.len() as u16).to_le_bytes());
        body.extend_from_slice(&name_bytes);
        body.extend_from_slice(&code.to_le_bytes());
        body.extend_from_slice(&(value.len() as u16).to_le_bytes());
        body.extend_from_slice(value);
    }
    object(EXTENDED_CONTENT_DESCRIPTION_GUID, &body)
}

/// Assemble a container: root header, children, then the media payload.
fn container(children: &[Vec<u8>], payload: &[u8]) -> Vec<u8> {
    let children_len: u64 = children.iter().map(|c| c.len() as u64).sum();
    let mut bytes = Vec::new();
    ObjectHeader {
        guid: HEADER_OBJECT_GUID,
        size: 30 + children_len,
    }
    .write(&mut bytes)
    .unwrap();
    bytes.extend_from_slice(&(children.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&[0x01, 0x02]);
    for child in children {
        bytes.extend_from_slice(child);
    }
    bytes.extend_from_slice(payload);
    bytes
}

/// A representative container: every known child kind, one stray
/// object, and a payload.
fn sample_container() -> Vec<u8> {
    let payload = b"not really media data";
    let stray = object(Uuid::from_u128(0xdead_beef), &[0xfe; 13]);
    let children = [
        file_properties(0, 103_300_000, 5),
        content_description([Some("Title A"), Some("Someone"), None, None, None]),
        extended_content_description(&[
            ("WM/Genre", 0, &utf16z("Rock")),
            ("WM/TrackNumber", 0, &utf16z("3")),
        ]),
        stray,
    ];
    let mut bytes = container(&children, payload);
    // Patch FileSize to the real total length.
    let total = bytes.len() as u64;
    let file_size_at = 30 + 24 + 16;
    bytes[file_size_at..file_size_at + 8].copy_from_slice(&total.to_le_bytes());
    bytes
}

fn read_file_size(editor: &mut AsfTagEditor<Cursor<Vec<u8>>>) -> i64 {
    match editor.read(Tag::FileSize).unwrap() {
        Some(TagValue::Int64(n)) => n,
        other => panic!("unexpected FileSize value: {other:?}"),
    }
}

#[test]
fn unedited_save_is_byte_identical() {
    let original = sample_container();
    let mut editor = AsfTagEditor::new(Cursor::new(original.clone())).unwrap();
    let mut out = Cursor::new(Vec::new());
    editor.save(&mut out).unwrap();
    assert_eq!(out.into_inner(), original);
}

#[test]
fn empty_root_reports_no_tags() {
    let bytes = container(&[], b"");
    let mut editor = AsfTagEditor::new(Cursor::new(bytes)).unwrap();
    assert!(!editor.has(Tag::FileSize));
    assert!(!editor.has(Tag::Title));
    assert_eq!(editor.read(Tag::FileSize).unwrap(), None);
}

#[test]
fn duration_excludes_the_preroll() {
    let mut editor = AsfTagEditor::new(Cursor::new(sample_container())).unwrap();
    // Raw duration 103_300_000 ticks minus 5 ms of preroll.
    let expected = Duration::from_nanos(103_250_000 * 100);
    assert_eq!(
        editor.read(Tag::Duration).unwrap(),
        Some(TagValue::Duration(expected))
    );
}

#[test]
fn existing_tags_read_back() {
    let mut editor = AsfTagEditor::new(Cursor::new(sample_container())).unwrap();
    assert_eq!(
        editor.read(Tag::Title).unwrap(),
        Some(TagValue::String("Title A".into()))
    );
    assert_eq!(
        editor.read(Tag::Artist).unwrap(),
        Some(TagValue::String("Someone".into()))
    );
    assert_eq!(
        editor.read(Tag::Genre).unwrap(),
        Some(TagValue::String("Rock".into()))
    );
    assert_eq!(
        editor.read(Tag::TrackNumber).unwrap(),
        Some(TagValue::Int32(3))
    );
    assert!(!editor.has(Tag::Copyright));
}

#[test]
fn title_edit_keeps_every_size_field_consistent() {
    let original = sample_container();
    let mut editor = AsfTagEditor::new(Cursor::new(original.clone())).unwrap();
    let old_file_size = read_file_size(&mut editor);

    // "Title A" (16 bytes) becomes "Longer Title Here" (36 bytes).
    editor
        .write(Tag::Title, Some(&TagValue::String("Longer Title Here".into())))
        .unwrap();
    let mut out = Cursor::new(Vec::new());
    editor.save(&mut out).unwrap();
    let saved = out.into_inner();
    assert_eq!(saved.len() as i64, old_file_size + 20);

    let mut reparsed = AsfTagEditor::new(Cursor::new(saved.clone())).unwrap();
    assert_eq!(read_file_size(&mut reparsed), saved.len() as i64);
    assert_eq!(
        reparsed.read(Tag::Title).unwrap(),
        Some(TagValue::String("Longer Title Here".into()))
    );
    // Payload untouched.
    assert!(saved.ends_with(b"not really media data"));
}

#[test]
fn removing_one_extended_attribute_keeps_the_rest() {
    let mut editor = AsfTagEditor::new(Cursor::new(sample_container())).unwrap();
    editor.write(Tag::TrackNumber, None).unwrap();
    let mut out = Cursor::new(Vec::new());
    editor.save(&mut out).unwrap();

    let mut reparsed = AsfTagEditor::new(out).unwrap();
    assert!(!reparsed.has(Tag::TrackNumber));
    assert_eq!(
        reparsed.read(Tag::Genre).unwrap(),
        Some(TagValue::String("Rock".into()))
    );
    assert_eq!(read_file_size(&mut reparsed), reparsed.header().size() as i64 + 21);
}

#[test]
fn first_write_creates_the_owning_object() {
    // No Content Description child at all.
    let bytes = container(&[file_properties(0, 0, 0)], b"xyz");
    let total = bytes.len() as u64;
    let mut bytes = bytes;
    bytes[30 + 24 + 16..30 + 24 + 24].copy_from_slice(&total.to_le_bytes());

    let before = bytes.len();
    let mut editor = AsfTagEditor::new(Cursor::new(bytes)).unwrap();
    editor
        .write(Tag::Copyright, Some(&TagValue::String("(c) 2011".into())))
        .unwrap();
    let mut out = Cursor::new(Vec::new());
    editor.save(&mut out).unwrap();
    let saved = out.into_inner();

    // 34-byte object plus eight UTF-16 units and the terminator.
    assert_eq!(saved.len(), before + 34 + 18);
    let mut reparsed = AsfTagEditor::new(Cursor::new(saved.clone())).unwrap();
    assert_eq!(
        reparsed.read(Tag::Copyright).unwrap(),
        Some(TagValue::String("(c) 2011".into()))
    );
    assert_eq!(read_file_size(&mut reparsed), saved.len() as i64);
}

#[test]
fn edits_persist_through_real_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.wma");
    std::fs::write(&path, sample_container()).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let mut editor = AsfTagEditor::new(file).unwrap();
    editor
        .write(Tag::AlbumTitle, Some(&TagValue::String("Album".into())))
        .unwrap();
    let out_path = dir.path().join("edited.wma");
    let mut out = std::fs::File::create(&out_path).unwrap();
    editor.save(&mut out).unwrap();
    out.flush().unwrap();
    drop(out);

    let mut reread = std::fs::File::open(&out_path).unwrap();
    assert!(AsfTagEditor::is_supported(&mut reread));
    reread.seek(SeekFrom::Start(0)).unwrap();
    let mut reparsed = AsfTagEditor::new(reread).unwrap();
    assert_eq!(
        reparsed.read(Tag::AlbumTitle).unwrap(),
        Some(TagValue::String("Album".into()))
    );
    let mut len_check = Vec::new();
    std::fs::File::open(&out_path)
        .unwrap()
        .read_to_end(&mut len_check)
        .unwrap();
    assert_eq!(read_file_size_file(&mut reparsed), len_check.len() as i64);
}

fn read_file_size_file(editor: &mut AsfTagEditor<std::fs::File>) -> i64 {
    match editor.read(Tag::FileSize).unwrap() {
        Some(TagValue::Int64(n)) => n,
        other => panic!("unexpected FileSize value: {other:?}"),
    }
}
