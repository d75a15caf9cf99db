//! Extraction, image source and concurrent access tests

mod common;

use std::fs;
use std::thread;

use common::ImageBuilder;
use romdir_reader::{Directory, DirectoryOptions, ImageSource, RomdirError};

fn sample_image() -> Vec<u8> {
    ImageBuilder::new()
        .file("ROMVER", b"0200EC20040614\n\0")
        .file("OSDSYS", &common::pattern(5, 0x2345))
        .placeholder(0x80, 0)
        .file("EMPTY", &[])
        .extinfo()
        .trailing(0x100)
        .build()
        .bytes
}

#[test]
fn test_extract_to_writer() {
    let dir = Directory::new(sample_image()).expect("parse");
    let entry = dir.find_by_name("ROMVER").unwrap();

    let mut out = Vec::new();
    let written = dir.extract_to(entry, &mut out).expect("extract");
    assert_eq!(written, 16);
    assert_eq!(out, b"0200EC20040614\n\0");
}

#[test]
fn test_extract_all() {
    let dir = Directory::new(sample_image()).expect("parse");
    let tmp = tempfile::tempdir().expect("tempdir");
    let out_dir = tmp.path().join("romdir");

    let count = dir.extract_all(&out_dir).expect("extract all");
    assert_eq!(count, dir.len());

    for entry in dir.iter() {
        let written = fs::read(out_dir.join(&entry.name)).expect("extracted file");
        assert_eq!(written, dir.data(entry).unwrap(), "content of {}", entry.name);
    }
    assert_eq!(fs::metadata(out_dir.join("EMPTY")).unwrap().len(), 0);
    assert!(!out_dir.join("-").exists());
}

#[test]
fn test_extract_file() {
    let dir = Directory::new(sample_image()).expect("parse");
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("osdsys.bin");

    dir.extract_file("OSDSYS", &path).expect("extract");
    assert_eq!(fs::read(&path).unwrap(), common::pattern(5, 0x2345));

    assert!(matches!(
        dir.extract_file("NOPE", tmp.path().join("nope")),
        Err(RomdirError::FileNotFound(_))
    ));
    assert!(!tmp.path().join("nope").exists());
}

#[test]
fn test_extract_rejects_unsafe_names() {
    let image = ImageBuilder::new().file("../x", b"evil").build();
    let dir = Directory::new(image.bytes).expect("parse");
    let tmp = tempfile::tempdir().expect("tempdir");

    match dir.extract_all(tmp.path()) {
        Err(RomdirError::InvalidName(name)) => assert_eq!(name, "../x"),
        other => panic!("expected InvalidName, got {:?}", other),
    }
    assert!(!tmp.path().parent().unwrap().join("x").exists());
}

#[test]
fn test_load_and_open_from_file() {
    let bytes = sample_image();
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("bios.bin");
    fs::write(&path, &bytes).unwrap();

    let loaded = Directory::load(&path).expect("load");
    let mapped = Directory::open(&path).expect("open");

    assert_eq!(loaded.entries(), mapped.entries());
    assert_eq!(loaded.source_len(), bytes.len());
    let osdsys = mapped.find_by_name("OSDSYS").unwrap();
    assert_eq!(mapped.data(osdsys).unwrap(), common::pattern(5, 0x2345));

    let source = ImageSource::map(&path).unwrap();
    assert!(source.is_mapped());
    assert_eq!(source.as_ref(), &bytes[..]);
    assert!(!ImageSource::from(bytes).is_mapped());
}

#[test]
fn test_open_missing_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let missing = tmp.path().join("missing.bin");
    assert!(matches!(Directory::load(&missing), Err(RomdirError::Io(_))));
    assert!(matches!(Directory::open(&missing), Err(RomdirError::Io(_))));
}

#[test]
fn test_concurrent_readers() {
    let options = DirectoryOptions::new().strict_names(true);
    let dir = Directory::with_options(sample_image(), options).expect("parse");
    let expected = common::pattern(5, 0x2345);

    thread::scope(|s| {
        for t in 0..8u64 {
            let dir = &dir;
            let expected = &expected;
            s.spawn(move || {
                for i in 0..64u64 {
                    let offset = (t * 0x100 + i * 13) % 0x2345;
                    let entry = dir.find_by_name("OSDSYS").expect("lookup");
                    let got = dir.read_range(entry, offset, 32).expect("read");
                    let end = (offset as usize + 32).min(expected.len());
                    assert_eq!(got, &expected[offset as usize..end]);
                    assert!(dir.exists("ROMVER"));
                }
            });
        }
    });
}

#[test]
fn test_into_inner_returns_buffer() {
    let bytes = sample_image();
    let dir = Directory::new(bytes.clone()).expect("parse");
    assert_eq!(dir.into_inner(), bytes);
}

#[test]
fn test_borrowed_buffer() {
    let bytes = sample_image();
    let dir = Directory::new(&bytes[..]).expect("parse borrowed");
    assert!(dir.exists("OSDSYS"));
}
