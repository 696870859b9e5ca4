mod common;

use common::*;
use mgc_core::error::MgcError;
use mgc_core::io::store::{DirectoryStore, ImageStore, MemoryStore};

#[test]
fn test_memory_store_roundtrip() {
    let mut store = MemoryStore::new();
    assert!(store.is_empty());

    let id = store.store("light", flat(4, 4, 0.3)).unwrap();
    assert_eq!(id, "light");
    assert!(store.contains("light"));
    assert_eq!(store.load("light").unwrap(), flat(4, 4, 0.3));
}

#[test]
fn test_memory_store_replace() {
    let mut store = MemoryStore::new();
    store.store("a", flat(4, 4, 0.3)).unwrap();
    store.store("a", flat(4, 4, 0.6)).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.load("a").unwrap(), flat(4, 4, 0.6));
}

#[test]
fn test_memory_store_release() {
    let mut store = MemoryStore::new();
    store.store("a", flat(2, 2, 0.1)).unwrap();
    store.release("a").unwrap();
    assert!(!store.contains("a"));
    assert!(matches!(store.release("a"), Err(MgcError::UnknownImage(_))));
}

#[test]
fn test_memory_store_unknown() {
    let store = MemoryStore::new();
    assert!(matches!(store.load("x"), Err(MgcError::UnknownImage(_))));
}

#[test]
fn test_directory_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DirectoryStore::new(dir.path().join("images"));

    let img = horizontal_ramp(8, 8, 0.0, 1.0);
    store.store("ramp", img.clone()).unwrap();
    assert!(store.contains("ramp"));
    assert!(store.root().join("ramp.tiff").is_file());

    let loaded = store.load("ramp").unwrap();
    assert_eq!(loaded.shape(), img.shape());
    for (a, b) in mono(&loaded).data.iter().zip(mono(&img).data.iter()) {
        assert!((a - b).abs() < 1e-3);
    }

    store.release("ramp").unwrap();
    assert!(!store.contains("ramp"));
}

#[test]
fn test_directory_store_finds_png() {
    let dir = tempfile::tempdir().unwrap();
    mgc_core::io::image_io::save_image(&flat(4, 4, 0.5), &dir.path().join("wide.png")).unwrap();

    let store = DirectoryStore::new(dir.path());
    assert!(store.contains("wide"));
    assert_eq!(store.load("wide").unwrap().shape(), flat(4, 4, 0.5).shape());
}

#[test]
fn test_directory_store_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DirectoryStore::new(dir.path());
    assert!(matches!(store.load("nope"), Err(MgcError::UnknownImage(_))));
    assert!(matches!(store.release("nope"), Err(MgcError::UnknownImage(_))));
}
