//! Persistence Integration Tests
//!
//! Round-trip and replacement behavior of the playlist document.

use lessonlink::store;
use lessonlink::{PlaylistDocument, PlaylistItem};
use tempfile::TempDir;

fn sample_document() -> PlaylistDocument {
    PlaylistDocument::new(
        "PLoROMvodv4rNRRGdS0rBbXOUGA0wjdh1X",
        vec![
            PlaylistItem {
                title: "Lecture 1".to_string(),
                href: Some("/watch?v=aaaaaaaaaaa&list=PL1".to_string()),
                id: Some("aaaaaaaaaaa".to_string()),
            },
            PlaylistItem {
                title: "Members trailer".to_string(),
                href: None,
                id: None,
            },
            PlaylistItem {
                title: "Lecture 2".to_string(),
                href: Some("/watch?v=bbbbbbbbbbb".to_string()),
                id: Some("bbbbbbbbbbb".to_string()),
            },
        ],
    )
}

#[tokio::test]
async fn test_round_trip_preserves_null_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("playlist.json");

    let document = sample_document();
    store::save(&document, &path).await.unwrap();

    let loaded = store::load(&path).await.unwrap();
    assert_eq!(loaded, document);
    assert_eq!(loaded.items[1].id, None);
    assert_eq!(loaded.items[1].href, None);
}

#[tokio::test]
async fn test_save_creates_containing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("playlist.json");

    store::save(&sample_document(), &path).await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_document_format_is_pretty_printed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("playlist.json");

    store::save(&sample_document(), &path).await.unwrap();

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(raw.starts_with("{\n  \"playlistId\""));
    assert!(raw.contains("\n  \"items\": ["));
    // Null ids are written out explicitly
    assert!(raw.contains("\"id\": null"));
}

#[tokio::test]
async fn test_save_replaces_existing_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("playlist.json");

    store::save(&sample_document(), &path).await.unwrap();

    let replacement = PlaylistDocument::new("PLother", vec![]);
    store::save(&replacement, &path).await.unwrap();

    let loaded = store::load(&path).await.unwrap();
    assert_eq!(loaded.playlist_id, "PLother");
    assert!(loaded.items.is_empty());
}

#[tokio::test]
async fn test_save_leaves_no_temporary_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("playlist.json");

    store::save(&sample_document(), &path).await.unwrap();

    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    assert_eq!(names, ["playlist.json"]);
}

#[tokio::test]
async fn test_load_missing_document_instructs_fetch() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("playlist.json");

    let err = store::load(&path).await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("not found"));
    assert!(message.contains("lessonlink fetch"));
    assert!(err.downcast_ref::<store::StoreError>().is_some());
}
