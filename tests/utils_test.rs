use echofind::types::{Album, SongTableRow, Track};
use echofind::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        preview_url: Some(format!("https://preview.test/{}", id)),
        album: Album {
            name: None,
            images: Vec::new(),
        },
        artists: Vec::new(),
        popularity: 0,
        audio_features: None,
    }
}

// Helper function to create a test song table row
fn create_test_song_row(added: &str, title: &str) -> SongTableRow {
    SongTableRow {
        title: title.to_string(),
        artists: "Artist".to_string(),
        popularity: 10,
        added: added.to_string(),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_uid() {
    let uid = generate_uid();
    assert_eq!(uid.len(), 24);
    assert!(uid.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated uids should be different
    assert_ne!(uid, generate_uid());
}

#[test]
fn test_generate_salt() {
    let salt = generate_salt();
    assert_eq!(salt.len(), 16);
    assert!(salt.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn test_password_digest() {
    let digest = password_digest("salt", "secret");

    // Deterministic for the same salt and password
    assert_eq!(digest, password_digest("salt", "secret"));

    // Different salt or password must change the digest
    assert_ne!(digest, password_digest("other", "secret"));
    assert_ne!(digest, password_digest("salt", "hunter2"));

    // URL-safe base64, no padding
    assert!(
        digest
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_remove_duplicate_tracks() {
    let mut tracks = vec![
        create_test_track("id1", "Track 1"),
        create_test_track("id2", "Track 2"),
        create_test_track("id1", "Track 1 Duplicate"), // Duplicate
        create_test_track("id3", "Track 3"),
    ];

    remove_duplicate_tracks(&mut tracks);

    // Should have 3 unique tracks
    assert_eq!(tracks.len(), 3);

    // Should contain the first occurrence of each unique ID
    let ids: Vec<&String> = tracks.iter().map(|t| &t.id).collect();
    assert_eq!(ids, vec!["id1", "id2", "id3"]);
}

#[test]
fn test_shuffle_tracks_keeps_content() {
    let mut tracks = vec![
        create_test_track("id1", "Track 1"),
        create_test_track("id2", "Track 2"),
        create_test_track("id3", "Track 3"),
    ];

    shuffle_tracks(&mut tracks);

    assert_eq!(tracks.len(), 3);
    for id in ["id1", "id2", "id3"] {
        assert!(tracks.iter().any(|t| t.id == id));
    }
}

#[test]
fn test_format_saved_at() {
    assert_eq!(format_saved_at(0), "1970-01-01");
    assert_eq!(format_saved_at(1_700_000_000), "2023-11-14");
}

#[test]
fn test_sort_song_table_rows() {
    let mut rows = vec![
        create_test_song_row("2024-03-01", "Alpha"),
        create_test_song_row("2024-03-03", "Gamma"),
        create_test_song_row("2024-03-01", "Beta"),
        create_test_song_row("2024-03-02", "Delta"),
    ];

    sort_song_table_rows(&mut rows);

    // Sorted by date descending, then by title ascending
    assert_eq!(rows[0].added, "2024-03-03");
    assert_eq!(rows[1].added, "2024-03-02");
    assert_eq!(rows[2].added, "2024-03-01");
    assert_eq!(rows[2].title, "Alpha");
    assert_eq!(rows[3].added, "2024-03-01");
    assert_eq!(rows[3].title, "Beta");
}
