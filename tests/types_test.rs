use echofind::types::{
    Album, AlbumImage, Artist, AudioFeatures, SavedSong, Song, Track,
};

fn create_test_track() -> Track {
    Track {
        id: "t1".to_string(),
        name: "Shiny Song".to_string(),
        preview_url: Some("https://preview.test/t1".to_string()),
        album: Album {
            name: Some("Shiny Album".to_string()),
            images: vec![
                AlbumImage {
                    url: "https://img.test/large.jpg".to_string(),
                    height: Some(640),
                    width: Some(640),
                },
                AlbumImage {
                    url: "https://img.test/small.jpg".to_string(),
                    height: Some(64),
                    width: Some(64),
                },
            ],
        },
        artists: vec![
            Artist {
                id: "a1".to_string(),
                name: "First Artist".to_string(),
            },
            Artist {
                id: "a2".to_string(),
                name: "Second Artist".to_string(),
            },
        ],
        popularity: 73,
        audio_features: None,
    }
}

#[test]
fn test_saved_song_from_track() {
    let mut track = create_test_track();
    track.audio_features = Some(AudioFeatures {
        tempo: 128.0,
        energy: 0.8,
        valence: 0.6,
        danceability: 0.7,
    });

    let saved = SavedSong::from_track(&track, 1_700_000_000);

    assert_eq!(saved.track_id, "t1");
    assert_eq!(saved.name, "Shiny Song");
    assert_eq!(saved.album_image.as_deref(), Some("https://img.test/large.jpg"));
    assert_eq!(saved.artists.len(), 2);
    assert_eq!(saved.artists[0].id, "a1");
    assert_eq!(saved.popularity, 73);
    assert_eq!(saved.tempo, 128.0);
    assert_eq!(saved.danceability, 0.7);
    assert_eq!(saved.saved_at, 1_700_000_000);
}

#[test]
fn test_saved_song_defaults_without_features() {
    let track = create_test_track();
    let saved = SavedSong::from_track(&track, 0);

    // Missing analysis degrades to zeroed features, matching the stored shape
    assert_eq!(saved.tempo, 0.0);
    assert_eq!(saved.energy, 0.0);
    assert_eq!(saved.valence, 0.0);
    assert_eq!(saved.danceability, 0.0);
}

#[test]
fn test_song_display_flattening() {
    let track = create_test_track();
    let saved = SavedSong::from_track(&track, 0);
    let song = Song::from(&saved);

    assert_eq!(song.title, "Shiny Song");
    assert_eq!(song.artist, "First Artist, Second Artist");
    assert_eq!(song.image_url, "https://img.test/large.jpg");
    assert_eq!(song.preview_url, "https://preview.test/t1");
}

#[test]
fn test_track_artist_names() {
    let track = create_test_track();
    assert_eq!(track.artist_names(), "First Artist, Second Artist");
}
