use std::collections::HashSet;

use echofind::recommend::engine::{exclusion_set, filter_candidates};
use echofind::recommend::{
    CACHE_TTL_SECS, FALLBACK_GENRE_SEEDS, MAX_SEEDS, RecommendationCache, SeedSet, SessionContext,
    TargetFeatures,
};
use echofind::types::{
    Album, AlbumImage, Artist, AudioFeatures, SavedArtist, SavedSong, Track,
};

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, preview: Option<&str>, artist_id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        preview_url: preview.map(|p| p.to_string()),
        album: Album {
            name: Some(format!("{} album", name)),
            images: vec![AlbumImage {
                url: format!("https://img.test/{}.jpg", id),
                height: Some(300),
                width: Some(300),
            }],
        },
        artists: vec![Artist {
            id: artist_id.to_string(),
            name: format!("{}_name", artist_id),
        }],
        popularity: 50,
        audio_features: None,
    }
}

// Helper function to create a liked/disliked store entry
fn create_saved_song(track_id: &str, artist_id: &str) -> SavedSong {
    SavedSong {
        track_id: track_id.to_string(),
        name: format!("{} title", track_id),
        preview_url: Some(format!("https://preview.test/{}", track_id)),
        album_image: None,
        artists: vec![SavedArtist {
            id: artist_id.to_string(),
            name: format!("{}_name", artist_id),
        }],
        popularity: 50,
        tempo: 120.0,
        energy: 0.5,
        valence: 0.5,
        danceability: 0.5,
        saved_at: 1_700_000_000,
    }
}

fn create_features(danceability: f64, energy: f64, valence: f64) -> AudioFeatures {
    AudioFeatures {
        tempo: 120.0,
        energy,
        valence,
        danceability,
    }
}

#[test]
fn test_seed_set_caps() {
    let liked = vec![
        create_saved_song("t1", "a1"),
        create_saved_song("t2", "a2"),
        create_saved_song("t3", "a3"),
        create_saved_song("t4", "a4"),
    ];

    let mut seeds = SeedSet::from_liked(&liked);

    // Two track seeds from the first two likes, two distinct artist seeds
    assert_eq!(seeds.track_seeds(), &["t1".to_string(), "t2".to_string()]);
    assert_eq!(seeds.artist_seeds(), &["a1".to_string(), "a2".to_string()]);
    assert!(seeds.genre_seeds().is_empty());

    // One genre tops the set off at the overall cap
    seeds.add_genre("indie".to_string());
    seeds.add_genre("rock".to_string());
    assert_eq!(seeds.genre_seeds(), &["indie".to_string()]);
    assert_eq!(seeds.len(), MAX_SEEDS);
}

#[test]
fn test_seed_set_distinct_artists() {
    // All likes share one artist: only one artist seed may emerge
    let liked = vec![
        create_saved_song("t1", "a1"),
        create_saved_song("t2", "a1"),
        create_saved_song("t3", "a1"),
    ];

    let seeds = SeedSet::from_liked(&liked);
    assert_eq!(seeds.artist_seeds(), &["a1".to_string()]);
}

#[test]
fn test_seed_set_no_duplicate_ids() {
    let liked = vec![
        create_saved_song("t1", "a1"),
        create_saved_song("t1", "a1"),
        create_saved_song("t2", "a2"),
    ];

    let seeds = SeedSet::from_liked(&liked);

    let mut all_ids: Vec<&String> = Vec::new();
    all_ids.extend(seeds.track_seeds());
    all_ids.extend(seeds.artist_seeds());
    all_ids.extend(seeds.genre_seeds());
    let unique: HashSet<&String> = all_ids.iter().cloned().collect();
    assert_eq!(all_ids.len(), unique.len());
}

#[test]
fn test_seed_set_genre_fallback() {
    let available: Vec<String> = (0..20).map(|i| format!("genre-{}", i)).collect();
    let seeds = SeedSet::from_available_genres(&available);

    assert_eq!(seeds.genre_seeds().len(), FALLBACK_GENRE_SEEDS);
    assert!(seeds.track_seeds().is_empty());
    assert!(seeds.artist_seeds().is_empty());

    // Every pick must come from the available list, without repeats
    let unique: HashSet<&String> = seeds.genre_seeds().iter().collect();
    assert_eq!(unique.len(), seeds.genre_seeds().len());
    for genre in seeds.genre_seeds() {
        assert!(available.contains(genre));
    }
}

#[test]
fn test_seed_set_genre_fallback_short_list() {
    let available = vec!["ambient".to_string(), "jazz".to_string()];
    let seeds = SeedSet::from_available_genres(&available);
    assert_eq!(seeds.genre_seeds().len(), 2);

    let empty: Vec<String> = Vec::new();
    assert!(SeedSet::from_available_genres(&empty).is_empty());
}

#[test]
fn test_seed_set_query_params() {
    // One liked track by one artist renders three separate parameters
    let liked = vec![create_saved_song("trackA", "artistX")];
    let mut seeds = SeedSet::from_liked(&liked);
    seeds.add_genre("shoegaze".to_string());

    let params = seeds.query_params();
    assert_eq!(params.len(), 3);
    assert!(params.contains(&("seed_tracks".to_string(), "trackA".to_string())));
    assert!(params.contains(&("seed_artists".to_string(), "artistX".to_string())));
    assert!(params.contains(&("seed_genres".to_string(), "shoegaze".to_string())));
}

#[test]
fn test_seed_set_query_params_omit_empty_categories() {
    let seeds = SeedSet::from_available_genres(&["folk".to_string()]);
    let params = seeds.query_params();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].0, "seed_genres");
}

#[test]
fn test_target_features_mean() {
    let features = vec![
        create_features(0.2, 0.4, 0.6),
        create_features(0.4, 0.6, 0.8),
    ];

    let targets = TargetFeatures::from_features(&features);
    assert!((targets.danceability.unwrap() - 0.3).abs() < 1e-9);
    assert!((targets.energy.unwrap() - 0.5).abs() < 1e-9);
    assert!((targets.valence.unwrap() - 0.7).abs() < 1e-9);
}

#[test]
fn test_target_features_out_of_range_dropped() {
    // Corrupt energy readings push the mean above 1: that target is omitted
    let features = vec![
        create_features(0.5, 1.8, 0.5),
        create_features(0.5, 1.2, 0.5),
    ];

    let targets = TargetFeatures::from_features(&features);
    assert!(targets.energy.is_none());
    assert_eq!(targets.danceability, Some(0.5));
    assert_eq!(targets.valence, Some(0.5));

    let params = targets.query_params();
    assert_eq!(params.len(), 2);
    assert!(params.iter().all(|(key, _)| key != "target_energy"));
}

#[test]
fn test_target_features_all_in_unit_range_or_omitted() {
    let features = vec![
        create_features(0.1, 0.9, 0.3),
        create_features(0.7, 0.2, 0.9),
        create_features(0.4, 0.5, 0.6),
    ];

    let targets = TargetFeatures::from_features(&features);
    for value in [targets.danceability, targets.energy, targets.valence] {
        let value = value.expect("mean of in-range features must be present");
        assert!((0.0..=1.0).contains(&value));
    }
}

#[test]
fn test_target_features_empty() {
    let targets = TargetFeatures::from_features(&[]);
    assert!(targets.is_empty());
    assert!(targets.query_params().is_empty());
}

#[test]
fn test_cache_returns_same_batch_within_ttl() {
    let mut cache = RecommendationCache::default();
    let tracks = vec![create_test_track("t1", "One", Some("p"), "a1")];

    assert!(cache.fresh(1_000).is_none());

    cache.store(tracks.clone(), 1_000);
    let first = cache.fresh(1_000 + CACHE_TTL_SECS - 1).expect("fresh");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].id, "t1");
}

#[test]
fn test_cache_expires_after_ttl() {
    let mut cache = RecommendationCache::default();
    cache.store(vec![create_test_track("t1", "One", Some("p"), "a1")], 1_000);

    assert!(cache.fresh(1_000 + CACHE_TTL_SECS).is_none());
    assert_eq!(cache.age(1_000 + CACHE_TTL_SECS), Some(CACHE_TTL_SECS));
}

#[test]
fn test_cache_ignores_empty_batches() {
    let mut cache = RecommendationCache::default();
    cache.store(vec![create_test_track("t1", "One", Some("p"), "a1")], 1_000);

    // An empty store must not clobber the previous batch
    cache.store(Vec::new(), 1_100);
    let kept = cache.fresh(1_200).expect("previous batch kept");
    assert_eq!(kept[0].id, "t1");
}

#[test]
fn test_cache_invalidate() {
    let mut cache = RecommendationCache::default();
    cache.store(vec![create_test_track("t1", "One", Some("p"), "a1")], 1_000);
    cache.invalidate();
    assert!(cache.fresh(1_001).is_none());
}

#[test]
fn test_session_presented_tracking() {
    let mut session = SessionContext::new();

    assert!(session.mark_presented("t1"));
    assert!(!session.mark_presented("t1")); // second deal of the same id
    assert!(session.was_presented("t1"));
    assert!(!session.was_presented("t2"));
    assert_eq!(session.presented_count(), 1);
}

#[test]
fn test_filter_candidates_drops_previewless_and_duplicates() {
    let tracks = vec![
        create_test_track("t1", "One", Some("p1"), "a1"),
        create_test_track("t1", "One again", Some("p1"), "a1"),
        create_test_track("t2", "Two", None, "a2"),
        create_test_track("t3", "Three", Some("p3"), "a3"),
    ];

    let filtered = filter_candidates(tracks, &HashSet::new());
    let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t3"]);
}

#[test]
fn test_filter_candidates_respects_exclusions() {
    let tracks = vec![
        create_test_track("t1", "One", Some("p1"), "a1"),
        create_test_track("t2", "Two", Some("p2"), "a2"),
        create_test_track("t3", "Three", Some("p3"), "a3"),
    ];
    let excluded: HashSet<String> = ["t1".to_string(), "t3".to_string()].into_iter().collect();

    let filtered = filter_candidates(tracks, &excluded);
    let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t2"]);
}

#[test]
fn test_exclusion_set_union() {
    let liked = vec![create_saved_song("t1", "a1")];
    let disliked = vec![create_saved_song("t2", "a2")];
    let mut session = SessionContext::new();
    session.mark_presented("t3");

    let excluded = exclusion_set(&liked, &disliked, session.presented_ids());
    assert_eq!(excluded.len(), 3);
    for id in ["t1", "t2", "t3"] {
        assert!(excluded.contains(id));
    }
}

#[test]
fn test_swiped_track_never_resurfaces() {
    // After a track is dealt and judged, both the presented set and the
    // library exclusion must keep it out of later batches
    let mut session = SessionContext::new();
    session.mark_presented("t1");
    let liked = vec![create_saved_song("t1", "a1")];

    let batch = vec![
        create_test_track("t1", "One", Some("p1"), "a1"),
        create_test_track("t2", "Two", Some("p2"), "a2"),
    ];
    let excluded = exclusion_set(&liked, &[], session.presented_ids());
    let filtered = filter_candidates(batch, &excluded);

    assert!(filtered.iter().all(|t| t.id != "t1"));
    assert_eq!(filtered.len(), 1);
}
