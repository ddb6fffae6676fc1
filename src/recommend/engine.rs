use std::collections::HashSet;

use chrono::Utc;

use crate::{
    recommend::{SeedSet, SessionContext, TargetFeatures},
    spotify,
    types::{SavedSong, Track},
    utils, warning,
};

/// How many candidates a single recommendations call asks for.
pub const RECOMMENDATION_LIMIT: u32 = 50;
/// At most this many liked tracks contribute to the feature targets.
pub const FEATURE_SAMPLE_LIMIT: usize = 100;

/// Returns the next recommendation batch, served from the cache when it is
/// still fresh and recomputed otherwise.
///
/// The returned list is always re-filtered against the *current* liked,
/// disliked and presented sets, since a cached batch may contain tracks judged
/// or dealt since it was computed. `force` bypasses the cache entirely (the
/// manual-refresh path); the recomputed batch replaces the cache only when
/// it is non-empty.
pub async fn get_or_refresh(
    token: &str,
    liked: &[SavedSong],
    disliked: &[SavedSong],
    session: &mut SessionContext,
    force: bool,
) -> Vec<Track> {
    let now = Utc::now().timestamp() as u64;
    let excluded = exclusion_set(liked, disliked, session.presented_ids());

    if !force {
        if let Some(cached) = session.cache.fresh(now) {
            return filter_candidates(cached.to_vec(), &excluded);
        }
    }

    let fetched = fetch_candidates(token, liked, disliked, session.presented_ids()).await;
    session.cache.store(fetched.clone(), now);
    fetched
}

/// Runs the full seed-assembly pipeline and returns filtered candidates.
///
/// Steps: track/artist seeds from the liked history, one aggregated genre
/// from the seed artists, the random-genre fallback when the history yields
/// nothing, mean feature targets over up to [`FEATURE_SAMPLE_LIMIT`] liked
/// tracks, then the recommendations call. Every HTTP failure along the way
/// is logged and collapsed to an empty intermediate result; only a seed set
/// that stays empty after the fallback aborts the pipeline.
pub async fn fetch_candidates(
    token: &str,
    liked: &[SavedSong],
    disliked: &[SavedSong],
    presented: &HashSet<String>,
) -> Vec<Track> {
    let mut seeds = SeedSet::from_liked(liked);

    // one genre call per seed artist, aggregated into a single seed
    let artist_ids: Vec<String> = seeds.artist_seeds().to_vec();
    let mut artist_genres: Vec<String> = Vec::new();
    for artist_id in &artist_ids {
        match spotify::artists::get_artist(token, artist_id).await {
            Ok(details) => artist_genres.extend(details.genres),
            Err(e) => {
                warning!("Failed to fetch genres for artist {}. Err: {}", artist_id, e);
            }
        }
    }
    if let Some(genre) = artist_genres.first() {
        seeds.add_genre(genre.clone());
    }

    if seeds.is_empty() {
        match spotify::recommend::get_available_genre_seeds(token).await {
            Ok(available) => seeds = SeedSet::from_available_genres(&available),
            Err(e) => {
                warning!("Failed to fetch available genre seeds. Err: {}", e);
            }
        }
    }

    if seeds.is_empty() {
        warning!("No recommendation seeds could be assembled.");
        return Vec::new();
    }

    let sample_ids: Vec<String> = liked
        .iter()
        .take(FEATURE_SAMPLE_LIMIT)
        .map(|song| song.track_id.clone())
        .collect();
    let features = if sample_ids.is_empty() {
        Vec::new()
    } else {
        match spotify::features::get_audio_features(token, &sample_ids).await {
            Ok(features) => features.into_iter().flatten().collect(),
            Err(e) => {
                warning!("Failed to fetch audio features. Err: {}", e);
                Vec::new()
            }
        }
    };
    let targets = TargetFeatures::from_features(&features);

    let candidates = match spotify::recommend::get_recommendations(
        token,
        &seeds,
        &targets,
        RECOMMENDATION_LIMIT,
    )
    .await
    {
        Ok(tracks) => tracks,
        Err(e) => {
            warning!("Failed to fetch recommendations. Err: {}", e);
            return Vec::new();
        }
    };

    let excluded = exclusion_set(liked, disliked, presented);
    filter_candidates(candidates, &excluded)
}

/// Deduplicates by track id, then drops tracks without a preview URL and
/// tracks whose id is excluded (already liked, disliked or presented).
pub fn filter_candidates(mut tracks: Vec<Track>, excluded: &HashSet<String>) -> Vec<Track> {
    utils::remove_duplicate_tracks(&mut tracks);
    tracks.retain(|track| track.preview_url.is_some() && !excluded.contains(&track.id));
    tracks
}

/// Union of liked, disliked and presented track ids.
pub fn exclusion_set(
    liked: &[SavedSong],
    disliked: &[SavedSong],
    presented: &HashSet<String>,
) -> HashSet<String> {
    let mut excluded: HashSet<String> = presented.iter().cloned().collect();
    excluded.extend(liked.iter().map(|song| song.track_id.clone()));
    excluded.extend(disliked.iter().map(|song| song.track_id.clone()));
    excluded
}
