use rand::seq::IndexedRandom;

use crate::types::SavedSong;

/// Hard cap the recommendations endpoint places on the total seed count.
pub const MAX_SEEDS: usize = 5;
/// At most two liked tracks are used as track seeds.
pub const MAX_TRACK_SEEDS: usize = 2;
/// At most two distinct liked artists are used as artist seeds.
pub const MAX_ARTIST_SEEDS: usize = 2;
/// A single aggregated genre rounds out a history-based seed set.
pub const MAX_GENRE_SEEDS: usize = 1;
/// Cold-start fallback: five random genres from the available-genre list.
pub const FALLBACK_GENRE_SEEDS: usize = 5;

/// A capped set of recommendation seeds, mutually exclusive by category.
///
/// Track and artist seeds come from the liked history, the genre seed from
/// the seed artists' metadata. When the history yields nothing, a fallback
/// set of random genres is used instead. The total never exceeds
/// [`MAX_SEEDS`], earlier categories winning over later ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedSet {
    tracks: Vec<String>,
    artists: Vec<String>,
    genres: Vec<String>,
}

impl SeedSet {
    /// Assembles track and artist seeds from the liked history, in like
    /// order: the first two track ids, and the first two distinct primary
    /// artists across liked songs. The genre slot stays empty until
    /// [`add_genre`](Self::add_genre) is called with fetched artist genres.
    pub fn from_liked(liked: &[SavedSong]) -> Self {
        let mut tracks: Vec<String> = Vec::new();
        for song in liked.iter().take(MAX_TRACK_SEEDS) {
            if !tracks.contains(&song.track_id) {
                tracks.push(song.track_id.clone());
            }
        }

        let mut artists: Vec<String> = Vec::new();
        for song in liked {
            let Some(artist) = song.artists.first() else {
                continue;
            };
            if !artists.contains(&artist.id) {
                artists.push(artist.id.clone());
            }
            if artists.len() == MAX_ARTIST_SEEDS {
                break;
            }
        }

        SeedSet {
            tracks,
            artists,
            genres: Vec::new(),
        }
    }

    /// Builds the cold-start fallback: up to [`FALLBACK_GENRE_SEEDS`] genres
    /// drawn at random from the available-genre list.
    pub fn from_available_genres(available: &[String]) -> Self {
        let genres = available
            .choose_multiple(&mut rand::rng(), FALLBACK_GENRE_SEEDS)
            .cloned()
            .collect();

        SeedSet {
            tracks: Vec::new(),
            artists: Vec::new(),
            genres,
        }
    }

    /// Adds one aggregated genre seed, respecting both the genre cap and the
    /// overall seed cap. Duplicates are ignored.
    pub fn add_genre(&mut self, genre: String) {
        if self.genres.len() >= MAX_GENRE_SEEDS || self.len() >= MAX_SEEDS {
            return;
        }
        if !self.genres.contains(&genre) {
            self.genres.push(genre);
        }
    }

    pub fn track_seeds(&self) -> &[String] {
        &self.tracks
    }

    pub fn artist_seeds(&self) -> &[String] {
        &self.artists
    }

    pub fn genre_seeds(&self) -> &[String] {
        &self.genres
    }

    pub fn len(&self) -> usize {
        self.tracks.len() + self.artists.len() + self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the non-empty categories as `seed_tracks`, `seed_artists`
    /// and `seed_genres` query parameters, each a comma-joined id list.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.tracks.is_empty() {
            params.push(("seed_tracks".to_string(), self.tracks.join(",")));
        }
        if !self.artists.is_empty() {
            params.push(("seed_artists".to_string(), self.artists.join(",")));
        }
        if !self.genres.is_empty() {
            params.push(("seed_genres".to_string(), self.genres.join(",")));
        }
        params
    }
}
