use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    // empty for client-credentials tokens, which cannot be refreshed
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumImage {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub name: Option<String>,
    pub images: Vec<AlbumImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub tempo: f64,
    pub energy: f64,
    pub valence: f64,
    pub danceability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub preview_url: Option<String>,
    pub album: Album,
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub popularity: u32,
    // attached after the batched audio-features call, never on the wire
    #[serde(skip)]
    pub audio_features: Option<AudioFeatures>,
}

impl Track {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.clone())
            .collect::<Vec<String>>()
            .join(", ")
    }

    pub fn album_image(&self) -> Option<String> {
        self.album.images.first().map(|i| i.url.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatures>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistDetails {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailableGenreSeeds {
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedArtist {
    pub id: String,
    pub name: String,
}

/// Persisted form of a judged track, one document per like/dislike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSong {
    pub track_id: String,
    pub name: String,
    pub preview_url: Option<String>,
    pub album_image: Option<String>,
    pub artists: Vec<SavedArtist>,
    pub popularity: u32,
    #[serde(default)]
    pub tempo: f64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub valence: f64,
    #[serde(default)]
    pub danceability: f64,
    pub saved_at: i64,
}

impl SavedSong {
    pub fn from_track(track: &Track, saved_at: i64) -> Self {
        SavedSong {
            track_id: track.id.clone(),
            name: track.name.clone(),
            preview_url: track.preview_url.clone(),
            album_image: track.album_image(),
            artists: track
                .artists
                .iter()
                .map(|a| SavedArtist {
                    id: a.id.clone(),
                    name: a.name.clone(),
                })
                .collect(),
            popularity: track.popularity,
            tempo: track.audio_features.as_ref().map_or(0.0, |f| f.tempo),
            energy: track.audio_features.as_ref().map_or(0.0, |f| f.energy),
            valence: track.audio_features.as_ref().map_or(0.0, |f| f.valence),
            danceability: track
                .audio_features
                .as_ref()
                .map_or(0.0, |f| f.danceability),
            saved_at,
        }
    }
}

/// Lossy display flattening of a saved song, artist list collapsed to one string.
#[derive(Debug, Clone)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub image_url: String,
    pub preview_url: String,
}

impl From<&SavedSong> for Song {
    fn from(saved: &SavedSong) -> Self {
        Song {
            title: saved.name.clone(),
            artist: saved
                .artists
                .iter()
                .map(|a| a.name.clone())
                .collect::<Vec<String>>()
                .join(", "),
            image_url: saved.album_image.clone().unwrap_or_default(),
            preview_url: saved.preview_url.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub title: String,
    pub artists: String,
    pub popularity: u32,
    pub added: String,
}

#[derive(Tabled)]
pub struct StatTableRow {
    pub metric: String,
    pub value: u64,
}
