use std::{cmp::Ordering, collections::HashSet};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::DateTime;
use rand::{Rng, distr::Alphanumeric, seq::SliceRandom};
use sha2::{Digest, Sha256};

use crate::types::{SongTableRow, Track};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_uid() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect()
}

pub fn generate_salt() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

pub fn password_digest(salt: &str, password: &str) -> String {
    let hash = Sha256::digest(format!("{salt}{password}").as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn remove_duplicate_tracks(tracks: &mut Vec<Track>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| seen_ids.insert(track.id.clone()));
}

pub fn shuffle_tracks(tracks: &mut Vec<Track>) {
    tracks.shuffle(&mut rand::rng());
}

pub fn format_saved_at(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn sort_song_table_rows(rows: &mut Vec<SongTableRow>) {
    rows.sort_by(|a, b| {
        match b.added.cmp(&a.added) {
            Ordering::Equal => a.title.cmp(&b.title), // secondary sort: title ascending
            other => other,
        }
    });
}
