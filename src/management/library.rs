use std::{io::Error, path::PathBuf};

use crate::types::SavedSong;

#[derive(Debug)]
pub enum LibraryError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for LibraryError {
    fn from(err: Error) -> Self {
        LibraryError::IoError(err)
    }
}

/// Which judged-song store a manager operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongKind {
    Liked,
    Disliked,
}

impl SongKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SongKind::Liked => "liked",
            SongKind::Disliked => "disliked",
        }
    }
}

/// Per-user store of judged songs, one JSON document list per kind.
pub struct LibraryManager {
    uid: String,
    kind: SongKind,
    songs: Vec<SavedSong>,
}

impl LibraryManager {
    pub fn new(uid: &str, kind: SongKind) -> Self {
        Self {
            uid: uid.to_string(),
            kind,
            songs: Vec::new(),
        }
    }

    pub async fn load(uid: &str, kind: SongKind) -> Result<Self, LibraryError> {
        let mut manager = Self::new(uid, kind);
        let path = manager.store_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(LibraryError::IoError)?;
        manager.songs = serde_json::from_str(&content).map_err(LibraryError::SerdeError)?;
        Ok(manager)
    }

    pub async fn persist(&self) -> Result<(), LibraryError> {
        let path = self.store_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(LibraryError::IoError)?;
        }

        let json = serde_json::to_string_pretty(&self.songs).map_err(LibraryError::SerdeError)?;
        async_fs::write(path, json)
            .await
            .map_err(LibraryError::IoError)
    }

    pub fn add(&mut self, song: SavedSong) -> &mut Self {
        self.songs.push(song);
        self
    }

    /// Removes every saved song with a matching title, the way the profile
    /// screen's delete worked. Returns how many documents were dropped.
    pub fn remove_by_title(&mut self, title: &str) -> usize {
        let before = self.songs.len();
        self.songs.retain(|song| song.name != title);
        before - self.songs.len()
    }

    pub fn songs(&self) -> &[SavedSong] {
        &self.songs
    }

    pub fn track_ids(&self) -> Vec<String> {
        self.songs.iter().map(|song| song.track_id.clone()).collect()
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.songs.iter().any(|song| song.track_id == track_id)
    }

    pub fn count(&self) -> usize {
        self.songs.len()
    }

    fn store_path(&self) -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!(
            "echofind/users/{uid}/{kind}.json",
            uid = self.uid,
            kind = self.kind.as_str()
        ));
        path
    }
}
