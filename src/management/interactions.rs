use std::{io::Error, path::PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum InteractionsError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for InteractionsError {
    fn from(err: Error) -> Self {
        InteractionsError::IoError(err)
    }
}

/// Lifetime interaction counters for one user.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Interactions {
    pub swipes: u64,
    pub likes: u64,
    pub dislikes: u64,
}

/// Per-user counter store, read on discover entry and persisted on every
/// change.
pub struct InteractionsManager {
    uid: String,
    interactions: Interactions,
}

impl InteractionsManager {
    pub fn new(uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
            interactions: Interactions::default(),
        }
    }

    pub async fn load(uid: &str) -> Result<Self, InteractionsError> {
        let mut manager = Self::new(uid);
        let path = manager.store_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(InteractionsError::IoError)?;
        manager.interactions =
            serde_json::from_str(&content).map_err(InteractionsError::SerdeError)?;
        Ok(manager)
    }

    pub async fn persist(&self) -> Result<(), InteractionsError> {
        let path = self.store_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(InteractionsError::IoError)?;
        }

        let json =
            serde_json::to_string_pretty(&self.interactions).map_err(InteractionsError::SerdeError)?;
        async_fs::write(path, json)
            .await
            .map_err(InteractionsError::IoError)
    }

    pub fn record_like(&mut self) -> &mut Self {
        self.interactions.likes += 1;
        self.interactions.swipes += 1;
        self
    }

    pub fn record_dislike(&mut self) -> &mut Self {
        self.interactions.dislikes += 1;
        self.interactions.swipes += 1;
        self
    }

    pub fn interactions(&self) -> Interactions {
        self.interactions
    }

    fn store_path(&self) -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!(
            "echofind/users/{uid}/interactions.json",
            uid = self.uid
        ));
        path
    }
}
