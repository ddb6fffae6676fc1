use std::path::PathBuf;

use chrono::Utc;

use crate::{spotify, types::Token};

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    /// Loads the cached token, falling back to a fresh client-credentials
    /// grant when none has been stored yet. The fallback token is persisted
    /// so subsequent runs start from the cache.
    pub async fn load_or_request() -> Result<Self, String> {
        if let Ok(manager) = Self::load().await {
            return Ok(manager);
        }

        let token = spotify::auth::client_credentials_token()
            .await
            .map_err(|e| e.to_string())?;
        let manager = Self::new(token);
        manager.persist().await?;
        Ok(manager)
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(Self::token_path(), json)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            if let Ok(new_token) = self.renew().await {
                self.token = new_token;
                let _ = self.persist().await;
            }
        }

        self.token.access_token.clone()
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.token.obtained_at + self.token.expires_in - 240
    }

    // user tokens renew via the refresh grant, app tokens by re-running
    // the client-credentials grant
    async fn renew(&self) -> Result<Token, String> {
        if self.token.refresh_token.is_empty() {
            spotify::auth::client_credentials_token()
                .await
                .map_err(|e| e.to_string())
        } else {
            spotify::auth::refresh_token(&self.token.refresh_token).await
        }
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("echofind/cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
