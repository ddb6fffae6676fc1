use std::{fmt, io::Error, path::PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::utils;

#[derive(Debug)]
pub enum AccountError {
    EmptyField(&'static str),
    UserExists,
    UserNotFound,
    InvalidCredentials,
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for AccountError {
    fn from(err: Error) -> Self {
        AccountError::IoError(err)
    }
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::EmptyField(field) => write!(f, "{} must not be empty", field),
            AccountError::UserExists => write!(f, "An account with this email already exists"),
            AccountError::UserNotFound => write!(f, "User does not exist"),
            AccountError::InvalidCredentials => write!(f, "Incorrect credentials"),
            AccountError::IoError(e) => write!(f, "{}", e),
            AccountError::SerdeError(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub uid: String,
    pub email: String,
    pub username: String,
    pub password_digest: String,
    pub salt: String,
    pub created_at: i64,
}

/// Local account registry, the stand-in for a hosted identity provider.
/// Credentials are salted sha256 digests; the uid partitions every
/// per-user store.
pub struct AccountManager {
    accounts: Vec<Account>,
}

impl AccountManager {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
        }
    }

    pub async fn load() -> Result<Self, AccountError> {
        let path = Self::accounts_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(AccountError::IoError)?;
        let accounts: Vec<Account> =
            serde_json::from_str(&content).map_err(AccountError::SerdeError)?;
        Ok(Self { accounts })
    }

    pub async fn persist(&self) -> Result<(), AccountError> {
        let path = Self::accounts_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(AccountError::IoError)?;
        }

        let json =
            serde_json::to_string_pretty(&self.accounts).map_err(AccountError::SerdeError)?;
        async_fs::write(path, json)
            .await
            .map_err(AccountError::IoError)
    }

    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<Account, AccountError> {
        if email.is_empty() {
            return Err(AccountError::EmptyField("email"));
        }
        if password.is_empty() {
            return Err(AccountError::EmptyField("password"));
        }
        if username.is_empty() {
            return Err(AccountError::EmptyField("username"));
        }
        if self.accounts.iter().any(|a| a.email == email) {
            return Err(AccountError::UserExists);
        }

        let salt = utils::generate_salt();
        let account = Account {
            uid: utils::generate_uid(),
            email: email.to_string(),
            username: username.to_string(),
            password_digest: utils::password_digest(&salt, password),
            salt,
            created_at: Utc::now().timestamp(),
        };
        self.accounts.push(account.clone());
        Ok(account)
    }

    pub fn verify(&self, email: &str, password: &str) -> Result<&Account, AccountError> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.email == email)
            .ok_or(AccountError::UserNotFound)?;

        if account.password_digest == utils::password_digest(&account.salt, password) {
            Ok(account)
        } else {
            Err(AccountError::InvalidCredentials)
        }
    }

    pub fn find_by_uid(&self, uid: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.uid == uid)
    }

    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    fn accounts_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("echofind/accounts/users.json");
        path
    }
}

/// Tracks which account is currently signed in.
pub struct SessionManager {
    uid: Option<String>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self { uid: None }
    }

    pub async fn load() -> Result<Self, AccountError> {
        let path = Self::session_path();
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(_) => return Ok(Self { uid: None }),
        };
        let uid: Option<String> =
            serde_json::from_str(&content).map_err(AccountError::SerdeError)?;
        Ok(Self { uid })
    }

    pub async fn store(&mut self, uid: &str) -> Result<(), AccountError> {
        self.uid = Some(uid.to_string());
        self.persist().await
    }

    pub async fn clear(&mut self) -> Result<(), AccountError> {
        self.uid = None;
        let path = Self::session_path();
        match async_fs::remove_file(path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AccountError::IoError(e)),
        }
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    async fn persist(&self) -> Result<(), AccountError> {
        let path = Self::session_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(AccountError::IoError)?;
        }

        let json = serde_json::to_string_pretty(&self.uid).map_err(AccountError::SerdeError)?;
        async_fs::write(path, json)
            .await
            .map_err(AccountError::IoError)
    }

    fn session_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("echofind/accounts/session.json");
        path
    }
}
