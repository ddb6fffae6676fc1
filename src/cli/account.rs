use std::io::Write;

use crate::{
    error, info,
    management::{AccountManager, SessionManager},
    success,
};

pub async fn register(email: Option<String>, username: Option<String>) {
    let mut accounts = AccountManager::load()
        .await
        .unwrap_or_else(|_| AccountManager::new());

    let email = email.unwrap_or_else(|| prompt("Email"));
    let username = username.unwrap_or_else(|| prompt("Username"));
    let password = prompt("Password");

    let account = match accounts.register(&email, &password, &username) {
        Ok(account) => account,
        Err(e) => error!("Cannot create account: {}", e),
    };

    if let Err(e) = accounts.persist().await {
        error!("Failed to save account: {}", e);
    }

    let mut session = SessionManager::load()
        .await
        .unwrap_or_else(|_| SessionManager::new());
    if let Err(e) = session.store(&account.uid).await {
        error!("Account created but sign-in failed: {}", e);
    }

    success!("Account created. Signed in as {}.", account.username);
}

pub async fn login(email: Option<String>) {
    let accounts = match AccountManager::load().await {
        Ok(accounts) => accounts,
        Err(_) => error!("No accounts found. Run echofind register first."),
    };

    let email = email.unwrap_or_else(|| prompt("Email"));
    let password = prompt("Password");

    let account = match accounts.verify(&email, &password) {
        Ok(account) => account.clone(),
        Err(e) => error!("{}", e),
    };

    let mut session = SessionManager::load()
        .await
        .unwrap_or_else(|_| SessionManager::new());
    if let Err(e) = session.store(&account.uid).await {
        error!("Sign-in failed: {}", e);
    }

    success!("Signed in as {}.", account.username);
}

pub async fn logout() {
    let mut session = SessionManager::load()
        .await
        .unwrap_or_else(|_| SessionManager::new());

    if session.uid().is_none() {
        info!("Not signed in.");
        return;
    }

    if let Err(e) = session.clear().await {
        error!("Sign-out failed: {}", e);
    }

    success!("Signed out.");
}

fn prompt(label: &str) -> String {
    print!("{}: ", label);
    let _ = std::io::stdout().flush();
    let mut input = String::new();
    let _ = std::io::stdin().read_line(&mut input);
    input.trim().to_string()
}
