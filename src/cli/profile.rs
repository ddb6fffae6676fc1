use tabled::Table;

use crate::{
    error, info,
    management::{
        AccountManager, InteractionsManager, LibraryManager, SessionManager, SongKind,
    },
    types::StatTableRow,
};

/// Shows who is signed in and their lifetime interaction numbers.
pub async fn profile() {
    let session = match SessionManager::load().await {
        Ok(session) => session,
        Err(e) => error!("Failed to load session: {}", e),
    };
    let Some(uid) = session.uid() else {
        error!("Not signed in. Run echofind login first.");
    };

    let accounts = AccountManager::load()
        .await
        .unwrap_or_else(|_| AccountManager::new());
    match accounts.find_by_uid(uid) {
        Some(account) => info!("Signed in as {} <{}>", account.username, account.email),
        None => info!("Signed in with an unknown account ({})", uid),
    }

    let counters = InteractionsManager::load(uid)
        .await
        .unwrap_or_else(|_| InteractionsManager::new(uid));
    let liked = LibraryManager::load(uid, SongKind::Liked)
        .await
        .unwrap_or_else(|_| LibraryManager::new(uid, SongKind::Liked));
    let disliked = LibraryManager::load(uid, SongKind::Disliked)
        .await
        .unwrap_or_else(|_| LibraryManager::new(uid, SongKind::Disliked));

    let stats = counters.interactions();
    let rows = vec![
        StatTableRow {
            metric: "swipes".to_string(),
            value: stats.swipes,
        },
        StatTableRow {
            metric: "likes".to_string(),
            value: stats.likes,
        },
        StatTableRow {
            metric: "dislikes".to_string(),
            value: stats.dislikes,
        },
        StatTableRow {
            metric: "liked songs saved".to_string(),
            value: liked.count() as u64,
        },
        StatTableRow {
            metric: "disliked songs saved".to_string(),
            value: disliked.count() as u64,
        },
    ];

    let table = Table::new(rows);
    println!("{}", table);
}
