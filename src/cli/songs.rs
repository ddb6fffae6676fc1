use tabled::Table;

use crate::{
    error, info,
    management::{LibraryManager, SessionManager, SongKind},
    success,
    types::SongTableRow,
    utils, warning,
};

/// Lists the signed-in user's judged songs as a table, newest first.
pub async fn songs(disliked: bool, search: Option<String>) {
    let uid = require_session().await;
    let kind = if disliked {
        SongKind::Disliked
    } else {
        SongKind::Liked
    };

    let library = LibraryManager::load(&uid, kind)
        .await
        .unwrap_or_else(|_| LibraryManager::new(&uid, kind));

    let mut saved = library.songs().to_vec();
    if let Some(term) = search {
        let term = term.to_lowercase();
        saved.retain(|song| {
            song.name.to_lowercase().contains(&term)
                || song
                    .artists
                    .iter()
                    .any(|artist| artist.name.to_lowercase().contains(&term))
        });
    }

    if saved.is_empty() {
        info!("No {} songs yet. Run echofind discover.", kind.as_str());
        return;
    }

    let mut rows: Vec<SongTableRow> = saved
        .into_iter()
        .map(|song| SongTableRow {
            added: utils::format_saved_at(song.saved_at),
            artists: song
                .artists
                .iter()
                .map(|artist| artist.name.clone())
                .collect::<Vec<String>>()
                .join(", "),
            title: song.name,
            popularity: song.popularity,
        })
        .collect();

    utils::sort_song_table_rows(&mut rows);

    let table = Table::new(rows);
    println!("{}", table);
}

/// Deletes every saved song whose title matches, from the liked or
/// disliked store.
pub async fn remove_song(title: String, disliked: bool) {
    let uid = require_session().await;
    let kind = if disliked {
        SongKind::Disliked
    } else {
        SongKind::Liked
    };

    let mut library = LibraryManager::load(&uid, kind)
        .await
        .unwrap_or_else(|_| LibraryManager::new(&uid, kind));

    let removed = library.remove_by_title(&title);
    if removed == 0 {
        warning!("No {} song titled '{}'.", kind.as_str(), title);
        return;
    }

    match library.persist().await {
        Ok(_) => success!("Removed {} song(s) titled '{}'.", removed, title),
        Err(e) => error!("Failed to update song store: {:?}", e),
    }
}

async fn require_session() -> String {
    match SessionManager::load().await {
        Ok(session) => match session.uid() {
            Some(uid) => uid.to_string(),
            None => error!("Not signed in. Run echofind login first."),
        },
        Err(e) => error!("Failed to load session: {}", e),
    }
}
