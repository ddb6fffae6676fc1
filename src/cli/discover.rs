use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    config, error, info,
    management::{
        InteractionsManager, LibraryManager, SessionManager, SongKind, TokenManager,
    },
    player::{PlaybackHandle, PreviewPlayer},
    recommend::{SessionContext, engine},
    spotify, success,
    types::{SavedSong, Track},
    utils, warning,
};

// replenish the deck once this few cards remain
const QUEUE_LOW_WATER: usize = 3;
const PLAYLIST_FETCH_LIMIT: u32 = 100;

enum Action {
    Like,
    Dislike,
    Skip,
    Quit,
    Help,
    AutoAdvance,
    PlaybackGone,
}

/// Runs the interactive discover deck: deal a track, play its preview,
/// read a judgment, repeat. The deck starts from the configured playlist
/// and is replenished with seeded recommendations once it runs low.
pub async fn discover(playlist: Option<String>, refresh: bool, quiet: bool) {
    let uid = require_session().await;

    let mut token_mgr = match TokenManager::load_or_request().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "No Spotify token available. Run echofind auth or configure client credentials.\n Error: {}",
                e
            );
        }
    };
    let token = token_mgr.get_valid_token().await;

    let mut liked = LibraryManager::load(&uid, SongKind::Liked)
        .await
        .unwrap_or_else(|_| LibraryManager::new(&uid, SongKind::Liked));
    let mut disliked = LibraryManager::load(&uid, SongKind::Disliked)
        .await
        .unwrap_or_else(|_| LibraryManager::new(&uid, SongKind::Disliked));
    let mut counters = InteractionsManager::load(&uid)
        .await
        .unwrap_or_else(|_| InteractionsManager::new(&uid));

    let mut session = SessionContext::new();
    let playlist_id = playlist.unwrap_or_else(config::default_playlist);

    // Loading: seed the deck from the playlist, minus everything already judged
    let pb = spinner("Loading playlist tracks...");
    let mut exclude = liked.track_ids();
    exclude.extend(disliked.track_ids());
    let mut queue = match spotify::playlist::get_playlist_tracks(
        &token,
        &playlist_id,
        PLAYLIST_FETCH_LIMIT,
        &exclude,
    )
    .await
    {
        Ok(tracks) => tracks,
        Err(e) => {
            warning!("Failed to load playlist {}. Err: {}", playlist_id, e);
            Vec::new()
        }
    };
    attach_audio_features(&token, &mut queue).await;
    utils::shuffle_tracks(&mut queue);
    pb.finish_and_clear();

    if queue.is_empty() {
        let pb = spinner("Fetching recommendations...");
        queue = engine::get_or_refresh(
            &token,
            liked.songs(),
            disliked.songs(),
            &mut session,
            refresh,
        )
        .await;
        utils::shuffle_tracks(&mut queue);
        pb.finish_and_clear();
    }

    if queue.is_empty() {
        info!("Nothing to discover: no playable tracks and no recommendations.");
        return;
    }

    let player = PreviewPlayer::new();
    let mut playback: Option<PlaybackHandle> = None;
    let mut current = queue.remove(0);
    session.mark_presented(&current.id);

    print_controls();
    show_card(&current);
    if !quiet {
        if let Some(url) = current.preview_url.clone() {
            playback = player.play(&url).await;
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut force_refresh = refresh;

    loop {
        if queue.len() <= QUEUE_LOW_WATER {
            let mut batch = engine::get_or_refresh(
                &token,
                liked.songs(),
                disliked.songs(),
                &mut session,
                force_refresh,
            )
            .await;
            if batch.is_empty() && !force_refresh {
                // a still-fresh cached batch can filter down to nothing;
                // give the endpoint one uncached chance before exhaustion
                batch = engine::get_or_refresh(
                    &token,
                    liked.songs(),
                    disliked.songs(),
                    &mut session,
                    true,
                )
                .await;
            }
            force_refresh = false;
            utils::shuffle_tracks(&mut batch);
            queue.extend(batch);
        }

        let action = tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(input)) => match input.trim() {
                    "l" | "like" => Action::Like,
                    "d" | "dislike" => Action::Dislike,
                    "" | "s" | "skip" => Action::Skip,
                    "q" | "quit" => Action::Quit,
                    _ => Action::Help,
                },
                Ok(None) | Err(_) => Action::Quit,
            },
            completed = wait_for_completion(&mut playback) => {
                playback = None;
                if completed { Action::AutoAdvance } else { Action::PlaybackGone }
            }
        };

        let advance = match action {
            Action::Like => {
                counters.record_like();
                persist_counters(&counters).await;
                let saved = SavedSong::from_track(&current, chrono::Utc::now().timestamp());
                liked.add(saved);
                if let Err(e) = liked.persist().await {
                    warning!("Failed to save liked song. Err: {:?}", e);
                }
                success!("Liked {}", current.name);
                true
            }
            Action::Dislike => {
                counters.record_dislike();
                persist_counters(&counters).await;
                let saved = SavedSong::from_track(&current, chrono::Utc::now().timestamp());
                disliked.add(saved);
                if let Err(e) = disliked.persist().await {
                    warning!("Failed to save disliked song. Err: {:?}", e);
                }
                info!("Disliked {}", current.name);
                true
            }
            // skip and a played-out preview advance without touching the counters
            Action::Skip | Action::AutoAdvance => true,
            Action::Quit => break,
            Action::Help => {
                print_controls();
                false
            }
            Action::PlaybackGone => false,
        };

        if !advance {
            continue;
        }

        match next_track(&token, &mut queue, &liked, &disliked, &mut session).await {
            Some(track) => {
                current = track;
                show_card(&current);
                playback = None;
                if !quiet {
                    if let Some(url) = current.preview_url.clone() {
                        playback = player.play(&url).await;
                    }
                }
            }
            None => {
                // exhausted is a real terminal state, not an endless spinner
                info!("No more recommendations. Come back later or like a few more songs.");
                break;
            }
        }
    }

    let stats = counters.interactions();
    info!(
        "Session over: {} swipes, {} likes, {} dislikes all time.",
        stats.swipes, stats.likes, stats.dislikes
    );
}

/// Pops the next card, replenishing once (cache bypassed) when the deck is
/// empty. `None` means genuinely exhausted.
async fn next_track(
    token: &str,
    queue: &mut Vec<Track>,
    liked: &LibraryManager,
    disliked: &LibraryManager,
    session: &mut SessionContext,
) -> Option<Track> {
    if queue.is_empty() {
        let mut batch =
            engine::get_or_refresh(token, liked.songs(), disliked.songs(), session, true).await;
        utils::shuffle_tracks(&mut batch);
        queue.extend(batch);
    }
    if queue.is_empty() {
        return None;
    }

    let track = queue.remove(0);
    session.mark_presented(&track.id);
    Some(track)
}

/// Resolves `true` when the current preview plays out naturally, `false`
/// when playback died early; pends forever while nothing is playing.
async fn wait_for_completion(playback: &mut Option<PlaybackHandle>) -> bool {
    match playback.as_mut() {
        Some(handle) => (&mut handle.finished).await.is_ok(),
        None => std::future::pending().await,
    }
}

async fn attach_audio_features(token: &str, tracks: &mut [Track]) {
    if tracks.is_empty() {
        return;
    }

    let ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
    match spotify::features::get_audio_features(token, &ids).await {
        Ok(features) => {
            for (track, features) in tracks.iter_mut().zip(features) {
                track.audio_features = features;
            }
        }
        Err(e) => warning!("Failed to fetch audio features for the deck. Err: {}", e),
    }
}

async fn persist_counters(counters: &InteractionsManager) {
    if let Err(e) = counters.persist().await {
        warning!("Failed to persist interaction counters. Err: {:?}", e);
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

fn show_card(track: &Track) {
    println!();
    println!("  {}", track.name.bold().green());
    println!("  {}", track.artist_names());
    let album = track.album.name.clone().unwrap_or_default();
    println!(
        "  {}",
        format!("album: {}   popularity: {}", album, track.popularity).dimmed()
    );
    if let Some(image) = track.album_image() {
        println!("  {}", format!("art: {}", image).dimmed());
    }
}

fn print_controls() {
    println!(
        "{}",
        "[l]ike  [d]islike  [s]kip (or Enter)  [q]uit".dimmed()
    );
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
