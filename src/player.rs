//! 30-second preview playback.
//!
//! Preview clips are small enough to download whole, so playback is a plain
//! fetch-then-decode: the bytes go through a `rodio` decoder into a sink
//! owned by a dedicated thread (audio output streams must not cross await
//! points). The discover loop talks to a running preview only through its
//! [`PlaybackHandle`]: dropping the handle stops the audio, and the
//! `finished` channel fires exactly when the clip plays out naturally,
//! never when it was stopped, so auto-advance can be told apart from a
//! manual swipe.

use std::{
    io::Cursor,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use rodio::{Decoder, OutputStream, Sink};
use tokio::sync::oneshot;

use crate::warning;

/// Handle to an in-flight preview. Dropping it stops the audio.
pub struct PlaybackHandle {
    stop: Arc<AtomicBool>,
    /// Resolves `Ok(())` when the clip finishes on its own; dropped (and
    /// thus `Err`) when playback was stopped or never got going.
    pub finished: oneshot::Receiver<()>,
}

impl PlaybackHandle {
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Downloads and plays preview clips, one at a time.
pub struct PreviewPlayer {
    client: reqwest::Client,
}

impl PreviewPlayer {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Starts playing the clip behind `preview_url`.
    ///
    /// Any failure (download, missing audio device, undecodable data) is
    /// logged and reported as `None` rather than an error: a track without
    /// working playback is still swipeable, it just plays silence.
    pub async fn play(&self, preview_url: &str) -> Option<PlaybackHandle> {
        let response = match self.client.get(preview_url).send().await {
            Ok(response) => response,
            Err(e) => {
                warning!("Failed to download preview. Err: {}", e);
                return None;
            }
        };
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                warning!("Preview download rejected. Err: {}", e);
                return None;
            }
        };
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                warning!("Failed to read preview body. Err: {}", e);
                return None;
            }
        };

        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let (done_tx, done_rx) = oneshot::channel();

        std::thread::spawn(move || {
            // the output stream must outlive the sink, both stay on this thread
            let Ok((_stream, handle)) = OutputStream::try_default() else {
                return;
            };
            let Ok(sink) = Sink::try_new(&handle) else {
                return;
            };
            let Ok(source) = Decoder::new(Cursor::new(bytes)) else {
                return;
            };
            sink.append(source);

            while !sink.empty() {
                if stop_flag.load(Ordering::Relaxed) {
                    sink.stop();
                    return;
                }
                std::thread::sleep(Duration::from_millis(100));
            }

            // natural completion only; a stopped sink returns above
            let _ = done_tx.send(());
        });

        Some(PlaybackHandle {
            stop,
            finished: done_rx,
        })
    }
}

impl Default for PreviewPlayer {
    fn default() -> Self {
        Self::new()
    }
}
