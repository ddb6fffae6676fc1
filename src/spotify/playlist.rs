use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    spotify::retry_after_secs,
    types::{PlaylistTracksResponse, Track},
    warning,
};

/// Retrieves the playable tracks of a playlist from the Spotify Web API.
///
/// Fetches up to `limit` playlist entries and reduces them to tracks usable
/// by the discover deck: entries without a track object (local files,
/// removed content) are skipped, tracks without a preview URL are dropped,
/// and any id present in `exclude` (already liked or disliked) is filtered
/// out.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `playlist_id` - The playlist to read
/// * `limit` - Maximum number of entries to request (1-100)
/// * `exclude` - Track ids to drop from the result
///
/// # Retry Logic
///
/// Honors the `Retry-After` header on 429 responses and retries 502 Bad
/// Gateway after a 10-second delay. Other errors are propagated immediately.
pub async fn get_playlist_tracks(
    token: &str,
    playlist_id: &str,
    limit: u32,
    exclude: &[String],
) -> Result<Vec<Track>, reqwest::Error> {
    loop {
        let api_url = format!(
            "{uri}/playlists/{id}/tracks?limit={limit}",
            uri = &config::spotify_apiurl(),
            id = playlist_id,
            limit = limit
        );

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = retry_after_secs(&response);
            if retry_after <= 120 {
                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }
            warning!(
                "Retry after has reached an abnormal high of {} seconds. Try again tomorrow.",
                retry_after
            );
        }

        let response = match response.error_for_status() {
            Ok(valid_response) => valid_response,
            Err(err) => {
                if let Some(status) = err.status() {
                    if status == StatusCode::BAD_GATEWAY {
                        sleep(Duration::from_secs(10)).await;
                        continue; // retry
                    }
                }
                return Err(err); // propagate other errors
            }
        };

        let res = response.json::<PlaylistTracksResponse>().await?;

        let tracks = res
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .filter(|track| track.preview_url.is_some())
            .filter(|track| !exclude.contains(&track.id))
            .collect();

        return Ok(tracks);
    }
}
