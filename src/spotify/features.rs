use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    spotify::retry_after_secs,
    types::{AudioFeatures, AudioFeaturesResponse},
    warning,
};

// The audio-features endpoint accepts at most 100 ids per request.
const FEATURES_BATCH_SIZE: usize = 100;

/// Retrieves audio features for a list of tracks.
///
/// Issues one batched request per 100 ids against `/audio-features` and
/// returns the features in the same order as the input ids. Tracks Spotify
/// has no analysis for come back as `None` slots, mirroring the `null`
/// entries of the wire response.
///
/// # Retry Logic
///
/// Honors the `Retry-After` header on 429 responses and retries 502 Bad
/// Gateway after a 10-second delay. Other errors are propagated immediately.
pub async fn get_audio_features(
    token: &str,
    track_ids: &[String],
) -> Result<Vec<Option<AudioFeatures>>, reqwest::Error> {
    let mut features: Vec<Option<AudioFeatures>> = Vec::with_capacity(track_ids.len());

    for chunk in track_ids.chunks(FEATURES_BATCH_SIZE) {
        let batch = fetch_features_batch(token, chunk).await?;
        features.extend(batch);
    }

    Ok(features)
}

async fn fetch_features_batch(
    token: &str,
    track_ids: &[String],
) -> Result<Vec<Option<AudioFeatures>>, reqwest::Error> {
    loop {
        let api_url = format!(
            "{uri}/audio-features?ids={ids}",
            uri = &config::spotify_apiurl(),
            ids = track_ids.join(",")
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

        let res = response.json::<AudioFeaturesResponse>().await?;

        return Ok(res.audio_features);
    }
}
