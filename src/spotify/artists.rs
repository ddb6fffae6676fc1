use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{config, spotify::retry_after_secs, types::ArtistDetails, warning};

/// Retrieves full artist metadata, including the genre list used for
/// recommendation seeding.
///
/// # Retry Logic
///
/// Honors the `Retry-After` header on 429 responses and retries 502 Bad
/// Gateway after a 10-second delay. Other errors are propagated immediately.
pub async fn get_artist(token: &str, artist_id: &str) -> Result<ArtistDetails, reqwest::Error> {
    loop {
        let api_url = format!(
            "{uri}/artists/{id}",
            uri = &config::spotify_apiurl(),
            id = artist_id
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

        return response.json::<ArtistDetails>().await;
    }
}
