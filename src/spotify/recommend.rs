use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    recommend::{SeedSet, TargetFeatures},
    spotify::retry_after_secs,
    types::{AvailableGenreSeeds, RecommendationsResponse, Track},
    warning,
};

/// Fetches recommendation candidates for an assembled seed set.
///
/// Renders the seed categories and the optional target features as query
/// parameters on `/recommendations` and returns the raw candidate list;
/// deduplication and preview/exclusion filtering are the engine's job.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `seeds` - Assembled seed set (the endpoint requires at least one seed)
/// * `targets` - Optional audio-feature targets biasing the results
/// * `limit` - Maximum number of candidates to request (1-100)
///
/// # Retry Logic
///
/// Honors the `Retry-After` header on 429 responses and retries 502 Bad
/// Gateway after a 10-second delay. Other errors are propagated immediately.
pub async fn get_recommendations(
    token: &str,
    seeds: &SeedSet,
    targets: &TargetFeatures,
    limit: u32,
) -> Result<Vec<Track>, reqwest::Error> {
    loop {
        let mut params: Vec<String> = vec![format!("limit={limit}")];
        for (key, value) in seeds.query_params() {
            params.push(format!("{key}={value}"));
        }
        for (key, value) in targets.query_params() {
            params.push(format!("{key}={value}"));
        }

        let api_url = format!(
            "{uri}/recommendations?{query}",
            uri = &config::spotify_apiurl(),
            query = params.join("&")
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

        let res = response.json::<RecommendationsResponse>().await?;

        return Ok(res.tracks);
    }
}

/// Fetches the global list of genres accepted as recommendation seeds.
///
/// Used as the fallback seed source when the user has no liked history yet.
pub async fn get_available_genre_seeds(token: &str) -> Result<Vec<String>, reqwest::Error> {
    loop {
        let api_url = format!(
            "{uri}/recommendations/available-genre-seeds",
            uri = &config::spotify_apiurl()
        );

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = retry_after_secs(&response);
            if retry_after <= 120 {
                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }
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

        let res = response.json::<AvailableGenreSeeds>().await?;

        return Ok(res.genres);
    }
}
