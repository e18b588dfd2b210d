// Jamendo track-catalog endpoints
//
// The public surface never fails: transport, status and parse errors are
// logged and collapsed to an empty result, and the app layer substitutes the
// local fallback list when appropriate. No retry, no caching.
use crate::constants::{CATALOG_BASE_URL, CATALOG_PAGE_LIMIT};
use crate::models::{CatalogTrack, Mood, Track, TracksResponse};

/// Fetch tracks tagged for a mood. Empty on any failure.
pub async fn tracks_by_mood(mood: Mood) -> Vec<Track> {
    let url = format!(
        "{}/tracks/?client_id={}&format=json&limit={}&tags={}",
        CATALOG_BASE_URL,
        crate::JAMENDO_CLIENT_ID,
        CATALOG_PAGE_LIMIT,
        mood.catalog_tags()
    );

    match request_tracks(&url).await {
        Ok(results) => {
            log::debug!(
                "[Catalog] Mood '{}' returned {} tracks",
                mood,
                results.len()
            );
            results
                .into_iter()
                .map(|t| t.into_track(Some(mood)))
                .collect()
        }
        Err(e) => {
            log::error!("[Catalog] Mood lookup failed for '{}': {}", mood, e);
            Vec::new()
        }
    }
}

/// Free-text search. Empty on any failure.
pub async fn search(query: &str) -> Vec<Track> {
    let url = format!(
        "{}/tracks/?client_id={}&format=json&limit={}&search={}",
        CATALOG_BASE_URL,
        crate::JAMENDO_CLIENT_ID,
        CATALOG_PAGE_LIMIT,
        urlencoding::encode(query)
    );

    match request_tracks(&url).await {
        Ok(results) => {
            log::debug!(
                "[Catalog] Search '{}' returned {} tracks",
                query,
                results.len()
            );
            results.into_iter().map(|t| t.into_track(None)).collect()
        }
        Err(e) => {
            log::error!("[Catalog] Search failed for '{}': {}", query, e);
            Vec::new()
        }
    }
}

async fn request_tracks(url: &str) -> Result<Vec<CatalogTrack>, Box<dyn std::error::Error>> {
    let response = crate::utils::http::client().get(url).send().await?;

    if !response.status().is_success() {
        return Err(format!("API returned status: {}", response.status()).into());
    }

    let parsed: TracksResponse = response.json().await?;
    Ok(parsed.results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_is_an_error_not_a_panic() {
        let rt = crate::utils::error_handling::create_runtime().unwrap();
        // Nothing listens here; the request fails without reaching a network
        let result = rt.block_on(request_tracks("http://127.0.0.1:1/tracks"));
        assert!(result.is_err());
    }
}
