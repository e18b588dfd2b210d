// Lyrics lookup against lyrics.ovh
use crate::constants::LYRICS_BASE_URL;
use crate::models::LyricsResponse;

/// Fetch lyrics for a track. None on any failure - the UI renders that as
/// "not available".
pub async fn lyrics(artist: &str, title: &str) -> Option<String> {
    let url = format!(
        "{}/{}/{}",
        LYRICS_BASE_URL,
        urlencoding::encode(artist),
        urlencoding::encode(title)
    );

    match request_lyrics(&url).await {
        Ok(text) => Some(text),
        Err(e) => {
            log::debug!("[Lyrics] No lyrics for '{}' - '{}': {}", artist, title, e);
            None
        }
    }
}

async fn request_lyrics(url: &str) -> Result<String, Box<dyn std::error::Error>> {
    let response = crate::utils::http::client().get(url).send().await?;

    if !response.status().is_success() {
        return Err(format!("API returned status: {}", response.status()).into());
    }

    let parsed: LyricsResponse = response.json().await?;
    Ok(parsed.lyrics)
}
