use super::{Mood, Track};
use serde::Deserialize;

/// One track object as the Jamendo `/tracks` endpoint returns it.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogTrack {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    #[serde(default)]
    pub album_image: String,
    #[serde(default)]
    pub duration: f32,
    #[serde(default)]
    pub audio: String,
}

impl CatalogTrack {
    /// Normalize into the domain track, mapping empty wire strings to None.
    pub fn into_track(self, mood: Option<Mood>) -> Track {
        Track {
            id: self.id,
            title: self.name,
            artist: self.artist_name,
            artwork_url: none_if_empty(self.album_image),
            duration: self.duration,
            audio_url: none_if_empty(self.audio),
            mood,
        }
    }
}

fn none_if_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Envelope around `/tracks` results. The `headers` block with status/result
/// counts is ignored.
#[derive(Debug, Deserialize)]
pub struct TracksResponse {
    #[serde(default)]
    pub results: Vec<CatalogTrack>,
}

#[derive(Debug, Deserialize)]
pub struct LyricsResponse {
    pub lyrics: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_track_maps_empty_strings_to_none() {
        let wire = CatalogTrack {
            id: "42".to_string(),
            name: "Test Song".to_string(),
            artist_name: "Test Artist".to_string(),
            album_image: String::new(),
            duration: 213.0,
            audio: "https://example.com/42.mp3".to_string(),
        };

        let track = wire.into_track(Some(Mood::Happy));
        assert_eq!(track.id, "42");
        assert_eq!(track.artwork_url, None);
        assert_eq!(track.audio_url.as_deref(), Some("https://example.com/42.mp3"));
        assert_eq!(track.mood, Some(Mood::Happy));
        assert!(track.is_streamable());
    }

    #[test]
    fn test_tracks_response_tolerates_missing_fields() {
        let json = r#"{
            "headers": { "status": "success", "results_count": 1 },
            "results": [
                { "id": "7", "name": "A", "artist_name": "B", "duration": 100 }
            ]
        }"#;

        let parsed: TracksResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 1);
        let track = parsed.results[0].clone().into_track(None);
        assert!(!track.is_streamable());
        assert_eq!(track.duration, 100.0);
    }

    #[test]
    fn test_empty_results_parse() {
        let parsed: TracksResponse = serde_json::from_str(r#"{ "results": [] }"#).unwrap();
        assert!(parsed.results.is_empty());
    }
}
