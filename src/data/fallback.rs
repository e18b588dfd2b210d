/// Local sample tracks used whenever the catalog returns nothing - offline,
/// rate-limited, or simply no results for a mood tag.
use crate::models::{Mood, Track};

fn sample_tracks() -> Vec<Track> {
    vec![
        Track {
            id: "fallback-1".to_string(),
            title: "Summer Memories".to_string(),
            artist: "Ocean Waves".to_string(),
            artwork_url: Some("https://picsum.photos/id/1019/300".to_string()),
            duration: 213.0,
            audio_url: None,
            mood: Some(Mood::Happy),
        },
        Track {
            id: "fallback-2".to_string(),
            title: "Rainy Days".to_string(),
            artist: "City Lights".to_string(),
            artwork_url: Some("https://picsum.photos/id/1039/300".to_string()),
            duration: 187.0,
            audio_url: None,
            mood: Some(Mood::Sad),
        },
        Track {
            id: "fallback-3".to_string(),
            title: "Mountain Sunrise".to_string(),
            artist: "Nature Sounds".to_string(),
            artwork_url: Some("https://picsum.photos/id/1018/300".to_string()),
            duration: 245.0,
            audio_url: None,
            mood: Some(Mood::Relaxed),
        },
        Track {
            id: "fallback-4".to_string(),
            title: "City Rhythm".to_string(),
            artist: "Urban Beats".to_string(),
            artwork_url: Some("https://picsum.photos/id/1071/300".to_string()),
            duration: 198.0,
            audio_url: None,
            mood: Some(Mood::Energetic),
        },
        Track {
            id: "fallback-5".to_string(),
            title: "Sunset Love".to_string(),
            artist: "Evening Sky".to_string(),
            artwork_url: Some("https://picsum.photos/id/1082/300".to_string()),
            duration: 222.0,
            audio_url: None,
            mood: Some(Mood::Romantic),
        },
    ]
}

/// The fixed sample list filtered to the given mood. May be empty for moods
/// without a sample entry.
pub fn fallback_tracks(mood: Mood) -> Vec<Track> {
    sample_tracks()
        .into_iter()
        .filter(|t| t.mood == Some(mood))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_filters_by_mood() {
        let happy = fallback_tracks(Mood::Happy);
        assert_eq!(happy.len(), 1);
        assert_eq!(happy[0].title, "Summer Memories");
        assert!(happy.iter().all(|t| t.mood == Some(Mood::Happy)));
    }

    #[test]
    fn test_fallback_may_be_empty() {
        assert!(fallback_tracks(Mood::Motivated).is_empty());
    }

    #[test]
    fn test_fallback_tracks_are_not_streamable() {
        for mood in Mood::ALL {
            assert!(fallback_tracks(mood).iter().all(|t| !t.is_streamable()));
        }
    }
}
