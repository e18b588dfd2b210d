use crate::models::Track;

/// Fetched content and the in-flight bookkeeping around it.
///
/// Each catalog channel (mood browse, search) tags its requests with its own
/// monotonically increasing generation. A response carrying an older
/// generation than its channel's current one is stale and gets discarded, so
/// a slow response can never overwrite newer results. The counters are per
/// channel: dispatching a search must not invalidate an in-flight mood fetch,
/// or vice versa.
pub struct ContentState {
    // Mood browse results
    pub mood_tracks: Vec<Track>,
    pub mood_loading: bool,
    pub used_fallback: bool,

    // Search screen
    pub search_query: String,
    pub search_results: Vec<Track>,
    pub search_loading: bool,

    // Lyrics for the current track
    pub lyrics: Option<String>,
    pub lyrics_loading: bool,

    mood_generation: u64,
    search_generation: u64,
}

impl Default for ContentState {
    fn default() -> Self {
        Self {
            mood_tracks: Vec::new(),
            mood_loading: false,
            used_fallback: false,
            search_query: String::new(),
            search_results: Vec::new(),
            search_loading: false,
            lyrics: None,
            lyrics_loading: false,
            mood_generation: 0,
            search_generation: 0,
        }
    }
}

impl ContentState {
    /// Bump and return the generation for a new mood fetch. Any mood result
    /// tagged with an older generation is stale from this point on.
    pub fn next_mood_generation(&mut self) -> u64 {
        self.mood_generation += 1;
        self.mood_generation
    }

    pub fn is_current_mood(&self, generation: u64) -> bool {
        generation == self.mood_generation
    }

    /// Bump and return the generation for a new search. Any search result
    /// tagged with an older generation is stale from this point on.
    pub fn next_search_generation(&mut self) -> u64 {
        self.search_generation += 1;
        self.search_generation
    }

    pub fn is_current_search(&self, generation: u64) -> bool {
        generation == self.search_generation
    }

    pub fn clear_search(&mut self) {
        self.search_results.clear();
        self.search_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_guard_discards_stale_responses() {
        let mut content = ContentState::default();

        let first = content.next_mood_generation();
        let second = content.next_mood_generation();

        // The older request's response arrives last and must be dropped
        assert!(content.is_current_mood(second));
        assert!(!content.is_current_mood(first));
    }

    #[test]
    fn test_generations_increase_monotonically() {
        let mut content = ContentState::default();
        let a = content.next_search_generation();
        let b = content.next_search_generation();
        let c = content.next_search_generation();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_channels_track_generations_independently() {
        let mut content = ContentState::default();

        let mood = content.next_mood_generation();
        // A search dispatched afterwards must not stale the mood fetch
        let search = content.next_search_generation();

        assert!(content.is_current_mood(mood));
        assert!(content.is_current_search(search));

        // And a newer mood fetch leaves the search current
        content.next_mood_generation();
        assert!(content.is_current_search(search));
    }
}
