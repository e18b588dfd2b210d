use once_cell::sync::Lazy;
use std::time::Duration;

// Shared API client with a request timeout. Media streaming uses a separate
// client because an audio stream legitimately outlives any sane timeout.
static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("moodtune/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(15))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("[Http] Falling back to default client: {}", e);
            reqwest::Client::new()
        })
});

static STREAM_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("moodtune/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("[Http] Falling back to default stream client: {}", e);
            reqwest::Client::new()
        })
});

pub fn client() -> &'static reqwest::Client {
    &CLIENT
}

pub fn stream_client() -> &'static reqwest::Client {
    &STREAM_CLIENT
}
