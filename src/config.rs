use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub client_id: String,
    /// Base of the kraken `streams` endpoint and the `access_token` endpoint
    pub api_base: String,
    /// Base of the hls playlists
    pub usher_base: String,
    /// How much the engine buffers before it starts playing
    pub latency: Duration,
    /// Volume change for a single `+` / `-`
    pub volume_step: f64,
    /// Upper bound for a single request, connecting included
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: crate::TWIT_TWAT_CLIENT_ID.to_string(),
            api_base: "https://api.twitch.tv".to_string(),
            usher_base: "http://usher.twitch.tv".to_string(),
            latency: Duration::from_secs(2),
            volume_step: 0.0125,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn streams_endpoint(&self) -> String {
        format!("{}/kraken/streams", self.api_base.trim_end_matches('/'))
    }

    pub fn access_token_endpoint(&self, channel: &str) -> String {
        format!(
            "{}/api/channels/{}/access_token",
            self.api_base.trim_end_matches('/'),
            channel
        )
    }

    pub fn playlist_endpoint(&self, channel: &str) -> String {
        format!(
            "{}/api/channel/hls/{}.m3u8",
            self.usher_base.trim_end_matches('/'),
            channel
        )
    }
}
