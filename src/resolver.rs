use rand::Rng as _;

use crate::{ChannelName, Config, ResolveError, Transport};

/// The signed credential pair handed out by the `access_token` endpoint
#[derive(Clone, PartialEq, Eq, serde::Deserialize)]
pub struct PlaybackToken {
    #[serde(rename = "sig")]
    pub signature: String,
    pub token: String,
}

impl std::fmt::Debug for PlaybackToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackToken")
            .field("signature", &self.signature)
            .field("token", &format_args!("<{} bytes>", self.token.len()))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackUrl(url::Url);

impl PlaybackUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for PlaybackUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Resolver<T> {
    config: Config,
    transport: T,
}

impl<T: Transport> Resolver<T> {
    pub const PLAYER_SESSION_RANGE: std::ops::Range<u32> = 0..1_000_000;

    pub fn new(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Asks whether `channel` is live, and if it is, signs a playlist url for it.
    ///
    /// This blocks for two sequential requests. The access token is only
    /// requested once the channel is known to be live.
    pub fn resolve(&self, channel: &ChannelName) -> Result<PlaybackUrl, ResolveError> {
        if !self.is_live(channel)? {
            log::info!("{} is offline", channel);
            return Err(ResolveError::ChannelOffline);
        }

        let token = self.access_token(channel)?;
        log::debug!("got {:?} for {}", token, channel);

        let player = rand::rng().random_range(Self::PLAYER_SESSION_RANGE);
        self.playback_url(channel, &token, player)
    }

    pub fn playback_url(
        &self,
        channel: &ChannelName,
        token: &PlaybackToken,
        player: u32,
    ) -> Result<PlaybackUrl, ResolveError> {
        let player = player.to_string();
        url::Url::parse_with_params(
            &self.config.playlist_endpoint(channel),
            [
                ("player", "twitchweb"),
                ("token", &*token.token),
                ("sig", &*token.signature),
                ("allow_audio_only", "true"),
                ("allow_source", "true"),
                ("type", "any"),
                ("p", &*player),
            ],
        )
        .map(PlaybackUrl)
        .map_err(Into::into)
    }

    fn is_live(&self, channel: &ChannelName) -> Result<bool, ResolveError> {
        #[derive(serde::Deserialize)]
        struct Streams {
            #[serde(rename = "_total")]
            total: i64,
        }

        let endpoint = self.config.streams_endpoint();
        let body = self.transport.get(&endpoint, &[("channel", channel.as_str())])?;
        let Streams { total } = parse(&endpoint, &body)?;

        log::debug!("{} has {} live stream(s)", channel, total);
        Ok(total == 1)
    }

    fn access_token(&self, channel: &ChannelName) -> Result<PlaybackToken, ResolveError> {
        let endpoint = self.config.access_token_endpoint(channel);
        let body = self.transport.get(&endpoint, &[])?;
        parse(&endpoint, &body)
    }
}

fn parse<T: serde::de::DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, ResolveError> {
    serde_json::from_str(body).map_err(|source| ResolveError::Parse {
        endpoint: endpoint.to_string(),
        source,
    })
}
