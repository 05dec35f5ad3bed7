#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Channel offline")]
    ChannelOffline,

    #[error("cannot reach {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("unexpected response from {endpoint}: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot build the playback url: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelNameError {
    #[error("no channel given")]
    Blank,

    #[error("'{name}' is not a channel name ('{ch}' is not allowed, only a-z, 0-9 and _)")]
    Invalid { name: String, ch: char },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("cannot create the playback engine: {0}")]
    Create(String),

    #[error("cannot change the playback state: {0}")]
    State(String),
}
