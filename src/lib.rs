// The client id the Twitch web player used for these (legacy) endpoints
pub const TWIT_TWAT_CLIENT_ID: &str = "7ikopbkspr7556owm9krqmalvr2w0i4";

mod config;
pub use config::Config;

mod error;
pub use error::{ChannelNameError, EngineError, ResolveError};

mod channel;
pub use channel::ChannelName;

mod http;
pub use http::{StatefulAgent, Transport};

mod resolver;
pub use resolver::{PlaybackToken, PlaybackUrl, Resolver};

mod session;
pub use session::{
    Backend, Engine, EngineConfig, EngineState, Notification, PlaybackSession, SessionId,
    SessionManager, SessionState, Transition,
};

mod surface;
pub use surface::{BusReply, RenderTarget, SurfaceBinder, SurfaceHandle, SurfaceProvider};

mod input;
pub use input::{Gesture, Window, WindowState};

mod event;
pub use event::{Event, EventQueue, EventSender, Generation, Wake};

mod notice;
pub use notice::{Notice, Severity};

mod controller;
pub use controller::{Controller, Prompt};

pub mod util;

#[cfg(test)]
mod test_utils;
