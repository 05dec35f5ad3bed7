use std::time::Duration;

use crate::{util::Volume, EngineError};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub uri: String,
    pub latency: Duration,
    /// In kbps, 0 is unbounded
    pub connection_speed: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineState {
    Null,
    Paused,
    Playing,
}

pub trait Engine {
    fn set_state(&mut self, state: EngineState) -> Result<(), EngineError>;
    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);
}

pub trait Backend {
    type Engine: Engine;

    /// Builds an engine for `config`, delivering its notifications tagged with `id`.
    ///
    /// Notifications must be wired up before this returns. The engine is left
    /// in its initial (null) state.
    fn create(&mut self, id: SessionId, config: &EngineConfig) -> Result<Self::Engine, EngineError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    EndOfStream,
    Error(String),
    Buffering(u8),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Preparing,
    Paused,
    Playing,
}

/// What a notification did to the active session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Paused,
    Playing,
    /// The broadcast finished, the session was stopped and released
    Ended,
    /// The engine failed, the session was stopped and released
    Failed(String),
    /// The notification was for a session that no longer exists
    Ignored,
}

pub struct PlaybackSession<E> {
    id: SessionId,
    engine: E,
    state: SessionState,
}

impl<E: Engine> PlaybackSession<E> {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    fn shutdown(mut self) {
        if let Err(err) = self.engine.set_state(EngineState::Null) {
            log::warn!("cannot stop {}: {}", self.id, err);
        }
        log::debug!("released {}", self.id);
    }

    fn change(&mut self, state: SessionState) -> bool {
        let target = match state {
            SessionState::Paused | SessionState::Preparing => EngineState::Paused,
            SessionState::Playing => EngineState::Playing,
            SessionState::Idle => EngineState::Null,
        };

        match self.engine.set_state(target) {
            Ok(()) => {
                log::debug!("{}: {:?} -> {:?}", self.id, self.state, state);
                self.state = state;
                true
            }
            Err(err) => {
                // the engine follows up with an error notification of its own
                log::warn!("{}: cannot go to {:?}: {}", self.id, state, err);
                false
            }
        }
    }
}

/// Owns the single active playback session
pub struct SessionManager<B: Backend> {
    backend: B,
    active: Option<PlaybackSession<B::Engine>>,
    next_id: u64,
}

impl<B: Backend> SessionManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            active: None,
            next_id: 0,
        }
    }

    pub fn active(&self) -> Option<&PlaybackSession<B::Engine>> {
        self.active.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.active
            .as_ref()
            .map_or(SessionState::Idle, PlaybackSession::state)
    }

    /// Stops and releases the active session (if any), then prepares a new one for `config`.
    ///
    /// The new engine is paused rather than played so buffering drives the
    /// switch to playing.
    pub fn replace(&mut self, config: EngineConfig) -> Result<SessionId, EngineError> {
        self.stop();

        self.next_id += 1;
        let id = SessionId(self.next_id);

        let engine = self.backend.create(id, &config)?;
        let mut session = PlaybackSession {
            id,
            engine,
            state: SessionState::Idle,
        };

        if let Err(err) = session.engine.set_state(EngineState::Paused) {
            session.shutdown();
            return Err(err);
        }
        session.state = SessionState::Preparing;

        log::info!(
            "{}: preparing {} (latency: {:?}, max kbps: {})",
            id,
            config.uri,
            config.latency,
            config.connection_speed
        );
        self.active = Some(session);
        Ok(id)
    }

    /// Synchronously stops the active session. Returns the id of the released session.
    pub fn stop(&mut self) -> Option<SessionId> {
        let session = self.active.take()?;
        let id = session.id;
        session.shutdown();
        Some(id)
    }

    pub fn handle(&mut self, id: SessionId, notification: Notification) -> Transition {
        let session = match &mut self.active {
            Some(session) if session.id == id => session,
            _ => {
                log::debug!("ignoring {:?} for stale {}", notification, id);
                return Transition::Ignored;
            }
        };

        match notification {
            Notification::Buffering(percent) => {
                let state = session.state;
                if percent < 100 && state == SessionState::Playing {
                    if session.change(SessionState::Paused) {
                        return Transition::Paused;
                    }
                } else if percent >= 100 && state != SessionState::Playing {
                    if session.change(SessionState::Playing) {
                        return Transition::Playing;
                    }
                }
                Transition::Unchanged
            }
            Notification::EndOfStream => {
                log::info!("{}: end of stream", id);
                self.stop();
                Transition::Ended
            }
            Notification::Error(message) => {
                log::error!("{}: {}", id, message);
                self.stop();
                Transition::Failed(message)
            }
        }
    }

    pub fn volume(&self) -> Option<Volume> {
        let session = self.active.as_ref()?;
        Some(Volume::new(session.engine.volume()))
    }

    /// Nudges the volume of the active session by `delta`. Returns the new volume.
    pub fn adjust_volume(&mut self, delta: f64) -> Option<Volume> {
        let session = self.active.as_mut()?;
        let volume = Volume::new(session.engine.volume()).offset(delta);
        session.engine.set_volume(volume.value());
        Some(volume)
    }
}

impl<B: Backend> Drop for SessionManager<B> {
    fn drop(&mut self) {
        self.stop();
    }
}
