use std::{collections::VecDeque, sync::Arc};

use crate::{
    util::{self, Volume},
    Backend, ChannelName, ChannelNameError, EngineConfig, Event, EventSender, Generation, Gesture,
    Notice, Notification, PlaybackUrl, ResolveError, Resolver, SessionId, SessionManager,
    Transition, Transport, Window,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Channel { initial: String },
    SpeedCap { initial: String },
}

impl Prompt {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Channel { .. } => "Enter channel",
            Self::SpeedCap { .. } => "Max kbps",
        }
    }

    pub fn initial(&self) -> &str {
        match self {
            Self::Channel { initial } | Self::SpeedCap { initial } => initial,
        }
    }

    /// The event to post when the prompt is submitted with `text`
    pub fn submit(&self, text: impl Into<String>) -> Event {
        match self {
            Self::Channel { .. } => Event::ChannelSubmitted(text.into()),
            Self::SpeedCap { .. } => Event::SpeedCapSubmitted(text.into()),
        }
    }
}

/// Owns all of the player state. Every mutation goes through [`Controller::handle`].
pub struct Controller<T, B: Backend> {
    resolver: Arc<Resolver<T>>,
    sessions: SessionManager<B>,
    events: EventSender,

    channel: ChannelName,
    connection_speed: u64,
    generation: Generation,

    prompt: Option<Prompt>,
    notices: VecDeque<Notice>,
}

impl<T, B> Controller<T, B>
where
    T: Transport + 'static,
    B: Backend,
{
    pub fn new(resolver: Resolver<T>, backend: B, events: EventSender) -> Self {
        Self {
            resolver: Arc::new(resolver),
            sessions: SessionManager::new(backend),
            events,
            channel: ChannelName::default(),
            connection_speed: 0,
            generation: Generation::default(),
            prompt: None,
            notices: VecDeque::new(),
        }
    }

    pub fn channel(&self) -> &ChannelName {
        &self.channel
    }

    pub fn connection_speed(&self) -> u64 {
        self.connection_speed
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn sessions(&self) -> &SessionManager<B> {
        &self.sessions
    }

    pub fn volume(&self) -> Option<Volume> {
        self.sessions.volume()
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// The notice currently shown, the rest wait behind it
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn handle(&mut self, event: Event, window: &mut dyn Window) {
        match event {
            Event::Gesture(gesture) => self.on_gesture(gesture, window),

            Event::ChannelSubmitted(text) => {
                self.prompt.take();
                self.submit_channel(&text)
            }

            Event::SpeedCapSubmitted(text) => {
                self.prompt.take();
                self.submit_connection_speed(&text)
            }

            Event::PromptCancelled => {
                self.prompt.take();
            }

            Event::NoticeDismissed => {
                self.notices.pop_front();
            }

            Event::Resolved {
                generation,
                channel,
                result,
            } => self.on_resolved(generation, channel, result),

            Event::Engine { id, notification } => self.on_notification(id, notification),
        }
    }

    /// Switches to `input` (or re-resolves the current channel when blank)
    pub fn submit_channel(&mut self, input: &str) {
        match ChannelName::parse(input) {
            Ok(channel) => self.channel = channel,
            Err(ChannelNameError::Blank) => {}
            Err(err) => return self.notify(Notice::error(err)),
        }

        if self.channel.is_empty() {
            log::debug!("no channel to resolve");
            return;
        }

        self.request_resolution();
    }

    /// Stops playback, without waiting on any resolution still in flight
    pub fn shutdown(&mut self) {
        if let Some(id) = self.sessions.stop() {
            log::info!("stopped {}", id);
        }
    }

    fn submit_connection_speed(&mut self, input: &str) {
        match util::parse_connection_speed(input) {
            Ok(kbps) => {
                log::info!("max kbps for new sessions: {}", kbps);
                self.connection_speed = kbps;
            }
            Err(err) => self.notify(Notice::error(format!(
                "invalid bandwidth limit '{}': {}",
                input.trim(),
                err
            ))),
        }
    }

    fn request_resolution(&mut self) {
        self.generation = self.generation.next();

        let generation = self.generation;
        let channel = self.channel.clone();
        let resolver = Arc::clone(&self.resolver);
        let events = self.events.clone();

        log::debug!("resolving {} ({:?})", channel, generation);
        let spawned = std::thread::Builder::new()
            .name(format!("resolve-{}", channel))
            .spawn(move || {
                let result = resolver.resolve(&channel);
                events.send(Event::Resolved {
                    generation,
                    channel,
                    result,
                });
            });

        if let Err(err) = spawned {
            self.notify(Notice::error(format!("cannot start resolving: {}", err)))
        }
    }

    fn on_resolved(
        &mut self,
        generation: Generation,
        channel: ChannelName,
        result: Result<PlaybackUrl, ResolveError>,
    ) {
        if generation != self.generation {
            log::debug!(
                "discarding {:?} for {}, waiting on {:?}",
                generation,
                channel,
                self.generation
            );
            return;
        }

        let url = match result {
            Ok(url) => url,
            Err(ResolveError::ChannelOffline) => {
                return self.notify(Notice::info(ResolveError::ChannelOffline))
            }
            Err(err) => {
                log::warn!("cannot resolve {}: {}", channel, err);
                return self.notify(Notice::error(err));
            }
        };

        let config = EngineConfig {
            uri: url.to_string(),
            latency: self.resolver.config().latency,
            connection_speed: self.connection_speed,
        };

        if let Err(err) = self.sessions.replace(config) {
            self.notify(Notice::error(err))
        }
    }

    fn on_notification(&mut self, id: SessionId, notification: Notification) {
        match self.sessions.handle(id, notification) {
            Transition::Ended => self.notify(Notice::info("Broadcast finished")),
            Transition::Failed(message) => self.notify(Notice::error(message)),
            _ => {}
        }
    }

    fn on_gesture(&mut self, gesture: Gesture, window: &mut dyn Window) {
        if gesture.apply_to_window(window) {
            return;
        }

        let step = self.resolver.config().volume_step;
        match gesture {
            Gesture::Quit => {
                self.shutdown();
                window.close();
            }
            Gesture::Close => self.shutdown(),
            Gesture::VolumeUp => self.adjust_volume(step),
            Gesture::VolumeDown => self.adjust_volume(-step),
            Gesture::EnterChannel => {
                self.prompt = Some(Prompt::Channel {
                    initial: self.channel.to_string(),
                })
            }
            Gesture::SetSpeedCap => {
                self.prompt = Some(Prompt::SpeedCap {
                    initial: self.connection_speed.to_string(),
                })
            }
            Gesture::ShowControls => self.notify(Notice::info(util::CONTROLS).titled("Controls")),
            Gesture::Escape | Gesture::DoubleClick => {}
        }
    }

    fn adjust_volume(&mut self, delta: f64) {
        if let Some(volume) = self.sessions.adjust_volume(delta) {
            log::trace!("volume: {}", volume);
        }
    }

    fn notify(&mut self, notice: Notice) {
        log::debug!("notice: {:?}", notice);
        self.notices.push_back(notice);
    }
}
