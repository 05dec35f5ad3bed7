use std::{sync::Arc, time::Duration};

use crossbeam_channel::{Receiver, Sender};

use crate::{ChannelName, Gesture, Notification, PlaybackUrl, ResolveError, SessionId};

/// Counts channel resolutions, so a late answer to an older one can be told apart
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Debug)]
pub enum Event {
    Gesture(Gesture),
    ChannelSubmitted(String),
    SpeedCapSubmitted(String),
    PromptCancelled,
    NoticeDismissed,
    Resolved {
        generation: Generation,
        channel: ChannelName,
        result: Result<PlaybackUrl, ResolveError>,
    },
    Engine {
        id: SessionId,
        notification: Notification,
    },
}

/// Lets producers on other threads poke the event loop
pub trait Wake: Send + Sync {
    fn wake(&self);
}

impl Wake for () {
    fn wake(&self) {}
}

#[derive(Clone)]
pub struct EventSender {
    tx: Sender<Event>,
    waker: Arc<dyn Wake>,
}

impl EventSender {
    pub fn send(&self, event: Event) {
        if let Err(crossbeam_channel::SendError(event)) = self.tx.send(event) {
            log::debug!("event loop is gone, dropping {:?}", event);
            return;
        }
        self.waker.wake();
    }
}

impl std::fmt::Debug for EventSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSender").finish_non_exhaustive()
    }
}

/// The single consumer side of every asynchronous result
pub struct EventQueue {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self, waker: Arc<dyn Wake>) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
            waker,
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Event> {
        self.rx.recv_timeout(timeout).ok()
    }

    pub fn drain(&self) -> impl Iterator<Item = Event> + '_ {
        self.rx.try_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter(AtomicUsize);
    impl Wake for Counter {
        fn wake(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn sending_wakes_the_loop() {
        let queue = EventQueue::new();
        let counter = Arc::new(Counter::default());
        let sender = queue.sender(counter.clone());

        let handle = std::thread::spawn(move || {
            sender.send(Event::Gesture(Gesture::VolumeUp));
            sender.send(Event::NoticeDismissed);
        });
        handle.join().unwrap();

        let events = queue.drain().collect::<Vec<_>>();
        assert!(matches!(
            events[..],
            [Event::Gesture(Gesture::VolumeUp), Event::NoticeDismissed]
        ));
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
        assert!(queue.drain().next().is_none());
    }

    #[test]
    fn generations_increase() {
        let first = Generation::default();
        assert!(first.next() > first);
        assert_eq!(first.next(), Generation::default().next());
    }
}
