//! Stand-ins for the engine, the window and the network

use std::{cell::RefCell, rc::Rc, sync::Mutex};

use crate::{
    Backend, Engine, EngineConfig, EngineError, EngineState, ResolveError, SessionId, Transport,
    Window, WindowState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Create(SessionId, EngineConfig),
    SetState(SessionId, EngineState),
    Drop(SessionId),
}

struct Shared {
    ops: Vec<Op>,
    volume: f64,
    fail_next: bool,
}

#[derive(Clone)]
pub struct FakeBackend(Rc<RefCell<Shared>>);

impl Default for FakeBackend {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(Shared {
            ops: Vec::new(),
            volume: 1.0,
            fail_next: false,
        })))
    }
}

impl FakeBackend {
    pub fn take_ops(&self) -> Vec<Op> {
        std::mem::take(&mut self.0.borrow_mut().ops)
    }

    pub fn volume(&self) -> f64 {
        self.0.borrow().volume
    }

    pub fn set_volume(&self, volume: f64) {
        self.0.borrow_mut().volume = volume;
    }

    pub fn fail_next_state_change(&self) {
        self.0.borrow_mut().fail_next = true;
    }
}

impl Backend for FakeBackend {
    type Engine = FakeEngine;

    fn create(&mut self, id: SessionId, config: &EngineConfig) -> Result<FakeEngine, EngineError> {
        self.0.borrow_mut().ops.push(Op::Create(id, config.clone()));
        Ok(FakeEngine {
            id,
            shared: Rc::clone(&self.0),
        })
    }
}

pub struct FakeEngine {
    id: SessionId,
    shared: Rc<RefCell<Shared>>,
}

impl Engine for FakeEngine {
    fn set_state(&mut self, state: EngineState) -> Result<(), EngineError> {
        let mut shared = self.shared.borrow_mut();
        if std::mem::take(&mut shared.fail_next) {
            return Err(EngineError::State(format!("cannot go to {state:?}")));
        }
        shared.ops.push(Op::SetState(self.id, state));
        Ok(())
    }

    fn volume(&self) -> f64 {
        self.shared.borrow().volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.shared.borrow_mut().volume = volume;
    }
}

impl Drop for FakeEngine {
    fn drop(&mut self) {
        self.shared.borrow_mut().ops.push(Op::Drop(self.id));
    }
}

#[derive(Default, Debug)]
pub struct FakeWindow {
    pub state: WindowState,
    pub closed: bool,
}

impl Window for FakeWindow {
    fn state(&self) -> WindowState {
        self.state
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.state.fullscreen = fullscreen;
    }

    fn set_maximized(&mut self, maximized: bool) {
        self.state.maximized = maximized;
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Every request fails with `status`
pub struct Unreachable(pub u16);

impl Transport for Unreachable {
    fn get(&self, endpoint: &str, _query: &[(&str, &str)]) -> Result<String, ResolveError> {
        Err(ResolveError::Status {
            endpoint: endpoint.to_string(),
            status: self.0,
        })
    }
}

/// Answers the streams query with `streams` and the token query with `token`
pub struct Canned {
    pub streams: &'static str,
    pub token: &'static str,
    pub calls: Mutex<Vec<String>>,
}

impl Canned {
    pub fn new(streams: &'static str, token: &'static str) -> Self {
        Self {
            streams,
            token,
            calls: Mutex::default(),
        }
    }
}

impl Transport for Canned {
    fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String, ResolveError> {
        let query = query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        self.calls.lock().unwrap().push(match query.is_empty() {
            true => endpoint.to_string(),
            false => format!("{endpoint}?{query}"),
        });
        match endpoint.ends_with("/kraken/streams") {
            true => Ok(self.streams.to_string()),
            false => Ok(self.token.to_string()),
        }
    }
}
