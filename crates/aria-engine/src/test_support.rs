//! Fake media backend for synthetic-event tests.
//!
//! Tests drive the engine without audio hardware: the backend records every
//! bind and hands back handles through which a test can inspect resource
//! state and emit events for a specific binding.

use std::cell::RefCell;
use std::rc::Rc;

use aria_core::{Error, Result};
use crossbeam_channel::Sender;

use crate::media::{
    BindingId, MediaBackend, MediaResource, ResourceEvent, ResourceEventKind,
};

/// Observable state of one fake resource.
#[derive(Debug, Default)]
pub struct FakeState {
    pub playing: bool,
    pub position: f64,
    pub volume: f32,
    pub looping: bool,
    pub requires_unlock: bool,
    pub fail_play: bool,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub volume_history: Vec<f32>,
}

/// The resource handed to the engine.
pub struct FakeResource {
    state: Rc<RefCell<FakeState>>,
}

impl FakeResource {
    pub fn new(state: Rc<RefCell<FakeState>>) -> Self {
        Self { state }
    }
}

impl MediaResource for FakeResource {
    fn play(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_play {
            return Err(Error::Resource("playback refused".into()));
        }
        state.playing = true;
        state.play_calls += 1;
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state.borrow_mut();
        state.playing = false;
        state.pause_calls += 1;
    }

    fn position(&self) -> f64 {
        self.state.borrow().position
    }

    fn set_position(&mut self, secs: f64) {
        self.state.borrow_mut().position = secs;
    }

    fn set_volume(&mut self, volume: f32) {
        let mut state = self.state.borrow_mut();
        state.volume = volume;
        state.volume_history.push(volume);
    }

    fn set_looping(&mut self, looping: bool) {
        self.state.borrow_mut().looping = looping;
    }

    fn requires_unlock(&self) -> bool {
        self.state.borrow().requires_unlock
    }
}

/// The test's view of one bind: shared resource state plus the means to
/// emit events tagged with the bind's identity.
pub struct FakeHandle {
    pub media_path: String,
    pub binding: BindingId,
    pub state: Rc<RefCell<FakeState>>,
    events: Sender<ResourceEvent>,
}

impl FakeHandle {
    fn emit(&self, kind: ResourceEventKind) {
        let _ = self.events.send(ResourceEvent::new(self.binding, kind));
    }

    pub fn emit_ready(&self) {
        self.emit(ResourceEventKind::Ready);
    }

    pub fn emit_position(&self, secs: f64) {
        self.emit(ResourceEventKind::Position(secs));
    }

    pub fn emit_ended(&self) {
        self.emit(ResourceEventKind::Ended);
    }

    pub fn emit_error(&self, message: &str) {
        self.emit(ResourceEventKind::Error(message.into()));
    }
}

/// Backend recording every bind into a shared log.
pub struct FakeBackend {
    handles: Rc<RefCell<Vec<FakeHandle>>>,
    pub fail_bind: bool,
    pub requires_unlock: bool,
}

impl FakeBackend {
    /// Returns the backend and the shared bind log the test keeps.
    pub fn new() -> (Self, Rc<RefCell<Vec<FakeHandle>>>) {
        let handles = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                handles: handles.clone(),
                fail_bind: false,
                requires_unlock: false,
            },
            handles,
        )
    }
}

impl MediaBackend for FakeBackend {
    type Resource = FakeResource;

    fn bind(
        &mut self,
        media_path: &str,
        binding: BindingId,
        events: Sender<ResourceEvent>,
    ) -> Result<Self::Resource> {
        if self.fail_bind {
            return Err(Error::ResourceLoad(format!(
                "cannot open {media_path}"
            )));
        }

        let state = Rc::new(RefCell::new(FakeState {
            requires_unlock: self.requires_unlock,
            ..FakeState::default()
        }));
        self.handles.borrow_mut().push(FakeHandle {
            media_path: media_path.into(),
            binding,
            state: state.clone(),
            events,
        });
        Ok(FakeResource::new(state))
    }
}
